pub mod conversation;
pub mod error;
pub mod models;
pub mod settings;
pub mod store;
pub mod upload;

pub use conversation::{Conversation, Exchange, ModelCall, ReplyState};
pub use error::{Result, SessionError};
pub use models::{Session, Turn, TurnRole, UploadedFiles};
pub use settings::{StoreSettings, DEFAULT_GREETING, NEW_CHAT_TITLE};
pub use store::ChatStore;
pub use upload::describe_upload;

pub use parley_attachments::{Attachment, AttachmentKind};
