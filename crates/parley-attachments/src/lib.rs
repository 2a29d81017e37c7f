//! File-parsing collaborators for chat uploads.
//!
//! PDFs are reduced to their concatenated page text, images to a decoded
//! bitmap's dimensions. Nothing here touches a conversation; callers decide
//! what to inject.

pub mod bitmap;
pub mod error;
pub mod kind;
pub mod loader;
pub mod pdf;

pub use error::{AttachmentError, Result};
pub use kind::AttachmentKind;
pub use loader::{Attachment, AttachmentContent, AttachmentLoader, FileLoader};
