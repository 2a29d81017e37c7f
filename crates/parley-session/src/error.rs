use parley_attachments::AttachmentError;
use parley_llm::LlmError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Chat not found: {0}")]
    NotFound(String),

    #[error("A chat named {0:?} already exists")]
    TitleTaken(String),

    #[error("Message is empty")]
    EmptyMessage,

    #[error("Model reply for {0:?} is still pending")]
    Pending(String),

    #[error("Model call failed: {0}")]
    ModelCall(#[from] LlmError),

    #[error("Upload failed: {0}")]
    Parse(#[from] AttachmentError),
}

pub type Result<T> = std::result::Result<T, SessionError>;
