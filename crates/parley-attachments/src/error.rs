use thiserror::Error;

#[derive(Error, Debug)]
pub enum AttachmentError {
    #[error("Unsupported file type for {kind} upload: {filename}")]
    UnsupportedType { kind: String, filename: String },

    #[error("Failed to parse PDF {filename}: {reason}")]
    Pdf { filename: String, reason: String },

    #[error("Failed to decode image {filename}: {reason}")]
    Image { filename: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AttachmentError>;
