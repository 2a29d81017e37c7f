use std::path::Path;

use crate::bitmap;
use crate::error::{AttachmentError, Result};
use crate::kind::AttachmentKind;
use crate::pdf;

/// A parsed upload, ready to be described in a conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub filename: String,
    pub content: AttachmentContent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachmentContent {
    /// Full extracted text; callers truncate as they see fit
    Pdf { text: String, pages: usize },
    Image { width: u32, height: u32 },
}

impl Attachment {
    pub fn pdf(filename: impl Into<String>, text: impl Into<String>, pages: usize) -> Self {
        Self {
            filename: filename.into(),
            content: AttachmentContent::Pdf {
                text: text.into(),
                pages,
            },
        }
    }

    pub fn image(filename: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            filename: filename.into(),
            content: AttachmentContent::Image { width, height },
        }
    }

    pub fn kind(&self) -> AttachmentKind {
        match self.content {
            AttachmentContent::Pdf { .. } => AttachmentKind::Pdf,
            AttachmentContent::Image { .. } => AttachmentKind::Image,
        }
    }
}

/// Turns raw upload bytes into an [`Attachment`].
pub trait AttachmentLoader: Send + Sync {
    fn load(&self, kind: AttachmentKind, filename: &str, bytes: &[u8]) -> Result<Attachment>;
}

/// Default loader backed by `lopdf` and `image`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileLoader;

impl FileLoader {
    pub fn new() -> Self {
        Self
    }

    /// Read a file from disk and load it under its base name
    pub async fn load_path(&self, kind: AttachmentKind, path: impl AsRef<Path>) -> Result<Attachment> {
        let path = path.as_ref();
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        check_kind(kind, &filename)?;
        let bytes = tokio::fs::read(path).await?;
        self.load(kind, &filename, &bytes)
    }
}

fn check_kind(kind: AttachmentKind, filename: &str) -> Result<()> {
    if kind.accepts(filename) {
        Ok(())
    } else {
        Err(AttachmentError::UnsupportedType {
            kind: kind.label().to_string(),
            filename: filename.to_string(),
        })
    }
}

impl AttachmentLoader for FileLoader {
    fn load(&self, kind: AttachmentKind, filename: &str, bytes: &[u8]) -> Result<Attachment> {
        check_kind(kind, filename)?;

        let content = match kind {
            AttachmentKind::Pdf => {
                let extracted = pdf::extract_text(filename, bytes)?;
                tracing::debug!(
                    filename,
                    pages = extracted.pages,
                    chars = extracted.text.chars().count(),
                    "extracted pdf text"
                );
                AttachmentContent::Pdf {
                    text: extracted.text,
                    pages: extracted.pages,
                }
            }
            AttachmentKind::Image => {
                let decoded = bitmap::decode(filename, bytes)?;
                tracing::debug!(filename, width = decoded.width, height = decoded.height, "decoded image");
                AttachmentContent::Image {
                    width: decoded.width,
                    height: decoded.height,
                }
            }
        };

        Ok(Attachment {
            filename: filename.to_string(),
            content,
        })
    }
}
