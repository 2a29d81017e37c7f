use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Upload category. The set is closed: documents and pictures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttachmentKind {
    #[serde(rename = "pdf")]
    Pdf,
    #[serde(rename = "images")]
    Image,
}

impl AttachmentKind {
    pub const ALL: [AttachmentKind; 2] = [AttachmentKind::Pdf, AttachmentKind::Image];

    /// File extensions accepted for this category (lowercase, no dot)
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::Pdf => &["pdf"],
            Self::Image => &["png", "jpg", "jpeg"],
        }
    }

    /// Category label used when listing uploads
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Image => "images",
        }
    }

    /// Whether a file name carries one of this category's extensions
    pub fn accepts(&self, filename: &str) -> bool {
        Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                let ext = ext.to_ascii_lowercase();
                self.extensions().iter().any(|allowed| *allowed == ext)
            })
            .unwrap_or(false)
    }

    /// Infer the category from a file name's extension
    pub fn from_filename(filename: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.accepts(filename))
    }
}

impl fmt::Display for AttachmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
