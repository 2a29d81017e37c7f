use parley_attachments::AttachmentKind;
use serde::Serialize;

/// File names registered against one chat, per category, in upload order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UploadedFiles {
    pub pdf: Vec<String>,
    pub images: Vec<String>,
}

impl UploadedFiles {
    pub fn get(&self, kind: AttachmentKind) -> &[String] {
        match kind {
            AttachmentKind::Pdf => &self.pdf,
            AttachmentKind::Image => &self.images,
        }
    }

    pub(crate) fn push(&mut self, kind: AttachmentKind, filename: impl Into<String>) {
        match kind {
            AttachmentKind::Pdf => self.pdf.push(filename.into()),
            AttachmentKind::Image => self.images.push(filename.into()),
        }
    }

    pub fn total(&self) -> usize {
        self.pdf.len() + self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}
