use parley_attachments::{Attachment, AttachmentContent};

use crate::error::Result;
use crate::models::Turn;
use crate::store::ChatStore;

/// Text of the synthetic turn announcing an upload.
///
/// PDFs carry at most `preview_chars` characters of their extracted text,
/// always followed by "...". Images carry only their file name.
pub fn describe_upload(attachment: &Attachment, preview_chars: usize) -> String {
    match &attachment.content {
        AttachmentContent::Pdf { text, .. } => {
            let preview: String = text.chars().take(preview_chars).collect();
            format!("[PDF Uploaded: {}]\n\n{}...", attachment.filename, preview)
        }
        AttachmentContent::Image { .. } => format!("[Image Uploaded: {}]", attachment.filename),
    }
}

impl ChatStore {
    /// Inject an upload into the active chat as one user turn and register
    /// its file name. Returns the appended turn.
    pub fn attach(&mut self, attachment: &Attachment) -> Result<Turn> {
        let title = self.active_title().to_string();
        let turn = Turn::user(describe_upload(attachment, self.settings().pdf_preview_chars));

        self.append_turn(&title, turn.clone())?;
        self.register_upload(&title, attachment.kind(), attachment.filename.clone())?;

        tracing::info!(
            title = %title,
            filename = %attachment.filename,
            kind = %attachment.kind(),
            "registered upload"
        );
        Ok(turn)
    }
}
