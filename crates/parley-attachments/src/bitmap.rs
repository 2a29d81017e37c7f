use image::GenericImageView;

use crate::error::{AttachmentError, Result};

/// Decode an image far enough to know it is displayable.
pub fn decode(filename: &str, bytes: &[u8]) -> Result<DecodedImage> {
    let decoded = image::load_from_memory(bytes).map_err(|e| AttachmentError::Image {
        filename: filename.to_string(),
        reason: e.to_string(),
    })?;

    let (width, height) = decoded.dimensions();
    Ok(DecodedImage { width, height })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
}
