//! Opaque image-frame buffer payload type

use std::sync::Arc;

use crate::error::{PacketError, Result};
use crate::types::ImageFormat;

/// Opaque, immutable image-frame buffer with an explicit row stride.
///
/// Rows may carry alignment padding: `width_step` is the byte distance between
/// the starts of consecutive rows and must cover at least one row of pixels.
/// Like [`Image`](super::Image), pixel data is shared and clones are views.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageFrame {
    format: ImageFormat,
    width: usize,
    height: usize,
    width_step: usize,
    data: Arc<[u8]>,
}

impl ImageFrame {
    /// Create an image frame, validating stride and buffer length.
    pub fn new(
        format: ImageFormat,
        width: usize,
        height: usize,
        width_step: usize,
        data: Vec<u8>,
    ) -> Result<Self> {
        if let Some(bpp) = format.bytes_per_pixel() {
            let row_bytes = width
                .checked_mul(bpp)
                .ok_or_else(|| PacketError::invalid_argument("image frame width overflows"))?;
            if width_step < row_bytes {
                return Err(PacketError::invalid_argument(format!(
                    "width_step {} is smaller than a {}-byte pixel row",
                    width_step, row_bytes
                )));
            }
            let expected = width_step
                .checked_mul(height)
                .ok_or_else(|| PacketError::invalid_argument("image frame dimensions overflow"))?;
            if data.len() != expected {
                return Err(PacketError::invalid_argument(format!(
                    "image frame buffer is {} bytes, {} rows of step {} need {}",
                    data.len(),
                    height,
                    width_step,
                    expected
                )));
            }
        }
        Ok(Self { format, width, height, width_step, data: data.into() })
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Byte distance between the starts of consecutive rows.
    pub fn width_step(&self) -> usize {
        self.width_step
    }

    /// Raw buffer bytes, including any row padding.
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_accepts_padded_rows() {
        // 2x2 Gray8 with 4-byte stride (2 bytes padding per row)
        let frame = ImageFrame::new(ImageFormat::Gray8, 2, 2, 4, vec![0; 8]).unwrap();
        assert_eq!(frame.width_step(), 4);
    }

    #[test]
    fn frame_rejects_undersized_stride() {
        let err = ImageFrame::new(ImageFormat::Srgba, 2, 2, 4, vec![0; 8]).unwrap_err();
        assert!(!err.is_type_mismatch());
    }

    #[test]
    fn frame_rejects_wrong_buffer_length() {
        assert!(ImageFrame::new(ImageFormat::Gray8, 2, 2, 2, vec![0; 5]).is_err());
    }
}
