//! Opaque image buffer payload type

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{PacketError, Result};

/// Pixel layout of an [`Image`] or [`ImageFrame`](super::ImageFrame) buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageFormat {
    /// Unrecognized layout; byte length is not validated against dimensions
    Unknown,
    /// 8-bit RGB, 3 bytes per pixel
    Srgb,
    /// 8-bit RGBA, 4 bytes per pixel
    Srgba,
    /// 8-bit single channel
    Gray8,
    /// 32-bit float single channel
    Vec32F1,
}

impl ImageFormat {
    /// Bytes per pixel for this layout, or `None` when unknown.
    pub const fn bytes_per_pixel(&self) -> Option<usize> {
        match self {
            ImageFormat::Unknown => None,
            ImageFormat::Srgb => Some(3),
            ImageFormat::Srgba => Some(4),
            ImageFormat::Gray8 => Some(1),
            ImageFormat::Vec32F1 => Some(4),
        }
    }
}

/// Opaque, immutable image buffer.
///
/// Pixel data is shared (`Arc`), so cloning an `Image` produces another view
/// of the same buffer rather than a copy. Constructing a packet from an
/// `Image` consumes it; extraction returns borrowed views.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    format: ImageFormat,
    width: usize,
    height: usize,
    data: Arc<[u8]>,
}

impl Image {
    /// Create an image, validating the buffer length against the dimensions.
    pub fn new(format: ImageFormat, width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        if let Some(bpp) = format.bytes_per_pixel() {
            let expected = width
                .checked_mul(height)
                .and_then(|px| px.checked_mul(bpp))
                .ok_or_else(|| PacketError::invalid_argument("image dimensions overflow"))?;
            if data.len() != expected {
                return Err(PacketError::invalid_argument(format!(
                    "image buffer is {} bytes, {}x{} {:?} needs {}",
                    data.len(),
                    width,
                    height,
                    format,
                    expected
                )));
            }
        }
        Ok(Self { format, width, height, data: data.into() })
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

    /// Raw pixel bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_validates_buffer_length() {
        assert!(Image::new(ImageFormat::Srgb, 2, 2, vec![0; 12]).is_ok());
        let err = Image::new(ImageFormat::Srgb, 2, 2, vec![0; 11]).unwrap_err();
        assert!(!err.is_type_mismatch());
    }

    #[test]
    fn unknown_format_skips_length_validation() {
        assert!(Image::new(ImageFormat::Unknown, 2, 2, vec![0; 3]).is_ok());
    }

    #[test]
    fn clones_share_pixel_data() {
        let image = Image::new(ImageFormat::Gray8, 2, 1, vec![7, 9]).unwrap();
        let view = image.clone();
        assert_eq!(view.data().as_ptr(), image.data().as_ptr());
    }
}
