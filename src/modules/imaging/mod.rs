//! Image decoding, metadata extraction and thumbnail rendering
//!
//! Everything here is CPU-bound; callers run it on the blocking pool.

mod thumbnail;

pub use thumbnail::{render_thumbnail, ThumbnailSize};

use std::io::Cursor;

use image::error::{ImageFormatHint, UnsupportedError};
use image::{DynamicImage, GenericImageView, ImageError, ImageFormat, ImageReader, ImageResult};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A decoded upload together with the container format it was sniffed as
pub struct DecodedImage {
    pub image: DynamicImage,
    pub format: ImageFormat,
}

/// Intrinsic properties of an uploaded image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ImageMetadata {
    pub width: u32,
    pub height: u32,
    /// Upper-case container name, e.g. "JPEG" or "PNG"
    #[schema(example = "JPEG")]
    pub format: String,
    pub size_bytes: u64,
}

impl ImageMetadata {
    pub fn from_decoded(decoded: &DecodedImage, size_bytes: u64) -> Self {
        let (width, height) = decoded.image.dimensions();

        Self {
            width,
            height,
            format: format_name(decoded.format),
            size_bytes,
        }
    }
}

/// Decode raw bytes, detecting the format from the content rather than the declared type
pub fn decode(bytes: &[u8]) -> ImageResult<DecodedImage> {
    let reader = ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
    let format = reader.format();
    let image = reader.decode()?;
    let format = format.ok_or_else(|| {
        ImageError::Unsupported(UnsupportedError::from(ImageFormatHint::Unknown))
    })?;

    Ok(DecodedImage { image, format })
}

fn format_name(format: ImageFormat) -> String {
    match format {
        ImageFormat::Jpeg => "JPEG".to_string(),
        ImageFormat::Png => "PNG".to_string(),
        ImageFormat::Gif => "GIF".to_string(),
        ImageFormat::WebP => "WEBP".to_string(),
        other => format!("{:?}", other).to_uppercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{sample_jpeg, sample_png};

    #[test]
    fn test_decode_jpeg_metadata() {
        let bytes = sample_jpeg(200, 150);
        let decoded = decode(&bytes).unwrap();
        let metadata = ImageMetadata::from_decoded(&decoded, bytes.len() as u64);

        assert_eq!(
            metadata,
            ImageMetadata {
                width: 200,
                height: 150,
                format: "JPEG".to_string(),
                size_bytes: bytes.len() as u64,
            }
        );
    }

    #[test]
    fn test_decode_png_metadata() {
        let bytes = sample_png(64, 32);
        let decoded = decode(&bytes).unwrap();
        let metadata = ImageMetadata::from_decoded(&decoded, 10);

        assert_eq!(metadata.width, 64);
        assert_eq!(metadata.height, 32);
        assert_eq!(metadata.format, "PNG");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode(b"definitely not an image").is_err());
    }
}
