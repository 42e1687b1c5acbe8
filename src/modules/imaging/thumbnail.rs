use image::{codecs::jpeg::JpegEncoder, imageops::FilterType, DynamicImage, GenericImageView};
use image::ImageResult;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

const JPEG_QUALITY: u8 = 85;

/// Thumbnail variants, each a square bounding box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ThumbnailSize {
    Small,
    Medium,
}

impl ThumbnailSize {
    pub const ALL: [ThumbnailSize; 2] = [ThumbnailSize::Small, ThumbnailSize::Medium];

    /// Edge of the bounding box in pixels
    pub fn bound(self) -> u32 {
        match self {
            ThumbnailSize::Small => 100,
            ThumbnailSize::Medium => 300,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ThumbnailSize::Small => "small",
            ThumbnailSize::Medium => "medium",
        }
    }
}

/// Render a JPEG thumbnail that fits the variant's box
///
/// Aspect ratio is preserved and images already inside the box are not
/// enlarged. Alpha is dropped since JPEG cannot carry it.
pub fn render_thumbnail(image: &DynamicImage, size: ThumbnailSize) -> ImageResult<Vec<u8>> {
    let bound = size.bound();
    let (width, height) = image.dimensions();

    let rgb = if width <= bound && height <= bound {
        image.to_rgb8()
    } else {
        image.resize(bound, bound, FilterType::Lanczos3).to_rgb8()
    };

    let mut jpeg = Vec::new();
    rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY))?;

    Ok(jpeg)
}
