//! Pure Rust image processing backend — everything in memory.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Identify | `ImageReader::into_dimensions` (header-only, no full decode) |
//! | Decode (JPEG, PNG, WebP) | `image` crate (pure Rust decoders) |
//! | Resize | `image::DynamicImage::resize_exact` with `Lanczos3` |
//! | Crop | `image::DynamicImage::crop_imm` (verbatim pixels, no rescale) |
//! | Encode | `image::DynamicImage::write_to` with the payload's own format |

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::params::{CropParams, ResizeParams};
use crate::types::ImageMime;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader};
use std::io::Cursor;

/// Pure Rust backend using the `image` crate ecosystem.
///
/// Stateless; a single instance can serve any number of concurrent calls.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn format_for(mime: ImageMime) -> ImageFormat {
    match mime {
        ImageMime::Jpeg => ImageFormat::Jpeg,
        ImageMime::Png => ImageFormat::Png,
        ImageMime::WebP => ImageFormat::WebP,
    }
}

/// Decode an in-memory payload, sniffing the format from its magic bytes.
fn load_image(data: &[u8]) -> Result<DynamicImage, BackendError> {
    image::load_from_memory(data).map_err(|e| BackendError::Decode(e.to_string()))
}

/// Encode pixels back into the pipeline's wire shape.
///
/// JPEG has no alpha channel, so RGBA pixels (typical after decoding a PNG
/// upload) are flattened to RGB before encoding.
fn save_image(img: &DynamicImage, mime: ImageMime) -> Result<Vec<u8>, BackendError> {
    let format = format_for(mime);

    let flattened;
    let to_encode = if mime == ImageMime::Jpeg && img.color().has_alpha() {
        flattened = DynamicImage::ImageRgb8(img.to_rgb8());
        &flattened
    } else {
        img
    };

    let mut buffer = Cursor::new(Vec::new());
    to_encode
        .write_to(&mut buffer, format)
        .map_err(|e| BackendError::Encode(e.to_string()))?;
    Ok(buffer.into_inner())
}

impl ImageBackend for RustBackend {
    fn identify(&self, data: &[u8]) -> Result<Dimensions, BackendError> {
        let reader = ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .map_err(|e| BackendError::Decode(e.to_string()))?;
        let (width, height) = reader
            .into_dimensions()
            .map_err(|e| BackendError::Decode(e.to_string()))?;
        Ok(Dimensions { width, height })
    }

    fn resize(&self, params: &ResizeParams<'_>) -> Result<Vec<u8>, BackendError> {
        let img = load_image(params.data)?;
        // Target dimensions were computed ratio-preserving upstream, so an
        // exact resample cannot distort
        let resized = if (img.width(), img.height()) == (params.width, params.height) {
            img
        } else {
            img.resize_exact(params.width, params.height, FilterType::Lanczos3)
        };
        save_image(&resized, params.mime)
    }

    fn crop(&self, params: &CropParams<'_>) -> Result<Vec<u8>, BackendError> {
        let img = load_image(params.data)?;
        let w = params.window;
        let cropped = img.crop_imm(w.x, w.y, w.width, w.height);
        save_image(&cropped, params.mime)
    }
}
