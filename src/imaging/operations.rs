//! High-level image operations.
//!
//! These functions combine calculations with backend execution: they decode
//! only to measure, compute target geometry with the pure calculation
//! functions, and hand the pixel work to the backend. Each call produces a
//! fresh [`EncodedImage`] whose dimensions describe the new payload.

use super::backend::{BackendError, ImageBackend};
use super::calculations::{calculate_bounded_dimensions, calculate_crop_window};
use super::params::{AspectRatio, CropParams, ResizeParams};
use crate::types::{EncodedImage, ImageMime};

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Normalize an uploaded image into pipeline shape.
///
/// Downscales so the longer edge fits within `max_dimension` (never
/// upscales) and re-encodes with the upload's own mime type. Inputs already
/// under the bound keep their dimensions but still pass through a
/// decode/re-encode cycle, so every held image has the same provenance.
pub fn normalize_upload(
    backend: &impl ImageBackend,
    data: &[u8],
    mime: ImageMime,
    max_dimension: u32,
) -> Result<EncodedImage> {
    let dims = backend.identify(data)?;
    let (width, height) = calculate_bounded_dimensions((dims.width, dims.height), max_dimension);

    log::debug!(
        "normalize {}x{} -> {}x{} ({})",
        dims.width,
        dims.height,
        width,
        height,
        mime.as_str()
    );

    let out = backend.resize(&ResizeParams {
        data,
        mime,
        width,
        height,
    })?;

    Ok(EncodedImage {
        data: out,
        mime,
        width,
        height,
    })
}

/// Center-crop a held image to the target aspect ratio, without rescaling.
///
/// Source dimensions are re-read from the payload rather than trusted from
/// the struct, and the output carries the crop window's exact dimensions.
/// Applying the same ratio to the output again is a full-frame no-op.
pub fn crop_to_ratio(
    backend: &impl ImageBackend,
    image: &EncodedImage,
    ratio: &AspectRatio,
) -> Result<EncodedImage> {
    let dims = backend.identify(&image.data)?;
    let window = calculate_crop_window((dims.width, dims.height), ratio.value());

    log::debug!(
        "crop {}x{} to {} -> {}x{} at +{}+{}",
        dims.width,
        dims.height,
        ratio,
        window.width,
        window.height,
        window.x,
        window.y
    );

    let out = backend.crop(&CropParams {
        data: &image.data,
        mime: image.mime,
        window,
    })?;

    Ok(EncodedImage {
        data: out,
        mime: image.mime,
        width: window.width,
        height: window.height,
    })
}
