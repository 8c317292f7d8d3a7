//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// A kept edge within this distance of its ideal length is already as close
/// to the target ratio as integer dimensions allow, so the window degenerates
/// to the full frame. Half a pixel is exactly the slack half-up rounding can
/// introduce when a crop is first produced.
const HALF_PIXEL: f64 = 0.5;

/// Calculate output dimensions for a bounds-constrained resize.
///
/// If the longer edge already fits within `max_dimension` the input
/// dimensions come back unchanged (no upscaling). Otherwise the longer edge
/// is pinned to `max_dimension` and the shorter edge scales proportionally,
/// rounded half-up. Square images treat width as the driving edge.
///
/// # Examples
/// ```
/// # use restyle::imaging::calculate_bounded_dimensions;
/// assert_eq!(calculate_bounded_dimensions((2000, 1000), 1024), (1024, 512));
/// assert_eq!(calculate_bounded_dimensions((500, 800), 1024), (500, 800));
/// ```
pub fn calculate_bounded_dimensions(source: (u32, u32), max_dimension: u32) -> (u32, u32) {
    let (src_w, src_h) = source;

    if src_w >= src_h {
        // Landscape or square: width drives
        if src_w <= max_dimension {
            return (src_w, src_h);
        }
        let h = (src_h as f64 * max_dimension as f64 / src_w as f64).round() as u32;
        (max_dimension, h.max(1))
    } else {
        // Portrait: height drives
        if src_h <= max_dimension {
            return (src_w, src_h);
        }
        let w = (src_w as f64 * max_dimension as f64 / src_h as f64).round() as u32;
        (w.max(1), max_dimension)
    }
}

/// A centered crop region inside a source image.
///
/// `x`/`y` are the top-left offset; `width`/`height` are the exact output
/// dimensions. The window is always fully contained in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropWindow {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropWindow {
    /// Whether the window covers the entire source (a no-op crop).
    pub fn is_full_frame(&self, source: (u32, u32)) -> bool {
        self.x == 0 && self.y == 0 && (self.width, self.height) == source
    }
}

/// Calculate the centered crop window matching `target_ratio` (width/height).
///
/// The crop never rescales: one source edge is kept in full, the other is
/// trimmed symmetrically. Crop dimensions round half-up and are clamped to
/// `1..=source`; offsets are the integer floor of the centered remainder.
///
/// The match check is pixel-aware, not quotient-based: when either edge is
/// already within half a pixel of its ideal length for the ratio, rounding
/// would trim nothing meaningful and the full frame comes back. Since a
/// produced crop always leaves its kept edge within rounding slack of the
/// ideal, applying the same ratio to a crop's own output is a no-op.
pub fn calculate_crop_window(source: (u32, u32), target_ratio: f64) -> CropWindow {
    let (src_w, src_h) = source;

    // Edge lengths an exact-ratio crop would want: width if full height
    // were kept, height if full width were kept
    let fitted_w = src_h as f64 * target_ratio;
    let fitted_h = src_w as f64 / target_ratio;

    if (fitted_w - src_w as f64).abs() <= HALF_PIXEL
        || (fitted_h - src_h as f64).abs() <= HALF_PIXEL
    {
        return CropWindow {
            x: 0,
            y: 0,
            width: src_w,
            height: src_h,
        };
    }

    let source_ratio = src_w as f64 / src_h as f64;
    if source_ratio > target_ratio {
        // Source relatively wider: keep full height, trim width
        let crop_w = ((src_h as f64 * target_ratio).round() as u32).clamp(1, src_w);
        CropWindow {
            x: (src_w - crop_w) / 2,
            y: 0,
            width: crop_w,
            height: src_h,
        }
    } else {
        // Source relatively taller: keep full width, trim height
        let crop_h = ((src_w as f64 / target_ratio).round() as u32).clamp(1, src_h);
        CropWindow {
            x: 0,
            y: (src_h - crop_h) / 2,
            width: src_w,
            height: crop_h,
        }
    }
}
