//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the high-level [`operations`](super::operations) module
//! (which decides which transforms to run) and the [`backend`](super::backend)
//! (which does the actual pixel work), so backends can be swapped — e.g. for
//! a recording mock in tests — without touching operation logic.

use super::calculations::CropWindow;
use crate::types::ImageMime;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A malformed or degenerate `"W:H"` aspect ratio string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid aspect ratio {0:?}: expected \"W:H\" with two positive numbers")]
pub struct AspectRatioError(pub String);

/// A validated `W:H` aspect ratio.
///
/// Accepts any string of two finite positive numbers separated by `:` —
/// `"16:9"`, `"4:5"`, even `"2.35:1"` — not just the preset vocabulary.
/// Zero, negative, or non-numeric components are rejected at parse time so
/// downstream crop math never sees a degenerate ratio.
#[derive(Debug, Clone, PartialEq)]
pub struct AspectRatio {
    label: String,
    ratio: f64,
}

impl AspectRatio {
    pub fn parse(s: &str) -> Result<Self, AspectRatioError> {
        let invalid = || AspectRatioError(s.to_string());

        let (w_text, h_text) = s.split_once(':').ok_or_else(invalid)?;
        let w: f64 = w_text.trim().parse().map_err(|_| invalid())?;
        let h: f64 = h_text.trim().parse().map_err(|_| invalid())?;

        if !w.is_finite() || !h.is_finite() || w <= 0.0 || h <= 0.0 {
            return Err(invalid());
        }

        Ok(Self {
            label: s.to_string(),
            ratio: w / h,
        })
    }

    /// The ratio as a single width/height quotient.
    pub fn value(&self) -> f64 {
        self.ratio
    }

    /// The original `"W:H"` text.
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl FromStr for AspectRatio {
    type Err = AspectRatioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Parameters for a resample to exact target dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeParams<'a> {
    /// Encoded source bytes.
    pub data: &'a [u8],
    /// Encoding for the output (matches the source upload).
    pub mime: ImageMime,
    pub width: u32,
    pub height: u32,
}

/// Parameters for a verbatim region extraction (no rescale).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropParams<'a> {
    pub data: &'a [u8],
    pub mime: ImageMime,
    pub window: CropWindow,
}
