//! The image normalization pipeline — pure Rust, all in memory.
//!
//! Two composable transform stages:
//!
//! | Stage | Entry point | Policy |
//! |---|---|---|
//! | **Resize** | [`normalize_upload`] | longer edge bounded, never upscales |
//! | **Crop** | [`crop_to_ratio`] | centered, ratio-exact, no rescale |
//!
//! The module is split into:
//! - **Calculations**: pure functions for dimension math (unit testable)
//! - **Parameters**: aspect ratios and operation descriptions
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: high-level functions combining calculations + backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::{CropWindow, calculate_bounded_dimensions, calculate_crop_window};
pub use operations::{crop_to_ratio, normalize_upload};
pub use params::{AspectRatio, AspectRatioError, CropParams, ResizeParams};
pub use rust_backend::RustBackend;
