//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the three operations every backend must
//! support: identify, resize, and crop. All three work on in-memory encoded
//! payloads — nothing in the pipeline touches the filesystem.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend) — pure Rust via the
//! `image` crate, statically linked into the binary.

use super::params::{CropParams, ResizeParams};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    /// Input bytes are not a valid or supported image.
    #[error("decode failed: {0}")]
    Decode(String),
    /// The transformed pixels could not be re-encoded.
    #[error("encode failed: {0}")]
    Encode(String),
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for image processing backends.
///
/// Every backend must implement all three operations so the rest of the
/// codebase is backend-agnostic. Implementations are pure request/response
/// transforms: no state is carried across calls, and concurrent calls never
/// share buffers.
pub trait ImageBackend: Sync {
    /// Read the pixel dimensions of an encoded image.
    fn identify(&self, data: &[u8]) -> Result<Dimensions, BackendError>;

    /// Decode, resample to the exact target dimensions, and re-encode.
    fn resize(&self, params: &ResizeParams<'_>) -> Result<Vec<u8>, BackendError>;

    /// Decode, extract the crop window verbatim, and re-encode.
    fn crop(&self, params: &CropParams<'_>) -> Result<Vec<u8>, BackendError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::imaging::calculations::CropWindow;
    use crate::types::ImageMime;
    use std::sync::Mutex;

    /// Mock backend that records operations without doing pixel work.
    /// Uses Mutex (not RefCell) so it stays Sync like real backends.
    #[derive(Default)]
    pub struct MockBackend {
        pub identify_results: Mutex<Vec<Dimensions>>,
        pub operations: Mutex<Vec<RecordedOp>>,
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum RecordedOp {
        Identify { len: usize },
        Resize {
            mime: ImageMime,
            width: u32,
            height: u32,
        },
        Crop {
            mime: ImageMime,
            window: CropWindow,
        },
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        /// Queue identify results; popped from the back per call.
        pub fn with_dimensions(dims: Vec<Dimensions>) -> Self {
            Self {
                identify_results: Mutex::new(dims),
                operations: Mutex::new(Vec::new()),
            }
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.lock().unwrap().clone()
        }
    }

    impl ImageBackend for MockBackend {
        fn identify(&self, data: &[u8]) -> Result<Dimensions, BackendError> {
            self.operations
                .lock()
                .unwrap()
                .push(RecordedOp::Identify { len: data.len() });

            self.identify_results
                .lock()
                .unwrap()
                .pop()
                .ok_or_else(|| BackendError::Decode("no mock dimensions queued".to_string()))
        }

        fn resize(&self, params: &ResizeParams<'_>) -> Result<Vec<u8>, BackendError> {
            self.operations.lock().unwrap().push(RecordedOp::Resize {
                mime: params.mime,
                width: params.width,
                height: params.height,
            });
            Ok(params.data.to_vec())
        }

        fn crop(&self, params: &CropParams<'_>) -> Result<Vec<u8>, BackendError> {
            self.operations.lock().unwrap().push(RecordedOp::Crop {
                mime: params.mime,
                window: params.window,
            });
            Ok(params.data.to_vec())
        }
    }

    #[test]
    fn mock_records_identify() {
        let backend = MockBackend::with_dimensions(vec![Dimensions {
            width: 800,
            height: 600,
        }]);

        let dims = backend.identify(&[1, 2, 3]).unwrap();
        assert_eq!(dims.width, 800);
        assert_eq!(dims.height, 600);

        let ops = backend.get_operations();
        assert_eq!(ops, vec![RecordedOp::Identify { len: 3 }]);
    }

    #[test]
    fn mock_identify_fails_when_queue_is_empty() {
        let backend = MockBackend::new();
        assert!(matches!(
            backend.identify(&[0]),
            Err(BackendError::Decode(_))
        ));
    }

    #[test]
    fn mock_records_resize() {
        let backend = MockBackend::new();

        backend
            .resize(&ResizeParams {
                data: &[9, 9],
                mime: ImageMime::Jpeg,
                width: 800,
                height: 600,
            })
            .unwrap();

        assert!(matches!(
            backend.get_operations()[0],
            RecordedOp::Resize {
                mime: ImageMime::Jpeg,
                width: 800,
                height: 600,
            }
        ));
    }

    #[test]
    fn mock_records_crop_window() {
        let backend = MockBackend::new();
        let window = CropWindow {
            x: 256,
            y: 0,
            width: 512,
            height: 512,
        };

        backend
            .crop(&CropParams {
                data: &[1],
                mime: ImageMime::Png,
                window,
            })
            .unwrap();

        assert_eq!(
            backend.get_operations(),
            vec![RecordedOp::Crop {
                mime: ImageMime::Png,
                window,
            }]
        );
    }
}
