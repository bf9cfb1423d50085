//! Image codec trait and shared types.
//!
//! The [`ImageCodec`] trait defines the two operations the pipeline needs:
//! decode bytes into a raster, and encode a rendered canvas into bytes.
//!
//! The production implementation is
//! [`RustCodec`](super::rust_backend::RustCodec), built on the `image` crate.
//! Tests use the recording `MockCodec` below.

use super::params::EncodeSettings;
use image::{RgbImage, RgbaImage};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Image codec error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// A decoded raster at the image's native pixel dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    pixels: RgbaImage,
}

impl DecodedImage {
    pub fn new(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

/// Trait for image codecs.
///
/// Implementations run on tokio's blocking pool, so they must be shareable
/// across threads.
pub trait ImageCodec: Send + Sync + 'static {
    /// Decode an in-memory image, guessing the format from its bytes.
    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage, CodecError>;

    /// Encode an opaque canvas with the given settings.
    fn encode(&self, canvas: &RgbImage, settings: &EncodeSettings)
    -> Result<Vec<u8>, CodecError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::imaging::Quality;
    use std::sync::Mutex;

    /// Mock codec that records operations and returns canned results.
    /// Uses Mutex (not RefCell) so it is Sync and can cross into `spawn_blocking`.
    pub struct MockCodec {
        /// `None` makes every decode fail.
        pub dimensions: Option<(u32, u32)>,
        /// `None` makes every encode fail.
        pub encoded: Option<Vec<u8>>,
        pub operations: Mutex<Vec<RecordedOp>>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Decode {
            len: usize,
        },
        Encode {
            width: u32,
            height: u32,
            quality: u8,
        },
    }

    impl Default for MockCodec {
        fn default() -> Self {
            Self {
                dimensions: Some((4, 3)),
                encoded: Some(vec![0xAB; 2048]),
                operations: Mutex::new(Vec::new()),
            }
        }
    }

    impl MockCodec {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_dimensions(width: u32, height: u32) -> Self {
            Self {
                dimensions: Some((width, height)),
                ..Self::default()
            }
        }

        pub fn with_encoded(bytes: Vec<u8>) -> Self {
            Self {
                encoded: Some(bytes),
                ..Self::default()
            }
        }

        pub fn failing_decode() -> Self {
            Self {
                dimensions: None,
                ..Self::default()
            }
        }

        pub fn failing_encode() -> Self {
            Self {
                encoded: None,
                ..Self::default()
            }
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.lock().unwrap().clone()
        }
    }

    impl ImageCodec for MockCodec {
        fn decode(&self, bytes: &[u8]) -> Result<DecodedImage, CodecError> {
            self.operations
                .lock()
                .unwrap()
                .push(RecordedOp::Decode { len: bytes.len() });

            let (width, height) = self
                .dimensions
                .ok_or_else(|| CodecError::ProcessingFailed("mock decode failure".into()))?;
            Ok(DecodedImage::new(RgbaImage::new(width, height)))
        }

        fn encode(
            &self,
            canvas: &RgbImage,
            settings: &EncodeSettings,
        ) -> Result<Vec<u8>, CodecError> {
            self.operations.lock().unwrap().push(RecordedOp::Encode {
                width: canvas.width(),
                height: canvas.height(),
                quality: settings.quality.percent(),
            });

            self.encoded
                .clone()
                .ok_or_else(|| CodecError::ProcessingFailed("mock encode failure".into()))
        }
    }

    #[test]
    fn mock_records_decode() {
        let codec = MockCodec::with_dimensions(800, 600);

        let decoded = codec.decode(&[1, 2, 3]).unwrap();
        assert_eq!(decoded.width(), 800);
        assert_eq!(decoded.height(), 600);

        let ops = codec.get_operations();
        assert_eq!(ops, vec![RecordedOp::Decode { len: 3 }]);
    }

    #[test]
    fn mock_records_encode_quality() {
        let codec = MockCodec::new();
        let settings = EncodeSettings {
            quality: Quality::new(0.85),
            ..EncodeSettings::default()
        };

        codec.encode(&RgbImage::new(10, 20), &settings).unwrap();

        let ops = codec.get_operations();
        assert!(matches!(
            &ops[0],
            RecordedOp::Encode {
                width: 10,
                height: 20,
                quality: 85,
            }
        ));
    }

    #[test]
    fn mock_failing_decode_errors() {
        let codec = MockCodec::failing_decode();
        assert!(codec.decode(&[0; 8]).is_err());
    }

    #[test]
    fn decoded_image_reports_native_dimensions() {
        let decoded = DecodedImage::new(RgbaImage::new(7, 5));
        assert_eq!((decoded.width(), decoded.height()), (7, 5));
        assert_eq!(decoded.pixels().len(), 7 * 5 * 4);
    }
}
