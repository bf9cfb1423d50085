//! Pure Rust codec built on the `image` crate.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, TIFF, WebP, GIF, BMP) | `image::ImageReader::with_guessed_format` |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder::new_with_quality` |

use super::backend::{CodecError, DecodedImage, ImageCodec};
use super::params::{EncodeSettings, OutputFormat};
use image::codecs::jpeg::JpegEncoder;
use image::{ImageReader, RgbImage};
use std::io::Cursor;

/// Production codec. See the [module docs](self) for the crate mapping.
pub struct RustCodec;

impl RustCodec {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustCodec {
    fn default() -> Self {
        Self::new()
    }
}

fn encode_jpeg(canvas: &RgbImage, quality: u8) -> Result<Vec<u8>, CodecError> {
    let mut buffer = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
    encoder.encode_image(canvas)?;
    Ok(buffer)
}

impl ImageCodec for RustCodec {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage, CodecError> {
        let reader = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| CodecError::ProcessingFailed(format!("Failed to sniff format: {e}")))?;
        if reader.format().is_none() {
            return Err(CodecError::ProcessingFailed(
                "Unrecognized image format".into(),
            ));
        }
        let img = reader.decode()?;
        Ok(DecodedImage::new(img.to_rgba8()))
    }

    fn encode(
        &self,
        canvas: &RgbImage,
        settings: &EncodeSettings,
    ) -> Result<Vec<u8>, CodecError> {
        if canvas.width() == 0 || canvas.height() == 0 {
            return Err(CodecError::ProcessingFailed(
                "Cannot encode an empty canvas".into(),
            ));
        }
        match settings.format {
            OutputFormat::Jpeg => encode_jpeg(canvas, settings.quality.percent()),
        }
    }
}
