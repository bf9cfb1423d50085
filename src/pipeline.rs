//! The recompression pipeline.
//!
//! One conversion is a straight line of awaits:
//!
//! ```text
//! check media type → read bytes → decode → render canvas → encode → artifact
//!                      (async)     (blocking pool)        (blocking pool)
//! ```
//!
//! Any failure ends the attempt and is returned to the caller; nothing is
//! retried, and there is no cancellation or timeout. Decode and encode are
//! CPU-bound, so they run through `tokio::task::spawn_blocking` while the
//! calling task waits.
//!
//! Progress is reported through a callback at each stage so a presentation
//! layer can show "Reading file...", "Loading image into memory..." and
//! "Compressing image...".

use crate::imaging::{DecodedImage, EncodeSettings, ImageCodec, canvas};
use crate::naming::download_name;
use crate::source::SourceFile;
use crate::types::SizeKb;
use std::sync::Arc;
use thiserror::Error;

/// Why a conversion failed. Every variant is terminal for that attempt.
#[derive(Error, Debug)]
pub enum RecompressError {
    #[error("Not an image: declared media type is {0:?}")]
    InvalidInputType(String),
    #[error("Failed to read file: {0}")]
    ReadFailure(#[source] std::io::Error),
    #[error("Failed to decode image: {0}")]
    DecodeFailure(String),
    #[error("Failed to encode image: {0}")]
    EncodeFailure(String),
}

impl RecompressError {
    /// Short message for the status line.
    pub fn user_message(&self) -> &'static str {
        match self {
            RecompressError::InvalidInputType(_) => "Error: Please select a valid image file.",
            RecompressError::ReadFailure(_) => "Error: Failed to read the file.",
            RecompressError::DecodeFailure(_) => "Error: Failed to load image.",
            RecompressError::EncodeFailure(_) => "Error: Could not process image.",
        }
    }
}

/// Points where the pipeline reports progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Reading,
    Decoding,
    Compressing,
}

impl Stage {
    pub fn message(self) -> &'static str {
        match self {
            Stage::Reading => "Reading file...",
            Stage::Decoding => "Loading image into memory...",
            Stage::Compressing => "Compressing image...",
        }
    }
}

/// The encoded result of one conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressedArtifact {
    pub bytes: Vec<u8>,
    pub byte_len: u64,
    pub download_name: String,
    /// MIME type of `bytes`.
    pub media_type: &'static str,
    pub original_size: SizeKb,
    pub new_size: SizeKb,
    /// Pixel dimensions, unchanged from the source.
    pub width: u32,
    pub height: u32,
}

/// Runs conversions with a shared codec.
pub struct Recompressor<C: ImageCodec> {
    codec: Arc<C>,
}

impl<C: ImageCodec> Recompressor<C> {
    pub fn new(codec: C) -> Self {
        Self {
            codec: Arc::new(codec),
        }
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Convert one file.
    ///
    /// `on_stage` is called before each suspension point. It is not called
    /// at all when the media type check fails.
    pub async fn recompress(
        &self,
        source: SourceFile,
        settings: EncodeSettings,
        mut on_stage: impl FnMut(Stage),
    ) -> Result<CompressedArtifact, RecompressError> {
        if !source.is_image() {
            tracing::warn!(
                name = source.name(),
                media_type = source.media_type(),
                "rejected non-image input"
            );
            return Err(RecompressError::InvalidInputType(
                source.media_type().to_string(),
            ));
        }

        let name = source.name().to_string();
        let original_size = SizeKb::from_bytes(source.byte_len());

        on_stage(Stage::Reading);
        tracing::debug!(name = %name, bytes = source.byte_len(), "reading source");
        let bytes = source.read().await.map_err(|e| {
            tracing::warn!(name = %name, error = %e, "read failed");
            RecompressError::ReadFailure(e)
        })?;

        on_stage(Stage::Decoding);
        let decoded = self.decode(bytes).await.inspect_err(|e| {
            tracing::warn!(name = %name, error = %e, "decode failed");
        })?;
        let (width, height) = (decoded.width(), decoded.height());
        tracing::debug!(width, height, "decoded source");

        on_stage(Stage::Compressing);
        let encoded = self.encode(decoded, settings).await.inspect_err(|e| {
            tracing::warn!(name = %name, error = %e, "encode failed");
        })?;

        let byte_len = encoded.len() as u64;
        let new_size = SizeKb::from_bytes(byte_len);
        let download_name = download_name(&name, new_size, settings.format);
        tracing::info!(
            name = %name,
            original_kb = %original_size,
            new_kb = %new_size,
            quality = settings.quality.percent(),
            "recompressed"
        );

        Ok(CompressedArtifact {
            bytes: encoded,
            byte_len,
            download_name,
            media_type: settings.format.mime_type(),
            original_size,
            new_size,
            width,
            height,
        })
    }

    async fn decode(&self, bytes: Vec<u8>) -> Result<DecodedImage, RecompressError> {
        let codec = Arc::clone(&self.codec);
        tokio::task::spawn_blocking(move || codec.decode(&bytes))
            .await
            .map_err(|e| RecompressError::DecodeFailure(format!("decoder task failed: {e}")))?
            .map_err(|e| RecompressError::DecodeFailure(e.to_string()))
    }

    async fn encode(
        &self,
        decoded: DecodedImage,
        settings: EncodeSettings,
    ) -> Result<Vec<u8>, RecompressError> {
        let codec = Arc::clone(&self.codec);
        let encoded = tokio::task::spawn_blocking(move || {
            let canvas = canvas::render(&decoded);
            codec.encode(&canvas, &settings)
        })
        .await
        .map_err(|e| RecompressError::EncodeFailure(format!("encoder task failed: {e}")))?
        .map_err(|e| RecompressError::EncodeFailure(e.to_string()))?;

        if encoded.is_empty() {
            return Err(RecompressError::EncodeFailure(
                "encoder produced no output".into(),
            ));
        }
        Ok(encoded)
    }
}
