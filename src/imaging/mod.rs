//! Image codec layer, pure Rust with no system libraries.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` (format guessed from bytes) |
//! | **Render** | opaque canvas, alpha composited over black |
//! | **Encode → JPEG** | `JpegEncoder::new_with_quality` |
//!
//! The module is split into:
//! - **Parameters**: [`Quality`], [`OutputFormat`], [`EncodeSettings`]
//! - **Backend**: [`ImageCodec`] trait + [`RustCodec`]
//! - **Canvas**: the render step between decode and encode

pub mod backend;
pub mod canvas;
mod params;
pub mod rust_backend;

pub use backend::{CodecError, DecodedImage, ImageCodec};
pub use params::{EncodeSettings, OutputFormat, Quality};
pub use rust_backend::RustCodec;
