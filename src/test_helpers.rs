//! Shared test utilities: synthetic image bytes and source files.

use crate::source::SourceFile;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

/// A deterministic RGBA gradient with some per-pixel noise so encoders
/// have real work to do.
pub fn gradient(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        let noise = (x.wrapping_mul(31) ^ y.wrapping_mul(17)) % 23;
        Rgba([
            (x % 256) as u8,
            (y % 256) as u8,
            (128 + noise) as u8,
            255,
        ])
    })
}

fn encode_as(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let mut buf = Vec::new();
    let rgba = DynamicImage::ImageRgba8(gradient(width, height));
    let img = match format {
        // JPEG has no alpha
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(rgba.to_rgb8()),
        _ => rgba,
    };
    img.write_to(&mut Cursor::new(&mut buf), format).unwrap();
    buf
}

/// PNG-encoded [`gradient`].
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    encode_as(width, height, ImageFormat::Png)
}

/// JPEG-encoded [`gradient`].
pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    encode_as(width, height, ImageFormat::Jpeg)
}

/// First half of `bytes`, enough to keep the signature but lose the data.
pub fn truncated(bytes: &[u8]) -> Vec<u8> {
    bytes[..bytes.len() / 2].to_vec()
}

/// In-memory PNG source with a declared type of `image/png`.
pub fn png_source(name: &str, width: u32, height: u32) -> SourceFile {
    SourceFile::from_bytes(name, "image/png", png_bytes(width, height))
}
