//! Off-screen canvas rendering.
//!
//! JPEG has no alpha channel, so the decoded raster is drawn onto an opaque
//! canvas at native resolution before encoding. Transparent pixels end up
//! over a black backdrop, which is what a 2D canvas produces when exported
//! as JPEG. No cropping, scaling, or colour adjustment happens here.

use super::backend::DecodedImage;
use image::{Rgb, RgbImage};

/// Backdrop behind transparent pixels.
pub const BACKDROP: [u8; 3] = [0, 0, 0];

/// Draw `decoded` onto a fresh opaque canvas of the same size.
pub fn render(decoded: &DecodedImage) -> RgbImage {
    let source = decoded.pixels();
    RgbImage::from_fn(decoded.width(), decoded.height(), |x, y| {
        let [r, g, b, a] = source.get_pixel(x, y).0;
        Rgb([
            blend(r, BACKDROP[0], a),
            blend(g, BACKDROP[1], a),
            blend(b, BACKDROP[2], a),
        ])
    })
}

/// Source-over compositing of one channel, rounded to nearest.
fn blend(fg: u8, bg: u8, alpha: u8) -> u8 {
    let a = alpha as u32;
    ((fg as u32 * a + bg as u32 * (255 - a) + 127) / 255) as u8
}
