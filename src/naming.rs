//! Download filename derivation.
//!
//! The suggested name for a compressed file is built from the original name
//! and the new size:
//!
//! - `photo.PNG` at 123.45 KB → `photo_compressed_123.45kb.jpg`
//! - `a.b.jpeg` at 10.00 KB → `a.b_compressed_10.00kb.jpg`
//! - `anim.gif` at 1.50 KB → `anim.gif_compressed_1.50kb.jpg`
//!
//! Exactly one trailing `.jpg`, `.jpeg`, `.png` or `.webp` is stripped
//! (case-insensitive); any other extension stays in the stem.

use crate::imaging::OutputFormat;
use crate::types::SizeKb;

/// Extensions removed from the original name before the suffix is appended.
const STRIPPED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// Remove one recognised image extension from the end of `name`.
pub fn strip_image_extension(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((stem, ext))
            if STRIPPED_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext)) =>
        {
            stem
        }
        _ => name,
    }
}

/// Build the suggested download name: `<stem>_compressed_<size>kb.<ext>`.
pub fn download_name(original: &str, new_size: SizeKb, format: OutputFormat) -> String {
    format!(
        "{}_compressed_{}kb.{}",
        strip_image_extension(original),
        new_size,
        format.extension()
    )
}
