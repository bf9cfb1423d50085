//! Parameter types for encoding.
//!
//! These describe *what* the encoder should produce. The
//! [`pipeline`](crate::pipeline) decides when to encode; the
//! [`backend`](super::backend) does the pixel work.
//!
//! ## Types
//!
//! - [`Quality`]: Lossy encoding quality as a fraction in `(0, 1]`, default 0.7.
//! - [`OutputFormat`]: Target container. JPEG is the only one.
//! - [`EncodeSettings`]: Quality + format, passed to every conversion.

use serde::{Deserialize, Serialize};

/// Quality for lossy encoding, stored as a fraction in `(0, 1]`.
///
/// Out-of-range values are clamped on construction; config validation rejects
/// them before they get here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quality(f32);

impl Quality {
    /// Smallest quality the encoder scale can express (1 on the 1-100 scale).
    const MIN: f32 = 0.01;

    pub fn new(fraction: f32) -> Self {
        if fraction.is_nan() {
            return Self::default();
        }
        Self(fraction.clamp(Self::MIN, 1.0))
    }

    pub fn fraction(self) -> f32 {
        self.0
    }

    /// Quality on the encoder's 1-100 scale.
    pub fn percent(self) -> u8 {
        (self.0 * 100.0).round().clamp(1.0, 100.0) as u8
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(0.7)
    }
}

/// Encoded output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    #[serde(alias = "jpg")]
    Jpeg,
}

impl OutputFormat {
    /// Extension used for the download filename.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "image/jpeg",
        }
    }

    /// Name shown on the convert control.
    pub fn display_name(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "JPEG",
        }
    }
}

/// Everything the encoder needs for one conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EncodeSettings {
    pub quality: Quality,
    pub format: OutputFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_default_is_seventy_percent() {
        assert_eq!(Quality::default().fraction(), 0.7);
        assert_eq!(Quality::default().percent(), 70);
    }

    #[test]
    fn quality_clamps_to_valid_range() {
        assert_eq!(Quality::new(0.0).percent(), 1);
        assert_eq!(Quality::new(-3.0).percent(), 1);
        assert_eq!(Quality::new(0.5).percent(), 50);
        assert_eq!(Quality::new(1.5).percent(), 100);
    }

    #[test]
    fn quality_nan_falls_back_to_default() {
        assert_eq!(Quality::new(f32::NAN), Quality::default());
    }

    #[test]
    fn quality_percent_rounds() {
        assert_eq!(Quality::new(0.856).percent(), 86);
        assert_eq!(Quality::new(0.004).percent(), 1);
    }

    #[test]
    fn jpeg_format_metadata() {
        assert_eq!(OutputFormat::Jpeg.extension(), "jpg");
        assert_eq!(OutputFormat::Jpeg.mime_type(), "image/jpeg");
        assert_eq!(OutputFormat::Jpeg.display_name(), "JPEG");
    }
}
