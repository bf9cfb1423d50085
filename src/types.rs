//! Small value types shared between the pipeline and the presentation layer.

use std::fmt;

/// A byte count expressed in kibibytes (`bytes / 1024`).
///
/// Displays with exactly two decimals, which is the form used both in status
/// text and in download filenames.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct SizeKb(f64);

impl SizeKb {
    pub fn new(kb: f64) -> Self {
        Self(kb)
    }

    pub fn from_bytes(bytes: u64) -> Self {
        Self(bytes as f64 / 1024.0)
    }

    /// Unrounded value.
    pub fn value(self) -> f64 {
        self.0
    }

    /// Value rounded to two decimals, ties away from zero. This is what the
    /// user sees in status text, filenames and the JSON report.
    pub fn rounded(self) -> f64 {
        (self.0 * 100.0).round() / 100.0
    }
}

impl fmt::Display for SizeKb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.rounded())
    }
}
