//! Terminal output for the CLI.
//!
//! # Status Display
//!
//! Every status the [`Session`](crate::session::Session) emits becomes zero
//! or more lines:
//!
//! ```text
//! Selected: holiday.png
//! Reading file...
//! Loading image into memory...
//! Compressing image...
//! Original Size: 2048.00 KB
//! New Size: 312.44 KB
//! Download: holiday_compressed_312.44kb.jpg
//! ```
//!
//! A new size over the warning threshold is printed in red, otherwise green.
//! Failures print the error's user message.
//!
//! # Architecture
//!
//! [`format_status`] is pure (returns `Vec<String>`, no I/O) for testability.
//! [`TerminalView`] is the [`View`] that prints those lines.

use crate::session::{ArtifactSummary, ControlState, SizeHint, Status, View};
use owo_colors::OwoColorize;
use serde::Serialize;
use std::path::Path;

/// Plain-text lines for one status update.
pub fn format_status(status: &Status<'_>) -> Vec<String> {
    match status {
        Status::Cleared => Vec::new(),
        Status::Selected(name) => vec![format!("Selected: {name}")],
        Status::Progress(stage) => vec![stage.message().to_string()],
        Status::Converted(artifact, _) => vec![
            format!("Original Size: {} KB", artifact.original_size),
            format!("New Size: {} KB", artifact.new_size),
            format!("Download: {}", artifact.download_name),
        ],
        Status::Failed(e) => vec![e.user_message().to_string()],
    }
}

/// Line shown once the download has been written.
pub fn format_saved(path: &Path) -> String {
    format!("Saved: {}", path.display())
}

/// Machine-readable summary printed by `convert --json`.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub source: &'a str,
    pub output: String,
    pub download_name: &'a str,
    pub media_type: &'a str,
    pub original_kb: f64,
    pub new_kb: f64,
    pub width: u32,
    pub height: u32,
    pub over_limit: bool,
}

impl<'a> JsonReport<'a> {
    pub fn new(summary: &'a ArtifactSummary, saved: &Path) -> Self {
        Self {
            source: &summary.original_name,
            output: saved.display().to_string(),
            download_name: &summary.download_name,
            media_type: summary.media_type,
            original_kb: summary.original_size.rounded(),
            new_kb: summary.new_size.rounded(),
            width: summary.width,
            height: summary.height,
            over_limit: summary.hint == SizeHint::OverLimit,
        }
    }
}

pub fn format_json_report(summary: &ArtifactSummary, saved: &Path) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport::new(summary, saved))
}

/// Prints statuses to stdout, or to stderr when stdout is reserved for JSON.
pub struct TerminalView {
    to_stderr: bool,
}

impl TerminalView {
    pub fn stdout() -> Self {
        Self { to_stderr: false }
    }

    pub fn stderr() -> Self {
        Self { to_stderr: true }
    }

    fn emit(&self, line: &str) {
        if self.to_stderr {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
    }
}

impl View for TerminalView {
    fn set_control(&mut self, state: ControlState, label: &str) {
        tracing::debug!(?state, label, "control");
    }

    fn show(&mut self, status: Status<'_>) {
        let lines = format_status(&status);
        match status {
            Status::Converted(_, hint) => {
                for (i, line) in lines.iter().enumerate() {
                    // second line is the new size
                    if i == 1 {
                        match hint {
                            SizeHint::WithinLimit => self.emit(&line.green().bold().to_string()),
                            SizeHint::OverLimit => self.emit(&line.red().bold().to_string()),
                        }
                    } else {
                        self.emit(line);
                    }
                }
            }
            Status::Failed(_) => {
                for line in &lines {
                    self.emit(&line.red().to_string());
                }
            }
            _ => {
                for line in &lines {
                    self.emit(line);
                }
            }
        }
    }
}
