//! Presentation adapter: the popup's controller, minus the DOM.
//!
//! A [`Session`] owns one [`View`] (the status line and the convert control),
//! the [`Recompressor`], and the currently selected file. It drives the view
//! through the same sequence the extension popup shows:
//!
//! ```text
//! select(file)   → control Ready,  status "Selected: photo.png"
//! convert()      → control Busy ("Processing..."), stage statuses...
//!                → status Converted / Failed
//!                → control Ready again, whatever happened
//! ```
//!
//! `convert` takes `&mut self`, so a second conversion cannot start while one
//! is in flight.

use crate::imaging::{EncodeSettings, ImageCodec};
use crate::pipeline::{CompressedArtifact, RecompressError, Recompressor, Stage};
use crate::source::SourceFile;
use crate::types::SizeKb;
use std::io;
use std::path::{Path, PathBuf};

/// State of the convert control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlState {
    /// No file selected.
    Disabled,
    /// A file is selected and nothing is running.
    Ready,
    /// A conversion is in flight.
    Busy,
}

/// Whether the new size is within the configured warning threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeHint {
    WithinLimit,
    OverLimit,
}

impl SizeHint {
    pub fn for_artifact(artifact: &CompressedArtifact, limit_kb: f64) -> Self {
        if artifact.new_size.rounded() <= limit_kb {
            SizeHint::WithinLimit
        } else {
            SizeHint::OverLimit
        }
    }
}

/// What the status area should show.
#[derive(Debug)]
pub enum Status<'a> {
    Cleared,
    Selected(&'a str),
    Progress(Stage),
    Converted(&'a CompressedArtifact, SizeHint),
    Failed(&'a RecompressError),
}

/// The UI surface a session drives.
pub trait View {
    fn set_control(&mut self, state: ControlState, label: &str);
    fn show(&mut self, status: Status<'_>);
}

/// A compressed file ready to be handed to the user, once.
#[derive(Debug, Clone, PartialEq)]
pub struct Download {
    filename: String,
    bytes: Vec<u8>,
}

impl Download {
    fn from_artifact(artifact: CompressedArtifact) -> Self {
        Self {
            filename: artifact.download_name,
            bytes: artifact.bytes,
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Write the file into `dir` under its suggested name. Consumes the
    /// download.
    pub fn save(self, dir: &Path) -> io::Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.filename);
        std::fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}

/// Successful conversion as seen by the caller.
#[derive(Debug)]
pub struct Converted {
    pub artifact_summary: ArtifactSummary,
    pub download: Download,
}

/// Everything about the artifact except its bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactSummary {
    pub original_name: String,
    pub download_name: String,
    pub media_type: &'static str,
    pub original_size: SizeKb,
    pub new_size: SizeKb,
    pub width: u32,
    pub height: u32,
    pub hint: SizeHint,
}

/// Controller for one user session.
pub struct Session<V: View, C: ImageCodec> {
    view: V,
    recompressor: Recompressor<C>,
    settings: EncodeSettings,
    size_warning_kb: f64,
    selected: Option<SourceFile>,
}

impl<V: View, C: ImageCodec> Session<V, C> {
    pub fn new(view: V, codec: C, settings: EncodeSettings, size_warning_kb: f64) -> Self {
        let mut session = Self {
            view,
            recompressor: Recompressor::new(codec),
            settings,
            size_warning_kb,
            selected: None,
        };
        session.set_control(ControlState::Disabled);
        session
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn recompressor(&self) -> &Recompressor<C> {
        &self.recompressor
    }

    /// Label for the idle control, e.g. "Convert and Download (JPEG Quality 70%)".
    pub fn idle_label(&self) -> String {
        format!(
            "Convert and Download ({} Quality {}%)",
            self.settings.format.display_name(),
            self.settings.quality.percent()
        )
    }

    fn set_control(&mut self, state: ControlState) {
        let label = match state {
            ControlState::Busy => "Processing...".to_string(),
            ControlState::Disabled | ControlState::Ready => self.idle_label(),
        };
        self.view.set_control(state, &label);
    }

    /// Replace the selection. `None` clears it.
    pub fn select(&mut self, file: Option<SourceFile>) {
        self.selected = file;
        match &self.selected {
            Some(file) => {
                self.view.show(Status::Selected(file.name()));
                self.set_control(ControlState::Ready);
            }
            None => {
                self.view.show(Status::Cleared);
                self.set_control(ControlState::Disabled);
            }
        }
    }

    /// Convert the selected file. Returns `None` when nothing is selected.
    ///
    /// The control is back in [`ControlState::Ready`] when this returns,
    /// whether the conversion succeeded or not. The selection is kept so the
    /// user can retry.
    pub async fn convert(&mut self) -> Option<Result<Converted, RecompressError>> {
        let source = self.selected.clone()?;
        let original_name = source.name().to_string();

        self.set_control(ControlState::Busy);
        self.view.show(Status::Cleared);

        let view = &mut self.view;
        let result = self
            .recompressor
            .recompress(source, self.settings, |stage| {
                view.show(Status::Progress(stage))
            })
            .await;

        let outcome = match result {
            Ok(artifact) => {
                let hint = SizeHint::for_artifact(&artifact, self.size_warning_kb);
                self.view.show(Status::Converted(&artifact, hint));
                let artifact_summary = ArtifactSummary {
                    original_name,
                    download_name: artifact.download_name.clone(),
                    media_type: artifact.media_type,
                    original_size: artifact.original_size,
                    new_size: artifact.new_size,
                    width: artifact.width,
                    height: artifact.height,
                    hint,
                };
                Ok(Converted {
                    artifact_summary,
                    download: Download::from_artifact(artifact),
                })
            }
            Err(e) => {
                self.view.show(Status::Failed(&e));
                Err(e)
            }
        };

        self.set_control(ControlState::Ready);
        Some(outcome)
    }
}
