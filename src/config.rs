//! Configuration.
//!
//! Handles loading, validating, and merging `recompress.toml`. Stock defaults
//! are the base layer; a user file only needs the keys it changes.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [encoding]
//! quality = 0.7             # Lossy quality, 0 < quality <= 1
//! format = "jpeg"           # Output format (only jpeg)
//!
//! [report]
//! size_warning_kb = 1024.0  # New sizes above this are flagged
//!
//! [logging]
//! level = "warn"            # tracing filter directive; RUST_LOG wins
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::{EncodeSettings, OutputFormat, Quality};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "recompress.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `recompress.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Output quality and format.
    pub encoding: EncodingConfig,
    /// Status report settings.
    pub report: ReportConfig,
    /// Log filter for the binary.
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let q = self.encoding.quality;
        if !q.is_finite() || q <= 0.0 || q > 1.0 {
            return Err(ConfigError::Validation(
                "encoding.quality must be greater than 0 and at most 1".into(),
            ));
        }
        let limit = self.report.size_warning_kb;
        if !limit.is_finite() || limit <= 0.0 {
            return Err(ConfigError::Validation(
                "report.size_warning_kb must be a positive number".into(),
            ));
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::Validation(
                "logging.level must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Encoder settings derived from the `[encoding]` section.
    pub fn encode_settings(&self) -> EncodeSettings {
        EncodeSettings {
            quality: Quality::new(self.encoding.quality),
            format: self.encoding.format,
        }
    }
}

/// Output quality and format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EncodingConfig {
    /// Lossy quality as a fraction (`0.7` = 70%).
    pub quality: f32,
    /// Output container.
    pub format: OutputFormat,
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self {
            quality: Quality::default().fraction(),
            format: OutputFormat::default(),
        }
    }
}

/// Status report settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// New sizes above this many KB are shown as a warning.
    pub size_warning_kb: f64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            size_warning_kb: 1024.0,
        }
    }
}

/// Log filter settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged on top of.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(AppConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
pub fn load_raw_config(path: &Path) -> Result<toml::Value, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Merge an optional overlay onto the stock defaults, then deserialize and
/// validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<AppConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: AppConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load configuration.
///
/// - `Some(path)`: the file must exist.
/// - `None`: use `recompress.toml` in `cwd` if present, stock defaults otherwise.
pub fn load_config(explicit: Option<&Path>, cwd: &Path) -> Result<AppConfig, ConfigError> {
    let overlay = match explicit {
        Some(path) => Some(load_raw_config(path)?),
        None => {
            let candidate = cwd.join(DEFAULT_CONFIG_FILE);
            if candidate.exists() {
                Some(load_raw_config(&candidate)?)
            } else {
                None
            }
        }
    };
    resolve_config(overlay)
}

/// Returns a fully-commented stock `recompress.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r#"# recompress configuration
# ========================
# All keys are optional. Anything left out keeps the value shown here.

[encoding]
# Lossy encoding quality as a fraction: greater than 0, at most 1.
# 0.7 is 70% on the JPEG encoder's 1-100 scale.
quality = 0.7

# Output format. "jpeg" is the only supported value.
format = "jpeg"

[report]
# A compressed size above this many KB is highlighted in the status output.
size_warning_kb = 1024.0

[logging]
# Log filter for stderr, in tracing EnvFilter syntax (e.g. "info",
# "recompress=debug"). The RUST_LOG environment variable takes precedence.
level = "warn"
"#
}
