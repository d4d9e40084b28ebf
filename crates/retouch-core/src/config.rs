//! Editor configuration.
//!
//! Every field has a default, so a JSON document only needs the values it
//! wants to override:
//!
//! ```json
//! {
//!   "jpeg_quality": 85,
//!   "webp_quality": 85,
//!   "preview_max_edge": 400,
//!   "resample_filter": "bilinear",
//!   "alpha_policy": "flatten",
//!   "background": [255, 255, 255],
//!   "history_limit": null,
//!   "apply_exif_orientation": false
//! }
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::encode::{AlphaPolicy, ExportOptions, DEFAULT_QUALITY};
use crate::transform::ResampleFilter;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Config validation error: {0}")]
    Invalid(String),
}

/// Default longest edge of the preview image, in pixels.
pub const DEFAULT_PREVIEW_MAX_EDGE: u32 = 400;

/// Settings for an [`EditSession`](crate::session::EditSession).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    /// JPEG export quality (1-100).
    pub jpeg_quality: u8,
    /// WebP export quality (1-100).
    pub webp_quality: u8,
    /// Longest edge of the preview produced by `preview_bytes`.
    pub preview_max_edge: u32,
    /// Resampling filter for resize and preview.
    pub resample_filter: ResampleFilter,
    /// Alpha handling for formats without an alpha channel.
    pub alpha_policy: AlphaPolicy,
    /// Background color used when flattening alpha.
    pub background: [u8; 3],
    /// Maximum undo depth. `None` keeps every step.
    pub history_limit: Option<usize>,
    /// Rotate/flip images according to their EXIF orientation on load.
    /// Off by default: pixels are loaded in stored order.
    pub apply_exif_orientation: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: DEFAULT_QUALITY,
            webp_quality: DEFAULT_QUALITY,
            preview_max_edge: DEFAULT_PREVIEW_MAX_EDGE,
            resample_filter: ResampleFilter::default(),
            alpha_policy: AlphaPolicy::default(),
            background: [255, 255, 255],
            history_limit: None,
            apply_exif_orientation: false,
        }
    }
}

impl EditorConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: EditorConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(ConfigError::Invalid("jpeg_quality must be 1-100".into()));
        }
        if !(1..=100).contains(&self.webp_quality) {
            return Err(ConfigError::Invalid("webp_quality must be 1-100".into()));
        }
        if self.preview_max_edge == 0 {
            return Err(ConfigError::Invalid(
                "preview_max_edge must be non-zero".into(),
            ));
        }
        Ok(())
    }

    /// Encoder parameters derived from this config.
    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            jpeg_quality: self.jpeg_quality.clamp(1, 100),
            webp_quality: self.webp_quality.clamp(1, 100),
            alpha_policy: self.alpha_policy,
            background: self.background,
        }
    }
}
