//! Retouch Core - Image editing engine
//!
//! This crate provides the editing core behind the Retouch shells: a fixed
//! filter catalog, shape crops and alpha masks, resampling, single-step
//! undo, and export to PNG, JPEG, TIFF and WebP.
//!
//! [`EditSession`] is the entry point; the modules below it are pure
//! functions over [`PixelBuffer`] and can be used on their own.

pub mod buffer;
pub mod config;
pub mod decode;
pub mod encode;
pub mod filter;
pub mod history;
pub mod luminance;
pub mod mask;
pub mod session;
pub mod transform;

use thiserror::Error;

pub use buffer::{BufferError, ChannelLayout, PixelBuffer};
pub use config::{ConfigError, EditorConfig};
pub use decode::DecodeError;
pub use encode::{AlphaPolicy, CompressionMode, ExportError, ExportFormat};
pub use filter::Filter;
pub use history::HistoryStack;
pub use session::{EditSession, EngineError, SessionState, UndoError};
pub use transform::{CropShape, ResampleFilter};

/// A name that does not match any known filter, shape, format or mode.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown {kind}: '{value}'")]
pub struct ParseNameError {
    kind: &'static str,
    value: String,
}

impl ParseNameError {
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }

    /// What was being parsed, e.g. `"filter"`.
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// The rejected input.
    pub fn value(&self) -> &str {
        &self.value
    }
}
