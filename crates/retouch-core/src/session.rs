//! Edit session: the single current image, its undo history and the
//! operations a shell invokes on them.
//!
//! Every mutating operation validates its input and computes the new buffer
//! before anything is committed, so a failed call leaves both the current
//! image and the history exactly as they were.

use std::io::Write;

use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::buffer::{BufferError, PixelBuffer};
use crate::config::EditorConfig;
use crate::decode::{decode_image, DecodeError};
use crate::encode::{encode_export, encode_preview, CompressionMode, ExportError, ExportFormat};
use crate::filter::{apply_filter, Filter};
use crate::history::HistoryStack;
use crate::mask::MaskError;
use crate::transform::{
    apply_crop_shape, parse_dimension, resize, target_dimensions, CropRegion, CropShape,
    TransformError,
};

/// Errors from mutating session operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("No image loaded")]
    NoImageLoaded,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error(
        "Invalid geometry: region ({}, {})-({}, {}) does not fit a {width}x{height} image",
        .region.left, .region.top, .region.right, .region.bottom
    )]
    InvalidGeometry {
        region: CropRegion,
        width: u32,
        height: u32,
    },

    #[error(transparent)]
    Buffer(#[from] BufferError),

    #[error(transparent)]
    Mask(#[from] MaskError),
}

impl From<TransformError> for EngineError {
    fn from(err: TransformError) -> Self {
        match err {
            TransformError::InvalidArgument(msg) => EngineError::InvalidArgument(msg),
            TransformError::InvalidGeometry {
                region,
                width,
                height,
            } => EngineError::InvalidGeometry {
                region,
                width,
                height,
            },
            TransformError::Mask(err) => EngineError::Mask(err),
            TransformError::Buffer(err) => EngineError::Buffer(err),
        }
    }
}

/// Returned by [`EditSession::undo`] when there is nothing to restore.
///
/// Informational: the session is unchanged.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum UndoError {
    #[error("Nothing to undo")]
    NothingToUndo,
}

/// Coarse lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No image loaded.
    Empty,
    /// An image is loaded and unmodified (or every edit was undone).
    Loaded,
    /// At least one committed edit is in effect.
    Edited,
}

/// One editing session over one image at a time.
#[derive(Debug, Clone, Default)]
pub struct EditSession {
    config: EditorConfig,
    current: Option<PixelBuffer>,
    history: HistoryStack,
    /// Committed edits in effect since the last load.
    edits: usize,
}

impl EditSession {
    /// Create an empty session with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty session with the given settings.
    pub fn with_config(config: EditorConfig) -> Self {
        let history = match config.history_limit {
            Some(limit) => HistoryStack::with_limit(limit),
            None => HistoryStack::new(),
        };
        Self {
            config,
            current: None,
            history,
            edits: 0,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    // -- Loading --------------------------------------------------------------

    /// Decode `bytes` and make the result the current image.
    ///
    /// Clears the history. On failure the session is unchanged.
    #[instrument(skip(self, bytes), fields(len = bytes.len()))]
    pub fn load(&mut self, bytes: &[u8]) -> Result<(), DecodeError> {
        let buffer = decode_image(bytes, self.config.apply_exif_orientation)?;
        self.load_buffer(buffer);
        Ok(())
    }

    /// Make an already-decoded buffer the current image. Clears the history.
    ///
    /// A freshly loaded image is always RGB; any alpha channel is dropped.
    pub fn load_buffer(&mut self, buffer: PixelBuffer) {
        let buffer = if buffer.has_alpha() {
            buffer.without_alpha()
        } else {
            buffer
        };
        info!(
            width = buffer.width(),
            height = buffer.height(),
            channels = buffer.channels(),
            "Image loaded"
        );
        self.history.clear();
        self.current = Some(buffer);
        self.edits = 0;
    }

    /// Drop the current image and history.
    pub fn reset(&mut self) {
        self.history.clear();
        self.current = None;
        self.edits = 0;
    }

    // -- Mutating operations --------------------------------------------------

    /// Apply a catalog filter to the current image.
    #[instrument(skip(self), fields(%filter))]
    pub fn apply_filter(&mut self, filter: Filter) -> Result<(), EngineError> {
        let next = apply_filter(self.loaded()?, filter);
        self.commit(next);
        info!(depth = self.history.len(), "Filter applied");
        Ok(())
    }

    /// Crop or mask the current image to `shape`.
    #[instrument(skip(self), fields(%shape))]
    pub fn apply_crop(&mut self, shape: CropShape) -> Result<(), EngineError> {
        let next = apply_crop_shape(self.loaded()?, shape)?;
        info!(
            width = next.width(),
            height = next.height(),
            channels = next.channels(),
            "Crop applied"
        );
        self.commit(next);
        Ok(())
    }

    /// Resample the current image. A missing dimension keeps the current one.
    #[instrument(skip(self))]
    pub fn resize(&mut self, width: Option<u32>, height: Option<u32>) -> Result<(), EngineError> {
        let current = self.loaded()?;
        let (width, height) = target_dimensions(current, width, height)?;
        let next = resize(current, width, height, self.config.resample_filter)?;
        info!(
            from_w = current.width(),
            from_h = current.height(),
            width,
            height,
            "Resized image"
        );
        self.commit(next);
        Ok(())
    }

    /// Resize from free-text fields. Blank text keeps the current dimension.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidArgument` for non-numeric, zero or
    /// negative text.
    pub fn resize_from_text(&mut self, width: &str, height: &str) -> Result<(), EngineError> {
        self.loaded()?;
        let width = parse_dimension(width)?;
        let height = parse_dimension(height)?;
        self.resize(width, height)
    }

    /// Restore the image as it was before the most recent edit.
    #[instrument(skip(self))]
    pub fn undo(&mut self) -> Result<(), UndoError> {
        let previous = self.history.pop().map_err(|_| UndoError::NothingToUndo)?;
        self.current = Some(previous);
        self.edits = self.edits.saturating_sub(1);
        info!(depth = self.history.len(), "Undo");
        Ok(())
    }

    // -- Output ---------------------------------------------------------------

    /// Encode the current image as `format` under `mode`.
    #[instrument(skip(self))]
    pub fn export(
        &self,
        format: ExportFormat,
        mode: CompressionMode,
    ) -> Result<Vec<u8>, ExportError> {
        let current = self.current.as_ref().ok_or(ExportError::NoImageLoaded)?;
        encode_export(current, format, mode, &self.config.export_options()).inspect_err(|err| {
            warn!(%err, "Export rejected");
        })
    }

    /// Encode the current image and write it to `sink`.
    ///
    /// Returns the number of bytes written.
    pub fn export_to<W: Write>(
        &self,
        format: ExportFormat,
        mode: CompressionMode,
        sink: &mut W,
    ) -> Result<usize, ExportError> {
        let bytes = self.export(format, mode)?;
        sink.write_all(&bytes)?;
        sink.flush()?;
        Ok(bytes.len())
    }

    /// PNG preview of the current image, downscaled to the configured edge.
    pub fn preview_bytes(&self) -> Result<Vec<u8>, ExportError> {
        let current = self.current.as_ref().ok_or(ExportError::NoImageLoaded)?;
        encode_preview(
            current,
            self.config.preview_max_edge,
            self.config.resample_filter,
        )
    }

    // -- Inspection -----------------------------------------------------------

    pub fn state(&self) -> SessionState {
        match (&self.current, self.edits) {
            (None, _) => SessionState::Empty,
            (Some(_), 0) => SessionState::Loaded,
            (Some(_), _) => SessionState::Edited,
        }
    }

    pub fn current(&self) -> Option<&PixelBuffer> {
        self.current.as_ref()
    }

    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.current.as_ref().map(PixelBuffer::dimensions)
    }

    pub fn history_depth(&self) -> usize {
        self.history.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    fn loaded(&self) -> Result<&PixelBuffer, EngineError> {
        self.current.as_ref().ok_or(EngineError::NoImageLoaded)
    }

    /// Replace the current image, moving the old one onto the history.
    fn commit(&mut self, next: PixelBuffer) {
        if let Some(previous) = self.current.replace(next) {
            self.history.push_owned(previous);
        }
        self.edits += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::test_support::gradient;
    use crate::decode::test_support::jpeg_with_orientation;
    use crate::encode::AlphaPolicy;

    fn session_with(width: u32, height: u32) -> EditSession {
        let mut session = EditSession::new();
        session.load_buffer(gradient(width, height));
        session
    }

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = Vec::new();
        gradient(width, height)
            .to_dynamic_image()
            .unwrap()
            .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_new_session_is_empty() {
        let session = EditSession::new();
        assert_eq!(session.state(), SessionState::Empty);
        assert!(session.current().is_none());
        assert_eq!(session.dimensions(), None);
        assert!(!session.can_undo());
    }

    #[test]
    fn test_operations_require_image() {
        let mut session = EditSession::new();
        assert_eq!(
            session.apply_filter(Filter::Invert),
            Err(EngineError::NoImageLoaded)
        );
        assert_eq!(
            session.apply_crop(CropShape::Square),
            Err(EngineError::NoImageLoaded)
        );
        assert_eq!(
            session.resize(Some(10), None),
            Err(EngineError::NoImageLoaded)
        );
        assert_eq!(
            session.resize_from_text("abc", ""),
            Err(EngineError::NoImageLoaded)
        );
        assert!(matches!(
            session.export(ExportFormat::Png, CompressionMode::Lossless),
            Err(ExportError::NoImageLoaded)
        ));
        assert!(matches!(
            session.preview_bytes(),
            Err(ExportError::NoImageLoaded)
        ));
        assert_eq!(session.undo(), Err(UndoError::NothingToUndo));
    }

    #[test]
    fn test_load_decodes_to_rgb() {
        let mut session = EditSession::new();
        session.load(&png_bytes(30, 20)).unwrap();

        assert_eq!(session.state(), SessionState::Loaded);
        assert_eq!(session.dimensions(), Some((30, 20)));
        assert_eq!(session.current().unwrap().channels(), 3);
        assert_eq!(session.current().unwrap(), &gradient(30, 20));
    }

    #[test]
    fn test_load_buffer_drops_alpha() {
        let mut session = EditSession::new();
        session.load_buffer(gradient(6, 4).with_alpha());

        assert_eq!(session.state(), SessionState::Loaded);
        assert_eq!(session.current().unwrap().channels(), 3);
        assert_eq!(session.current().unwrap(), &gradient(6, 4));
    }

    #[test]
    fn test_load_ignores_exif_orientation_by_default() {
        let bytes = jpeg_with_orientation(40, 20, 6);

        let mut session = EditSession::new();
        session.load(&bytes).unwrap();
        assert_eq!(session.dimensions(), Some((40, 20)));

        let mut session = EditSession::with_config(EditorConfig {
            apply_exif_orientation: true,
            ..EditorConfig::default()
        });
        session.load(&bytes).unwrap();
        assert_eq!(session.dimensions(), Some((20, 40)));
    }

    #[test]
    fn test_failed_load_keeps_session() {
        let mut session = session_with(10, 10);
        session.apply_filter(Filter::Invert).unwrap();

        assert!(session.load(b"not an image").is_err());
        assert!(session.load(&[]).is_err());
        assert_eq!(session.state(), SessionState::Edited);
        assert_eq!(session.history_depth(), 1);
    }

    #[test]
    fn test_load_clears_history() {
        let mut session = session_with(10, 10);
        session.apply_filter(Filter::Sepia).unwrap();
        session.apply_filter(Filter::Blur).unwrap();
        assert_eq!(session.history_depth(), 2);

        session.load(&png_bytes(8, 8)).unwrap();
        assert_eq!(session.history_depth(), 0);
        assert_eq!(session.state(), SessionState::Loaded);
    }

    #[test]
    fn test_undo_restores_each_operation() {
        let operations: Vec<Box<dyn Fn(&mut EditSession) -> Result<(), EngineError>>> = vec![
            Box::new(|s| s.apply_filter(Filter::Grayscale)),
            Box::new(|s| s.apply_filter(Filter::Sharpen)),
            Box::new(|s| s.apply_filter(Filter::None)),
            Box::new(|s| s.apply_crop(CropShape::Circle)),
            Box::new(|s| s.apply_crop(CropShape::Square)),
            Box::new(|s| s.apply_crop(CropShape::Triangle)),
            Box::new(|s| s.apply_crop(CropShape::Rectangle)),
            Box::new(|s| s.resize(Some(37), Some(91))),
            Box::new(|s| s.resize_from_text("64", "")),
        ];

        for operation in operations {
            let mut session = session_with(160, 120);
            let before = session.current().unwrap().clone();

            operation(&mut session).unwrap();
            assert_eq!(session.state(), SessionState::Edited);
            session.undo().unwrap();

            assert_eq!(session.current().unwrap(), &before);
            assert_eq!(session.state(), SessionState::Loaded);
        }
    }

    #[test]
    fn test_history_depth_tracks_operations() {
        let mut session = session_with(160, 120);
        session.apply_filter(Filter::Contrast).unwrap();
        session.apply_crop(CropShape::Square).unwrap();
        session.resize(Some(50), Some(50)).unwrap();
        assert_eq!(session.history_depth(), 3);

        session.undo().unwrap();
        assert_eq!(session.history_depth(), 2);
        assert_eq!(session.dimensions(), Some((120, 120)));

        session.undo().unwrap();
        session.undo().unwrap();
        assert_eq!(session.dimensions(), Some((160, 120)));
        assert_eq!(session.undo(), Err(UndoError::NothingToUndo));
        assert_eq!(session.state(), SessionState::Loaded);
    }

    #[test]
    fn test_invalid_resize_leaves_state() {
        let mut session = session_with(40, 30);
        session.apply_filter(Filter::Invert).unwrap();
        let before = session.current().unwrap().clone();

        for (w, h) in [("abc", "10"), ("10", "-3"), ("0", ""), ("", "1.5")] {
            assert!(matches!(
                session.resize_from_text(w, h),
                Err(EngineError::InvalidArgument(_))
            ));
        }
        assert!(matches!(
            session.resize(Some(0), None),
            Err(EngineError::InvalidArgument(_))
        ));

        assert_eq!(session.current().unwrap(), &before);
        assert_eq!(session.history_depth(), 1);
    }

    #[test]
    fn test_blank_resize_keeps_size() {
        let mut session = session_with(40, 30);
        session.resize_from_text(" ", "").unwrap();
        assert_eq!(session.dimensions(), Some((40, 30)));
        assert_eq!(session.history_depth(), 1);
    }

    #[test]
    fn test_rectangle_on_small_image() {
        let mut session = session_with(100, 300);
        let result = session.apply_crop(CropShape::Rectangle);

        assert!(matches!(result, Err(EngineError::InvalidGeometry { .. })));
        assert_eq!(session.history_depth(), 0);
        assert_eq!(session.dimensions(), Some((100, 300)));
    }

    #[test]
    fn test_square_and_rectangle_geometry() {
        let mut session = session_with(400, 300);
        session.apply_crop(CropShape::Square).unwrap();
        assert_eq!(session.dimensions(), Some((300, 300)));
        assert_eq!(
            session.current().unwrap().pixel(0, 0).unwrap(),
            gradient(400, 300).pixel(50, 0).unwrap()
        );

        let mut session = session_with(500, 400);
        session.apply_crop(CropShape::Rectangle).unwrap();
        assert_eq!(session.dimensions(), Some((400, 300)));
        assert_eq!(
            session.current().unwrap().pixel(0, 0).unwrap(),
            gradient(500, 400).pixel(50, 50).unwrap()
        );
    }

    #[test]
    fn test_mask_shapes_add_alpha_once() {
        for shape in [CropShape::Circle, CropShape::Triangle] {
            let mut session = session_with(60, 40);
            session.apply_crop(shape).unwrap();
            assert_eq!(session.current().unwrap().channels(), 4);

            session.apply_crop(shape).unwrap();
            assert_eq!(session.current().unwrap().channels(), 4);
            assert_eq!(session.dimensions(), Some((60, 40)));
        }
    }

    #[test]
    fn test_filters_keep_alpha_after_mask() {
        let mut session = session_with(30, 30);
        session.apply_crop(CropShape::Circle).unwrap();
        session.apply_filter(Filter::Grayscale).unwrap();
        session.resize(Some(15), None).unwrap();
        assert_eq!(session.current().unwrap().channels(), 4);
    }

    #[test]
    fn test_export_pairs() {
        let session = session_with(24, 16);

        let png = session
            .export(ExportFormat::Png, CompressionMode::Lossless)
            .unwrap();
        assert_eq!(&png[1..4], b"PNG");

        let jpg = session
            .export(ExportFormat::Jpg, CompressionMode::Lossy)
            .unwrap();
        assert_eq!(&jpg[..2], &[0xFF, 0xD8]);

        assert!(matches!(
            session.export(ExportFormat::Png, CompressionMode::Lossy),
            Err(ExportError::UnsupportedCompression { .. })
        ));
        assert!(matches!(
            session.export(ExportFormat::Jpg, CompressionMode::Lossless),
            Err(ExportError::UnsupportedCompression { .. })
        ));
        assert!(matches!(
            session.export(ExportFormat::Bmp, CompressionMode::Lossless),
            Err(ExportError::UnsupportedCompression { .. })
        ));
    }

    #[test]
    fn test_export_does_not_mutate() {
        let mut session = session_with(24, 16);
        session.apply_crop(CropShape::Circle).unwrap();
        let before = session.current().unwrap().clone();

        session
            .export(ExportFormat::Jpeg, CompressionMode::Lossy)
            .unwrap();
        assert_eq!(session.current().unwrap(), &before);
        assert_eq!(session.history_depth(), 1);
    }

    #[test]
    fn test_export_alpha_reject_policy() {
        let config = EditorConfig {
            alpha_policy: AlphaPolicy::Reject,
            ..EditorConfig::default()
        };
        let mut session = EditSession::with_config(config);
        session.load_buffer(gradient(20, 20));
        session.apply_crop(CropShape::Triangle).unwrap();

        assert!(matches!(
            session.export(ExportFormat::Jpg, CompressionMode::Lossy),
            Err(ExportError::UnsupportedChannels { channels: 4, .. })
        ));
        assert!(session
            .export(ExportFormat::Png, CompressionMode::Lossless)
            .is_ok());
    }

    #[test]
    fn test_export_to_sink() {
        let session = session_with(12, 12);
        let mut sink = Vec::new();
        let written = session
            .export_to(ExportFormat::Tiff, CompressionMode::Lossless, &mut sink)
            .unwrap();

        assert_eq!(written, sink.len());
        assert_eq!(
            sink,
            session
                .export(ExportFormat::Tiff, CompressionMode::Lossless)
                .unwrap()
        );
    }

    #[test]
    fn test_preview_is_bounded() {
        let config = EditorConfig {
            preview_max_edge: 50,
            ..EditorConfig::default()
        };
        let mut session = EditSession::with_config(config);
        session.load_buffer(gradient(200, 100));

        let preview = image::load_from_memory(&session.preview_bytes().unwrap()).unwrap();
        assert_eq!((preview.width(), preview.height()), (50, 25));
        assert_eq!(session.dimensions(), Some((200, 100)));
    }

    #[test]
    fn test_history_limit() {
        let config = EditorConfig {
            history_limit: Some(2),
            ..EditorConfig::default()
        };
        let mut session = EditSession::with_config(config);
        session.load_buffer(gradient(20, 20));
        for _ in 0..5 {
            session.apply_filter(Filter::Invert).unwrap();
        }

        assert_eq!(session.history_depth(), 2);
        session.undo().unwrap();
        session.undo().unwrap();
        assert_eq!(session.undo(), Err(UndoError::NothingToUndo));
        assert_eq!(session.state(), SessionState::Edited);
    }

    #[test]
    fn test_reset() {
        let mut session = session_with(10, 10);
        session.apply_filter(Filter::Sepia).unwrap();
        session.reset();

        assert_eq!(session.state(), SessionState::Empty);
        assert_eq!(session.history_depth(), 0);
    }

    #[test]
    fn test_session_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<EditSession>();
    }

    #[test]
    fn test_engine_error_from_transform() {
        let err: EngineError = TransformError::InvalidArgument("bad".into()).into();
        assert_eq!(err, EngineError::InvalidArgument("bad".into()));
        assert_eq!(err.to_string(), "Invalid argument: bad");
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
