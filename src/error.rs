use thiserror::Error;

/// Errors raised while capturing or restoring a surface snapshot
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Failed to encode snapshot: {0}")]
    Encode(#[source] image::ImageError),

    #[error("Failed to decode snapshot: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Snapshot is {found:?} but the surface is {expected:?}")]
    DimensionMismatch {
        expected: (u32, u32),
        found: (u32, u32),
    },
}

/// Errors raised by the export pipeline or a download sink
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to encode {format} image: {source}")]
    Encode {
        format: &'static str,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to write export: {0}")]
    Write(#[from] std::io::Error),
}

/// Errors raised while loading the sketchpad configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Recoverable conditions reported by the [`crate::Canvas`] engine.
///
/// None of these leave the surface or the history in a half-updated state.
#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("A snapshot restore is already in flight")]
    RestoreInFlight,

    #[error("Cannot navigate history while a stroke is in progress")]
    StrokeInProgress,

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Result type for engine operations
pub type CanvasResult<T> = Result<T, CanvasError>;
