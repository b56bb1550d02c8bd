#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod canvas;
pub mod config;
pub mod error;
pub mod export;
mod geometry;
pub mod history;
pub mod input;
mod panels;
pub mod snapshot;
pub mod stroke;
pub mod surface;
pub mod tools;

pub use app::SketchApp;
pub use canvas::Canvas;
pub use config::SketchConfig;
pub use error::{CanvasError, CanvasResult, ConfigError, ExportError, SnapshotError};
pub use export::{DirectorySink, DownloadSink, ExportFormat, ExportedImage};
pub use history::SnapshotHistory;
pub use input::{GestureSuppression, PointerEvent, PointerPhase};
pub use snapshot::{DecodedSnapshot, RestoreRequest, Snapshot};
pub use stroke::{StrokeRenderer, StrokeStyle};
pub use surface::Surface;
pub use tools::{ToolMode, ToolState};
