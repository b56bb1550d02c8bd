use eframe::egui;
use futures::channel::oneshot;

use crate::canvas::Canvas;
use crate::config::SketchConfig;
use crate::export::{DirectorySink, DownloadSink, ExportFormat};
use crate::input::{GestureSuppression, NoGestures};
use crate::panels;
use crate::snapshot::{DecodedSnapshot, RestoreRequest};
use crate::tools::ToolState;

/// Storage key for the persisted tool settings
const TOOLS_KEY: &str = "sketchpad_tools";

/// Which way a history move goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryMove {
    Undo,
    Redo,
}

/// eframe host around the [`Canvas`] engine.
///
/// Only the tool settings are persisted; surface and history start fresh.
pub struct SketchApp {
    canvas: Canvas,
    sink: Box<dyn DownloadSink>,
    texture: Option<egui::TextureHandle>,
    texture_dirty: bool,
    viewport: Option<egui::Vec2>,
    // Decoded snapshot coming back from the worker thread
    restore_rx: Option<oneshot::Receiver<DecodedSnapshot>>,
    status: Option<String>,
}

impl SketchApp {
    /// Called once before the first frame.
    ///
    /// Exports are written to the configured directory.
    pub fn new(cc: &eframe::CreationContext<'_>, config: SketchConfig) -> Self {
        let sink = DirectorySink::new(config.export_dir.clone());
        Self::with_collaborators(config, cc.storage, Box::new(sink), NoGestures)
    }

    /// Build the app around host-provided collaborators.
    ///
    /// The surface starts as a 1x1 placeholder; the first `update` sizes it
    /// from the real viewport.
    pub fn with_collaborators(
        config: SketchConfig,
        storage: Option<&dyn eframe::Storage>,
        sink: Box<dyn DownloadSink>,
        gestures: impl GestureSuppression + 'static,
    ) -> Self {
        let mut canvas = Canvas::new(config, 1, 1).with_gesture_suppression(gestures);

        if let Some(storage) = storage {
            if let Some(tools) = eframe::get_value::<ToolState>(storage, TOOLS_KEY) {
                log::info!("Restored tool settings ({})", tools.mode().name());
                canvas.set_tools(tools);
            }
        }

        Self {
            canvas,
            sink,
            texture: None,
            texture_dirty: true,
            viewport: None,
            restore_rx: None,
            status: None,
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub(crate) fn set_status(&mut self, status: impl Into<String>) {
        self.status = Some(status.into());
    }

    pub fn mark_dirty(&mut self) {
        self.texture_dirty = true;
    }

    /// Start an undo or redo; the snapshot is decoded off the UI thread
    pub fn request_history_move(&mut self, ctx: &egui::Context, direction: HistoryMove) {
        let request = match direction {
            HistoryMove::Undo => self.canvas.undo(),
            HistoryMove::Redo => self.canvas.redo(),
        };
        match request {
            Ok(Some(request)) => self.spawn_decode(ctx, request),
            Ok(None) => {}
            Err(err) => {
                log::warn!("{:?} rejected: {}", direction, err);
                self.set_status(err.to_string());
            }
        }
    }

    fn spawn_decode(&mut self, ctx: &egui::Context, request: RestoreRequest) {
        let (tx, rx) = oneshot::channel();
        let ctx = ctx.clone();
        std::thread::spawn(move || {
            // The receiver is gone if the app shut down; nothing to report then.
            let _ = tx.send(request.decode());
            ctx.request_repaint();
        });
        self.restore_rx = Some(rx);
    }

    /// Apply a finished decode, if one has arrived
    fn poll_restore(&mut self) {
        let Some(rx) = &mut self.restore_rx else {
            return;
        };
        match rx.try_recv() {
            Ok(None) => {}
            Ok(Some(decoded)) => {
                self.restore_rx = None;
                match self.canvas.complete_restore(decoded) {
                    Ok(applied) => self.texture_dirty |= applied,
                    Err(err) => self.set_status(err.to_string()),
                }
            }
            Err(oneshot::Canceled) => {
                self.restore_rx = None;
                self.canvas.cancel_restore();
                self.set_status("Restore was interrupted");
            }
        }
    }

    pub fn clear(&mut self) {
        self.canvas.clear();
        self.restore_rx = None;
        self.texture_dirty = true;
    }

    /// Encode the surface and hand it to the download sink
    pub fn export(&mut self, format: ExportFormat) {
        let result = self.canvas.export(format).and_then(|image| {
            self.sink.deliver(&image)?;
            Ok(image.file_name)
        });
        match result {
            Ok(file_name) => self.set_status(format!("Saved {}", file_name)),
            Err(err) => {
                log::error!("{} export failed: {}", format.name(), err);
                self.set_status(err.to_string());
            }
        }
    }

    fn track_viewport(&mut self, ctx: &egui::Context) {
        self.set_viewport(ctx.screen_rect().size());
    }

    /// Resize the surface if the viewport changed since the last frame
    fn set_viewport(&mut self, viewport: egui::Vec2) {
        if self.viewport != Some(viewport) {
            self.viewport = Some(viewport);
            self.canvas.resize(viewport);
            self.restore_rx = None;
            self.texture_dirty = true;
        }
    }

    /// Texture showing the current surface, re-uploaded when it changed
    pub(crate) fn surface_texture(&mut self, ctx: &egui::Context) -> egui::TextureId {
        let surface = self.canvas.surface();
        let size = [surface.width() as usize, surface.height() as usize];
        if self.texture_dirty || self.texture.is_none() {
            let image = egui::ColorImage::from_rgba_unmultiplied(size, surface.pixels().as_raw());
            match &mut self.texture {
                Some(texture) => texture.set(image, egui::TextureOptions::NEAREST),
                None => {
                    self.texture = Some(ctx.load_texture("surface", image, egui::TextureOptions::NEAREST));
                }
            }
            self.texture_dirty = false;
        }
        match &self.texture {
            Some(texture) => texture.id(),
            None => egui::TextureId::default(),
        }
    }
}

impl eframe::App for SketchApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, TOOLS_KEY, self.canvas.tools());
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.track_viewport(ctx);
        self.poll_restore();

        panels::tools_panel(self, ctx);
        panels::central_panel(self, ctx);
    }
}
