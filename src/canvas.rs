use egui::{Color32, Pos2, Rect, Vec2};

use crate::config::SketchConfig;
use crate::error::{CanvasError, CanvasResult};
use crate::export::{self, ExportFormat, ExportedImage};
use crate::history::SnapshotHistory;
use crate::input::{self, GestureSuppression, NoGestures, PointerEvent, PointerPhase};
use crate::snapshot::{DecodedSnapshot, RestoreRequest, RestoreTicket, Snapshot};
use crate::stroke::StrokeRenderer;
use crate::surface::Surface;
use crate::tools::{ToolMode, ToolState};

/// The drawing-and-history engine.
///
/// Owns the [`Surface`] exclusively. Pointer input goes through the
/// coordinate translator into the stroke renderer; finishing a stroke
/// commits a snapshot to the history.
///
/// Undo and redo are split in two: [`Canvas::undo`] / [`Canvas::redo`] hand
/// out a [`RestoreRequest`] that must be decoded and passed back to
/// [`Canvas::complete_restore`]. While a request is outstanding no stroke can
/// start and no other history move is accepted.
pub struct Canvas {
    config: SketchConfig,
    surface: Surface,
    tools: ToolState,
    renderer: StrokeRenderer,
    history: SnapshotHistory,
    gestures: Box<dyn GestureSuppression>,
    pending: Option<RestoreTicket>,
    // Bumped whenever the surface or history is reset, so decodes issued
    // before the reset are recognised as stale.
    generation: u64,
    next_serial: u64,
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("surface", &self.surface)
            .field("tools", &self.tools)
            .field("drawing", &self.renderer.is_drawing())
            .field("history_len", &self.history.len())
            .field("step", &self.history.step())
            .field("pending", &self.pending)
            .finish()
    }
}

impl Canvas {
    /// Create a canvas with a blank surface of `width` x `height` pixels
    pub fn new(config: SketchConfig, width: u32, height: u32) -> Self {
        let tools = config.tool_state();
        Self {
            config,
            surface: Surface::new(width, height),
            tools,
            renderer: StrokeRenderer::new(),
            history: SnapshotHistory::new(),
            gestures: Box::new(NoGestures),
            pending: None,
            generation: 0,
            next_serial: 0,
        }
    }

    /// Create a canvas sized for `viewport` using the configured factors
    pub fn for_viewport(config: SketchConfig, viewport: Vec2) -> Self {
        let (width, height) = config.surface_size(viewport);
        Self::new(config, width, height)
    }

    /// Inject the host's scroll/gesture suppression toggle
    pub fn with_gesture_suppression(mut self, gestures: impl GestureSuppression + 'static) -> Self {
        self.gestures = Box::new(gestures);
        self
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn tools(&self) -> &ToolState {
        &self.tools
    }

    pub fn config(&self) -> &SketchConfig {
        &self.config
    }

    pub fn step(&self) -> usize {
        self.history.step()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn is_drawing(&self) -> bool {
        self.renderer.is_drawing()
    }

    pub fn is_restoring(&self) -> bool {
        self.pending.is_some()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo() && !self.is_busy()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo() && !self.is_busy()
    }

    fn is_busy(&self) -> bool {
        self.is_drawing() || self.is_restoring()
    }

    /// Replace the whole tool state, e.g. when restoring persisted settings
    pub fn set_tools(&mut self, tools: ToolState) {
        self.tools = tools.clamped();
    }

    pub fn set_color(&mut self, color: Color32) {
        self.tools.set_color(color);
    }

    pub fn set_pencil_width(&mut self, width: u32) {
        self.tools.set_pencil_width(width);
    }

    pub fn set_eraser_width(&mut self, width: u32) {
        self.tools.set_eraser_width(width);
    }

    pub fn set_mode(&mut self, mode: ToolMode) {
        self.tools.set_mode(mode);
    }

    /// Feed a raw pointer event. `bounds` is the on-screen rect of the surface.
    ///
    /// Returns `true` if a stroke was committed to the history.
    pub fn handle_pointer(&mut self, event: &PointerEvent, bounds: Rect) -> CanvasResult<bool> {
        match event.phase {
            PointerPhase::Down => {
                self.pointer_down(event, bounds);
                Ok(false)
            }
            PointerPhase::Move => {
                self.pointer_move(event, bounds);
                Ok(false)
            }
            PointerPhase::Up => self.pointer_up(),
        }
    }

    pub fn pointer_down(&mut self, event: &PointerEvent, bounds: Rect) {
        if let Some(point) = input::to_surface_point(event, bounds) {
            self.begin(point);
        } else {
            log::debug!("Ignoring pointer-down without a position");
        }
    }

    pub fn pointer_move(&mut self, event: &PointerEvent, bounds: Rect) {
        if let Some(point) = input::to_surface_point(event, bounds) {
            self.extend(point);
        }
    }

    pub fn pointer_up(&mut self) -> CanvasResult<bool> {
        self.finish()
    }

    /// Open a new stroke at a surface-local point using the active tool
    pub fn begin(&mut self, point: Pos2) {
        if self.is_restoring() {
            log::debug!("Ignoring stroke start while a restore is in flight");
            return;
        }
        let style = self.tools.active_style(self.config.background);
        self.renderer.begin(point, style);
        self.gestures.set_suppressed(true);
    }

    /// Extend the active stroke to `point`. No-op if nothing is being drawn.
    pub fn extend(&mut self, point: Pos2) {
        self.renderer.extend(&mut self.surface, point);
    }

    /// Close the active stroke and commit a snapshot.
    ///
    /// A finish without a matching begin is ignored and returns `Ok(false)`.
    pub fn finish(&mut self) -> CanvasResult<bool> {
        if !self.renderer.finish() {
            return Ok(false);
        }
        self.gestures.set_suppressed(false);
        let snapshot = Snapshot::capture(&self.surface)?;
        self.history.commit(snapshot);
        log::debug!(
            "Committed snapshot {}/{}",
            self.history.step(),
            self.history.len()
        );
        Ok(true)
    }

    /// Drop the active stroke without committing it
    fn discard_stroke(&mut self) {
        if self.renderer.discard() {
            log::info!("Discarded in-progress stroke");
            self.gestures.set_suppressed(false);
        }
    }

    /// Request a move one step back in history.
    ///
    /// `Ok(None)` when there is nothing to undo.
    pub fn undo(&mut self) -> CanvasResult<Option<RestoreRequest>> {
        self.ensure_idle()?;
        let Some((target_step, shown)) = self.history.undo_target() else {
            return Ok(None);
        };
        let snapshot = shown.cloned();
        Ok(Some(self.issue_restore(target_step, snapshot)))
    }

    /// Request a move one step forward in history.
    ///
    /// `Ok(None)` when there is nothing to redo.
    pub fn redo(&mut self) -> CanvasResult<Option<RestoreRequest>> {
        self.ensure_idle()?;
        let Some((target_step, shown)) = self.history.redo_target() else {
            return Ok(None);
        };
        let snapshot = Some(shown.clone());
        Ok(Some(self.issue_restore(target_step, snapshot)))
    }

    /// Apply a decoded snapshot.
    ///
    /// On success the surface is overwritten and the history cursor moves.
    /// On a decode failure neither changes and the error is returned. A
    /// completion for a restore that was cancelled by `clear` or `resize` is
    /// dropped and reported as `Ok(false)`.
    pub fn complete_restore(&mut self, decoded: DecodedSnapshot) -> CanvasResult<bool> {
        if self.pending != Some(decoded.ticket) {
            log::debug!("Dropping stale restore {:?}", decoded.ticket);
            return Ok(false);
        }
        self.pending = None;

        let image = decoded.image.map_err(|err| {
            log::error!("Restore aborted: {}", err);
            err
        })?;
        self.surface.replace_with(&image);
        self.history.set_step(decoded.target_step);
        log::debug!(
            "Restored step {}/{}",
            self.history.step(),
            self.history.len()
        );
        Ok(true)
    }

    /// Give up on the pending restore, e.g. when its decoder went away.
    ///
    /// Surface and cursor stay where they are.
    pub fn cancel_restore(&mut self) -> bool {
        let cancelled = self.pending.take().is_some();
        if cancelled {
            log::warn!("Restore cancelled before completion");
        }
        cancelled
    }

    /// Decode and apply in one go, for hosts that don't offload decoding
    pub fn undo_now(&mut self) -> CanvasResult<bool> {
        match self.undo()? {
            Some(request) => self.complete_restore(request.decode()),
            None => Ok(false),
        }
    }

    /// See [`Canvas::undo_now`]
    pub fn redo_now(&mut self) -> CanvasResult<bool> {
        match self.redo()? {
            Some(request) => self.complete_restore(request.decode()),
            None => Ok(false),
        }
    }

    fn ensure_idle(&self) -> CanvasResult<()> {
        if self.is_restoring() {
            return Err(CanvasError::RestoreInFlight);
        }
        if self.is_drawing() {
            return Err(CanvasError::StrokeInProgress);
        }
        Ok(())
    }

    fn issue_restore(&mut self, target_step: usize, snapshot: Option<Snapshot>) -> RestoreRequest {
        self.next_serial += 1;
        let ticket = RestoreTicket {
            generation: self.generation,
            serial: self.next_serial,
        };
        self.pending = Some(ticket);
        RestoreRequest {
            ticket,
            target_step,
            size: self.surface.size(),
            snapshot,
        }
    }

    /// Forget any pending restore and invalidate outstanding decodes
    fn reset_generation(&mut self) {
        if self.pending.take().is_some() {
            log::debug!("Cancelled pending restore");
        }
        self.generation += 1;
    }

    /// Blank the surface and empty the history. Not undoable.
    pub fn clear(&mut self) {
        self.discard_stroke();
        self.reset_generation();
        self.surface.clear();
        self.history.clear();
        log::info!("Canvas cleared");
    }

    /// Reinitialise the surface for a new viewport size.
    ///
    /// Any active stroke is discarded, the pixel content is lost and the
    /// history is reset.
    pub fn resize(&mut self, viewport: Vec2) {
        let (width, height) = self.config.surface_size(viewport);
        self.resize_surface(width, height);
    }

    /// Reinitialise the surface with explicit pixel dimensions.
    ///
    /// Dimensions are clamped to `1..=MAX_SURFACE_DIMENSION`.
    pub fn resize_surface(&mut self, width: u32, height: u32) {
        self.discard_stroke();
        self.reset_generation();
        self.surface = Surface::new(width, height);
        self.history.clear();
        log::info!("Surface reinitialised at {}x{}", self.surface.width(), self.surface.height());
    }

    /// Encode the current surface. Leaves drawing state untouched.
    pub fn export(&self, format: ExportFormat) -> CanvasResult<ExportedImage> {
        let stem = &self.config.export_file_stem;
        let exported = match format {
            ExportFormat::Png => export::export_png(&self.surface, stem)?,
            ExportFormat::Jpeg => export::export_jpeg(&self.surface, stem, self.config.jpeg_quality)?,
        };
        Ok(exported)
    }

    pub fn export_png(&self) -> CanvasResult<ExportedImage> {
        self.export(ExportFormat::Png)
    }

    pub fn export_jpeg(&self) -> CanvasResult<ExportedImage> {
        self.export(ExportFormat::Jpeg)
    }
}
