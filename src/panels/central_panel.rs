use eframe::egui;

use crate::app::SketchApp;
use crate::input::{PointerEvent, PointerPhase};

pub fn central_panel(app: &mut SketchApp, ctx: &egui::Context) {
    let background = app.canvas().config().background;

    egui::CentralPanel::default().show(ctx, |ui| {
        let surface = app.canvas().surface();
        let size = egui::vec2(surface.width() as f32, surface.height() as f32);
        let (response, painter) = ui.allocate_painter(size, egui::Sense::drag());
        let bounds = response.rect;

        for event in collect_pointer_events(ctx, &response, app.canvas().is_drawing()) {
            match app.canvas_mut().handle_pointer(&event, bounds) {
                Ok(_) => {}
                Err(err) => {
                    log::error!("Failed to commit stroke: {}", err);
                    app.set_status(err.to_string());
                }
            }
            app.mark_dirty();
        }

        let texture = app.surface_texture(ctx);
        painter.rect_filled(bounds, 0.0, background);
        painter.image(
            texture,
            bounds,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );
    });
}

/// Translate this frame's egui pointer state into host pointer events
fn collect_pointer_events(
    ctx: &egui::Context,
    response: &egui::Response,
    drawing: bool,
) -> Vec<PointerEvent> {
    ctx.input(|input| {
        let Some(pos) = input.pointer.interact_pos() else {
            return Vec::new();
        };
        let pressed = input.pointer.primary_pressed() && response.hovered();
        let origin = input.pointer.press_origin().unwrap_or(pos);

        mouse_phases(
            pressed,
            input.pointer.is_moving(),
            input.pointer.primary_released(),
            drawing,
        )
        .into_iter()
        .map(|phase| match phase {
            PointerPhase::Down => PointerEvent::mouse(phase, origin),
            PointerPhase::Move | PointerPhase::Up => PointerEvent::mouse(phase, pos),
        })
        .collect()
    })
}

/// Phases one frame of mouse input produces, in order.
///
/// A press and a move in the same frame yield both, so the first segment
/// is drawn right away.
fn mouse_phases(pressed: bool, moving: bool, released: bool, drawing: bool) -> Vec<PointerPhase> {
    let mut phases = Vec::new();
    if pressed {
        phases.push(PointerPhase::Down);
    }
    let active = drawing || pressed;
    if active && moving {
        phases.push(PointerPhase::Move);
    }
    if active && released {
        phases.push(PointerPhase::Up);
    }
    phases
}
