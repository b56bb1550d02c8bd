use eframe::egui::{self, Slider};

use crate::app::{HistoryMove, SketchApp};
use crate::export::ExportFormat;
use crate::tools::{ToolMode, WIDTH_RANGE};

pub fn tools_panel(app: &mut SketchApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(false)
        .default_width(180.0)
        .show(ctx, |ui| {
            ui.heading("Tools");
            ui.separator();

            let mut tools = app.canvas().tools().clone();

            ui.horizontal(|ui| {
                for mode in [ToolMode::Pencil, ToolMode::Eraser] {
                    if ui.selectable_label(tools.mode() == mode, mode.name()).clicked() {
                        tools.set_mode(mode);
                    }
                }
            });

            ui.horizontal(|ui| {
                ui.label("Color:");
                let mut color = tools.pencil_color();
                if egui::color_picker::color_edit_button_srgba(
                    ui,
                    &mut color,
                    egui::color_picker::Alpha::Opaque,
                )
                .changed()
                {
                    tools.set_color(color);
                }
            });

            let mut pencil_width = tools.pencil_width();
            if ui.add(Slider::new(&mut pencil_width, WIDTH_RANGE).text("Pencil")).changed() {
                tools.set_pencil_width(pencil_width);
            }
            let mut eraser_width = tools.eraser_width();
            if ui.add(Slider::new(&mut eraser_width, WIDTH_RANGE).text("Eraser")).changed() {
                tools.set_eraser_width(eraser_width);
            }

            if &tools != app.canvas().tools() {
                app.canvas_mut().set_tools(tools);
            }

            ui.separator();

            ui.horizontal(|ui| {
                let can_undo = app.canvas().can_undo();
                let can_redo = app.canvas().can_redo();

                if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                    app.request_history_move(ctx, HistoryMove::Undo);
                }
                if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
                    app.request_history_move(ctx, HistoryMove::Redo);
                }
                if ui.button("Clear").clicked() {
                    app.clear();
                }
            });

            ui.label(format!(
                "History: {}/{}",
                app.canvas().step(),
                app.canvas().history_len()
            ));

            ui.separator();

            ui.horizontal(|ui| {
                if ui.button("Export PNG").clicked() {
                    app.export(ExportFormat::Png);
                }
                if ui.button("Export JPEG").clicked() {
                    app.export(ExportFormat::Jpeg);
                }
            });

            if let Some(status) = app.status() {
                ui.separator();
                ui.label(status);
            }
        });
}
