use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::stroke::StrokeStyle;

/// Inclusive range accepted for both pencil and eraser widths
pub const WIDTH_RANGE: std::ops::RangeInclusive<u32> = 1..=50;

pub const DEFAULT_PENCIL_WIDTH: u32 = 5;
pub const DEFAULT_ERASER_WIDTH: u32 = 20;

/// Which tool the next stroke will be drawn with
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Serialize, Deserialize)]
pub enum ToolMode {
    #[default]
    Pencil,
    Eraser,
}

impl ToolMode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pencil => "Pencil",
            Self::Eraser => "Eraser",
        }
    }
}

/// Holds the active tool and the parameters of both tools.
///
/// The pencil and eraser keep independent widths: changing the width while
/// one tool is active never touches the other tool's setting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolState {
    mode: ToolMode,
    pencil_color: Color32,
    pencil_width: u32,
    eraser_width: u32,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            mode: ToolMode::Pencil,
            pencil_color: Color32::BLACK,
            pencil_width: DEFAULT_PENCIL_WIDTH,
            eraser_width: DEFAULT_ERASER_WIDTH,
        }
    }
}

impl ToolState {
    pub fn new(pencil_color: Color32, pencil_width: u32, eraser_width: u32) -> Self {
        Self {
            mode: ToolMode::Pencil,
            pencil_color,
            pencil_width: clamp_width(pencil_width),
            eraser_width: clamp_width(eraser_width),
        }
    }

    pub fn mode(&self) -> ToolMode {
        self.mode
    }

    pub fn pencil_color(&self) -> Color32 {
        self.pencil_color
    }

    pub fn pencil_width(&self) -> u32 {
        self.pencil_width
    }

    pub fn eraser_width(&self) -> u32 {
        self.eraser_width
    }

    /// Set the pencil colour. The eraser always paints the background.
    pub fn set_color(&mut self, color: Color32) {
        self.pencil_color = color;
    }

    pub fn set_pencil_width(&mut self, width: u32) {
        self.pencil_width = clamp_width(width);
    }

    pub fn set_eraser_width(&mut self, width: u32) {
        self.eraser_width = clamp_width(width);
    }

    /// Route a width change to whichever tool is active
    pub fn set_active_width(&mut self, width: u32) {
        match self.mode {
            ToolMode::Pencil => self.set_pencil_width(width),
            ToolMode::Eraser => self.set_eraser_width(width),
        }
    }

    pub fn set_mode(&mut self, mode: ToolMode) {
        if self.mode != mode {
            log::debug!("Tool mode {} -> {}", self.mode.name(), mode.name());
        }
        self.mode = mode;
    }

    /// Bring both widths back into [`WIDTH_RANGE`], e.g. after deserializing
    pub fn clamped(mut self) -> Self {
        self.pencil_width = clamp_width(self.pencil_width);
        self.eraser_width = clamp_width(self.eraser_width);
        self
    }

    /// The style the next stroke will use.
    ///
    /// The eraser paints with `background` rather than clearing alpha.
    pub fn active_style(&self, background: Color32) -> StrokeStyle {
        match self.mode {
            ToolMode::Pencil => StrokeStyle::new(self.pencil_color, self.pencil_width as f32),
            ToolMode::Eraser => StrokeStyle::new(background, self.eraser_width as f32),
        }
    }
}

fn clamp_width(width: u32) -> u32 {
    let clamped = width.clamp(*WIDTH_RANGE.start(), *WIDTH_RANGE.end());
    if clamped != width {
        log::debug!("Clamped tool width {} to {}", width, clamped);
    }
    clamped
}
