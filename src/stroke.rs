use egui::{Color32, Pos2};

use crate::surface::Surface;

/// Colour and width a stroke is drawn with, captured when the stroke begins
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Color32,
    pub width: f32,
}

impl StrokeStyle {
    pub fn new(color: Color32, width: f32) -> Self {
        Self { color, width }
    }
}

// The path currently being drawn. Only the last vertex is kept; everything
// before it already lives in the surface pixels.
#[derive(Debug, Clone, Copy)]
struct ActiveStroke {
    style: StrokeStyle,
    last: Pos2,
    segments: usize,
}

/// Immediate-mode stroke renderer.
///
/// Every `extend` burns a straight segment straight into the [`Surface`];
/// nothing is buffered for replay.
#[derive(Debug, Default)]
pub struct StrokeRenderer {
    current: Option<ActiveStroke>,
}

impl StrokeRenderer {
    pub fn new() -> Self {
        Self { current: None }
    }

    pub fn is_drawing(&self) -> bool {
        self.current.is_some()
    }

    /// Open a new path at `point`. Any stroke already in progress is dropped.
    pub fn begin(&mut self, point: Pos2, style: StrokeStyle) {
        if self.current.is_some() {
            log::warn!("Stroke started while another was in progress; dropping the old one");
        }
        self.current = Some(ActiveStroke {
            style,
            last: point,
            segments: 0,
        });
    }

    /// Draw a segment from the last point to `point`. No-op when idle.
    pub fn extend(&mut self, surface: &mut Surface, point: Pos2) {
        let Some(stroke) = &mut self.current else {
            return;
        };
        surface.draw_segment(stroke.last, point, stroke.style.color, stroke.style.width);
        stroke.last = point;
        stroke.segments += 1;
    }

    /// Close the path. Returns `false` for a stray finish with no matching begin.
    pub fn finish(&mut self) -> bool {
        match self.current.take() {
            Some(stroke) => {
                log::debug!("Finished stroke with {} segments", stroke.segments);
                true
            }
            None => false,
        }
    }

    /// Abandon the stroke without signalling a commit.
    ///
    /// Pixels already burned into the surface stay there.
    pub fn discard(&mut self) -> bool {
        self.current.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extend_without_begin_is_noop() {
        let mut surface = Surface::new(20, 20);
        let mut renderer = StrokeRenderer::new();
        renderer.extend(&mut surface, Pos2::new(5.0, 5.0));
        assert!(surface.is_blank());
        assert!(!renderer.finish());
    }

    #[test]
    fn stroke_burns_each_segment() {
        let mut surface = Surface::new(20, 20);
        let mut renderer = StrokeRenderer::new();
        renderer.begin(Pos2::new(2.0, 2.0), StrokeStyle::new(Color32::BLACK, 2.0));
        assert!(renderer.is_drawing());

        renderer.extend(&mut surface, Pos2::new(2.0, 10.0));
        renderer.extend(&mut surface, Pos2::new(10.0, 10.0));
        assert!(renderer.finish());
        assert!(!renderer.is_drawing());

        assert_eq!(surface.pixel(2, 6).map(|p| p.0[3]), Some(255));
        assert_eq!(surface.pixel(6, 10).map(|p| p.0[3]), Some(255));
        assert_eq!(surface.pixel(15, 15).map(|p| p.0[3]), Some(0));
    }

    #[test]
    fn begin_without_move_paints_nothing() {
        let mut surface = Surface::new(20, 20);
        let mut renderer = StrokeRenderer::new();
        renderer.begin(Pos2::new(5.0, 5.0), StrokeStyle::new(Color32::BLACK, 4.0));
        assert!(renderer.finish());
        assert!(surface.is_blank());
    }

    #[test]
    fn discard_does_not_finish() {
        let mut renderer = StrokeRenderer::new();
        renderer.begin(Pos2::ZERO, StrokeStyle::new(Color32::BLACK, 1.0));
        assert!(renderer.discard());
        assert!(!renderer.finish());
    }
}
