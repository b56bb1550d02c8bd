use egui::{Pos2, Rect};

/// Which step of a pointer interaction an event belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
}

/// Where the coordinates of a pointer event come from
#[derive(Debug, Clone, PartialEq)]
pub enum PointerSource {
    /// A single-pointer mouse or pen event in client coordinates
    Mouse { client: Pos2 },
    /// A touch event carrying every active contact; only the first is used
    Touch { contacts: Vec<Pos2> },
}

/// A raw pointer event as delivered by the host
#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub source: PointerSource,
}

impl PointerEvent {
    pub fn mouse(phase: PointerPhase, client: Pos2) -> Self {
        Self {
            phase,
            source: PointerSource::Mouse { client },
        }
    }

    pub fn touch(phase: PointerPhase, contacts: Vec<Pos2>) -> Self {
        Self {
            phase,
            source: PointerSource::Touch { contacts },
        }
    }

    /// Client-space position of the event, `None` for a touch with no contacts
    pub fn client_pos(&self) -> Option<Pos2> {
        match &self.source {
            PointerSource::Mouse { client } => Some(*client),
            PointerSource::Touch { contacts } => contacts.first().copied(),
        }
    }
}

/// Map a pointer event into surface-local coordinates.
///
/// `bounds` is the on-screen rectangle of the surface. Returns `None` when the
/// event carries no usable position.
pub fn to_surface_point(event: &PointerEvent, bounds: Rect) -> Option<Pos2> {
    let client = event.client_pos()?;
    Some((client - bounds.min).to_pos2())
}

/// Host capability that turns default scrolling and gesture handling off
/// while a stroke is active.
pub trait GestureSuppression {
    fn set_suppressed(&mut self, suppressed: bool);
}

/// Suppression for hosts that have no default gestures to fight with
#[derive(Debug, Default, Clone, Copy)]
pub struct NoGestures;

impl GestureSuppression for NoGestures {
    fn set_suppressed(&mut self, _suppressed: bool) {}
}
