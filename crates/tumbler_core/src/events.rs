//! Pointer event model
//!
//! Unified pointer input across mouse, touch and pen sources. Hosts translate
//! their native events into [`PointerEvent`] and hand them to a picker column;
//! the column answers with an [`EventDisposition`] telling the host what to do
//! with the native event afterwards.

use smallvec::SmallVec;

/// A point in page coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Phase of a pointer gesture
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    /// The platform aborted the gesture (treated like `Up` by consumers)
    Cancel,
}

/// Input device that produced the event
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PointerSource {
    #[default]
    Mouse,
    Touch,
    Pen,
}

/// A pointer event with associated data
#[derive(Clone, Debug)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub source: PointerSource,
    /// Touch points still in contact with the surface
    pub touches: SmallVec<[Point; 2]>,
    /// Touch points that changed in this event (the lifted finger on `Up`)
    pub changed_touches: SmallVec<[Point; 2]>,
    /// Page position for mouse/pen input
    pub position: Point,
    /// Host timestamp in milliseconds
    pub timestamp: f64,
}

impl PointerEvent {
    /// Mouse or pen event at a page position
    pub fn mouse(phase: PointerPhase, x: f64, y: f64, timestamp: f64) -> Self {
        Self {
            phase,
            source: PointerSource::Mouse,
            touches: SmallVec::new(),
            changed_touches: SmallVec::new(),
            position: Point::new(x, y),
            timestamp,
        }
    }

    /// Single-finger touch event
    ///
    /// On `Up`/`Cancel` the finger is no longer in contact, so it is only
    /// reported in `changed_touches`.
    pub fn touch(phase: PointerPhase, x: f64, y: f64, timestamp: f64) -> Self {
        let point = Point::new(x, y);
        let mut touches = SmallVec::new();
        if matches!(phase, PointerPhase::Down | PointerPhase::Move) {
            touches.push(point);
        }
        let mut changed_touches = SmallVec::new();
        changed_touches.push(point);

        Self {
            phase,
            source: PointerSource::Touch,
            touches,
            changed_touches,
            position: Point::default(),
            timestamp,
        }
    }

    /// Resolved page coordinate of this event
    pub fn coord(&self) -> Point {
        pointer_coord(self)
    }
}

/// Extract the page coordinate of a pointer event.
///
/// Touch events report the first active touch, falling back to the first
/// changed touch once the finger has lifted. Everything else reports its
/// page position.
pub fn pointer_coord(event: &PointerEvent) -> Point {
    if let Some(point) = event.touches.first() {
        return *point;
    }
    if let Some(point) = event.changed_touches.first() {
        return *point;
    }
    event.position
}

/// What the host should do with a native event after a column handled it
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventDisposition {
    /// Route the following move/up events of this gesture to the same column
    pub capture: bool,
    /// Suppress the host's default action (native scrolling, focus, ...)
    pub prevent_default: bool,
    /// Stop the event from reaching ancestors and siblings
    pub stop_propagation: bool,
}

impl EventDisposition {
    /// The event was not handled
    pub const IGNORED: Self = Self {
        capture: false,
        prevent_default: false,
        stop_propagation: false,
    };

    /// Default action suppressed, propagation untouched
    pub const fn prevent_default() -> Self {
        Self {
            capture: false,
            prevent_default: true,
            stop_propagation: false,
        }
    }

    /// Default action suppressed and propagation stopped
    pub const fn consumed() -> Self {
        Self {
            capture: false,
            prevent_default: true,
            stop_propagation: true,
        }
    }

    pub const fn with_capture(mut self) -> Self {
        self.capture = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mouse_coord_uses_position() {
        let ev = PointerEvent::mouse(PointerPhase::Down, 12.0, 40.0, 0.0);
        assert_eq!(ev.coord(), Point::new(12.0, 40.0));
    }

    #[test]
    fn test_touch_up_falls_back_to_changed_touch() {
        let ev = PointerEvent::touch(PointerPhase::Up, 5.0, 90.0, 16.0);
        assert!(ev.touches.is_empty());
        assert_eq!(pointer_coord(&ev), Point::new(5.0, 90.0));
    }

    #[test]
    fn test_first_active_touch_wins() {
        let mut ev = PointerEvent::touch(PointerPhase::Move, 1.0, 2.0, 0.0);
        ev.changed_touches.clear();
        ev.changed_touches.push(Point::new(100.0, 100.0));
        assert_eq!(ev.coord(), Point::new(1.0, 2.0));
    }

    #[test]
    fn test_disposition_builders() {
        assert!(!EventDisposition::IGNORED.prevent_default);
        let start = EventDisposition::prevent_default().with_capture();
        assert!(start.capture && start.prevent_default && !start.stop_propagation);
        assert!(EventDisposition::consumed().stop_propagation);
    }
}
