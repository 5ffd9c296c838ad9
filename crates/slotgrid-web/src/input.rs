#![forbid(unsafe_code)]

//! Host input snapshots.
//!
//! The host translates DOM `PointerEvent`s and `TouchEvent`s into these plain
//! values before handing them to the interaction controller. Only viewport
//! (client) coordinates are carried; hit-testing is done separately through
//! [`HitTest`](crate::HitTest).

/// A point in viewport coordinates, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClientPoint {
    pub x: f64,
    pub y: f64,
}

impl ClientPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance_to(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Device that produced a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputSource {
    #[default]
    Mouse,
    Pen,
    Touch,
}

/// One pointer (mouse or pen) event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    pub source: InputSource,
    pub position: ClientPoint,
}

impl PointerInput {
    /// Mouse event at `(x, y)`.
    #[must_use]
    pub const fn mouse(x: f64, y: f64) -> Self {
        Self {
            source: InputSource::Mouse,
            position: ClientPoint::new(x, y),
        }
    }
}

/// Lifecycle phase of a touch event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Start,
    Move,
    End,
    Cancel,
}

/// One touch event: the fingers still down plus those that changed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TouchInput {
    /// `TouchEvent.touches`.
    pub touches: Vec<ClientPoint>,
    /// `TouchEvent.changedTouches`.
    pub changed_touches: Vec<ClientPoint>,
}

impl TouchInput {
    /// A single finger touching down or moving at `(x, y)`.
    #[must_use]
    pub fn single(x: f64, y: f64) -> Self {
        let point = ClientPoint::new(x, y);
        Self {
            touches: vec![point],
            changed_touches: vec![point],
        }
    }

    /// The last finger lifting at `(x, y)`.
    #[must_use]
    pub fn released(x: f64, y: f64) -> Self {
        Self {
            touches: Vec::new(),
            changed_touches: vec![ClientPoint::new(x, y)],
        }
    }

    /// Number of fingers currently down.
    #[must_use]
    pub fn finger_count(&self) -> usize {
        self.touches.len()
    }

    /// The coordinates a gesture should follow for this event.
    ///
    /// On release the lifted finger is only present in `changed_touches`;
    /// otherwise the first active touch is used, falling back to the first
    /// changed one.
    #[must_use]
    pub fn client_point(&self, phase: TouchPhase) -> Option<ClientPoint> {
        match phase {
            TouchPhase::End | TouchPhase::Cancel => self
                .changed_touches
                .first()
                .or_else(|| self.touches.first())
                .copied(),
            TouchPhase::Start | TouchPhase::Move => self
                .touches
                .first()
                .or_else(|| self.changed_touches.first())
                .copied(),
        }
    }
}
