#![forbid(unsafe_code)]

//! In-memory hit-test surface.
//!
//! [`VirtualSurface`] stands in for the DOM when driving the controller
//! outside a browser (tests, replay tools): elements are placed as
//! rectangles and stacked in placement order, later placements on top.

use crate::input::ClientPoint;
use crate::target::{ElementId, ElementSnapshot, HitTest};

/// Axis-aligned rectangle in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Half-open containment: the right and bottom edges are outside.
    #[must_use]
    pub fn contains(&self, point: ClientPoint) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }
}

/// Stack of placed elements.
#[derive(Debug, Clone, Default)]
pub struct VirtualSurface {
    layers: Vec<(Rect, ElementSnapshot)>,
}

impl VirtualSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Place `element` on top of everything placed so far. Its height is
    /// taken from `rect`.
    pub fn place(&mut self, rect: Rect, element: ElementSnapshot) -> ElementId {
        let id = element.id;
        self.layers.push((rect, element.with_height(rect.height)));
        id
    }

    /// Remove every layer belonging to `id`. Returns whether any was removed.
    pub fn remove(&mut self, id: ElementId) -> bool {
        let before = self.layers.len();
        self.layers.retain(|(_, element)| element.id != id);
        self.layers.len() != before
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl HitTest for VirtualSurface {
    fn hits_at(&self, point: ClientPoint) -> Vec<ElementSnapshot> {
        self.layers
            .iter()
            .rev()
            .filter(|(rect, _)| rect.contains(point))
            .map(|(_, element)| element.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_placements_are_on_top() {
        let mut surface = VirtualSurface::new();
        surface.place(Rect::new(0.0, 0.0, 100.0, 100.0), ElementSnapshot::new(ElementId(1)));
        surface.place(Rect::new(10.0, 10.0, 20.0, 20.0), ElementSnapshot::new(ElementId(2)));

        let ids: Vec<_> = surface
            .hits_at(ClientPoint::new(15.0, 15.0))
            .iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec![ElementId(2), ElementId(1)]);
        assert_eq!(surface.topmost_at(ClientPoint::new(50.0, 50.0)).map(|e| e.id), Some(ElementId(1)));
        assert!(surface.hits_at(ClientPoint::new(100.0, 5.0)).is_empty());
    }

    #[test]
    fn placement_records_height_and_remove_drops_layer() {
        let mut surface = VirtualSurface::new();
        let id = surface.place(Rect::new(0.0, 0.0, 10.0, 48.0), ElementSnapshot::new(ElementId(7)));
        assert_eq!(surface.hits_at(ClientPoint::new(1.0, 1.0))[0].height_px, 48.0);
        assert!(surface.remove(id));
        assert!(!surface.remove(id));
        assert!(surface.is_empty());
    }
}
