#![forbid(unsafe_code)]

//! Long-press-then-drag recognizer for touch input.
//!
//! A finger that stays within [`LongTouchConfig::slop_px`] of where it went
//! down for [`LongTouchConfig::long_press`] arms a drag. Until then touch
//! moves belong to the browser (scrolling); moving farther than the slop
//! abandons recognition for the rest of that touch.
//!
//! The host supplies time. Call [`LongTouchDrag::tick`] from a timer while a
//! touch is pending so the drag starts without waiting for the next move.

use std::time::Duration;

use slotgrid_core::GridConfig;
use web_time::Instant;

use crate::input::{ClientPoint, TouchInput, TouchPhase};

/// Long-press thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LongTouchConfig {
    /// Hold time before a drag is armed.
    pub long_press: Duration,
    /// Movement tolerated while holding, in CSS pixels.
    pub slop_px: f64,
}

impl Default for LongTouchConfig {
    fn default() -> Self {
        Self {
            long_press: Duration::from_millis(500),
            slop_px: 10.0,
        }
    }
}

impl LongTouchConfig {
    #[must_use]
    pub fn from_grid(config: &GridConfig) -> Self {
        Self {
            long_press: Duration::from_millis(config.long_press_ms),
            slop_px: config.touch_slop_px,
        }
    }
}

/// Drag gestures recognized from touch input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TouchGesture {
    /// The long press completed at the touch origin.
    DragStart(ClientPoint),
    DragMove(ClientPoint),
    DragEnd(ClientPoint),
    /// The browser cancelled the touch mid-drag.
    DragCancel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum TouchState {
    Idle,
    Pending { origin: ClientPoint, since: Instant },
    Dragging { last: ClientPoint },
    /// Recognition abandoned until every finger lifts.
    Rejected,
}

/// Long-press drag state machine.
#[derive(Debug, Clone)]
pub struct LongTouchDrag {
    config: LongTouchConfig,
    state: TouchState,
}

impl LongTouchDrag {
    #[must_use]
    pub fn new(config: LongTouchConfig) -> Self {
        Self {
            config,
            state: TouchState::Idle,
        }
    }

    #[must_use]
    pub const fn config(&self) -> LongTouchConfig {
        self.config
    }

    /// Whether a drag is armed. Hosts call `preventDefault()` on touch moves
    /// while this holds.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        matches!(self.state, TouchState::Dragging { .. })
    }

    /// Whether a touch is waiting for the long press.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self.state, TouchState::Pending { .. })
    }

    /// Forget any touch in progress.
    pub fn reset(&mut self) {
        self.state = TouchState::Idle;
    }

    pub fn touch_start(&mut self, input: &TouchInput, now: Instant) -> Vec<TouchGesture> {
        match self.state {
            TouchState::Idle if input.finger_count() <= 1 => {
                if let Some(origin) = input.client_point(TouchPhase::Start) {
                    self.state = TouchState::Pending { origin, since: now };
                }
            }
            // A second finger means pinch or scroll, not a drag.
            TouchState::Idle | TouchState::Pending { .. } => self.state = TouchState::Rejected,
            TouchState::Dragging { .. } | TouchState::Rejected => {}
        }
        Vec::new()
    }

    pub fn touch_move(&mut self, input: &TouchInput, now: Instant) -> Vec<TouchGesture> {
        let Some(point) = input.client_point(TouchPhase::Move) else {
            return Vec::new();
        };
        match self.state {
            TouchState::Pending { origin, since } => {
                if origin.distance_to(point) > self.config.slop_px {
                    self.state = TouchState::Rejected;
                    return Vec::new();
                }
                let mut out = Vec::new();
                if now.saturating_duration_since(since) >= self.config.long_press {
                    out.push(TouchGesture::DragStart(origin));
                    out.push(TouchGesture::DragMove(point));
                    self.state = TouchState::Dragging { last: point };
                }
                out
            }
            TouchState::Dragging { last } => {
                if last == point {
                    return Vec::new();
                }
                self.state = TouchState::Dragging { last: point };
                vec![TouchGesture::DragMove(point)]
            }
            TouchState::Idle | TouchState::Rejected => Vec::new(),
        }
    }

    pub fn touch_end(&mut self, input: &TouchInput, _now: Instant) -> Vec<TouchGesture> {
        if input.finger_count() > 0 {
            return Vec::new();
        }
        let state = std::mem::replace(&mut self.state, TouchState::Idle);
        match state {
            TouchState::Dragging { last } => {
                let point = input.client_point(TouchPhase::End).unwrap_or(last);
                vec![TouchGesture::DragEnd(point)]
            }
            _ => Vec::new(),
        }
    }

    pub fn touch_cancel(&mut self) -> Vec<TouchGesture> {
        let state = std::mem::replace(&mut self.state, TouchState::Idle);
        match state {
            TouchState::Dragging { .. } => vec![TouchGesture::DragCancel],
            _ => Vec::new(),
        }
    }

    /// Fire the long press if its threshold has passed.
    pub fn tick(&mut self, now: Instant) -> Option<TouchGesture> {
        if let TouchState::Pending { origin, since } = self.state
            && now.saturating_duration_since(since) >= self.config.long_press
        {
            self.state = TouchState::Dragging { last: origin };
            return Some(TouchGesture::DragStart(origin));
        }
        None
    }
}

impl Default for LongTouchDrag {
    fn default() -> Self {
        Self::new(LongTouchConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOLD: Duration = Duration::from_millis(500);

    fn at(x: f64, y: f64) -> ClientPoint {
        ClientPoint::new(x, y)
    }

    #[test]
    fn hold_then_drag_then_release() {
        let t0 = Instant::now();
        let mut drag = LongTouchDrag::default();
        assert!(drag.touch_start(&TouchInput::single(10.0, 10.0), t0).is_empty());
        assert!(drag.is_pending());
        assert_eq!(drag.tick(t0 + HOLD / 2), None);
        assert_eq!(drag.tick(t0 + HOLD), Some(TouchGesture::DragStart(at(10.0, 10.0))));
        assert!(drag.is_dragging());
        assert_eq!(drag.tick(t0 + HOLD * 2), None);

        assert_eq!(
            drag.touch_move(&TouchInput::single(10.0, 60.0), t0 + HOLD * 2),
            vec![TouchGesture::DragMove(at(10.0, 60.0))]
        );
        assert_eq!(
            drag.touch_end(&TouchInput::released(10.0, 70.0), t0 + HOLD * 3),
            vec![TouchGesture::DragEnd(at(10.0, 70.0))]
        );
        assert!(!drag.is_dragging());
    }

    #[test]
    fn late_move_starts_drag_without_tick() {
        let t0 = Instant::now();
        let mut drag = LongTouchDrag::default();
        drag.touch_start(&TouchInput::single(0.0, 0.0), t0);
        assert_eq!(
            drag.touch_move(&TouchInput::single(3.0, 4.0), t0 + HOLD),
            vec![
                TouchGesture::DragStart(at(0.0, 0.0)),
                TouchGesture::DragMove(at(3.0, 4.0))
            ]
        );
    }

    #[test]
    fn moving_past_slop_abandons_until_lift() {
        let t0 = Instant::now();
        let mut drag = LongTouchDrag::default();
        drag.touch_start(&TouchInput::single(0.0, 0.0), t0);
        assert!(drag.touch_move(&TouchInput::single(0.0, 30.0), t0).is_empty());
        assert_eq!(drag.tick(t0 + HOLD), None);
        assert!(drag.touch_move(&TouchInput::single(0.0, 0.0), t0 + HOLD).is_empty());
        assert!(drag.touch_end(&TouchInput::released(0.0, 0.0), t0 + HOLD).is_empty());

        drag.touch_start(&TouchInput::single(0.0, 0.0), t0 + HOLD);
        assert!(drag.is_pending());
    }

    #[test]
    fn short_tap_is_not_a_drag() {
        let t0 = Instant::now();
        let mut drag = LongTouchDrag::default();
        drag.touch_start(&TouchInput::single(5.0, 5.0), t0);
        assert!(drag.touch_end(&TouchInput::released(5.0, 5.0), t0).is_empty());
        assert_eq!(drag.tick(t0 + HOLD), None);
    }

    #[test]
    fn second_finger_rejects() {
        let t0 = Instant::now();
        let mut drag = LongTouchDrag::default();
        drag.touch_start(&TouchInput::single(5.0, 5.0), t0);
        let pinch = TouchInput {
            touches: vec![at(5.0, 5.0), at(50.0, 50.0)],
            changed_touches: vec![at(50.0, 50.0)],
        };
        drag.touch_start(&pinch, t0);
        assert_eq!(drag.tick(t0 + HOLD), None);
    }

    #[test]
    fn cancel_reports_only_active_drags() {
        let t0 = Instant::now();
        let mut drag = LongTouchDrag::default();
        drag.touch_start(&TouchInput::single(5.0, 5.0), t0);
        assert!(drag.touch_cancel().is_empty());

        drag.touch_start(&TouchInput::single(5.0, 5.0), t0);
        drag.tick(t0 + HOLD);
        assert_eq!(drag.touch_cancel(), vec![TouchGesture::DragCancel]);
        assert!(!drag.is_dragging());
    }

    #[test]
    fn config_follows_grid_config() {
        let grid = GridConfig {
            long_press_ms: 250,
            touch_slop_px: 4.0,
            ..GridConfig::default()
        };
        let config = LongTouchConfig::from_grid(&grid);
        assert_eq!(config.long_press, Duration::from_millis(250));
        assert_eq!(config.slop_px, 4.0);
    }
}
