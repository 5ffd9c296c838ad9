//! A calendar page wired end to end: gestures update an undoable selection
//! list through a notification sink.

use std::cell::RefCell;
use std::rc::Rc;

use slotgrid::prelude::*;
use slotgrid::web::{ElementId, ElementSnapshot, Rect, VirtualSurface};
use slotgrid::{CalendarNotification, DragDropPhase, FormMode};

// 2024-03-04T00:00:00Z
const MONDAY: i64 = 1_709_510_400_000;
const HOUR_MS: i64 = 3_600_000;

fn ts(hour: i64) -> Timestamp {
    Timestamp::from_millis(MONDAY + hour * HOUR_MS)
}

/// Monday column with hour cells 48px tall and one 09:00-10:00 selection.
fn surface(selection: &TimeInterval) -> VirtualSurface {
    let mut surface = VirtualSurface::new();
    for hour in 0..24_u32 {
        surface.place(
            Rect::new(0.0, f64::from(hour) * 48.0, 100.0, 48.0),
            ElementSnapshot::quarter_hour(
                ElementId(100 + hour),
                Timestamp::from_millis(MONDAY),
                f64::from(hour),
            ),
        );
    }
    surface.place(
        Rect::new(0.0, 9.0 * 48.0, 100.0, 48.0),
        ElementSnapshot::defined_selection(ElementId(1), selection, 48.0),
    );
    surface
}

#[test]
fn dragging_a_selection_is_undoable() {
    let session = CalendarSession::new(GridConfig::default()).unwrap();
    session.form().set(FormMode::Editing);
    let original = TimeInterval::new(ts(9), ts(10)).unwrap();
    session.selections().set(vec![original]);

    let store = session.selections().clone();
    let phases = Rc::new(RefCell::new(Vec::new()));
    let phases_seen = Rc::clone(&phases);
    let _phase_sub = session
        .drag_drop()
        .subscribe(move |phase| phases_seen.borrow_mut().push(*phase));

    let mut interaction = session.interaction(move |notification: CalendarNotification| {
        if let CalendarNotification::MoveDefinedStop {
            init_start,
            new_start,
            new_end,
        } = notification
        {
            store.update(|intervals| {
                intervals
                    .iter()
                    .map(|interval| match TimeInterval::new(new_start, new_end) {
                        Ok(moved) if interval.start() == init_start => moved,
                        _ => *interval,
                    })
                    .collect()
            });
        }
    });

    let surface = surface(&original);
    interaction.pointer_down(&surface, PointerInput::mouse(50.0, 9.0 * 48.0 + 10.0));
    interaction.pointer_move(&surface, PointerInput::mouse(50.0, 12.0 * 48.0 + 10.0));
    interaction.pointer_up(&surface, PointerInput::mouse(50.0, 12.0 * 48.0 + 10.0));

    let moved = TimeInterval::new(ts(12), ts(13)).unwrap();
    assert_eq!(session.selections().get(), vec![moved]);
    assert_eq!(
        *phases.borrow(),
        vec![DragDropPhase::Moving, DragDropPhase::None]
    );

    assert!(session.selections().undo());
    assert_eq!(session.selections().get(), vec![original]);
}

#[test]
fn viewing_mode_ignores_gestures() {
    let session = CalendarSession::new(GridConfig::default()).unwrap();
    let original = TimeInterval::new(ts(9), ts(10)).unwrap();
    let mut received = Vec::new();
    {
        let mut interaction = session.interaction(|n: CalendarNotification| received.push(n));
        let surface = surface(&original);
        let down = interaction.pointer_down(&surface, PointerInput::mouse(50.0, 5.0 * 48.0));
        assert!(down.is_ignored());
    }
    assert!(received.is_empty());
}
