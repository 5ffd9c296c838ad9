#![forbid(unsafe_code)]

//! Calendar grid interaction controller.
//!
//! [`CalendarInteraction`] turns low-level pointer and touch input into the
//! semantic [`CalendarNotification`] protocol. Three gestures are
//! recognized, chosen by the topmost element under the pointer-down:
//!
//! | Down on              | Gesture | Notifications                                           |
//! |----------------------|---------|---------------------------------------------------------|
//! | quarter-hour cell    | create  | `newSelectStart`, `newSelectMove`*, `newSelectStop`     |
//! | defined selection    | move    | `moveDefinedStop` or `deleteDefined` (over trash)       |
//! | resize handle        | resize  | `resizeDefinedStart`, `resizeDefinedMove`*, `resizeDefinedStop` |
//!
//! The controller never touches the DOM. Every input returns an
//! [`InteractionDispatch`] listing the [`SurfaceCommand`]s the host must
//! apply (window listeners, classes, transforms) and a structured log
//! record. At most one gesture is active; window-level move/up listeners
//! are requested when it starts and released when it finishes.
//!
//! # Failure modes
//!
//! - Pointer-down while disabled, or on an unrecognized element, is ignored.
//! - Moves while disabled are ignored; the release is always processed so a
//!   gesture started before disabling still completes.
//! - Cancel and detach abort the active gesture: transient visual state is
//!   reverted and no result notification is sent.

use slotgrid_core::{CalendarZone, DayHour, GridConfig, QUARTER_HOUR, TimeInterval, Timestamp, quantize_hour};
use slotgrid_runtime::{DragDropPhase, DragDropState};
use tracing::debug;
use web_time::Instant;

use crate::input::{ClientPoint, PointerInput, TouchInput, TouchPhase};
use crate::long_touch::{LongTouchConfig, LongTouchDrag, TouchGesture};
use crate::notification::{CalendarNotification, NotificationSink};
use crate::target::{ElementId, ElementSnapshot, GridTarget, HitTest, ResizeEdge};

/// Class added to a defined selection while it is dragged.
pub const MOVING_CLASS: &str = "moving";
/// Class added to a dragged selection while it hovers the trash.
pub const DELETING_CLASS: &str = "deleting";

/// Resize anchors sit one quarter hour before the selection end.
const RESIZE_ANCHOR_MINUTES: i64 = 15;

/// Controller configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionConfig {
    /// Whether pointer-downs start gestures.
    pub enabled: bool,
    /// Grid resolution in hours.
    pub hour_unit: f64,
    /// Zone used to read a selection's time of day.
    pub zone: CalendarZone,
    pub long_touch: LongTouchConfig,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            hour_unit: QUARTER_HOUR,
            zone: CalendarZone::utc(),
            long_touch: LongTouchConfig::default(),
        }
    }
}

impl InteractionConfig {
    #[must_use]
    pub fn from_grid(config: &GridConfig, enabled: bool) -> Self {
        Self {
            enabled,
            hour_unit: config.hour_unit,
            zone: config.zone(),
            long_touch: LongTouchConfig::from_grid(config),
        }
    }
}

// ---------------------------------------------------------------------------
// Dispatch records
// ---------------------------------------------------------------------------

/// Side effect the host applies to the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceCommand {
    /// Add window-level move/up listeners.
    InstallGlobalListeners,
    /// Remove the window-level move/up listeners.
    RemoveGlobalListeners,
    AddClass {
        element: ElementId,
        class: &'static str,
    },
    RemoveClass {
        element: ElementId,
        class: &'static str,
    },
    /// `transform: translate(dx px, dy px)`.
    SetTransform { element: ElementId, dx: f64, dy: f64 },
    /// `transform: translate(0, 0)`.
    ResetTransform { element: ElementId },
    SetOpacity { element: ElementId, opacity: f64 },
}

/// Gesture kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureKind {
    Create,
    Move,
    ResizeTop,
    ResizeBottom,
}

/// How a gesture ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureExit {
    /// Released; the result notification (if any) was sent.
    Completed,
    /// Cancelled or detached; visual state reverted, nothing reported.
    Aborted,
}

/// Input that produced a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionPhase {
    PointerDown,
    PointerMove,
    PointerUp,
    PointerCancel,
    TouchStart,
    TouchMove,
    TouchEnd,
    TouchCancel,
    Tick,
    Detach,
}

/// Why an input had no effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoredReason {
    Detached,
    Disabled,
    GestureInProgress,
    NoActiveGesture,
    NoTarget,
    UnrecognizedTarget,
    /// A resize handle with no defined selection beneath it.
    MissingSelection,
    /// The pointer is not over a grid cell.
    OffGrid,
    /// A touch is held but the long press has not completed.
    AwaitingLongPress,
}

/// Outcome of one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionOutcome {
    Started,
    Updated,
    Finished(GestureExit),
    Detached,
    Ignored(IgnoredReason),
}

/// Structured log record for one dispatch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionLogEntry {
    pub phase: InteractionPhase,
    pub gesture: Option<GestureKind>,
    pub position: Option<ClientPoint>,
    pub outcome: InteractionOutcome,
}

/// Result of one input.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionDispatch {
    /// Commands for the host, in order.
    pub commands: Vec<SurfaceCommand>,
    /// Notifications delivered to the sink by this input.
    pub notifications: Vec<CalendarNotification>,
    pub log: InteractionLogEntry,
}

impl InteractionDispatch {
    fn new(
        phase: InteractionPhase,
        gesture: Option<GestureKind>,
        position: Option<ClientPoint>,
        outcome: InteractionOutcome,
    ) -> Self {
        Self {
            commands: Vec::new(),
            notifications: Vec::new(),
            log: InteractionLogEntry {
                phase,
                gesture,
                position,
                outcome,
            },
        }
    }

    fn ignored(
        phase: InteractionPhase,
        reason: IgnoredReason,
        gesture: Option<GestureKind>,
        position: Option<ClientPoint>,
    ) -> Self {
        Self::new(phase, gesture, position, InteractionOutcome::Ignored(reason))
    }

    /// Fold a follow-up dispatch into this one; its log wins.
    fn absorb(&mut self, other: Self) {
        self.commands.extend(other.commands);
        self.notifications.extend(other.notifications);
        self.log = other.log;
    }

    #[must_use]
    pub const fn is_ignored(&self) -> bool {
        matches!(self.log.outcome, InteractionOutcome::Ignored(_))
    }
}

// ---------------------------------------------------------------------------
// Gesture sessions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
struct MoveSession {
    element: ElementId,
    origin: ClientPoint,
    dx: f64,
    dy: f64,
    init: TimeInterval,
    /// Rendered pixels per hour of the dragged selection.
    row_height_px: f64,
    over_trash: bool,
}

impl MoveSession {
    fn new(element: &ElementSnapshot, origin: ClientPoint, init: TimeInterval) -> Self {
        Self {
            element: element.id,
            origin,
            dx: 0.0,
            dy: 0.0,
            init,
            row_height_px: (element.height_px / init.duration_hours()).round(),
            over_trash: false,
        }
    }

    /// Vertical drag distance in whole quarter hours, independent of the
    /// grid's cell unit; zero when the row height is unusable.
    fn delta_hours(&self) -> f64 {
        if !(self.row_height_px.is_finite() && self.row_height_px > 0.0) {
            return 0.0;
        }
        quantize_hour(self.dy / self.row_height_px, QUARTER_HOUR)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ResizeSession {
    edge: ResizeEdge,
    selection: ElementId,
    init_start: Timestamp,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ActiveGesture {
    Create,
    Move(MoveSession),
    Resize(ResizeSession),
}

impl ActiveGesture {
    const fn kind(&self) -> GestureKind {
        match self {
            Self::Create => GestureKind::Create,
            Self::Move(_) => GestureKind::Move,
            Self::Resize(ResizeSession {
                edge: ResizeEdge::Top,
                ..
            }) => GestureKind::ResizeTop,
            Self::Resize(_) => GestureKind::ResizeBottom,
        }
    }

    const fn drag_phase(&self) -> Option<DragDropPhase> {
        match self.kind() {
            GestureKind::Create => None,
            GestureKind::Move => Some(DragDropPhase::Moving),
            GestureKind::ResizeTop => Some(DragDropPhase::ResizingTop),
            GestureKind::ResizeBottom => Some(DragDropPhase::ResizingBottom),
        }
    }

    /// Commands that undo the gesture's visual effects.
    fn revert_commands(&self) -> Vec<SurfaceCommand> {
        match self {
            Self::Create => Vec::new(),
            Self::Move(session) => {
                let mut commands = vec![SurfaceCommand::RemoveClass {
                    element: session.element,
                    class: MOVING_CLASS,
                }];
                if session.over_trash {
                    commands.push(SurfaceCommand::RemoveClass {
                        element: session.element,
                        class: DELETING_CLASS,
                    });
                }
                commands.push(SurfaceCommand::ResetTransform {
                    element: session.element,
                });
                commands
            }
            Self::Resize(session) => vec![SurfaceCommand::SetOpacity {
                element: session.selection,
                opacity: 1.0,
            }],
        }
    }
}

fn first_cell(hits: &[ElementSnapshot]) -> Option<DayHour> {
    hits.iter().find_map(|hit| match hit.classify() {
        GridTarget::QuarterHour(cell) => Some(cell),
        _ => None,
    })
}

fn first_selection(hits: &[ElementSnapshot]) -> Option<(ElementId, TimeInterval)> {
    hits.iter().find_map(|hit| match hit.classify() {
        GridTarget::DefinedSelection(interval) => Some((hit.id, interval)),
        _ => None,
    })
}

fn any_trash(hits: &[ElementSnapshot]) -> bool {
    hits.iter().any(|hit| hit.classify().is_trash())
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Interaction controller attached to one calendar grid.
#[derive(Debug)]
pub struct CalendarInteraction<S> {
    config: InteractionConfig,
    sink: S,
    drag_drop: Option<DragDropState>,
    attached: bool,
    active: Option<ActiveGesture>,
    touch: LongTouchDrag,
}

impl<S: NotificationSink> CalendarInteraction<S> {
    /// Attach to a grid. The host installs its pointer-down and touch
    /// listeners on the grid node alongside this call.
    pub fn attach(config: InteractionConfig, sink: S) -> Self {
        debug!(enabled = config.enabled, "calendar interaction attached");
        Self {
            touch: LongTouchDrag::new(config.long_touch),
            config,
            sink,
            drag_drop: None,
            attached: true,
            active: None,
        }
    }

    /// Broadcast move/resize phases through `state`.
    #[must_use]
    pub fn with_drag_drop_state(mut self, state: DragDropState) -> Self {
        self.drag_drop = Some(state);
        self
    }

    #[must_use]
    pub const fn config(&self) -> &InteractionConfig {
        &self.config
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    #[must_use]
    pub const fn is_attached(&self) -> bool {
        self.attached
    }

    /// The gesture in progress, if any.
    #[must_use]
    pub fn active_gesture(&self) -> Option<GestureKind> {
        self.active.as_ref().map(ActiveGesture::kind)
    }

    /// Whether the host should currently have window listeners installed.
    #[must_use]
    pub fn global_listeners_installed(&self) -> bool {
        self.active.is_some()
    }

    /// Whether touch moves should be kept from scrolling the page.
    #[must_use]
    pub const fn is_touch_dragging(&self) -> bool {
        self.touch.is_dragging()
    }

    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Enable or disable gesture starts. A gesture already in progress can
    /// still be released.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.config.enabled != enabled {
            debug!(enabled, "calendar interaction toggled");
        }
        self.config.enabled = enabled;
    }

    /// Abort any gesture and stop accepting input. Idempotent.
    pub fn detach(&mut self) -> InteractionDispatch {
        if !self.attached {
            return InteractionDispatch::ignored(
                InteractionPhase::Detach,
                IgnoredReason::Detached,
                None,
                None,
            );
        }
        self.touch.reset();
        let dispatch = match self.active.take() {
            Some(active) => {
                let mut dispatch = InteractionDispatch::new(
                    InteractionPhase::Detach,
                    Some(active.kind()),
                    None,
                    InteractionOutcome::Detached,
                );
                self.finish(active, GestureExit::Aborted, &mut dispatch);
                dispatch
            }
            None => InteractionDispatch::new(
                InteractionPhase::Detach,
                None,
                None,
                InteractionOutcome::Detached,
            ),
        };
        self.attached = false;
        debug!("calendar interaction detached");
        dispatch
    }

    // -- pointer --------------------------------------------------------

    pub fn pointer_down(&mut self, surface: &impl HitTest, input: PointerInput) -> InteractionDispatch {
        self.begin(surface, input.position, InteractionPhase::PointerDown)
    }

    pub fn pointer_move(&mut self, surface: &impl HitTest, input: PointerInput) -> InteractionDispatch {
        self.advance(surface, input.position, InteractionPhase::PointerMove)
    }

    pub fn pointer_up(&mut self, surface: &impl HitTest, input: PointerInput) -> InteractionDispatch {
        self.release(surface, input.position, InteractionPhase::PointerUp)
    }

    pub fn pointer_cancel(&mut self) -> InteractionDispatch {
        self.abort(InteractionPhase::PointerCancel)
    }

    // -- touch ----------------------------------------------------------

    pub fn touch_start(
        &mut self,
        surface: &impl HitTest,
        input: &TouchInput,
        now: Instant,
    ) -> InteractionDispatch {
        let position = input.client_point(TouchPhase::Start);
        if !self.attached {
            return InteractionDispatch::ignored(InteractionPhase::TouchStart, IgnoredReason::Detached, None, position);
        }
        let gestures = self.touch.touch_start(input, now);
        self.route_touch(surface, gestures, InteractionPhase::TouchStart, position)
    }

    pub fn touch_move(
        &mut self,
        surface: &impl HitTest,
        input: &TouchInput,
        now: Instant,
    ) -> InteractionDispatch {
        let position = input.client_point(TouchPhase::Move);
        if !self.attached {
            return InteractionDispatch::ignored(InteractionPhase::TouchMove, IgnoredReason::Detached, None, position);
        }
        let gestures = self.touch.touch_move(input, now);
        self.route_touch(surface, gestures, InteractionPhase::TouchMove, position)
    }

    pub fn touch_end(
        &mut self,
        surface: &impl HitTest,
        input: &TouchInput,
        now: Instant,
    ) -> InteractionDispatch {
        let position = input.client_point(TouchPhase::End);
        if !self.attached {
            return InteractionDispatch::ignored(InteractionPhase::TouchEnd, IgnoredReason::Detached, None, position);
        }
        let gestures = self.touch.touch_end(input, now);
        self.route_touch(surface, gestures, InteractionPhase::TouchEnd, position)
    }

    pub fn touch_cancel(&mut self) -> InteractionDispatch {
        if !self.attached {
            return InteractionDispatch::ignored(InteractionPhase::TouchCancel, IgnoredReason::Detached, None, None);
        }
        let gestures = self.touch.touch_cancel();
        // No hit testing happens on cancel.
        self.route_touch(&NoSurface, gestures, InteractionPhase::TouchCancel, None)
    }

    /// Timer callback while a touch is held.
    pub fn tick(&mut self, surface: &impl HitTest, now: Instant) -> InteractionDispatch {
        if !self.attached {
            return InteractionDispatch::ignored(InteractionPhase::Tick, IgnoredReason::Detached, None, None);
        }
        let gestures: Vec<TouchGesture> = self.touch.tick(now).into_iter().collect();
        self.route_touch(surface, gestures, InteractionPhase::Tick, None)
    }

    fn route_touch(
        &mut self,
        surface: &impl HitTest,
        gestures: Vec<TouchGesture>,
        phase: InteractionPhase,
        position: Option<ClientPoint>,
    ) -> InteractionDispatch {
        let reason = if self.touch.is_pending() {
            IgnoredReason::AwaitingLongPress
        } else {
            IgnoredReason::NoActiveGesture
        };
        let mut dispatch = InteractionDispatch::ignored(phase, reason, self.active_gesture(), position);
        for gesture in gestures {
            let step = match gesture {
                TouchGesture::DragStart(point) => {
                    let step = self.begin(surface, point, phase);
                    if step.is_ignored() {
                        self.touch.reset();
                    }
                    step
                }
                TouchGesture::DragMove(point) => self.advance(surface, point, phase),
                TouchGesture::DragEnd(point) => self.release(surface, point, phase),
                TouchGesture::DragCancel => self.abort(phase),
            };
            dispatch.absorb(step);
        }
        dispatch
    }

    // -- gesture lifecycle ----------------------------------------------

    fn begin(&mut self, surface: &impl HitTest, point: ClientPoint, phase: InteractionPhase) -> InteractionDispatch {
        if !self.attached {
            return InteractionDispatch::ignored(phase, IgnoredReason::Detached, None, Some(point));
        }
        if !self.config.enabled {
            return InteractionDispatch::ignored(phase, IgnoredReason::Disabled, None, Some(point));
        }
        if let Some(active) = self.active {
            return InteractionDispatch::ignored(
                phase,
                IgnoredReason::GestureInProgress,
                Some(active.kind()),
                Some(point),
            );
        }
        let hits = surface.hits_at(point);
        let Some(top) = hits.first() else {
            return InteractionDispatch::ignored(phase, IgnoredReason::NoTarget, None, Some(point));
        };

        let (gesture, command, notification) = match top.classify() {
            GridTarget::QuarterHour(cell) => (
                ActiveGesture::Create,
                None,
                Some(CalendarNotification::NewSelectStart(self.quantized(cell))),
            ),
            GridTarget::DefinedSelection(interval) => (
                ActiveGesture::Move(MoveSession::new(top, point, interval)),
                Some(SurfaceCommand::AddClass {
                    element: top.id,
                    class: MOVING_CLASS,
                }),
                None,
            ),
            GridTarget::ResizeHandle(edge) => {
                let Some((selection, interval)) = first_selection(&hits) else {
                    return InteractionDispatch::ignored(
                        phase,
                        IgnoredReason::MissingSelection,
                        None,
                        Some(point),
                    );
                };
                let last_quarter = interval.end().add_minutes(-RESIZE_ANCHOR_MINUTES);
                let (down_day_hour, up_day_hour) = match edge {
                    ResizeEdge::Top => (last_quarter, interval.start()),
                    ResizeEdge::Bottom => (interval.start(), last_quarter),
                };
                (
                    ActiveGesture::Resize(ResizeSession {
                        edge,
                        selection,
                        init_start: interval.start(),
                    }),
                    Some(SurfaceCommand::SetOpacity {
                        element: selection,
                        opacity: 0.0,
                    }),
                    Some(CalendarNotification::ResizeDefinedStart {
                        down_day_hour,
                        up_day_hour,
                    }),
                )
            }
            GridTarget::Trash | GridTarget::Other => {
                return InteractionDispatch::ignored(
                    phase,
                    IgnoredReason::UnrecognizedTarget,
                    None,
                    Some(point),
                );
            }
        };

        self.active = Some(gesture);
        if let Some(drag_phase) = gesture.drag_phase() {
            self.broadcast(drag_phase);
        }
        let mut dispatch = InteractionDispatch::new(
            phase,
            Some(gesture.kind()),
            Some(point),
            InteractionOutcome::Started,
        );
        dispatch.commands.push(SurfaceCommand::InstallGlobalListeners);
        dispatch.commands.extend(command);
        if let Some(notification) = notification {
            self.emit(&mut dispatch, notification);
        }
        debug!(gesture = ?gesture.kind(), x = point.x, y = point.y, "calendar gesture started");
        dispatch
    }

    fn advance(&mut self, surface: &impl HitTest, point: ClientPoint, phase: InteractionPhase) -> InteractionDispatch {
        let Some(active) = self.active else {
            return InteractionDispatch::ignored(phase, IgnoredReason::NoActiveGesture, None, Some(point));
        };
        let kind = Some(active.kind());
        if !self.config.enabled {
            return InteractionDispatch::ignored(phase, IgnoredReason::Disabled, kind, Some(point));
        }

        let mut dispatch = InteractionDispatch::new(phase, kind, Some(point), InteractionOutcome::Updated);
        match active {
            ActiveGesture::Create => {
                match surface.topmost_at(point).map(|hit| hit.classify()) {
                    Some(GridTarget::QuarterHour(cell)) => {
                        let cell = self.quantized(cell);
                        self.emit(&mut dispatch, CalendarNotification::NewSelectMove(cell));
                    }
                    _ => return InteractionDispatch::ignored(phase, IgnoredReason::OffGrid, kind, Some(point)),
                }
            }
            ActiveGesture::Move(mut session) => {
                session.dx = point.x - session.origin.x;
                session.dy = point.y - session.origin.y;
                let over_trash = any_trash(&surface.hits_at(point));
                if over_trash != session.over_trash {
                    let element = session.element;
                    dispatch.commands.push(if over_trash {
                        SurfaceCommand::AddClass { element, class: DELETING_CLASS }
                    } else {
                        SurfaceCommand::RemoveClass { element, class: DELETING_CLASS }
                    });
                    session.over_trash = over_trash;
                }
                dispatch.commands.push(SurfaceCommand::SetTransform {
                    element: session.element,
                    dx: session.dx,
                    dy: session.dy,
                });
                self.active = Some(ActiveGesture::Move(session));
            }
            ActiveGesture::Resize(_) => match first_cell(&surface.hits_at(point)) {
                Some(cell) => {
                    let cell = self.quantized(cell);
                    self.emit(&mut dispatch, CalendarNotification::ResizeDefinedMove(cell));
                }
                None => return InteractionDispatch::ignored(phase, IgnoredReason::OffGrid, kind, Some(point)),
            },
        }
        dispatch
    }

    fn release(&mut self, surface: &impl HitTest, point: ClientPoint, phase: InteractionPhase) -> InteractionDispatch {
        let Some(active) = self.active.take() else {
            return InteractionDispatch::ignored(phase, IgnoredReason::NoActiveGesture, None, Some(point));
        };
        let mut dispatch = InteractionDispatch::new(
            phase,
            Some(active.kind()),
            Some(point),
            InteractionOutcome::Finished(GestureExit::Completed),
        );
        match active {
            ActiveGesture::Create => self.emit(&mut dispatch, CalendarNotification::NewSelectStop),
            ActiveGesture::Move(session) => {
                let hits = surface.hits_at(point);
                if any_trash(&hits) {
                    // The consumer removes the element; nothing to revert.
                    self.emit(
                        &mut dispatch,
                        CalendarNotification::DeleteDefined {
                            init_start: session.init.start(),
                        },
                    );
                } else {
                    if let Some(cell) = first_cell(&hits) {
                        let (new_start, new_end) = self.moved_bounds(&session, cell.day_ms);
                        self.emit(
                            &mut dispatch,
                            CalendarNotification::MoveDefinedStop {
                                init_start: session.init.start(),
                                new_start,
                                new_end,
                            },
                        );
                    }
                    dispatch.commands.extend(active.revert_commands());
                }
            }
            ActiveGesture::Resize(session) => {
                dispatch.commands.extend(active.revert_commands());
                self.emit(
                    &mut dispatch,
                    CalendarNotification::ResizeDefinedStop {
                        init_start_day_hour: session.init_start,
                    },
                );
            }
        }
        self.finish(active, GestureExit::Completed, &mut dispatch);
        dispatch
    }

    fn abort(&mut self, phase: InteractionPhase) -> InteractionDispatch {
        let Some(active) = self.active.take() else {
            return InteractionDispatch::ignored(phase, IgnoredReason::NoActiveGesture, None, None);
        };
        let mut dispatch = InteractionDispatch::new(
            phase,
            Some(active.kind()),
            None,
            InteractionOutcome::Finished(GestureExit::Aborted),
        );
        self.finish(active, GestureExit::Aborted, &mut dispatch);
        dispatch
    }

    /// The single exit of every gesture. `self.active` is already cleared.
    fn finish(&mut self, gesture: ActiveGesture, exit: GestureExit, dispatch: &mut InteractionDispatch) {
        if exit == GestureExit::Aborted {
            dispatch.commands.extend(gesture.revert_commands());
        }
        if gesture.drag_phase().is_some() {
            self.broadcast(DragDropPhase::None);
        }
        dispatch.commands.push(SurfaceCommand::RemoveGlobalListeners);
        debug!(gesture = ?gesture.kind(), exit = ?exit, "calendar gesture finished");
    }

    /// New bounds of a dragged selection dropped on the day starting at `target_day`.
    fn moved_bounds(&self, session: &MoveSession, target_day: Timestamp) -> (Timestamp, Timestamp) {
        let zone = self.config.zone;
        let delta = session.delta_hours();
        let start_hour = zone.quarter_hour_of_day(session.init.start());
        let end_hour = zone.end_hour_of_day(session.init.end());
        (
            target_day.add_hours(start_hour + delta),
            target_day.add_hours(end_hour + delta),
        )
    }

    fn quantized(&self, cell: DayHour) -> DayHour {
        DayHour::new(cell.day_ms, quantize_hour(cell.hour, self.config.hour_unit))
    }

    fn emit(&mut self, dispatch: &mut InteractionDispatch, notification: CalendarNotification) {
        debug!(event = notification.name(), "calendar notification");
        self.sink.notify(notification);
        dispatch.notifications.push(notification);
    }

    fn broadcast(&self, phase: DragDropPhase) {
        if let Some(state) = &self.drag_drop {
            state.set(phase);
        }
    }
}

/// Surface with nothing on it, for inputs that never hit-test.
struct NoSurface;

impl HitTest for NoSurface {
    fn hits_at(&self, _point: ClientPoint) -> Vec<ElementSnapshot> {
        Vec::new()
    }
}
