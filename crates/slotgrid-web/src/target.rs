#![forbid(unsafe_code)]

//! Hit-test targets and their classification.
//!
//! The grid marks its elements with `data-*` attributes. The host reports
//! the elements under a point as [`ElementSnapshot`]s (topmost first), and
//! [`ElementSnapshot::classify`] turns the attribute bag into a typed
//! [`GridTarget`].
//!
//! Numeric attributes are parsed once, here. A marked element whose numbers
//! do not parse is classified as [`GridTarget::Other`] and a warning is
//! logged, so malformed markup never reaches the gesture math.

use std::collections::BTreeMap;

use slotgrid_core::{DayHour, TimeInterval, Timestamp};
use tracing::warn;

use crate::input::ClientPoint;

/// Marks a quarter-hour grid cell.
pub const QUARTER_HOUR_TARGET: &str = "quarterHourTarget";
/// Local midnight of the cell's day column, in milliseconds.
pub const DAY_MS: &str = "dayMs";
/// Fractional hour of the cell.
pub const HOUR: &str = "hour";
/// Marks a rendered defined selection.
pub const DEFINED_SELECTION: &str = "definedSelection";
/// Selection start, in milliseconds.
pub const START_MS: &str = "startMs";
/// Selection end, in milliseconds.
pub const END_MS: &str = "endMs";
/// Marks a resize handle of a defined selection.
pub const RESIZE_DEFINED_SELECTION: &str = "resizeDefinedSelection";
/// Present on the top resize handle.
pub const TOP: &str = "top";
/// Present on the bottom resize handle.
pub const BOTTOM: &str = "bottom";
/// Marks the trash drop zone.
pub const TRASH_TARGET: &str = "trashTarget";

/// Host-assigned identity of a DOM element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(pub u32);

/// `HTMLElement.dataset`, keyed by camelCase name.
pub type Dataset = BTreeMap<String, String>;

/// What the host knows about one element under the pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementSnapshot {
    pub id: ElementId,
    pub dataset: Dataset,
    /// Rendered height (`clientHeight`), in CSS pixels.
    pub height_px: f64,
}

/// Which edge of a defined selection a resize handle drags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeEdge {
    Top,
    Bottom,
}

/// Typed meaning of a hit-tested element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GridTarget {
    QuarterHour(DayHour),
    DefinedSelection(TimeInterval),
    ResizeHandle(ResizeEdge),
    Trash,
    Other,
}

impl GridTarget {
    #[must_use]
    pub const fn is_trash(&self) -> bool {
        matches!(self, Self::Trash)
    }
}

impl ElementSnapshot {
    /// An unmarked element.
    #[must_use]
    pub fn new(id: ElementId) -> Self {
        Self {
            id,
            dataset: Dataset::new(),
            height_px: 0.0,
        }
    }

    /// Grid cell for `hour` on the day starting at `day`.
    #[must_use]
    pub fn quarter_hour(id: ElementId, day: Timestamp, hour: f64) -> Self {
        Self::new(id)
            .with_data(QUARTER_HOUR_TARGET, "")
            .with_data(DAY_MS, day.as_millis().to_string())
            .with_data(HOUR, hour.to_string())
    }

    /// Rendered defined selection for `interval`.
    #[must_use]
    pub fn defined_selection(id: ElementId, interval: &TimeInterval, height_px: f64) -> Self {
        Self::new(id)
            .with_data(DEFINED_SELECTION, "")
            .with_data(START_MS, interval.start().as_millis().to_string())
            .with_data(END_MS, interval.end().as_millis().to_string())
            .with_height(height_px)
    }

    /// Resize handle on `edge`.
    #[must_use]
    pub fn resize_handle(id: ElementId, edge: ResizeEdge) -> Self {
        let marker = match edge {
            ResizeEdge::Top => TOP,
            ResizeEdge::Bottom => BOTTOM,
        };
        Self::new(id)
            .with_data(RESIZE_DEFINED_SELECTION, "")
            .with_data(marker, "")
    }

    /// Trash drop zone.
    #[must_use]
    pub fn trash(id: ElementId) -> Self {
        Self::new(id).with_data(TRASH_TARGET, "")
    }

    #[must_use]
    pub fn with_data(mut self, key: &str, value: impl Into<String>) -> Self {
        self.dataset.insert(key.to_string(), value.into());
        self
    }

    #[must_use]
    pub fn with_height(mut self, height_px: f64) -> Self {
        self.height_px = height_px;
        self
    }

    fn has(&self, key: &str) -> bool {
        self.dataset.contains_key(key)
    }

    fn data(&self, key: &str) -> Option<&str> {
        self.dataset.get(key).map(String::as_str)
    }

    /// Parsed cell coordinate, if this is a well-formed grid cell.
    #[must_use]
    pub fn day_hour(&self) -> Option<DayHour> {
        let day = parse_int(self.data(DAY_MS)?)?;
        let hour = parse_float(self.data(HOUR)?)?;
        Some(DayHour::new(Timestamp::from_millis(day), hour))
    }

    /// Parsed interval, if this is a well-formed defined selection.
    #[must_use]
    pub fn interval(&self) -> Option<TimeInterval> {
        let start = parse_int(self.data(START_MS)?)?;
        let end = parse_int(self.data(END_MS)?)?;
        TimeInterval::new(Timestamp::from_millis(start), Timestamp::from_millis(end)).ok()
    }

    /// Classify by marker attribute.
    ///
    /// A browser host would carry unparsable day or hour attributes on as
    /// NaN; here a marked element whose attributes do not parse is
    /// [`GridTarget::Other`] and a warning is logged.
    #[must_use]
    pub fn classify(&self) -> GridTarget {
        if self.has(QUARTER_HOUR_TARGET) {
            return match self.day_hour() {
                Some(cell) => GridTarget::QuarterHour(cell),
                None => self.malformed("quarter-hour cell"),
            };
        }
        if self.has(DEFINED_SELECTION) {
            return match self.interval() {
                Some(interval) => GridTarget::DefinedSelection(interval),
                None => self.malformed("defined selection"),
            };
        }
        if self.has(RESIZE_DEFINED_SELECTION) {
            if self.has(TOP) {
                return GridTarget::ResizeHandle(ResizeEdge::Top);
            }
            if self.has(BOTTOM) {
                return GridTarget::ResizeHandle(ResizeEdge::Bottom);
            }
            return self.malformed("resize handle");
        }
        if self.has(TRASH_TARGET) {
            return GridTarget::Trash;
        }
        GridTarget::Other
    }

    fn malformed(&self, kind: &'static str) -> GridTarget {
        warn!(element = self.id.0, kind, dataset = ?self.dataset, "malformed grid target attributes");
        GridTarget::Other
    }
}

/// Integer prefix of `raw`, the way `parseInt(raw, 10)` reads it.
fn parse_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let sign_len = usize::from(s.starts_with(['+', '-']));
    let digits = s[sign_len..]
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(s.len() - sign_len);
    if digits == 0 {
        return None;
    }
    s[..sign_len + digits].parse().ok()
}

/// Longest decimal prefix of `raw`, the way `parseFloat(raw)` reads it.
fn parse_float(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let candidate = s
        .find(|c: char| !matches!(c, '0'..='9' | '.' | '+' | '-' | 'e' | 'E'))
        .map_or(s, |end| &s[..end]);
    (1..=candidate.len())
        .rev()
        .find_map(|len| candidate[..len].parse::<f64>().ok())
        .filter(|value| value.is_finite())
}

// ---------------------------------------------------------------------------
// Hit testing
// ---------------------------------------------------------------------------

/// Host-side `document.elementsFromPoint`.
pub trait HitTest {
    /// Elements under `point`, topmost first.
    fn hits_at(&self, point: ClientPoint) -> Vec<ElementSnapshot>;

    /// The topmost element under `point`.
    fn topmost_at(&self, point: ClientPoint) -> Option<ElementSnapshot> {
        self.hits_at(point).into_iter().next()
    }
}

impl<H: HitTest + ?Sized> HitTest for &H {
    fn hits_at(&self, point: ClientPoint) -> Vec<ElementSnapshot> {
        (**self).hits_at(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MONDAY: i64 = 1_709_510_400_000;

    #[test]
    fn cell_classifies_with_parsed_coordinate() {
        let cell = ElementSnapshot::quarter_hour(ElementId(1), Timestamp::from_millis(MONDAY), 9.25);
        assert_eq!(
            cell.classify(),
            GridTarget::QuarterHour(DayHour::new(Timestamp::from_millis(MONDAY), 9.25))
        );
    }

    #[test]
    fn selection_and_handles_classify() {
        let interval = TimeInterval::new(
            Timestamp::from_millis(MONDAY),
            Timestamp::from_millis(MONDAY + 3_600_000),
        )
        .unwrap();
        let selection = ElementSnapshot::defined_selection(ElementId(2), &interval, 48.0);
        assert_eq!(selection.classify(), GridTarget::DefinedSelection(interval));
        assert_eq!(
            ElementSnapshot::resize_handle(ElementId(3), ResizeEdge::Bottom).classify(),
            GridTarget::ResizeHandle(ResizeEdge::Bottom)
        );
        assert!(ElementSnapshot::trash(ElementId(4)).classify().is_trash());
        assert_eq!(ElementSnapshot::new(ElementId(5)).classify(), GridTarget::Other);
    }

    #[test]
    fn malformed_numbers_classify_as_other() {
        let cell = ElementSnapshot::new(ElementId(1))
            .with_data(QUARTER_HOUR_TARGET, "")
            .with_data(DAY_MS, "soon")
            .with_data(HOUR, "9");
        assert_eq!(cell.classify(), GridTarget::Other);

        let reversed = ElementSnapshot::new(ElementId(2))
            .with_data(DEFINED_SELECTION, "")
            .with_data(START_MS, "20")
            .with_data(END_MS, "10");
        assert_eq!(reversed.classify(), GridTarget::Other);
    }

    #[test]
    fn numbers_parse_like_the_dom() {
        assert_eq!(parse_int("  1709510400000"), Some(1_709_510_400_000));
        assert_eq!(parse_int("-12abc"), Some(-12));
        assert_eq!(parse_int("12.9"), Some(12));
        assert_eq!(parse_int("abc"), None);
        assert_eq!(parse_int("-"), None);
        assert_eq!(parse_float("9.25"), Some(9.25));
        assert_eq!(parse_float("10.5px"), Some(10.5));
        assert_eq!(parse_float("1e"), Some(1.0));
        assert_eq!(parse_float(""), None);
        assert_eq!(parse_float("x9"), None);
    }
}
