#![forbid(unsafe_code)]

//! Per-user availability helpers for the shared calendar view.

use std::collections::BTreeMap;

use crate::time::TimeInterval;

/// Intervals each attendee marked as available, keyed by username.
pub type UserIntervals = BTreeMap<String, Vec<TimeInterval>>;

/// A span of time together with the attendees available for all of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilitySlot {
    pub interval: TimeInterval,
    pub usernames: Vec<String>,
}

/// Restrict `all` to `selected` usernames. No selection means everyone.
#[must_use]
pub fn filter_by_usernames(selected: &[String], all: &UserIntervals) -> UserIntervals {
    if selected.is_empty() {
        return all.clone();
    }
    all.iter()
        .filter(|(username, _)| selected.contains(*username))
        .map(|(username, intervals)| (username.clone(), intervals.clone()))
        .collect()
}

/// Fewest and most attendees across `slots`; `(0, 0)` when empty.
#[must_use]
pub fn min_max_usernames(slots: &[AvailabilitySlot]) -> (usize, usize) {
    slots
        .iter()
        .map(|slot| slot.usernames.len())
        .fold(None, |range, count| match range {
            None => Some((count, count)),
            Some((min, max)) => Some((usize::min(min, count), usize::max(max, count))),
        })
        .unwrap_or((0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::Timestamp;

    fn slot(names: &[&str]) -> AvailabilitySlot {
        AvailabilitySlot {
            interval: TimeInterval::new(Timestamp::from_millis(0), Timestamp::from_millis(1))
                .unwrap(),
            usernames: names.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    fn users() -> UserIntervals {
        let one = TimeInterval::new(Timestamp::from_millis(0), Timestamp::from_millis(10)).unwrap();
        let mut map = UserIntervals::new();
        map.insert("ana".into(), vec![one]);
        map.insert("bo".into(), vec![one, one.shifted_hours(1.0)]);
        map.insert("cy".into(), Vec::new());
        map
    }

    #[test]
    fn empty_selection_keeps_everyone() {
        assert_eq!(filter_by_usernames(&[], &users()), users());
    }

    #[test]
    fn selection_keeps_only_named_users() {
        let filtered = filter_by_usernames(&["bo".into(), "zed".into()], &users());
        assert_eq!(filtered.keys().collect::<Vec<_>>(), vec!["bo"]);
        assert_eq!(filtered["bo"].len(), 2);
    }

    #[test]
    fn min_max_counts_attendees() {
        let slots = [slot(&["a", "b"]), slot(&["a"]), slot(&["a", "b", "c"])];
        assert_eq!(min_max_usernames(&slots), (1, 3));
        assert_eq!(min_max_usernames(&slots[..1]), (2, 2));
    }

    #[test]
    fn min_max_of_nothing_is_zero() {
        assert_eq!(min_max_usernames(&[]), (0, 0));
    }
}
