#![forbid(unsafe_code)]

//! Property tests for the time model.
//!
//! Run:
//!   cargo test -p slotgrid-core --test proptest_time_invariants

use proptest::prelude::*;
use slotgrid_core::{
    CalendarZone, DayHour, MS_PER_DAY, MS_PER_MINUTE, TimeInterval, Timestamp,
    multi_day_selection, quantize_hour,
};

// 2024-03-04T00:00:00Z
const MONDAY: i64 = 1_709_510_400_000;

fn zone_strategy() -> impl Strategy<Value = CalendarZone> {
    (-720_i32..=840).prop_map(|minutes| {
        CalendarZone::from_offset_minutes(minutes).expect("offset within a day")
    })
}

fn timestamp_strategy() -> impl Strategy<Value = Timestamp> {
    (0_i64..(60 * MS_PER_DAY)).prop_map(|ms| Timestamp::from_millis(MONDAY + ms))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn quantized_hour_is_nearest_quarter(hour in -48.0_f64..48.0) {
        let snapped = quantize_hour(hour, 0.25);
        prop_assert_eq!((snapped / 0.25).fract(), 0.0);
        prop_assert!((snapped - hour).abs() <= 0.125);
    }

    #[test]
    fn day_hour_round_trips(ts in timestamp_strategy(), zone in zone_strategy()) {
        let coordinate = DayHour::from_timestamp(ts, zone);
        prop_assert_eq!(zone.ms_of_day(coordinate.day_ms), 0);
        prop_assert!((0.0..24.0).contains(&coordinate.hour));
        prop_assert_eq!(coordinate.to_timestamp(), ts);
    }

    #[test]
    fn interval_requires_increasing_bounds(a in timestamp_strategy(), b in timestamp_strategy()) {
        let built = TimeInterval::new(a, b);
        prop_assert_eq!(built.is_ok(), a < b);
        if let Ok(interval) = built {
            prop_assert!(interval.contains(a));
            prop_assert!(!interval.contains(b));
        }
    }

    #[test]
    fn multi_day_pieces_repeat_the_daily_window(
        start_quarter in 0_i64..(14 * 96),
        length_quarters in 1_i64..(10 * 96),
        zone in zone_strategy(),
    ) {
        let start = Timestamp::from_millis(MONDAY + start_quarter * 15 * MS_PER_MINUTE);
        let end = start.add_minutes(length_quarters * 15);
        let selection = TimeInterval::new(start, end).unwrap();

        let pieces = multi_day_selection(&selection, zone);
        let span_days = selection.duration_ms().div_euclid(MS_PER_DAY) + 1;
        prop_assert!(pieces.len() as i64 <= span_days);

        for piece in &pieces {
            prop_assert!(piece.duration_ms() > 0);
            prop_assert!(piece.duration_ms() <= MS_PER_DAY);
            prop_assert_eq!(zone.ms_of_day(piece.start()), zone.ms_of_day(start));
            prop_assert_eq!(zone.ms_of_day(piece.end()), zone.ms_of_day(end));
            prop_assert_eq!((piece.start().as_millis() - start.as_millis()).rem_euclid(MS_PER_DAY), 0);
        }
        for pair in pieces.windows(2) {
            prop_assert!(pair[0].start() < pair[1].start());
        }
    }
}
