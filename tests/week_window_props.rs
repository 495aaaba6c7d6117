//! Property tests for the calendar week math.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use proptest::prelude::*;

use trainplan::models::{monday_of, week_dates, PlanWindow};

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    // Any day across a few decades, covering ISO week-53 years.
    (2000i32..2060, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

proptest! {
    #[test]
    fn monday_of_lands_on_monday(date in arb_date()) {
        let monday = monday_of(date);
        prop_assert_eq!(monday.weekday(), Weekday::Mon);
        prop_assert!(monday <= date);
        prop_assert!(date - monday <= chrono::TimeDelta::days(6));
    }

    #[test]
    fn monday_of_is_idempotent(date in arb_date()) {
        let monday = monday_of(date);
        prop_assert_eq!(monday_of(monday), monday);
    }

    #[test]
    fn week_dates_are_consecutive(date in arb_date()) {
        let monday = monday_of(date);
        let days = week_dates(monday);
        prop_assert_eq!(days.len(), 7);
        for pair in days.windows(2) {
            prop_assert_eq!(pair[0] + Days::new(1), pair[1]);
        }
        prop_assert_eq!(days[0].weekday(), Weekday::Mon);
        prop_assert_eq!(days[6].weekday(), Weekday::Sun);
    }

    #[test]
    fn window_weeks_are_contiguous_mondays(
        date in arb_date(),
        past in 0usize..6,
        future in 1usize..9,
        offset in 0usize..4,
    ) {
        let window = PlanWindow::rolling(date, past, future, offset);
        prop_assert_eq!(window.week_starts.len(), past + future);

        for start in &window.week_starts {
            prop_assert_eq!(start.weekday(), Weekday::Mon);
        }
        if offset == 0 {
            for pair in window.week_starts.windows(2) {
                prop_assert_eq!(pair[0] + Days::new(7), pair[1]);
            }
        }

        // The first future week is always the current week.
        prop_assert_eq!(window.week_starts[past], monday_of(date));
    }

    #[test]
    fn window_contains_today_in_a_non_past_week(date in arb_date(), past in 0usize..6) {
        let window = PlanWindow::rolling(date, past, 4, 0);
        let idx = window
            .week_starts
            .iter()
            .position(|&m| m == monday_of(date))
            .unwrap();
        prop_assert!(!window.is_past(idx));
        prop_assert!(window.start().unwrap() <= date);
        prop_assert!(window.end().unwrap() >= date);
    }

    #[test]
    fn history_offset_shifts_only_the_past_block(date in arb_date(), offset in 0usize..5) {
        let base = PlanWindow::rolling(date, 2, 4, 0);
        let shifted = PlanWindow::rolling(date, 2, 4, offset);

        // Future block unchanged.
        prop_assert_eq!(&base.week_starts[2..], &shifted.week_starts[2..]);

        // History block moved back by `offset` whole weeks.
        for (b, s) in base.week_starts[..2].iter().zip(&shifted.week_starts[..2]) {
            prop_assert_eq!(*b - Days::new((offset * 7) as u64), *s);
        }
    }
}
