//! Monday-anchored week arithmetic for the calendar grid.
//!
//! The dashboards render a rolling window of whole weeks: a fixed history of
//! two past weeks (shiftable further back with an offset) followed by a
//! configurable number of future weeks starting at the current week. All
//! weeks run Monday through Sunday.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Monday of the week containing `date`.
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    let back = date.weekday().num_days_from_monday() as u64;
    date - Days::new(back)
}

/// The seven dates of the week starting at `monday`.
pub fn week_dates(monday: NaiveDate) -> [NaiveDate; 7] {
    std::array::from_fn(|i| monday + Days::new(i as u64))
}

/// Short `d/m - d/m` label for the week starting at `monday`.
pub fn week_label(monday: NaiveDate) -> String {
    let sunday = monday + Days::new(6);
    format!(
        "{}/{} - {}/{}",
        monday.day(),
        monday.month(),
        sunday.day(),
        sunday.month()
    )
}

/// ISO 8601 week number of `date`.
pub fn iso_week(date: NaiveDate) -> u32 {
    date.iso_week().week()
}

/// Monday of ISO week `week` in ISO year `year`, if the week exists.
pub fn first_day_of_iso_week(year: i32, week: u32) -> Option<NaiveDate> {
    NaiveDate::from_isoywd_opt(year, week, Weekday::Mon)
}

/// A rolling window of whole weeks around a reference date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanWindow {
    /// Mondays of each week in the window, oldest first.
    pub week_starts: Vec<NaiveDate>,
    /// How many of the leading weeks are history.
    pub past_weeks: usize,
}

impl PlanWindow {
    /// Default history depth shown on the dashboards.
    pub const DEFAULT_PAST_WEEKS: usize = 2;
    /// Default forward horizon on the coach view.
    pub const DEFAULT_FUTURE_WEEKS: usize = 4;

    /// Build the window around `today`.
    ///
    /// The window holds `past_weeks` history weeks ending just before the
    /// current week, then `future_weeks` weeks starting at the current week.
    /// `history_offset` shifts the history block further into the past by
    /// whole weeks without moving the future block.
    pub fn rolling(
        today: NaiveDate,
        past_weeks: usize,
        future_weeks: usize,
        history_offset: usize,
    ) -> Self {
        let current_monday = monday_of(today);
        let mut week_starts = Vec::with_capacity(past_weeks + future_weeks);

        for i in (0..past_weeks).rev() {
            let back = ((i + 1 + history_offset) * 7) as u64;
            week_starts.push(current_monday - Days::new(back));
        }
        for i in 0..future_weeks {
            week_starts.push(current_monday + Days::new((i * 7) as u64));
        }

        Self {
            week_starts,
            past_weeks,
        }
    }

    /// First date covered by the window.
    pub fn start(&self) -> Option<NaiveDate> {
        self.week_starts.first().copied()
    }

    /// Last date covered by the window (Sunday of the last week).
    pub fn end(&self) -> Option<NaiveDate> {
        self.week_starts.last().map(|m| *m + Days::new(6))
    }

    /// Whether the week at `index` belongs to the history block.
    pub fn is_past(&self, index: usize) -> bool {
        index < self.past_weeks
    }
}

#[cfg(test)]
#[path = "week_tests.rs"]
mod tests;
