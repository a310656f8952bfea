//! The inclusive date range a statement covers.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// Closed date range `[start, end]` used to filter movements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl ReportWindow {
    /// Creates a window covering `start` through `end`, both inclusive.
    #[must_use]
    pub const fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// First day of the window.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the window (inclusive).
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Whether a timestamp falls on a day inside the window.
    #[must_use]
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        let day = at.date_naive();
        day >= self.start && day <= self.end
    }

    /// Half-open UTC bounds `[start 00:00, day-after-end 00:00)` equivalent
    /// to the closed date range, for range queries over timestamps.
    #[must_use]
    pub fn bounds(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        let lower = self.start.and_time(NaiveTime::MIN).and_utc();
        let upper = self
            .end
            .succ_opt()
            .map_or(DateTime::<Utc>::MAX_UTC, |day| {
                day.and_time(NaiveTime::MIN).and_utc()
            });
        (lower, upper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 30, 0).unwrap()
    }

    #[test]
    fn test_window_is_inclusive_on_both_ends() {
        let window = ReportWindow::new(date(2024, 3, 1), date(2024, 3, 31));

        assert!(window.contains(at(2024, 3, 1, 0)));
        assert!(window.contains(at(2024, 3, 15, 12)));
        assert!(window.contains(at(2024, 3, 31, 23)));
        assert!(!window.contains(at(2024, 2, 29, 23)));
        assert!(!window.contains(at(2024, 4, 1, 0)));
    }

    #[test]
    fn test_single_day_window() {
        let window = ReportWindow::new(date(2024, 6, 10), date(2024, 6, 10));
        assert!(window.contains(at(2024, 6, 10, 8)));
        assert!(!window.contains(at(2024, 6, 11, 8)));
        assert!(!window.contains(at(2024, 6, 9, 8)));
    }

    #[test]
    fn test_bounds_match_contains() {
        let window = ReportWindow::new(date(2024, 3, 1), date(2024, 3, 31));
        let (lower, upper) = window.bounds();

        for probe in [
            at(2024, 2, 29, 23),
            at(2024, 3, 1, 0),
            at(2024, 3, 31, 23),
            at(2024, 4, 1, 0),
        ] {
            assert_eq!(window.contains(probe), probe >= lower && probe < upper);
        }
    }

    #[test]
    fn test_inverted_window_is_empty() {
        let window = ReportWindow::new(date(2024, 5, 10), date(2024, 5, 1));
        assert!(!window.contains(at(2024, 5, 5, 12)));
    }
}
