//! Calendar primitives used by the reports.
//!
//! Two independent notions live here:
//!
//! - [`ReportPeriod`]: the `today | month | year` selector that filters event
//!   timestamps by calendar day, month or year.
//! - [`CalendarWindows`]: the "this week / this month / last 30 days"
//!   boundaries used by the vendor engagement metrics, where the week starts
//!   on a configurable weekday.
//!
//! Both are derived from the wall-clock instant passed in and are never cached.

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, NaiveTime, Utc, Weekday};

use crate::domain::activity::ActivityWindow;

/// Dashboard / support-metrics period selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportPeriod {
    Today,
    #[default]
    Month,
    Year,
}

impl ReportPeriod {
    /// Missing or unrecognised values fall back to `Month`.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("today") => Self::Today,
            Some("year") => Self::Year,
            _ => Self::Month,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Month => "month",
            Self::Year => "year",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Today => "Today",
            Self::Month => "This Month",
            Self::Year => "This Year",
        }
    }

    pub fn all() -> [ReportPeriod; 3] {
        [Self::Today, Self::Month, Self::Year]
    }

    /// Half-open UTC range covering the calendar day, month or year of `now`.
    pub fn range(&self, now: DateTime<Utc>) -> TimeRange {
        let today = now.date_naive();
        let (start, end) = match self {
            Self::Today => (today, today.succ_opt().unwrap_or(NaiveDate::MAX)),
            Self::Month => {
                let first = first_day_of_month(today);
                (first, first.checked_add_months(Months::new(1)).unwrap_or(NaiveDate::MAX))
            }
            Self::Year => {
                let first = today.with_ordinal(1).unwrap_or(today);
                (first, first.checked_add_months(Months::new(12)).unwrap_or(NaiveDate::MAX))
            }
        };
        TimeRange {
            start: midnight(start),
            end: midnight(end),
        }
    }
}

impl std::fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// `[start, end)` in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.start && at < self.end
    }
}

/// Week / month boundaries for the engagement metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarWindows {
    pub today: NaiveDate,
    pub week_start: NaiveDate,
    pub month_start: NaiveDate,
    pub last_week_start: NaiveDate,
    pub last_week_end: NaiveDate,
    pub thirty_days_ago: NaiveDate,
}

impl CalendarWindows {
    pub fn at(now: DateTime<Utc>, first_weekday: Weekday) -> Self {
        let today = now.date_naive();
        let week_start = start_of_week(today, first_weekday);
        Self {
            today,
            week_start,
            month_start: first_day_of_month(today),
            last_week_start: week_start - Duration::weeks(1),
            last_week_end: week_start - Duration::days(1),
            thirty_days_ago: today - Duration::days(30),
        }
    }

    pub fn week_start_instant(&self) -> DateTime<Utc> {
        midnight(self.week_start)
    }

    pub fn month_start_instant(&self) -> DateTime<Utc> {
        midnight(self.month_start)
    }

    pub fn this_week(&self) -> ActivityWindow {
        ActivityWindow::Between(self.week_start, self.today)
    }

    pub fn last_week(&self) -> ActivityWindow {
        ActivityWindow::Between(self.last_week_start, self.last_week_end)
    }
}

/// Most recent `first_weekday` on or before `date`.
pub fn start_of_week(date: NaiveDate, first_weekday: Weekday) -> NaiveDate {
    let back = (date.weekday().num_days_from_monday() + 7 - first_weekday.num_days_from_monday()) % 7;
    date - Duration::days(i64::from(back))
}

pub fn first_day_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::default()).and_utc()
}

/// Accepts full or abbreviated English weekday names ("monday", "Sun").
pub fn parse_weekday(raw: &str) -> Option<Weekday> {
    raw.trim().parse::<Weekday>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn at(y: i32, m: u32, day: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, day, h, 0, 0).unwrap()
    }

    #[test]
    fn period_parse_defaults_to_month() {
        assert_eq!(ReportPeriod::parse(None), ReportPeriod::Month);
        assert_eq!(ReportPeriod::parse(Some("bogus")), ReportPeriod::Month);
        assert_eq!(ReportPeriod::parse(Some("today")), ReportPeriod::Today);
        assert_eq!(ReportPeriod::parse(Some("YEAR")), ReportPeriod::Year);
    }

    #[test]
    fn today_range_covers_one_calendar_day() {
        let r = ReportPeriod::Today.range(at(2026, 10, 17, 15));
        assert_eq!(r.start, at(2026, 10, 17, 0));
        assert_eq!(r.end, at(2026, 10, 18, 0));
        assert!(r.contains(at(2026, 10, 17, 23)));
        assert!(!r.contains(at(2026, 10, 18, 0)));
    }

    #[test]
    fn month_range_rolls_over_december() {
        let r = ReportPeriod::Month.range(at(2026, 12, 5, 8));
        assert_eq!(r.start, at(2026, 12, 1, 0));
        assert_eq!(r.end, at(2027, 1, 1, 0));
    }

    #[test]
    fn year_range() {
        let r = ReportPeriod::Year.range(at(2026, 6, 30, 12));
        assert_eq!(r.start, at(2026, 1, 1, 0));
        assert_eq!(r.end, at(2027, 1, 1, 0));
        assert!(!r.contains(at(2025, 12, 31, 23)));
    }

    #[test]
    fn week_start_monday() {
        // 2026-10-17 is a Saturday
        assert_eq!(start_of_week(d(2026, 10, 17), Weekday::Mon), d(2026, 10, 12));
        // a Monday is its own week start
        assert_eq!(start_of_week(d(2026, 10, 12), Weekday::Mon), d(2026, 10, 12));
    }

    #[test]
    fn week_start_sunday() {
        assert_eq!(start_of_week(d(2026, 10, 17), Weekday::Sun), d(2026, 10, 11));
        assert_eq!(start_of_week(d(2026, 10, 18), Weekday::Sun), d(2026, 10, 18));
    }

    #[test]
    fn calendar_windows() {
        let w = CalendarWindows::at(at(2026, 10, 17, 9), Weekday::Mon);
        assert_eq!(w.today, d(2026, 10, 17));
        assert_eq!(w.week_start, d(2026, 10, 12));
        assert_eq!(w.month_start, d(2026, 10, 1));
        assert_eq!(w.last_week_start, d(2026, 10, 5));
        assert_eq!(w.last_week_end, d(2026, 10, 11));
        assert_eq!(w.thirty_days_ago, d(2026, 9, 17));
        assert_eq!(w.week_start_instant(), at(2026, 10, 12, 0));
        assert_eq!(w.month_start_instant(), at(2026, 10, 1, 0));
        assert_eq!(
            w.this_week(),
            ActivityWindow::Between(d(2026, 10, 12), d(2026, 10, 17))
        );
    }

    #[test]
    fn weekday_names() {
        assert_eq!(parse_weekday("monday"), Some(Weekday::Mon));
        assert_eq!(parse_weekday("Sun"), Some(Weekday::Sun));
        assert_eq!(parse_weekday("someday"), None);
    }
}
