//! Reporting periods and budget cadences
//!
//! A [`ReportPeriod`] is an inclusive calendar window used to slice a
//! snapshot for the dashboard (this month vs. last month, a given ISO week,
//! a year, or an explicit range). A [`BudgetCadence`] is how often a budget
//! limit renews.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How often a budget limit renews
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BudgetCadence {
    Weekly,
    #[default]
    Monthly,
    Yearly,
}

impl BudgetCadence {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "weekly" | "week" => Some(Self::Weekly),
            "monthly" | "month" => Some(Self::Monthly),
            "yearly" | "year" | "annual" | "annually" => Some(Self::Yearly),
            _ => None,
        }
    }
}

impl fmt::Display for BudgetCadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weekly => write!(f, "weekly"),
            Self::Monthly => write!(f, "monthly"),
            Self::Yearly => write!(f, "yearly"),
        }
    }
}

/// An inclusive calendar window
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum ReportPeriod {
    /// Calendar month (e.g., "2024-03")
    Monthly { year: i32, month: u32 },

    /// ISO week (e.g., "2024-W10")
    Weekly { year: i32, week: u32 },

    /// Calendar year (e.g., "2024")
    Yearly { year: i32 },

    /// Explicit range, both ends included
    Custom { start: NaiveDate, end: NaiveDate },
}

/// Years a period string may name
pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

fn clamp_year(year: i32) -> i32 {
    year.clamp(NaiveDate::MIN.year(), NaiveDate::MAX.year())
}

fn first_of_month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(clamp_year(year), month.clamp(1, 12), 1).unwrap_or(NaiveDate::MIN)
}

fn last_of_month(year: i32, month: u32) -> NaiveDate {
    let year = clamp_year(year);
    let last = if month >= 12 {
        NaiveDate::from_ymd_opt(year, 12, 31)
    } else {
        first_of_month(year, month + 1).pred_opt()
    };
    last.unwrap_or(NaiveDate::MAX)
}

fn check_year(year: i32) -> Result<i32, PeriodParseError> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(year)
    } else {
        Err(PeriodParseError::YearOutOfRange(year))
    }
}

fn iso_weeks_in_year(year: i32) -> u32 {
    // Dec 28 always falls in the last ISO week of its year
    NaiveDate::from_ymd_opt(year, 12, 28)
        .map(|d| d.iso_week().week())
        .unwrap_or(52)
}

impl ReportPeriod {
    pub fn monthly(year: i32, month: u32) -> Self {
        Self::Monthly {
            year,
            month: month.clamp(1, 12),
        }
    }

    pub fn weekly(year: i32, week: u32) -> Self {
        Self::Weekly {
            year,
            week: week.clamp(1, iso_weeks_in_year(year)),
        }
    }

    pub fn yearly(year: i32) -> Self {
        Self::Yearly { year }
    }

    /// Create a custom range; the ends are swapped if given backwards
    pub fn custom(start: NaiveDate, end: NaiveDate) -> Self {
        if end < start {
            Self::Custom { start: end, end: start }
        } else {
            Self::Custom { start, end }
        }
    }

    /// The period of the given cadence that contains `date`
    pub fn containing(cadence: BudgetCadence, date: NaiveDate) -> Self {
        match cadence {
            BudgetCadence::Weekly => {
                let iso = date.iso_week();
                Self::Weekly {
                    year: iso.year(),
                    week: iso.week(),
                }
            }
            BudgetCadence::Monthly => Self::Monthly {
                year: date.year(),
                month: date.month(),
            },
            BudgetCadence::Yearly => Self::Yearly { year: date.year() },
        }
    }

    /// The calendar month containing today
    pub fn current_month() -> Self {
        Self::containing(BudgetCadence::Monthly, chrono::Local::now().date_naive())
    }

    /// Get the first day of this period
    pub fn start_date(&self) -> NaiveDate {
        match self {
            Self::Monthly { year, month } => first_of_month(*year, *month),
            Self::Weekly { year, week } => NaiveDate::from_isoywd_opt(*year, *week, Weekday::Mon)
                .unwrap_or_else(|| first_of_month(*year, 1)),
            Self::Yearly { year } => first_of_month(*year, 1),
            Self::Custom { start, .. } => *start,
        }
    }

    /// Get the last day of this period (inclusive)
    pub fn end_date(&self) -> NaiveDate {
        match self {
            Self::Monthly { year, month } => last_of_month(*year, *month),
            Self::Weekly { year, week } => NaiveDate::from_isoywd_opt(*year, *week, Weekday::Sun)
                .unwrap_or_else(|| {
                    self.start_date()
                        .checked_add_signed(Duration::days(6))
                        .unwrap_or(NaiveDate::MAX)
                }),
            Self::Yearly { year } => last_of_month(*year, 12),
            Self::Custom { end, .. } => *end,
        }
    }

    /// Check if a date falls within this period, both ends included
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date() && date <= self.end_date()
    }

    /// Number of days covered
    pub fn days(&self) -> i64 {
        (self.end_date() - self.start_date()).num_days() + 1
    }

    /// Get the next period
    pub fn next(&self) -> Self {
        match self {
            Self::Monthly { year, month } => {
                if *month >= 12 {
                    Self::Monthly { year: year.saturating_add(1), month: 1 }
                } else {
                    Self::Monthly { year: *year, month: *month + 1 }
                }
            }
            Self::Weekly { year, week } => {
                if *week >= iso_weeks_in_year(*year) {
                    Self::Weekly { year: year.saturating_add(1), week: 1 }
                } else {
                    Self::Weekly { year: *year, week: *week + 1 }
                }
            }
            Self::Yearly { year } => Self::Yearly { year: year.saturating_add(1) },
            Self::Custom { start, end } => {
                // Saturates at the last representable date
                let step = (*end - *start) + Duration::days(1);
                Self::Custom {
                    start: end.succ_opt().unwrap_or(NaiveDate::MAX),
                    end: end.checked_add_signed(step).unwrap_or(NaiveDate::MAX),
                }
            }
        }
    }

    /// Get the previous period
    pub fn prev(&self) -> Self {
        match self {
            Self::Monthly { year, month } => {
                if *month <= 1 {
                    Self::Monthly { year: year.saturating_sub(1), month: 12 }
                } else {
                    Self::Monthly { year: *year, month: *month - 1 }
                }
            }
            Self::Weekly { year, week } => {
                if *week <= 1 {
                    let year = year.saturating_sub(1);
                    Self::Weekly {
                        year,
                        week: iso_weeks_in_year(year),
                    }
                } else {
                    Self::Weekly { year: *year, week: *week - 1 }
                }
            }
            Self::Yearly { year } => Self::Yearly { year: year.saturating_sub(1) },
            Self::Custom { start, end } => {
                // Saturates at the first representable date
                let step = (*end - *start) + Duration::days(1);
                Self::Custom {
                    start: start.checked_sub_signed(step).unwrap_or(NaiveDate::MIN),
                    end: start.pred_opt().unwrap_or(NaiveDate::MIN),
                }
            }
        }
    }

    /// Parse a period string relative to today
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        Self::parse_relative(s, chrono::Local::now().date_naive())
    }

    /// Parse a period string
    ///
    /// Formats:
    /// - "current" / "last": this month or the one before, relative to `today`
    /// - Monthly: "2024-03"
    /// - Weekly: "2024-W10"
    /// - Yearly: "2024"
    /// - Custom: "2024-03-01..2024-03-15"
    ///
    /// Years outside `MIN_YEAR..=MAX_YEAR` are rejected.
    pub fn parse_relative(s: &str, today: NaiveDate) -> Result<Self, PeriodParseError> {
        let s = s.trim();
        let invalid = || PeriodParseError::InvalidFormat(s.to_string());

        match s.to_lowercase().as_str() {
            "current" | "this" | "now" => {
                return Ok(Self::containing(BudgetCadence::Monthly, today))
            }
            "last" | "previous" | "prev" => {
                return Ok(Self::containing(BudgetCadence::Monthly, today).prev())
            }
            _ => {}
        }

        if let Some((start, end)) = s.split_once("..") {
            let start = NaiveDate::parse_from_str(start.trim(), "%Y-%m-%d").map_err(|_| invalid())?;
            let end = NaiveDate::parse_from_str(end.trim(), "%Y-%m-%d").map_err(|_| invalid())?;
            check_year(start.year())?;
            check_year(end.year())?;
            if end < start {
                return Err(PeriodParseError::ReversedRange { start, end });
            }
            return Ok(Self::Custom { start, end });
        }

        if let Some((year, week)) = s.split_once("-W").or_else(|| s.split_once("-w")) {
            let year = check_year(year.parse().map_err(|_| invalid())?)?;
            let week: u32 = week.parse().map_err(|_| invalid())?;
            if week == 0 || week > iso_weeks_in_year(year) {
                return Err(PeriodParseError::InvalidWeek(week));
            }
            return Ok(Self::Weekly { year, week });
        }

        match s.split_once('-') {
            Some((year, month)) => {
                let year = check_year(year.parse().map_err(|_| invalid())?)?;
                let month: u32 = month.parse().map_err(|_| invalid())?;
                if !(1..=12).contains(&month) {
                    return Err(PeriodParseError::InvalidMonth(month));
                }
                Ok(Self::Monthly { year, month })
            }
            None if s.len() == 4 => {
                let year = check_year(s.parse().map_err(|_| invalid())?)?;
                Ok(Self::Yearly { year })
            }
            None => Err(invalid()),
        }
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Monthly { year, month } => write!(f, "{:04}-{:02}", year, month),
            Self::Weekly { year, week } => write!(f, "{:04}-W{:02}", year, week),
            Self::Yearly { year } => write!(f, "{:04}", year),
            Self::Custom { start, end } => write!(
                f,
                "{}..{}",
                start.format("%Y-%m-%d"),
                end.format("%Y-%m-%d")
            ),
        }
    }
}

/// Error type for period parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
    InvalidWeek(u32),
    YearOutOfRange(i32),
    ReversedRange { start: NaiveDate, end: NaiveDate },
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(s) => write!(f, "Invalid period format: {}", s),
            Self::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
            Self::InvalidWeek(w) => write!(f, "Invalid ISO week: {}", w),
            Self::YearOutOfRange(y) => {
                write!(f, "Year {} is out of range ({}-{})", y, MIN_YEAR, MAX_YEAR)
            }
            Self::ReversedRange { start, end } => {
                write!(f, "Range ends ({}) before it starts ({})", end, start)
            }
        }
    }
}

impl std::error::Error for PeriodParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_monthly_bounds() {
        let march = ReportPeriod::monthly(2024, 3);
        assert_eq!(march.start_date(), date(2024, 3, 1));
        assert_eq!(march.end_date(), date(2024, 3, 31));

        let feb = ReportPeriod::monthly(2024, 2);
        assert_eq!(feb.end_date(), date(2024, 2, 29));
        assert_eq!(feb.days(), 29);

        let dec = ReportPeriod::monthly(2023, 12);
        assert_eq!(dec.end_date(), date(2023, 12, 31));
    }

    #[test]
    fn test_monthly_navigation() {
        assert_eq!(ReportPeriod::monthly(2024, 1).prev(), ReportPeriod::monthly(2023, 12));
        assert_eq!(ReportPeriod::monthly(2024, 12).next(), ReportPeriod::monthly(2025, 1));
        assert_eq!(ReportPeriod::monthly(2024, 3).prev(), ReportPeriod::monthly(2024, 2));
    }

    #[test]
    fn test_weekly_bounds() {
        // ISO week 1 of 2025 starts on Monday 2024-12-30
        let w1 = ReportPeriod::weekly(2025, 1);
        assert_eq!(w1.start_date(), date(2024, 12, 30));
        assert_eq!(w1.end_date(), date(2025, 1, 5));
        assert_eq!(w1.prev(), ReportPeriod::weekly(2024, 52));
    }

    #[test]
    fn test_yearly_and_custom() {
        let y = ReportPeriod::yearly(2024);
        assert_eq!(y.start_date(), date(2024, 1, 1));
        assert_eq!(y.end_date(), date(2024, 12, 31));

        let c = ReportPeriod::custom(date(2024, 3, 10), date(2024, 3, 1));
        assert_eq!(c.start_date(), date(2024, 3, 1));
        assert_eq!(c.prev(), ReportPeriod::custom(date(2024, 2, 20), date(2024, 2, 29)));
    }

    #[test]
    fn test_contains_is_inclusive() {
        let march = ReportPeriod::monthly(2024, 3);
        assert!(march.contains(date(2024, 3, 1)));
        assert!(march.contains(date(2024, 3, 31)));
        assert!(!march.contains(date(2024, 2, 29)));
        assert!(!march.contains(date(2024, 4, 1)));
    }

    #[test]
    fn test_containing() {
        let d = date(2024, 3, 13);
        assert_eq!(
            ReportPeriod::containing(BudgetCadence::Monthly, d),
            ReportPeriod::monthly(2024, 3)
        );
        assert_eq!(
            ReportPeriod::containing(BudgetCadence::Weekly, d),
            ReportPeriod::weekly(2024, 11)
        );
        assert_eq!(
            ReportPeriod::containing(BudgetCadence::Yearly, d),
            ReportPeriod::yearly(2024)
        );
    }

    #[test]
    fn test_parse_formats() {
        let today = date(2024, 3, 15);
        assert_eq!(
            ReportPeriod::parse_relative("2024-03", today).unwrap(),
            ReportPeriod::monthly(2024, 3)
        );
        assert_eq!(
            ReportPeriod::parse_relative("2024-W10", today).unwrap(),
            ReportPeriod::weekly(2024, 10)
        );
        assert_eq!(
            ReportPeriod::parse_relative("2024", today).unwrap(),
            ReportPeriod::yearly(2024)
        );
        assert_eq!(
            ReportPeriod::parse_relative("2024-03-01..2024-03-15", today).unwrap(),
            ReportPeriod::custom(date(2024, 3, 1), date(2024, 3, 15))
        );
        assert_eq!(
            ReportPeriod::parse_relative("current", today).unwrap(),
            ReportPeriod::monthly(2024, 3)
        );
        assert_eq!(
            ReportPeriod::parse_relative("last", today).unwrap(),
            ReportPeriod::monthly(2024, 2)
        );
    }

    #[test]
    fn test_parse_errors() {
        let today = date(2024, 3, 15);
        assert_eq!(
            ReportPeriod::parse_relative("2024-13", today),
            Err(PeriodParseError::InvalidMonth(13))
        );
        assert_eq!(
            ReportPeriod::parse_relative("2024-W60", today),
            Err(PeriodParseError::InvalidWeek(60))
        );
        assert!(matches!(
            ReportPeriod::parse_relative("2024-03-15..2024-03-01", today),
            Err(PeriodParseError::ReversedRange { .. })
        ));
        assert!(ReportPeriod::parse_relative("March", today).is_err());
    }

    #[test]
    fn test_parse_rejects_unrepresentable_years() {
        let today = date(2024, 3, 15);
        assert_eq!(
            ReportPeriod::parse_relative("999999-03", today),
            Err(PeriodParseError::YearOutOfRange(999999))
        );
        assert_eq!(
            ReportPeriod::parse_relative("0-W01", today),
            Err(PeriodParseError::YearOutOfRange(0))
        );
        assert!(matches!(
            ReportPeriod::parse_relative("-262143-01-01..-262143-01-05", today),
            Err(PeriodParseError::YearOutOfRange(_)) | Err(PeriodParseError::InvalidFormat(_))
        ));
        assert!(ReportPeriod::parse_relative("9999-12", today).is_ok());
    }

    #[test]
    fn test_windows_stay_ordered_at_chrono_limits() {
        let max_year = NaiveDate::MAX.year();
        for period in [
            ReportPeriod::monthly(max_year, 12),
            ReportPeriod::yearly(max_year),
            ReportPeriod::monthly(i32::MAX, 6),
            ReportPeriod::yearly(i32::MIN),
        ] {
            assert!(period.start_date() <= period.end_date(), "{:?}", period);
        }
    }

    #[test]
    fn test_navigation_saturates_at_chrono_limits() {
        let first = ReportPeriod::custom(NaiveDate::MIN, NaiveDate::MIN + Duration::days(4));
        let before = first.prev();
        assert_eq!(before.start_date(), NaiveDate::MIN);
        assert_eq!(before.end_date(), NaiveDate::MIN);

        let last = ReportPeriod::custom(NaiveDate::MAX - Duration::days(4), NaiveDate::MAX);
        let after = last.next();
        assert_eq!(after.start_date(), NaiveDate::MAX);
        assert_eq!(after.end_date(), NaiveDate::MAX);

        assert_eq!(
            ReportPeriod::yearly(i32::MAX).next(),
            ReportPeriod::yearly(i32::MAX)
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(ReportPeriod::monthly(2024, 3).to_string(), "2024-03");
        assert_eq!(ReportPeriod::weekly(2024, 3).to_string(), "2024-W03");
        assert_eq!(ReportPeriod::yearly(2024).to_string(), "2024");
    }

    #[test]
    fn test_cadence_parse() {
        assert_eq!(BudgetCadence::parse("Monthly"), Some(BudgetCadence::Monthly));
        assert_eq!(BudgetCadence::parse("annual"), Some(BudgetCadence::Yearly));
        assert_eq!(BudgetCadence::parse("daily"), None);
    }
}
