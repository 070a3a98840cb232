use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::{Date, Month};

use super::trend::{CalendarDay, WeeklyTrend};
use crate::scoring::{GutScores, SummaryStatus};

#[derive(Debug, Deserialize)]
pub struct DailySummaryQuery {
    pub date: Date,
}

#[derive(Debug, Deserialize)]
pub struct WeeklySummaryQuery {
    pub start: Date,
}

#[derive(Debug, Deserialize)]
pub struct CalendarSummaryQuery {
    pub month: String,
}

#[derive(Debug, Serialize)]
pub struct DailyStats {
    pub fiber_grams: i32,
    pub fiber_score: i32,
    pub diversity_score: i32,
    pub processed_score: i32,
    pub probiotic_score: i32,
    pub digestive_score: i32,
}

impl From<&GutScores> for DailyStats {
    fn from(s: &GutScores) -> Self {
        Self {
            fiber_grams: s.fiber_grams,
            fiber_score: s.fiber_score,
            diversity_score: s.diversity_score,
            processed_score: s.processed_score,
            probiotic_score: s.probiotic_score,
            digestive_score: s.digestive_score,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DailySummaryResponse {
    pub date: Date,
    pub gut_score: i32,
    pub stats: DailyStats,
    pub status: SummaryStatus,
    pub entry_count: usize,
}

/// `end` is exclusive.
#[derive(Debug, Serialize)]
pub struct WeeklySummaryResponse {
    pub start: Date,
    pub end: Date,
    #[serde(flatten)]
    pub trend: WeeklyTrend,
}

#[derive(Debug, Serialize)]
pub struct CalendarSummaryResponse {
    pub month: YearMonth,
    pub days: Vec<CalendarDay>,
}

/// A `YYYY-MM` calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearMonth {
    pub year: i32,
    pub month: Month,
}

impl YearMonth {
    /// First day of this month and first day of the next one.
    pub fn bounds(&self) -> Result<(Date, Date), String> {
        let first = Date::from_calendar_date(self.year, self.month, 1)
            .map_err(|e| format!("invalid month {self}: {e}"))?;
        let (year, month) = match self.month {
            Month::December => (self.year + 1, Month::January),
            m => (self.year, m.next()),
        };
        let next = Date::from_calendar_date(year, month, 1)
            .map_err(|e| format!("invalid month {self}: {e}"))?;
        Ok((first, next))
    }
}

impl FromStr for YearMonth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || format!("month must look like YYYY-MM, got {s:?}");
        let (y, m) = s.split_once('-').ok_or_else(bad)?;
        if y.len() != 4 || m.len() != 2 || !(y.bytes().chain(m.bytes()).all(|b| b.is_ascii_digit())) {
            return Err(bad());
        }
        let year: i32 = y.parse().map_err(|_| bad())?;
        let month: u8 = m.parse().map_err(|_| bad())?;
        let month = Month::try_from(month).map_err(|_| bad())?;
        Ok(Self { year, month })
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, u8::from(self.month))
    }
}

impl Serialize for YearMonth {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn parses_and_prints_year_month() {
        let m: YearMonth = "2024-02".parse().unwrap();
        assert_eq!(m, YearMonth { year: 2024, month: Month::February });
        assert_eq!(m.to_string(), "2024-02");
    }

    #[test]
    fn rejects_malformed_months() {
        for bad in ["2024-13", "2024-00", "2024-2", "24-02", "2024/02", "", "2024-+1"] {
            assert!(bad.parse::<YearMonth>().is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn december_rolls_into_the_next_year() {
        let m: YearMonth = "2023-12".parse().unwrap();
        assert_eq!(m.bounds().unwrap(), (date!(2023 - 12 - 01), date!(2024 - 01 - 01)));
        let feb: YearMonth = "2024-02".parse().unwrap();
        assert_eq!(feb.bounds().unwrap(), (date!(2024 - 02 - 01), date!(2024 - 03 - 01)));
    }
}
