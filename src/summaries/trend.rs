//! Week/month views derived from persisted daily summaries.

use serde::Serialize;
use time::Date;

use super::repo_types::DailySummary;

/// Half-over-half mean change (in score points) needed to call a direction.
const TREND_THRESHOLD: i64 = 5;
/// Series shorter than this are always stable.
const MIN_TREND_POINTS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Declining,
    Stable,
}

/// Compares the mean of the second half of `series` with the first half.
/// An odd middle element belongs to the second half.
pub fn classify_trend(series: &[i32]) -> Trend {
    if series.len() < MIN_TREND_POINTS {
        return Trend::Stable;
    }
    let (first, second) = series.split_at(series.len() / 2);
    let (s1, n1) = (sum(first), first.len() as i64);
    let (s2, n2) = (sum(second), second.len() as i64);

    // s2/n2 - s1/n1 compared against the threshold without dividing
    let scaled_diff = s2 * n1 - s1 * n2;
    let scaled_threshold = TREND_THRESHOLD * n1 * n2;
    if scaled_diff > scaled_threshold {
        Trend::Improving
    } else if scaled_diff < -scaled_threshold {
        Trend::Declining
    } else {
        Trend::Stable
    }
}

fn sum(values: &[i32]) -> i64 {
    values.iter().map(|v| i64::from(*v)).sum()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyTrend {
    pub days: usize,
    pub average_gut_score: i32,
    pub best_day: Option<Date>,
    pub worst_day: Option<Date>,
    pub fiber_trend: Trend,
    pub processed_trend: Trend,
    pub overall_trend: Trend,
}

impl WeeklyTrend {
    fn empty() -> Self {
        Self {
            days: 0,
            average_gut_score: 0,
            best_day: None,
            worst_day: None,
            fiber_trend: Trend::Stable,
            processed_trend: Trend::Stable,
            overall_trend: Trend::Stable,
        }
    }
}

/// Aggregates summaries given in date order. Ties for best/worst go to the earlier entry.
pub fn weekly_trend(summaries: &[DailySummary]) -> WeeklyTrend {
    let Some(first) = summaries.first() else {
        return WeeklyTrend::empty();
    };

    let mut best = first;
    let mut worst = first;
    for s in &summaries[1..] {
        if s.scores.gut_score > best.scores.gut_score {
            best = s;
        }
        if s.scores.gut_score < worst.scores.gut_score {
            worst = s;
        }
    }

    let gut: Vec<i32> = summaries.iter().map(|s| s.scores.gut_score).collect();
    let fiber: Vec<i32> = summaries.iter().map(|s| s.scores.fiber_score).collect();
    let processed: Vec<i32> = summaries.iter().map(|s| s.scores.processed_score).collect();

    WeeklyTrend {
        days: summaries.len(),
        average_gut_score: (sum(&gut) / gut.len() as i64) as i32,
        best_day: Some(best.date),
        worst_day: Some(worst.date),
        fiber_trend: classify_trend(&fiber),
        processed_trend: classify_trend(&processed),
        overall_trend: classify_trend(&gut),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    pub date: Date,
    pub gut_score: i32,
}

/// One point per persisted day; days without a summary are absent, not zero-filled.
pub fn calendar_days(summaries: &[DailySummary]) -> Vec<CalendarDay> {
    summaries
        .iter()
        .map(|s| CalendarDay {
            date: s.date,
            gut_score: s.scores.gut_score,
        })
        .collect()
}
