use serde::Serialize;
use sqlx::FromRow;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::db::StoreError;
use crate::scoring::{GutScores, SummaryStatus};

/// Raw `daily_gut_summary` row.
#[derive(Debug, FromRow)]
pub struct DailySummaryRow {
    pub user_id: Uuid,
    pub summary_date: Date,
    pub fiber_grams: i32,
    pub fiber_score: i32,
    pub diversity_score: i32,
    pub processed_score: i32,
    pub probiotic_score: i32,
    pub digestive_score: i32,
    pub gut_score: i32,
    pub status: String,
    pub updated_at: OffsetDateTime,
}

/// Derived per-day aggregate, at most one per (user, date). Always written in full.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    pub user_id: Uuid,
    pub date: Date,
    #[serde(flatten)]
    pub scores: GutScores,
    pub status: SummaryStatus,
    pub updated_at: OffsetDateTime,
}

impl DailySummary {
    /// The all-zero partial summary of a day with nothing logged.
    pub fn baseline(user_id: Uuid, date: Date) -> Self {
        Self {
            user_id,
            date,
            scores: GutScores::default(),
            status: SummaryStatus::Partial,
            updated_at: OffsetDateTime::now_utc(),
        }
    }
}

impl TryFrom<DailySummaryRow> for DailySummary {
    type Error = StoreError;

    fn try_from(r: DailySummaryRow) -> Result<Self, Self::Error> {
        let status = r
            .status
            .parse()
            .map_err(|e: String| StoreError::Corrupt(format!("summary {}: {e}", r.summary_date)))?;
        Ok(Self {
            user_id: r.user_id,
            date: r.summary_date,
            scores: GutScores {
                fiber_grams: r.fiber_grams,
                fiber_score: r.fiber_score,
                diversity_score: r.diversity_score,
                processed_score: r.processed_score,
                probiotic_score: r.probiotic_score,
                digestive_score: r.digestive_score,
                gut_score: r.gut_score,
            },
            status,
            updated_at: r.updated_at,
        })
    }
}
