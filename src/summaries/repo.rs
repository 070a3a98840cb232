use async_trait::async_trait;
use sqlx::PgPool;
use time::Date;
use uuid::Uuid;

use super::repo_types::{DailySummary, DailySummaryRow};
use crate::db::StoreError;

#[async_trait]
pub trait SummaryStore: Send + Sync {
    /// Inserts or fully overwrites the summary for `(user_id, date)`.
    async fn upsert(&self, summary: &DailySummary) -> Result<(), StoreError>;
    async fn get(&self, user_id: Uuid, date: Date) -> Result<Option<DailySummary>, StoreError>;
    /// Summaries with `start <= date < end`, ascending by date.
    async fn range(
        &self,
        user_id: Uuid,
        start: Date,
        end: Date,
    ) -> Result<Vec<DailySummary>, StoreError>;
}

#[derive(Clone)]
pub struct PgSummaryStore {
    db: PgPool,
}

impl PgSummaryStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

const SUMMARY_COLUMNS: &str = "user_id, summary_date, fiber_grams, fiber_score, diversity_score, \
                               processed_score, probiotic_score, digestive_score, gut_score, \
                               status, updated_at";

#[async_trait]
impl SummaryStore for PgSummaryStore {
    async fn upsert(&self, summary: &DailySummary) -> Result<(), StoreError> {
        let s = &summary.scores;
        sqlx::query(
            r#"
            INSERT INTO daily_gut_summary (
                user_id, summary_date, fiber_grams, fiber_score, diversity_score,
                processed_score, probiotic_score, digestive_score, gut_score, status, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (user_id, summary_date) DO UPDATE SET
                fiber_grams     = EXCLUDED.fiber_grams,
                fiber_score     = EXCLUDED.fiber_score,
                diversity_score = EXCLUDED.diversity_score,
                processed_score = EXCLUDED.processed_score,
                probiotic_score = EXCLUDED.probiotic_score,
                digestive_score = EXCLUDED.digestive_score,
                gut_score       = EXCLUDED.gut_score,
                status          = EXCLUDED.status,
                updated_at      = EXCLUDED.updated_at
            "#,
        )
        .bind(summary.user_id)
        .bind(summary.date)
        .bind(s.fiber_grams)
        .bind(s.fiber_score)
        .bind(s.diversity_score)
        .bind(s.processed_score)
        .bind(s.probiotic_score)
        .bind(s.digestive_score)
        .bind(s.gut_score)
        .bind(summary.status.as_str())
        .bind(summary.updated_at)
        .execute(&self.db)
        .await?;
        Ok(())
    }

    async fn get(&self, user_id: Uuid, date: Date) -> Result<Option<DailySummary>, StoreError> {
        let row = sqlx::query_as::<_, DailySummaryRow>(&format!(
            r#"
            SELECT {SUMMARY_COLUMNS}
              FROM daily_gut_summary
             WHERE user_id = $1 AND summary_date = $2
            "#
        ))
        .bind(user_id)
        .bind(date)
        .fetch_optional(&self.db)
        .await?;
        row.map(DailySummary::try_from).transpose()
    }

    async fn range(
        &self,
        user_id: Uuid,
        start: Date,
        end: Date,
    ) -> Result<Vec<DailySummary>, StoreError> {
        let rows = sqlx::query_as::<_, DailySummaryRow>(&format!(
            r#"
            SELECT {SUMMARY_COLUMNS}
              FROM daily_gut_summary
             WHERE user_id = $1 AND summary_date >= $2 AND summary_date < $3
             ORDER BY summary_date ASC
            "#
        ))
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.db)
        .await?;
        rows.into_iter().map(DailySummary::try_from).collect()
    }
}
