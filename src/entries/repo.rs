use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use time::Date;
use uuid::Uuid;

use super::repo_types::{FoodEntry, FoodEntryRow, NewFoodEntry};
use crate::db::StoreError;
use crate::scoring::FoodAnalysis;

/// Food entries keyed by owner. Lookups by id only match entries owned by `user_id`.
#[async_trait]
pub trait EntryStore: Send + Sync {
    async fn list(&self, user_id: Uuid, date: Date) -> Result<Vec<FoodEntry>, StoreError>;
    async fn get(&self, user_id: Uuid, id: Uuid) -> Result<Option<FoodEntry>, StoreError>;
    async fn count(&self, user_id: Uuid, date: Date) -> Result<usize, StoreError>;
    async fn insert(&self, entry: NewFoodEntry) -> Result<FoodEntry, StoreError>;
    async fn update_text(
        &self,
        user_id: Uuid,
        id: Uuid,
        food_text: &str,
        analysis: &FoodAnalysis,
    ) -> Result<Option<FoodEntry>, StoreError>;
    /// Removes the entry and returns the date it was logged for.
    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<Option<Date>, StoreError>;
}

#[derive(Clone)]
pub struct PgEntryStore {
    db: PgPool,
}

impl PgEntryStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

const ENTRY_COLUMNS: &str = "id, user_id, entry_date, meal_time, meal_type, food_text, \
                             llm_analysis, created_at, updated_at";

#[async_trait]
impl EntryStore for PgEntryStore {
    async fn list(&self, user_id: Uuid, date: Date) -> Result<Vec<FoodEntry>, StoreError> {
        let rows = sqlx::query_as::<_, FoodEntryRow>(&format!(
            r#"
            SELECT {ENTRY_COLUMNS}
              FROM food_entries
             WHERE user_id = $1 AND entry_date = $2
             ORDER BY meal_time ASC NULLS LAST, created_at ASC
            "#
        ))
        .bind(user_id)
        .bind(date)
        .fetch_all(&self.db)
        .await?;
        rows.into_iter().map(FoodEntry::try_from).collect()
    }

    async fn get(&self, user_id: Uuid, id: Uuid) -> Result<Option<FoodEntry>, StoreError> {
        let row = sqlx::query_as::<_, FoodEntryRow>(&format!(
            r#"
            SELECT {ENTRY_COLUMNS}
              FROM food_entries
             WHERE id = $1 AND user_id = $2
            "#
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;
        row.map(FoodEntry::try_from).transpose()
    }

    async fn count(&self, user_id: Uuid, date: Date) -> Result<usize, StoreError> {
        let n: i64 = sqlx::query_scalar(
            r#"SELECT COUNT(*) FROM food_entries WHERE user_id = $1 AND entry_date = $2"#,
        )
        .bind(user_id)
        .bind(date)
        .fetch_one(&self.db)
        .await?;
        Ok(usize::try_from(n).unwrap_or(0))
    }

    async fn insert(&self, entry: NewFoodEntry) -> Result<FoodEntry, StoreError> {
        let row = sqlx::query_as::<_, FoodEntryRow>(&format!(
            r#"
            INSERT INTO food_entries (id, user_id, entry_date, meal_time, meal_type, food_text, llm_analysis)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {ENTRY_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(entry.user_id)
        .bind(entry.date)
        .bind(entry.time)
        .bind(entry.meal_type.as_str())
        .bind(entry.food_text)
        .bind(Json(entry.analysis))
        .fetch_one(&self.db)
        .await?;
        FoodEntry::try_from(row)
    }

    async fn update_text(
        &self,
        user_id: Uuid,
        id: Uuid,
        food_text: &str,
        analysis: &FoodAnalysis,
    ) -> Result<Option<FoodEntry>, StoreError> {
        let row = sqlx::query_as::<_, FoodEntryRow>(&format!(
            r#"
            UPDATE food_entries
               SET food_text = $3, llm_analysis = $4, updated_at = now()
             WHERE id = $1 AND user_id = $2
            RETURNING {ENTRY_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(user_id)
        .bind(food_text)
        .bind(Json(analysis))
        .fetch_optional(&self.db)
        .await?;
        row.map(FoodEntry::try_from).transpose()
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<Option<Date>, StoreError> {
        let date = sqlx::query_scalar::<_, Date>(
            r#"
            DELETE FROM food_entries
             WHERE id = $1 AND user_id = $2
            RETURNING entry_date
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;
        Ok(date)
    }
}
