use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use time::Date;
use uuid::Uuid;

use crate::db::StoreError;

/// Last generated tips per (user, day).
#[async_trait]
pub trait TipStore: Send + Sync {
    async fn upsert(&self, user_id: Uuid, date: Date, tips: &[String]) -> Result<(), StoreError>;
    async fn get(&self, user_id: Uuid, date: Date) -> Result<Option<Vec<String>>, StoreError>;
}

#[derive(Clone)]
pub struct PgTipStore {
    db: PgPool,
}

impl PgTipStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TipStore for PgTipStore {
    async fn upsert(&self, user_id: Uuid, date: Date, tips: &[String]) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO tips_log (user_id, tip_date, tips)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, tip_date) DO UPDATE SET
                tips       = EXCLUDED.tips,
                created_at = now()
            "#,
        )
        .bind(user_id)
        .bind(date)
        .bind(Json(tips))
        .execute(&self.db)
        .await?;
        Ok(())
    }

    async fn get(&self, user_id: Uuid, date: Date) -> Result<Option<Vec<String>>, StoreError> {
        let tips = sqlx::query_scalar::<_, Json<Vec<String>>>(
            r#"SELECT tips FROM tips_log WHERE user_id = $1 AND tip_date = $2"#,
        )
        .bind(user_id)
        .bind(date)
        .fetch_optional(&self.db)
        .await?;
        Ok(tips.map(|t| t.0))
    }
}
