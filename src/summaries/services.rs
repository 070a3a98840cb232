use std::sync::Arc;
use std::time::Duration;

use time::{Date, OffsetDateTime};
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use super::dto::YearMonth;
use super::locks::DayLocks;
use super::repo::SummaryStore;
use super::repo_types::DailySummary;
use super::trend::{calendar_days, weekly_trend, CalendarDay, WeeklyTrend};
use crate::config::ScoringConfig;
use crate::db::StoreError;
use crate::entries::EntryStore;
use crate::error::AppError;
use crate::scoring::{ScoringEngine, StatusPolicy, SummaryStatus};
use crate::state::AppState;

const DEFAULT_MAX_ATTEMPTS: u32 = 3;
const DEFAULT_BACKOFF: Duration = Duration::from_millis(50);

#[derive(Debug, thiserror::Error)]
pub enum RecomputeError {
    #[error("summary store temporarily unavailable")]
    Transient(#[source] StoreError),
    #[error("summary recompute failed")]
    Permanent(#[source] StoreError),
}

impl From<StoreError> for RecomputeError {
    fn from(e: StoreError) -> Self {
        if e.is_transient() {
            RecomputeError::Transient(e)
        } else {
            RecomputeError::Permanent(e)
        }
    }
}

/// Outcome of a successful recompute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recomputed {
    pub gut_score: i32,
    pub status: SummaryStatus,
    pub entry_count: usize,
}

/// Rebuilds a day's summary from its full entry set.
///
/// Every run reads all entries for the day and overwrites the whole summary row,
/// so repeating a run is harmless. Transient store failures are retried with a
/// linear backoff. Runs for the same (user, day) inside this process are
/// serialized; runs in other processes race and the last upsert wins.
pub struct SummaryAggregator {
    entries: Arc<dyn EntryStore>,
    summaries: Arc<dyn SummaryStore>,
    engine: ScoringEngine,
    policy: StatusPolicy,
    locks: DayLocks,
    max_attempts: u32,
    backoff: Duration,
}

impl SummaryAggregator {
    pub fn new(
        entries: Arc<dyn EntryStore>,
        summaries: Arc<dyn SummaryStore>,
        config: &ScoringConfig,
    ) -> Self {
        Self {
            entries,
            summaries,
            engine: ScoringEngine::new(config.clone()),
            policy: StatusPolicy::new(config.final_status_min_entries),
            locks: DayLocks::default(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff: DEFAULT_BACKOFF,
        }
    }

    pub fn with_retry(mut self, max_attempts: u32, backoff: Duration) -> Self {
        self.max_attempts = max_attempts.max(1);
        self.backoff = backoff;
        self
    }

    pub fn policy(&self) -> StatusPolicy {
        self.policy
    }

    #[instrument(skip(self))]
    pub async fn recompute(&self, user_id: Uuid, date: Date) -> Result<Recomputed, RecomputeError> {
        let mut attempt = 1;
        loop {
            match self.recompute_once(user_id, date).await {
                Ok(done) => return Ok(done),
                Err(RecomputeError::Transient(e)) if attempt < self.max_attempts => {
                    warn!(error = %e, attempt, "transient failure recomputing summary; retrying");
                    tokio::time::sleep(self.backoff * attempt).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn recompute_once(&self, user_id: Uuid, date: Date) -> Result<Recomputed, RecomputeError> {
        let _guard = self.locks.lock((user_id, date)).await;

        let entries = self.entries.list(user_id, date).await?;
        let scores = self
            .engine
            .compute_scores(entries.iter().map(|e| &e.analysis));
        let status = self.policy.status(entries.len());

        self.summaries
            .upsert(&DailySummary {
                user_id,
                date,
                scores,
                status,
                updated_at: OffsetDateTime::now_utc(),
            })
            .await?;

        debug!(gut_score = scores.gut_score, %status, entries = entries.len(), "summary recomputed");
        Ok(Recomputed {
            gut_score: scores.gut_score,
            status,
            entry_count: entries.len(),
        })
    }
}

/// A stored (or baseline) summary with its status re-derived from the live entry count.
#[derive(Debug, Clone)]
pub struct DailyView {
    pub summary: DailySummary,
    pub entry_count: usize,
}

pub async fn daily_summary(
    state: &AppState,
    user_id: Uuid,
    date: Date,
) -> Result<DailyView, AppError> {
    let stored = state.summaries.get(user_id, date).await?;
    let entry_count = state.entries.count(user_id, date).await?;

    let mut summary = stored.unwrap_or_else(|| DailySummary::baseline(user_id, date));
    summary.status = state.aggregator.policy().status(entry_count);
    Ok(DailyView {
        summary,
        entry_count,
    })
}

/// Trend over the seven days `[start, start + 7)`. Returns the exclusive end with it.
pub async fn weekly_summary(
    state: &AppState,
    user_id: Uuid,
    start: Date,
) -> Result<(Date, WeeklyTrend), AppError> {
    let end = start
        .checked_add(time::Duration::days(7))
        .ok_or_else(|| AppError::BadRequest("start date out of range".into()))?;
    let days = state.summaries.range(user_id, start, end).await?;
    Ok((end, weekly_trend(&days)))
}

pub async fn calendar_summary(
    state: &AppState,
    user_id: Uuid,
    month: YearMonth,
) -> Result<Vec<CalendarDay>, AppError> {
    let (first, next) = month.bounds().map_err(AppError::BadRequest)?;
    let days = state.summaries.range(user_id, first, next).await?;
    Ok(calendar_days(&days))
}
