use std::sync::Arc;

use anyhow::Context;

use crate::config::AppConfig;
use crate::db;
use crate::entries::{EntryStore, PgEntryStore};
use crate::llm::{ChatClient, FoodParser, LlmFoodParser, LlmTipGenerator, TipGenerator};
use crate::summaries::{PgSummaryStore, SummaryAggregator, SummaryStore};
use crate::tips::{PgTipStore, TipStore};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub entries: Arc<dyn EntryStore>,
    pub summaries: Arc<dyn SummaryStore>,
    pub tips: Arc<dyn TipStore>,
    pub parser: Arc<dyn FoodParser>,
    pub tip_generator: Arc<dyn TipGenerator>,
    pub aggregator: Arc<SummaryAggregator>,
}

/// Store and model collaborators handed to [`AppState::from_parts`].
pub struct Collaborators {
    pub entries: Arc<dyn EntryStore>,
    pub summaries: Arc<dyn SummaryStore>,
    pub tips: Arc<dyn TipStore>,
    pub parser: Arc<dyn FoodParser>,
    pub tip_generator: Arc<dyn TipGenerator>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env().context("load configuration")?);

        let pool = db::connect(&config).await?;
        db::migrate(&pool).await?;

        let chat = ChatClient::from_config(&config.llm).context("build language model client")?;
        if chat.is_none() {
            tracing::warn!("LLM_API_KEY not set; meal parsing and tips use offline fallbacks");
        }

        Ok(Self::from_parts(
            config,
            Collaborators {
                entries: Arc::new(PgEntryStore::new(pool.clone())),
                summaries: Arc::new(PgSummaryStore::new(pool.clone())),
                tips: Arc::new(PgTipStore::new(pool)),
                parser: Arc::new(LlmFoodParser::new(chat.clone())),
                tip_generator: Arc::new(LlmTipGenerator::new(chat)),
            },
        ))
    }

    pub fn from_parts(config: Arc<AppConfig>, parts: Collaborators) -> Self {
        let aggregator = Arc::new(SummaryAggregator::new(
            parts.entries.clone(),
            parts.summaries.clone(),
            &config.scoring,
        ));
        Self {
            config,
            entries: parts.entries,
            summaries: parts.summaries,
            tips: parts.tips,
            parser: parts.parser,
            tip_generator: parts.tip_generator,
            aggregator,
        }
    }
}
