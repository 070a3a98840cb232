use std::str::FromStr;
use std::time::Duration;

/// Startup configuration failure. Always fatal.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),
    #[error("gut score weights must sum to 1.0 (got {0})")]
    WeightSum(f64),
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub audience: String,
    pub issuer: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

/// Gut-score weights held as basis points (1/10000) so the weighted sum is exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreWeights {
    pub fiber: u32,
    pub diversity: u32,
    pub processed: u32,
    pub probiotic: u32,
    pub digestive: u32,
}

impl ScoreWeights {
    pub const BASIS: u32 = 10_000;
    const SUM_TOLERANCE: f64 = 1e-6;

    pub fn from_fractions(
        fiber: f64,
        diversity: f64,
        processed: f64,
        probiotic: f64,
        digestive: f64,
    ) -> Result<Self, ConfigError> {
        let named = [
            ("WEIGHT_FIBER", fiber),
            ("WEIGHT_DIVERSITY", diversity),
            ("WEIGHT_PROCESSED", processed),
            ("WEIGHT_PROBIOTIC", probiotic),
            ("WEIGHT_DIGESTIVE", digestive),
        ];
        for (key, w) in named {
            if !w.is_finite() || w < 0.0 {
                return Err(ConfigError::Invalid { key, value: w.to_string() });
            }
        }

        let sum: f64 = named.iter().map(|(_, w)| w).sum();
        if (sum - 1.0).abs() > Self::SUM_TOLERANCE {
            return Err(ConfigError::WeightSum(sum));
        }

        let bp = |w: f64| (w * f64::from(Self::BASIS)).round() as u32;
        let weights = Self {
            fiber: bp(fiber),
            diversity: bp(diversity),
            processed: bp(processed),
            probiotic: bp(probiotic),
            digestive: bp(digestive),
        };
        // weights finer than 1/10000 can round away from an exact total
        if weights.total() != Self::BASIS {
            return Err(ConfigError::WeightSum(sum));
        }
        Ok(weights)
    }

    pub fn total(&self) -> u32 {
        self.fiber + self.diversity + self.processed + self.probiotic + self.digestive
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            fiber: 2_500,
            diversity: 2_500,
            processed: 2_000,
            probiotic: 1_500,
            digestive: 1_500,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScoringConfig {
    pub target_fiber_grams: f64,
    pub diversity_points_per_category: u32,
    pub probiotic_points_per_serving: u32,
    pub weights: ScoreWeights,
    pub final_status_min_entries: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            target_fiber_grams: 30.0,
            diversity_points_per_category: 15,
            probiotic_points_per_serving: 40,
            weights: ScoreWeights::default(),
            final_status_min_entries: 3,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub jwt: JwtConfig,
    pub llm: LlmConfig,
    pub scoring: ScoringConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = required(&lookup, "DATABASE_URL")?;
        let database_max_connections = parsed_or(&lookup, "DATABASE_MAX_CONNECTIONS", 10u32)?;

        let jwt = JwtConfig {
            secret: required(&lookup, "JWT_SECRET")?,
            audience: lookup("JWT_AUDIENCE").unwrap_or_else(|| "authenticated".into()),
            issuer: lookup("JWT_ISSUER").filter(|v| !v.trim().is_empty()),
        };

        let llm = LlmConfig {
            api_key: lookup("LLM_API_KEY").filter(|v| !v.trim().is_empty()),
            base_url: lookup("LLM_BASE_URL")
                .unwrap_or_else(|| "https://api.openai.com/v1".into())
                .trim_end_matches('/')
                .to_string(),
            model: lookup("LLM_MODEL").unwrap_or_else(|| "gpt-4o-mini".into()),
            timeout: Duration::from_secs(parsed_or(&lookup, "LLM_TIMEOUT_SECS", 20u64)?),
        };

        let defaults = ScoringConfig::default();
        let target_fiber_grams =
            parsed_or(&lookup, "TARGET_FIBER_GRAMS", defaults.target_fiber_grams)?;
        if !target_fiber_grams.is_finite() || target_fiber_grams <= 0.0 {
            return Err(ConfigError::NotPositive("TARGET_FIBER_GRAMS"));
        }

        // an empty day must stay partial
        let final_status_min_entries = parsed_or(
            &lookup,
            "FINAL_STATUS_MIN_ENTRIES",
            defaults.final_status_min_entries,
        )?;
        if final_status_min_entries == 0 {
            return Err(ConfigError::NotPositive("FINAL_STATUS_MIN_ENTRIES"));
        }

        let weights = ScoreWeights::from_fractions(
            parsed_or(&lookup, "WEIGHT_FIBER", 0.25)?,
            parsed_or(&lookup, "WEIGHT_DIVERSITY", 0.25)?,
            parsed_or(&lookup, "WEIGHT_PROCESSED", 0.20)?,
            parsed_or(&lookup, "WEIGHT_PROBIOTIC", 0.15)?,
            parsed_or(&lookup, "WEIGHT_DIGESTIVE", 0.15)?,
        )?;

        let scoring = ScoringConfig {
            target_fiber_grams,
            diversity_points_per_category: parsed_or(
                &lookup,
                "DIVERSITY_POINTS_PER_CATEGORY",
                defaults.diversity_points_per_category,
            )?,
            probiotic_points_per_serving: parsed_or(
                &lookup,
                "PROBIOTIC_POINTS_PER_SERVING",
                defaults.probiotic_points_per_serving,
            )?,
            weights,
            final_status_min_entries,
        };

        Ok(Self {
            database_url,
            database_max_connections,
            jwt,
            llm,
            scoring,
        })
    }
}

fn required<F>(lookup: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::Missing(key))
}

fn parsed_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
    }
}
