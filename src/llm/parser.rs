use async_trait::async_trait;
use tracing::{instrument, warn};

use super::client::{strip_code_fence, ChatClient, LlmError};
use super::FoodParser;
use crate::scoring::FoodAnalysis;

const SYSTEM_PROMPT: &str = r#"You analyse meal descriptions for a gut-health tracker.
Reply with ONE JSON object and nothing else, shaped exactly like:
{"foods": ["..."], "fiber_grams": 0.0, "food_categories": ["..."], "is_processed": false, "has_probiotics": false, "digestive_complexity": "moderate"}
food_categories may only use: whole_grain, vegetable, fruit, legume, nuts_seeds, fermented, dairy, protein, processed, refined_grain.
fiber_grams is the estimated total dietary fiber of the whole meal; be conservative.
is_processed is true when the meal is mostly packaged, refined or heavily manufactured food.
has_probiotics is true when it contains a fermented food such as yogurt, kefir, kimchi, sauerkraut, miso or kombucha.
digestive_complexity is easy (light, simple), moderate (balanced) or heavy (fatty, large or complex)."#;

const TEMPERATURE: f32 = 0.3;
const MAX_TOKENS: u32 = 300;

/// Model-backed parser. Without a client it always returns the fallback analysis.
pub struct LlmFoodParser {
    client: Option<ChatClient>,
}

impl LlmFoodParser {
    pub fn new(client: Option<ChatClient>) -> Self {
        Self { client }
    }

    async fn request(client: &ChatClient, food_text: &str) -> Result<FoodAnalysis, LlmError> {
        let content = client
            .complete(
                SYSTEM_PROMPT,
                &format!("Meal: {food_text}"),
                TEMPERATURE,
                MAX_TOKENS,
            )
            .await?;
        decode_analysis(&content, food_text)
    }
}

/// Decodes a model reply; individually missing fields take their defaults.
pub(crate) fn decode_analysis(content: &str, food_text: &str) -> Result<FoodAnalysis, LlmError> {
    let value: serde_json::Value = serde_json::from_str(strip_code_fence(content))?;
    if !value.is_object() {
        return Err(LlmError::Shape("expected a JSON object".into()));
    }
    let analysis: FoodAnalysis = serde_json::from_value(value)?;
    Ok(analysis.normalized(food_text))
}

#[async_trait]
impl FoodParser for LlmFoodParser {
    #[instrument(skip(self, food_text), fields(chars = food_text.len()))]
    async fn parse(&self, food_text: &str) -> FoodAnalysis {
        let Some(client) = &self.client else {
            return FoodAnalysis::fallback(food_text);
        };
        match Self::request(client, food_text).await {
            Ok(analysis) => analysis,
            Err(e) => {
                warn!(error = %e, "food parsing failed; using fallback analysis");
                FoodAnalysis::fallback(food_text)
            }
        }
    }
}
