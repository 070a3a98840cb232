use async_trait::async_trait;
use tracing::{instrument, warn};

use super::client::{strip_code_fence, ChatClient, LlmError};
use super::{ScoreArea, TipGenerator, TipScores, Tips};

const SYSTEM_PROMPT: &str = r#"You are an upbeat gut-health coach.
Given a day's scores on a 0-100 scale, write exactly 3 specific, practical tips.
Focus on the one or two lowest areas, keep each tip to one or two sentences,
do not quote the numbers, and reply with ONLY a JSON array of 3 strings."#;

const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 400;

pub struct LlmTipGenerator {
    client: Option<ChatClient>,
}

impl LlmTipGenerator {
    pub fn new(client: Option<ChatClient>) -> Self {
        Self { client }
    }

    async fn request(client: &ChatClient, scores: TipScores) -> Result<Tips, LlmError> {
        let prompt = format!(
            "Today's scores:\n- Fiber: {}/100\n- Diversity: {}/100\n\
             - Processed foods: {}/100 (higher means less processed)\n\
             - Probiotics: {}/100\n- Digestive load: {}/100",
            scores.fiber, scores.diversity, scores.processed, scores.probiotic, scores.digestive
        );
        let content = client
            .complete(SYSTEM_PROMPT, &prompt, TEMPERATURE, MAX_TOKENS)
            .await?;
        decode_tips(&content)
    }
}

/// Takes the first three tips of a JSON array holding at least three strings.
pub(crate) fn decode_tips(content: &str) -> Result<Tips, LlmError> {
    let tips: Vec<String> = serde_json::from_str(strip_code_fence(content))?;
    let mut tips = tips
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());
    match (tips.next(), tips.next(), tips.next()) {
        (Some(a), Some(b), Some(c)) => Ok([a, b, c]),
        _ => Err(LlmError::Shape("fewer than three tips".into())),
    }
}

/// Deterministic tips for the weakest area.
pub fn fallback_tips(area: ScoreArea) -> Tips {
    let tips = match area {
        ScoreArea::Fiber => [
            "Add a serving of beans or lentils to your next meal for an easy fiber boost.",
            "Swap white rice or pasta for brown rice or a whole grain alternative.",
            "Snack on raw vegetables with hummus to add fiber between meals.",
        ],
        ScoreArea::Diversity => [
            "Pick one vegetable or fruit you have not eaten this week and try it.",
            "Mix several colours of vegetables into a single meal for more variety.",
            "Cook a dish from a different cuisine to widen the range of plants you eat.",
        ],
        ScoreArea::Processed => [
            "Build today's meals around whole foods such as fresh produce and whole grains.",
            "Make a simple home-cooked meal instead of reaching for packaged food.",
            "Check ingredient labels and choose products with shorter ingredient lists.",
        ],
        ScoreArea::Probiotic => [
            "Add yogurt or kefir to tomorrow's breakfast.",
            "Serve a spoonful of kimchi or sauerkraut as a side with lunch or dinner.",
            "Try miso soup or a glass of kombucha as part of your routine.",
        ],
        ScoreArea::Digestive => [
            "Eat slowly and chew thoroughly to make digestion easier.",
            "Choose a lighter meal with vegetables and lean protein this evening.",
            "Drink water steadily through the day to support digestion.",
        ],
    };
    tips.map(String::from)
}

#[async_trait]
impl TipGenerator for LlmTipGenerator {
    #[instrument(skip(self))]
    async fn generate(&self, scores: TipScores) -> Tips {
        let Some(client) = &self.client else {
            return fallback_tips(scores.lowest());
        };
        match Self::request(client, scores).await {
            Ok(tips) => tips,
            Err(e) => {
                warn!(error = %e, "tip generation failed; using fallback tips");
                fallback_tips(scores.lowest())
            }
        }
    }
}
