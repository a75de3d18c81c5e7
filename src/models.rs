use serde::{Serialize, Deserialize};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Target length of the generated copy. Closed set, so a bad value is
/// rejected at the input boundary instead of producing a malformed prompt.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Length {
    Short,
    #[default]
    Medium,
    Long,
}

impl Length {
    pub fn target_words(self) -> u32 {
        match self {
            Length::Short => 50,
            Length::Medium => 100,
            Length::Long => 200,
        }
    }
}

pub const DEFAULT_MODEL: &str = "google/gemini-2.0-flash-exp:free";

fn default_audience() -> String { "general consumers".to_string() }
fn default_tone() -> String { "professional".to_string() }
fn default_model() -> String { DEFAULT_MODEL.to_string() }

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub product_name: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default = "default_audience")]
    pub target_audience: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub category: String,
    #[serde(default = "default_tone")]
    pub tone: String,
    #[serde(default)]
    pub length: Length,
    #[serde(default = "default_model")]
    pub model: String,
    // Forwarded as a bearer token, never echoed back or stored.
    #[serde(default, skip_serializing)]
    pub openrouter_api_key: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

/// Raw text returned by the provider plus the usage counters billed for it.
#[derive(Debug, Clone)]
pub struct CompletionResult {
    pub content: String,
    pub usage: TokenUsage,
}

/// The structured copy the model must return. All five fields are required;
/// a response missing any of them fails deserialization.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ProductDescription {
    pub short_description: String,
    pub full_description: String,
    pub bullet_points: Vec<String>,
    pub seo_keywords: Vec<String>,
    pub call_to_action: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct OutputRecord {
    pub id: Uuid,
    pub product_name: String,
    pub brand: String,
    pub category: String,
    #[serde(flatten)]
    pub description: ProductDescription,
    pub cost: f64,
    pub charge_price: f64,
    pub profit: f64,
    pub created_at: DateTime<Utc>,
}
