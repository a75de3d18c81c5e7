use chrono::Utc;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::models::{GenerationRequest, OutputRecord, ProductDescription};
use crate::openrouter::{CompletionApi, CompletionError};
use crate::pricing::{round_to, PricingTable, CHARGE_PRICE};
use crate::prompt::build_prompt;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("completion call failed: {0}")]
    RemoteCallFailed(#[from] CompletionError),
    #[error("no pricing configured for model '{0}'")]
    UnknownModel(String),
    #[error("model output did not match the expected schema: {0}")]
    MalformedModelOutput(String),
}

/// Run one generation end to end: validate, synthesize the prompt, make the
/// single completion call, validate the returned JSON against the five-field
/// schema, and price the call. Fails atomically: no record on any error.
pub async fn generate(
    api: &dyn CompletionApi,
    pricing: &PricingTable,
    req: &GenerationRequest,
) -> Result<OutputRecord, GenerationError> {
    if req.product_name.trim().is_empty() {
        return Err(GenerationError::InvalidInput("Product name is required".into()));
    }
    if req.openrouter_api_key.is_empty() {
        return Err(GenerationError::InvalidInput("OpenRouter API key is required".into()));
    }

    info!("🚀 Creating product description for: {}", req.product_name);

    let prompt = build_prompt(req);
    let result = api.complete(&prompt, &req.model, &req.openrouter_api_key).await?;

    let description: ProductDescription = serde_json::from_str(&result.content)
        .map_err(|e| GenerationError::MalformedModelOutput(e.to_string()))?;

    let total_cost = pricing
        .total_cost(&req.model, result.usage)
        .ok_or_else(|| GenerationError::UnknownModel(req.model.clone()))?;

    let cost = round_to(total_cost, 6);
    let profit = round_to(CHARGE_PRICE - total_cost, 4);
    info!("✅ Product description created! Cost: ${:.6}", total_cost);

    Ok(OutputRecord {
        id: Uuid::new_v4(),
        product_name: req.product_name.clone(),
        brand: req.brand.clone(),
        category: req.category.clone(),
        description,
        cost,
        charge_price: CHARGE_PRICE,
        profit,
        created_at: Utc::now(),
    })
}
