use std::collections::HashMap;

use crate::models::TokenUsage;

/// What the caller is billed per generated description, in USD.
pub const CHARGE_PRICE: f64 = 0.30;

/// USD per million tokens for one model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelPricing {
    pub input: f64,
    pub output: f64,
}

/// Read-only model → price table, injected into the pipeline so tests can
/// swap it. A model missing from the table is an error, never a free call.
#[derive(Debug, Clone)]
pub struct PricingTable {
    prices: HashMap<&'static str, ModelPricing>,
}

impl Default for PricingTable {
    fn default() -> Self {
        let prices = HashMap::from([
            ("openai/gpt-4o-mini", ModelPricing { input: 0.15, output: 0.60 }),
            ("google/gemini-2.0-flash-exp:free", ModelPricing { input: 0.0, output: 0.0 }),
        ]);
        Self { prices }
    }
}

impl PricingTable {
    #[cfg(test)]
    pub fn from_entries(entries: &[(&'static str, ModelPricing)]) -> Self {
        Self { prices: entries.iter().copied().collect() }
    }

    pub fn get(&self, model: &str) -> Option<ModelPricing> {
        self.prices.get(model).copied()
    }

    /// Total USD cost of one call, or `None` when the model is not priced.
    pub fn total_cost(&self, model: &str, usage: TokenUsage) -> Option<f64> {
        let pricing = self.get(model)?;
        let input_cost = (usage.prompt_tokens as f64 / 1_000_000.0) * pricing.input;
        let output_cost = (usage.completion_tokens as f64 / 1_000_000.0) * pricing.output;
        Some(input_cost + output_cost)
    }
}

/// Round half-away-from-zero to `decimals` places for display/storage.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
