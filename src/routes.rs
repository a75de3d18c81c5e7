use axum::{Json, extract::{Path, State}, http::StatusCode, response::{IntoResponse, Response}};
use std::{collections::HashMap, sync::Arc};
use parking_lot::RwLock;
use uuid::Uuid;

use crate::{models::{GenerationRequest, OutputRecord}, openrouter::CompletionApi, pipeline::{generate, GenerationError}, pricing::PricingTable};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<HashMap<Uuid, OutputRecord>>>,
    pub api: Arc<dyn CompletionApi>,
    pub pricing: Arc<PricingTable>,
}

fn error_status(err: &GenerationError) -> StatusCode {
    match err {
        GenerationError::InvalidInput(_) | GenerationError::UnknownModel(_) => StatusCode::BAD_REQUEST,
        GenerationError::RemoteCallFailed(_) | GenerationError::MalformedModelOutput(_) => StatusCode::BAD_GATEWAY,
    }
}

pub async fn create_description(
    State(state): State<AppState>,
    Json(body): Json<GenerationRequest>,
) -> Result<Json<OutputRecord>, Response> {
    let record = generate(state.api.as_ref(), &state.pricing, &body)
        .await
        .map_err(|e| {
            tracing::error!("❌ Generation failed: {}", e);
            (error_status(&e), Json(serde_json::json!({ "error": e.to_string() }))).into_response()
        })?;

    // The record is only persisted on success; a failed run leaves no trace.
    state.store.write().insert(record.id, record.clone());
    tracing::info!("✅ Stored output record {} for '{}'", record.id, record.product_name);
    Ok(Json(record))
}

pub async fn get_record(Path(id): Path<Uuid>, State(state): State<AppState>) -> Response {
    if let Some(r) = state.store.read().get(&id).cloned() { Json(r).into_response() } else { StatusCode::NOT_FOUND.into_response() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TokenUsage;
    use crate::openrouter::stub::StubApi;
    use pretty_assertions::assert_eq;

    fn state_with(api: StubApi) -> AppState {
        AppState {
            store: Arc::default(),
            api: Arc::new(api),
            pricing: Arc::new(PricingTable::default()),
        }
    }

    fn wireless_mouse_request() -> GenerationRequest {
        serde_json::from_value(serde_json::json!({
            "productName": "Wireless Mouse",
            "model": "google/gemini-2.0-flash-exp:free",
            "openrouterApiKey": "k",
        }))
        .unwrap()
    }

    fn valid_content() -> String {
        serde_json::json!({
            "shortDescription": "Precise wireless mouse",
            "fullDescription": "<p>A precise wireless mouse.</p>",
            "bulletPoints": ["2.4GHz"],
            "seoKeywords": ["wireless mouse"],
            "callToAction": "Buy now"
        })
        .to_string()
    }

    #[tokio::test]
    async fn successful_run_stores_one_record() {
        let usage = TokenUsage { prompt_tokens: 500, completion_tokens: 300 };
        let state = state_with(StubApi::returning(&valid_content(), usage));

        let Json(record) = create_description(State(state.clone()), Json(wireless_mouse_request()))
            .await
            .expect("run should succeed");

        assert_eq!(record.cost, 0.0);
        assert_eq!(record.charge_price, 0.30);
        assert_eq!(record.profit, 0.30);
        assert_eq!(state.store.read().len(), 1);
        assert_eq!(state.store.read().get(&record.id).unwrap().product_name, "Wireless Mouse");
    }

    #[tokio::test]
    async fn provider_401_fails_run_and_stores_nothing() {
        let state = state_with(StubApi::failing("status=401 Unauthorized body=invalid key"));

        let result = create_description(State(state.clone()), Json(wireless_mouse_request())).await;

        let response = result.expect_err("run should fail");
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert!(state.store.read().is_empty());
    }

    #[tokio::test]
    async fn invalid_input_maps_to_bad_request() {
        let state = state_with(StubApi::failing("should never be reached"));
        let mut req = wireless_mouse_request();
        req.openrouter_api_key = String::new();

        let response = create_description(State(state.clone()), Json(req))
            .await
            .expect_err("run should fail");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(state.store.read().is_empty());
    }

    #[tokio::test]
    async fn stored_record_is_fetchable_and_misses_are_404() {
        let usage = TokenUsage { prompt_tokens: 1, completion_tokens: 1 };
        let state = state_with(StubApi::returning(&valid_content(), usage));

        let Json(record) = create_description(State(state.clone()), Json(wireless_mouse_request()))
            .await
            .unwrap();

        let found = get_record(Path(record.id), State(state.clone())).await;
        assert_eq!(found.status(), StatusCode::OK);

        let missing = get_record(Path(Uuid::new_v4()), State(state)).await;
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn record_serialization_never_contains_api_key() {
        let usage = TokenUsage { prompt_tokens: 500, completion_tokens: 300 };
        let state = state_with(StubApi::returning(&valid_content(), usage));

        let Json(record) = create_description(State(state), Json(wireless_mouse_request()))
            .await
            .unwrap();

        let json = serde_json::to_value(&record).unwrap();
        let body = json.to_string();
        assert!(!body.contains("apiKey"));
        assert!(!body.contains("openrouter"));
        assert_eq!(json["chargePrice"], 0.30);
        assert_eq!(json["shortDescription"], "Precise wireless mouse");
        assert!(json.get("createdAt").is_some());
    }
}
