mod routes;
mod models;
mod openrouter;
mod pipeline;
mod pricing;
mod prompt;

use axum::{Router, routing::{post, get}};
use routes::{create_description, get_record, AppState};
use std::net::SocketAddr;
use tracing_subscriber::{fmt, EnvFilter};
use std::sync::Arc;
use tower_http::cors::{CorsLayer, Any};

use crate::openrouter::OpenRouterClient;
use crate::pricing::PricingTable;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Init tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let state = AppState {
        store: Arc::default(),
        api: Arc::new(OpenRouterClient::new()),
        pricing: Arc::new(PricingTable::default()),
    };

    let app = Router::new()
        .route("/api/describe", post(create_description))
        .route("/api/record/:id", get(get_record))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state);

    let port: u16 = std::env::var("PORT").ok().and_then(|v| v.parse().ok()).unwrap_or(8080);
    let addr = SocketAddr::from(([0,0,0,0], port));
    tracing::info!(%addr, "Starting server");
    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;
    Ok(())
}
