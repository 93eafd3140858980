//! HTTP surface: router assembly and server startup.

pub mod handlers;
pub mod openapi;
pub mod state;
pub mod types;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::net::TcpListener;

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::ServerConfig;
pub use state::AppState;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .nest(
            "/api/v1",
            Router::new()
                .route("/accounts", post(handlers::open_account))
                .route("/accounts/{owner_id}", get(handlers::get_account))
                .route("/transfers", post(handlers::transfer_funds))
                .route("/withdrawals", post(handlers::withdraw_funds))
                .route("/transactions", get(handlers::transaction_history)),
        )
        .route("/webhooks/processor", post(handlers::processor_webhook))
        .with_state(state)
        // Swagger UI is stateless, merged after with_state
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()))
}

pub async fn run_server(config: &ServerConfig, state: Arc<AppState>) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!("walletd listening on http://{}", addr);
    tracing::info!("API docs at http://{}/docs", addr);

    axum::serve(listener, build_router(state)).await?;
    Ok(())
}
