//! walletd server entry point.
//!
//! Composition root: config -> logging -> database -> stores/clients ->
//! sweep worker -> HTTP server. Components receive their collaborators
//! explicitly here and nowhere else.

use anyhow::Context;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use walletd::config::AppConfig;
use walletd::db::Database;
use walletd::ledger::{LedgerCoordinator, ReconciliationSweeper};
use walletd::notify::{DbNotifier, Notifier};
use walletd::processor::{HttpProcessor, MockProcessor, ProcessorClient};
use walletd::server::{self, AppState};
use walletd::webhook::WebhookReconciler;
use walletd::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = std::env::args().nth(1).unwrap_or_else(|| "dev".to_string());
    let config = AppConfig::load(&env);
    let _guard = logging::init_logging(&config);

    info!(env = %env, "walletd starting");

    let db = Arc::new(
        Database::connect(&config.database_url)
            .await
            .context("Failed to connect to PostgreSQL")?,
    );
    db.migrate().await.context("Failed to run migrations")?;

    let processor: Arc<dyn ProcessorClient> = if config.processor.use_mock {
        info!("Using mock payment processor");
        Arc::new(MockProcessor::new())
    } else {
        Arc::new(HttpProcessor::new(&config.processor))
    };

    let notifier: Arc<dyn Notifier> = Arc::new(DbNotifier::new(db.clone()));

    let coordinator = Arc::new(LedgerCoordinator::new(
        db.clone(),
        processor,
        notifier,
    ));

    let reconciler = Arc::new(WebhookReconciler::new(
        db.clone(),
        coordinator.clone(),
        config.webhook.secret.clone(),
    ));

    let sweeper = ReconciliationSweeper::new(
        db.clone(),
        Duration::from_secs(config.reconciliation.sweep_interval_secs),
        Duration::from_secs(config.reconciliation.pending_horizon_secs),
    );
    tokio::spawn(async move { sweeper.run().await });

    let state = Arc::new(AppState::new(db, coordinator, reconciler));
    server::run_server(&config.server, state).await
}
