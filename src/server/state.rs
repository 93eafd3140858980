//! Shared application state (composition-root wiring).
//!
//! Every component receives its collaborators explicitly; there are no
//! module-level singletons. `main.rs` wires this once at startup.

use std::sync::Arc;

use crate::db::Database;
use crate::ledger::LedgerCoordinator;
use crate::webhook::WebhookReconciler;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub coordinator: Arc<LedgerCoordinator>,
    pub reconciler: Arc<WebhookReconciler>,
}

impl AppState {
    pub fn new(
        db: Arc<Database>,
        coordinator: Arc<LedgerCoordinator>,
        reconciler: Arc<WebhookReconciler>,
    ) -> Self {
        Self {
            db,
            coordinator,
            reconciler,
        }
    }
}
