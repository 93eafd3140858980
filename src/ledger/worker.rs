//! Reconciliation sweep - background loop over stale pending rows.
//!
//! A transaction stuck in `pending` past the configured horizon (processor
//! timeout, crash between debit and finalize, lost webhook) is surfaced for
//! reconciliation. The sweep never guesses an outcome: the processor
//! interface exposes no status query, so resolution stays event-driven and
//! the sweep's job is to make sure nothing stays invisible.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info, warn};

use crate::db::Database;

use super::error::LedgerError;
use super::log::TransactionLog;

pub struct ReconciliationSweeper {
    db: Arc<Database>,
    interval: Duration,
    horizon: Duration,
}

impl ReconciliationSweeper {
    pub fn new(db: Arc<Database>, interval: Duration, horizon: Duration) -> Self {
        Self {
            db,
            interval,
            horizon,
        }
    }

    /// Run the sweep loop
    pub async fn run(&self) {
        info!(
            interval_secs = self.interval.as_secs(),
            horizon_secs = self.horizon.as_secs(),
            "Reconciliation sweeper starting"
        );

        loop {
            sleep(self.interval).await;

            match self.sweep_once().await {
                Ok(0) => {}
                Ok(n) => warn!(count = n, "Pending transactions awaiting reconciliation"),
                Err(e) => error!(error = %e, "Reconciliation sweep failed"),
            }
        }
    }

    /// One sweep pass. Returns how many stale pending rows were surfaced.
    pub async fn sweep_once(&self) -> Result<usize, LedgerError> {
        let mut conn = self.db.pool().acquire().await?;
        let stale = TransactionLog::find_stale_pending(&mut conn, self.horizon).await?;

        for txn in &stale {
            warn!(
                reference = %txn.reference,
                kind = %txn.kind,
                amount = %txn.amount,
                account_id = txn.account_id,
                pending_since = %txn.updated_at,
                "Pending transaction exceeded reconciliation horizon"
            );
        }

        Ok(stale.len())
    }
}
