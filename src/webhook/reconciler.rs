//! Webhook Reconciler
//!
//! Consumes signed processor events, maps them to pending transactions by
//! reference, and drives their terminal transitions through the coordinator's
//! compensation-aware primitives. Everything here is idempotent: replays are
//! acknowledged without re-mutating.

use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

use crate::account::AccountStore;
use crate::db::Database;
use crate::ledger::{LedgerCoordinator, LedgerError, TransactionLog, TransitionFields};

use super::event::{WebhookEvent, WebhookEventKind};
use super::signature::verify_signature;

/// How a delivery was handled; all three are acknowledged upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookOutcome {
    Processed,
    Replay,
    Ignored,
}

pub struct WebhookReconciler {
    db: Arc<Database>,
    coordinator: Arc<LedgerCoordinator>,
    secret: String,
}

impl WebhookReconciler {
    pub fn new(db: Arc<Database>, coordinator: Arc<LedgerCoordinator>, secret: String) -> Self {
        Self {
            db,
            coordinator,
            secret,
        }
    }

    /// Authenticity gate. Must run on the raw body before parsing; nothing
    /// is mutated for an unsigned or mis-signed delivery.
    pub fn verify(&self, body: &[u8], provided: Option<&str>) -> Result<(), LedgerError> {
        match provided {
            Some(signature) if verify_signature(&self.secret, body, signature) => Ok(()),
            _ => Err(LedgerError::Unauthorized),
        }
    }

    /// Process one verified event.
    pub async fn process(&self, event: WebhookEvent) -> Result<WebhookOutcome, LedgerError> {
        // Replay gate: an event id already stamped on a transaction means
        // this delivery was fully processed before.
        let mut conn = self.db.pool().acquire().await?;
        if let Some(existing) = TransactionLog::find_by_event_id(&mut conn, &event.id).await? {
            info!(
                event_id = %event.id,
                reference = %existing.reference,
                "Webhook replay, acknowledging without re-processing"
            );
            return Ok(WebhookOutcome::Replay);
        }
        drop(conn);

        let result = match event.event {
            WebhookEventKind::TransferSuccess => self.on_transfer_success(&event).await,
            WebhookEventKind::TransferFailed => self.on_transfer_failed(&event).await,
            WebhookEventKind::DepositSuccess => self.on_deposit_success(&event).await,
            WebhookEventKind::Unknown => {
                warn!(event_id = %event.id, "Unhandled webhook event kind");
                return Ok(WebhookOutcome::Ignored);
            }
        };

        match result {
            Ok(outcome) => Ok(outcome),
            // Lost the race against a concurrent delivery of the same event.
            Err(LedgerError::DuplicateEvent(id)) => {
                info!(event_id = %id, "Concurrent duplicate delivery, acknowledging");
                Ok(WebhookOutcome::Replay)
            }
            // Redelivery under a fresh event id but a reference the ledger
            // already recorded (deposit path): the money was credited before.
            Err(LedgerError::DuplicateReference) => {
                info!(event_id = %event.id, "Reference already recorded, acknowledging");
                Ok(WebhookOutcome::Replay)
            }
            Err(e) => Err(e),
        }
    }

    async fn on_transfer_success(&self, event: &WebhookEvent) -> Result<WebhookOutcome, LedgerError> {
        let reference = event.data.required_reference()?;
        let amount = event.data.parsed_amount()?;

        let txn = self
            .coordinator
            .resolve_success(
                reference,
                amount,
                TransitionFields {
                    recipient_account_no: event.data.recipient_account_number.clone(),
                    recipient_bank: event.data.recipient_bank.clone(),
                    external_event_id: Some(event.id.clone()),
                    ..Default::default()
                },
            )
            .await?;

        self.notify_owner(
            txn.account_id,
            "transfer_success",
            &format!(
                "Your {} of {} to {} was successful",
                txn.kind,
                txn.amount,
                txn.recipient_account_no.as_deref().unwrap_or("recipient")
            ),
            json!({
                "amount": txn.amount.to_string(),
                "reference": txn.reference,
                "recipient": txn.recipient_account_no,
            }),
        )
        .await;

        Ok(WebhookOutcome::Processed)
    }

    async fn on_transfer_failed(&self, event: &WebhookEvent) -> Result<WebhookOutcome, LedgerError> {
        let reference = event.data.required_reference()?;
        let reason = event
            .data
            .reason
            .clone()
            .unwrap_or_else(|| "Transfer failed".to_string());

        let txn = self
            .coordinator
            .resolve_failure(reference, Some(reason.clone()), Some(event.id.clone()))
            .await?;

        self.notify_owner(
            txn.account_id,
            "transfer_failed",
            &format!("Your {} of {} failed: {}", txn.kind, txn.amount, reason),
            json!({
                "amount": txn.amount.to_string(),
                "reference": txn.reference,
                "reason": reason,
            }),
        )
        .await;

        Ok(WebhookOutcome::Processed)
    }

    async fn on_deposit_success(&self, event: &WebhookEvent) -> Result<WebhookOutcome, LedgerError> {
        let account_no = event.data.required_account_number()?;
        let amount = event.data.required_amount()?;

        let txn = self
            .coordinator
            .record_external_deposit(
                account_no,
                amount,
                event.data.reference.clone(),
                &event.id,
            )
            .await?;

        self.notify_owner(
            txn.account_id,
            "deposit_success",
            &format!("Your account has been credited with {}", amount),
            json!({
                "amount": amount.to_string(),
                "reference": txn.reference,
            }),
        )
        .await;

        Ok(WebhookOutcome::Processed)
    }

    /// Fire-and-forget owner notification: failures are logged, never
    /// propagated into the financial outcome.
    async fn notify_owner(
        &self,
        account_id: i64,
        kind: &str,
        message: &str,
        metadata: serde_json::Value,
    ) {
        let owner_id = {
            let mut conn = match self.db.pool().acquire().await {
                Ok(conn) => conn,
                Err(e) => {
                    warn!(account_id, error = %e, "Could not resolve owner for notification");
                    return;
                }
            };
            match AccountStore::get_by_id(&mut conn, account_id).await {
                Ok(Some(account)) => account.owner_id,
                Ok(None) => {
                    warn!(account_id, "Account vanished before notification");
                    return;
                }
                Err(e) => {
                    warn!(account_id, error = %e, "Could not resolve owner for notification");
                    return;
                }
            }
        };

        if let Err(e) = self
            .coordinator
            .notifier()
            .notify(owner_id, kind, message, metadata)
            .await
        {
            warn!(owner_id, kind, error = %e, "Notification delivery failed");
        }
    }
}
