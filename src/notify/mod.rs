//! Notification sink.
//!
//! Strictly fire-and-forget from the ledger's perspective: a notification
//! failure is logged and never propagates into a financial transaction's
//! outcome.

use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;
use thiserror::Error;

use crate::db::Database;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait Notifier: Send + Sync + Debug {
    async fn notify(
        &self,
        owner_id: i64,
        kind: &str,
        message: &str,
        metadata: serde_json::Value,
    ) -> Result<(), NotifyError>;
}

/// Records notifications in the `notifications` table. Delivery channels
/// (email, push) hang off that table downstream.
#[derive(Debug)]
pub struct DbNotifier {
    db: Arc<Database>,
}

impl DbNotifier {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Notifier for DbNotifier {
    async fn notify(
        &self,
        owner_id: i64,
        kind: &str,
        message: &str,
        metadata: serde_json::Value,
    ) -> Result<(), NotifyError> {
        sqlx::query(
            r#"INSERT INTO notifications (owner_id, kind, message, metadata, status)
               VALUES ($1, $2, $3, $4, 'sent')"#,
        )
        .bind(owner_id)
        .bind(kind)
        .bind(message)
        .bind(metadata.to_string())
        .execute(self.db.pool())
        .await?;

        tracing::info!(owner_id, kind, "Notification sent: {}", message);
        Ok(())
    }
}

/// Log-only notifier for tests and dev.
#[derive(Debug, Default)]
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn notify(
        &self,
        owner_id: i64,
        kind: &str,
        message: &str,
        _metadata: serde_json::Value,
    ) -> Result<(), NotifyError> {
        tracing::debug!(owner_id, kind, "Notification (noop): {}", message);
        Ok(())
    }
}
