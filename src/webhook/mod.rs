//! Webhook reconciliation.
//!
//! Asynchronous processor events are the authoritative resolution path for
//! pending transactions. Every event passes the signature gate, then the
//! event-id replay gate, before any state mutation.

pub mod event;
pub mod reconciler;
pub mod signature;

pub use event::{WebhookEvent, WebhookEventData, WebhookEventKind};
pub use reconciler::{WebhookOutcome, WebhookReconciler};
pub use signature::{SIGNATURE_HEADER, verify_signature};
