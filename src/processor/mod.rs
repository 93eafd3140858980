//! Payment processor boundary.
//!
//! The processor is the only path by which money actually enters or leaves
//! the custodial pool. Both operations are at-least-once-callable: the
//! transaction reference is the idempotency key on the processor side.

pub mod http;
pub mod mock;

pub use http::HttpProcessor;
pub use mock::{MockBehavior, MockProcessor};

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::fmt::Debug;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProcessorError {
    /// The call timed out. The processor may have acted regardless; callers
    /// must leave local state pending, never assume failure.
    #[error("Processor call timed out")]
    Timeout,
    #[error("Processor unavailable: {0}")]
    Unavailable(String),
    #[error("Processor declined: {0}")]
    Declined(String),
}

/// External account issued by the processor at onboarding.
#[derive(Debug, Clone)]
pub struct IssuedAccount {
    pub account_number: String,
    pub bank_name: String,
}

/// One outbound funds movement.
#[derive(Debug, Clone)]
pub struct TransferInstruction {
    pub amount: Decimal,
    pub account_number: String,
    pub bank_name: String,
    pub reference: String,
    pub narration: String,
}

/// Processor acknowledgment of a transfer instruction.
#[derive(Debug, Clone)]
pub struct TransferAck {
    pub status: String,
}

#[async_trait]
pub trait ProcessorClient: Send + Sync + Debug {
    /// Issue an external account number for a new owner.
    async fn create_account(
        &self,
        name: &str,
        phone: &str,
        email: &str,
    ) -> Result<IssuedAccount, ProcessorError>;

    /// Move funds out of the custodial pool.
    async fn transfer_funds(
        &self,
        instruction: &TransferInstruction,
    ) -> Result<TransferAck, ProcessorError>;
}
