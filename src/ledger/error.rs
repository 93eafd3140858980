use thiserror::Error;

/// Ledger error taxonomy.
///
/// Validation errors (`AccountNotFound`, `InsufficientFunds`,
/// `InvalidAmount`) abort before any mutation. Gateway errors after the debit
/// are absorbed by the compensation path and surface as a failed
/// transaction, not as a raw error to the caller.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Account not found")]
    AccountNotFound,

    #[error("Account already exists for this owner")]
    AccountExists,

    #[error("Insufficient funds")]
    InsufficientFunds,

    #[error("Invalid amount: must be positive")]
    InvalidAmount,

    #[error("Duplicate transaction reference")]
    DuplicateReference,

    #[error("Duplicate external event: {0}")]
    DuplicateEvent(String),

    #[error("Transaction already in a terminal state")]
    InvalidTransition,

    #[error("Transaction not found for reference: {0}")]
    TransactionNotFound(String),

    #[error("Invalid webhook signature")]
    Unauthorized,

    #[error("Malformed webhook event: {0}")]
    InvalidEvent(String),

    #[error("Payment gateway timed out")]
    GatewayTimeout,

    #[error("Payment gateway unavailable: {0}")]
    GatewayUnavailable(String),

    #[error("Payment gateway declined: {0}")]
    GatewayDeclined(String),
}
