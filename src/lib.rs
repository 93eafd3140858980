//! walletd - Custodial Wallet Ledger
//!
//! A single-currency wallet service: each owner holds exactly one account,
//! and every balance change is an immutable transaction row resolved through
//! a CAS-guarded state machine.
//!
//! # Modules
//!
//! - [`account`] - Account store with the atomic balance-adjustment primitive
//! - [`ledger`] - Transaction log, coordinator (transfer protocol +
//!   compensation), reconciliation sweep
//! - [`webhook`] - Signed processor events and the reconciler
//! - [`processor`] - Payment processor client boundary (HTTP + mock)
//! - [`notify`] - Fire-and-forget notification sink
//! - [`server`] - axum HTTP surface
//! - [`config`] / [`logging`] / [`db`] - runtime plumbing

pub mod account;
pub mod config;
pub mod db;
pub mod ledger;
pub mod logging;
pub mod notify;
pub mod processor;
pub mod server;
pub mod webhook;

// Convenient re-exports at crate root
pub use account::{Account, AccountStore};
pub use db::Database;
pub use ledger::{
    LedgerCoordinator, LedgerError, ReconciliationSweeper, Transaction, TransactionKind,
    TransactionLog, TransactionStatus,
};
pub use processor::{MockProcessor, ProcessorClient};
pub use webhook::WebhookReconciler;
