//! Transaction/ledger core.
//!
//! The transaction log is append-only: rows enter `pending` and move to
//! exactly one terminal state (`completed` or `failed`) via a CAS-guarded
//! transition. The coordinator owns the transfer/withdrawal protocol and the
//! compensation policy; the sweep worker surfaces pending rows that outlived
//! the reconciliation horizon.

pub mod coordinator;
pub mod error;
pub mod log;
pub mod transaction;
pub mod worker;

pub use coordinator::LedgerCoordinator;
pub use error::LedgerError;
pub use log::{NewTransaction, TransactionFilter, TransactionLog, TransitionFields};
pub use transaction::{Transaction, TransactionKind, TransactionStatus, new_reference};
pub use worker::ReconciliationSweeper;
