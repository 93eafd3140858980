//! Account store: one ledger account per owner.
//!
//! Balances are mutated exclusively through [`AccountStore::adjust_balance`],
//! a single conditional UPDATE that enforces the non-negative invariant in
//! the same statement that applies the delta.

pub mod models;
pub mod store;

pub use models::Account;
pub use store::AccountStore;
