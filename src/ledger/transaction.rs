//! Transaction row model and status state machine.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ulid::Ulid;

/// Money-movement type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Withdrawal,
    Deposit,
    Transfer,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Withdrawal => "withdrawal",
            TransactionKind::Deposit => "deposit",
            TransactionKind::Transfer => "transfer",
        }
    }

    /// Whether this kind debits the owning account when initiated, and
    /// therefore requires a refund when it fails after the debit.
    pub fn moves_funds_out(&self) -> bool {
        matches!(self, TransactionKind::Withdrawal | TransactionKind::Transfer)
    }

    fn reference_prefix(&self) -> &'static str {
        match self {
            TransactionKind::Withdrawal => "WDL",
            TransactionKind::Deposit => "DEP",
            TransactionKind::Transfer => "TRF",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "withdrawal" => Ok(TransactionKind::Withdrawal),
            "deposit" => Ok(TransactionKind::Deposit),
            "transfer" => Ok(TransactionKind::Transfer),
            _ => Err(format!("Invalid transaction kind: {}", s)),
        }
    }
}

/// Transaction lifecycle status.
///
/// `pending -> completed` or `pending -> failed`, exactly once. Terminal
/// states accept no further transitions; the CAS in the transaction log
/// enforces this at the row level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Failed,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Completed => "completed",
            TransactionStatus::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, TransactionStatus::Completed | TransactionStatus::Failed)
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TransactionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TransactionStatus::Pending),
            "completed" => Ok(TransactionStatus::Completed),
            "failed" => Ok(TransactionStatus::Failed),
            _ => Err(format!("Invalid transaction status: {}", s)),
        }
    }
}

/// One money-movement attempt. Immutable except for `status` and the
/// webhook-supplied enrichment fields; never deleted.
#[derive(Debug, Clone, Serialize)]
pub struct Transaction {
    pub id: i64,
    pub kind: TransactionKind,
    pub status: TransactionStatus,
    pub amount: Decimal,
    pub account_id: i64,
    /// Globally unique idempotency key, generated before the external call.
    pub reference: String,
    pub from_account_id: Option<i64>,
    pub to_account_id: Option<i64>,
    pub recipient_account_no: Option<String>,
    pub recipient_bank: Option<String>,
    pub description: Option<String>,
    /// Idempotency key of the webhook event that resolved this row.
    pub external_event_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Generate a fresh reference for one request: kind prefix plus a ULID
/// (millisecond timestamp + 80 bits of cryptographically strong randomness).
pub fn new_reference(kind: TransactionKind) -> String {
    format!("{}-{}", kind.reference_prefix(), Ulid::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_status_roundtrip() {
        for status in [
            TransactionStatus::Pending,
            TransactionStatus::Completed,
            TransactionStatus::Failed,
        ] {
            assert_eq!(status.as_str().parse::<TransactionStatus>(), Ok(status));
        }
        assert!("reversed".parse::<TransactionStatus>().is_err());
    }

    #[test]
    fn test_terminal_states() {
        assert!(!TransactionStatus::Pending.is_terminal());
        assert!(TransactionStatus::Completed.is_terminal());
        assert!(TransactionStatus::Failed.is_terminal());
    }

    #[test]
    fn test_kind_balance_effect() {
        assert!(TransactionKind::Transfer.moves_funds_out());
        assert!(TransactionKind::Withdrawal.moves_funds_out());
        assert!(!TransactionKind::Deposit.moves_funds_out());
    }

    #[test]
    fn test_references_are_unique_per_call() {
        let refs: HashSet<String> = (0..1000)
            .map(|_| new_reference(TransactionKind::Transfer))
            .collect();
        assert_eq!(refs.len(), 1000);
        assert!(refs.iter().all(|r| r.starts_with("TRF-")));
    }

    #[test]
    fn test_reference_prefix_by_kind() {
        assert!(new_reference(TransactionKind::Withdrawal).starts_with("WDL-"));
        assert!(new_reference(TransactionKind::Deposit).starts_with("DEP-"));
    }
}
