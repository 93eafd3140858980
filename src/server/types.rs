//! API response envelope, error codes, and request/response DTOs.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::account::Account;
use crate::ledger::Transaction;

// ============================================================================
// Unified API Response Format
// ============================================================================

/// Unified API response wrapper
///
/// - code: 0 = success, non-zero = error code
/// - msg: short message description
/// - data: actual data (success) or null (error)
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response code: 0 for success, non-zero for errors
    #[schema(example = 0)]
    pub code: i32,
    /// Response message
    #[schema(example = "ok")]
    pub msg: String,
    /// Response data (only present when code == 0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create success response
    pub fn success(data: T) -> Self {
        Self {
            code: 0,
            msg: "ok".to_string(),
            data: Some(data),
        }
    }

    /// Create error response
    pub fn error(code: i32, msg: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            code,
            msg: msg.into(),
            data: None,
        }
    }
}

/// Standard API error codes
pub mod error_codes {
    // Success
    pub const SUCCESS: i32 = 0;

    // Client errors (1xxx)
    pub const INVALID_PARAMETER: i32 = 1001;
    pub const INSUFFICIENT_FUNDS: i32 = 1002;

    // Auth errors (2xxx)
    pub const AUTH_FAILED: i32 = 2002;

    // Resource errors (4xxx)
    pub const ACCOUNT_NOT_FOUND: i32 = 4001;
    pub const TRANSACTION_NOT_FOUND: i32 = 4002;
    pub const ACCOUNT_EXISTS: i32 = 4090;
    pub const ALREADY_RESOLVED: i32 = 4091;

    // Server errors (5xxx)
    pub const INTERNAL_ERROR: i32 = 5000;
    pub const GATEWAY_UNAVAILABLE: i32 = 5001;
}

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Deserialize, ToSchema)]
pub struct OpenAccountRequest {
    pub owner_id: i64,
    pub name: String,
    pub phone: String,
    pub email: String,
    /// Defaults to NGN
    pub currency: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct TransferFundsRequest {
    pub owner_id: i64,
    /// Decimal string, e.g. "60.00"
    #[schema(example = "60.00")]
    pub amount: String,
    #[schema(example = "0123456789")]
    pub recipient_account_no: String,
    pub recipient_bank: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct WithdrawFundsRequest {
    pub owner_id: i64,
    /// Decimal string, e.g. "25.00"
    pub amount: String,
}

/// History filter: each present field narrows the result set.
#[derive(Debug, Deserialize, IntoParams)]
pub struct HistoryQuery {
    pub owner_id: i64,
    /// transfer | withdrawal | deposit
    pub kind: Option<String>,
    /// pending | completed | failed
    pub status: Option<String>,
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Serialize, ToSchema)]
pub struct AccountData {
    pub id: i64,
    pub owner_id: i64,
    pub account_no: String,
    /// Decimal string
    #[schema(example = "100.00")]
    pub balance: String,
    pub currency: String,
    pub bank_name: String,
}

impl From<Account> for AccountData {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            owner_id: account.owner_id,
            account_no: account.account_no,
            balance: account.balance.to_string(),
            currency: account.currency,
            bank_name: account.bank_name,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TransactionData {
    pub id: i64,
    pub kind: String,
    /// Resulting lifecycle status: pending | completed | failed
    pub status: String,
    /// Decimal string
    pub amount: String,
    pub reference: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_account_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_bank: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Transaction> for TransactionData {
    fn from(txn: Transaction) -> Self {
        Self {
            id: txn.id,
            kind: txn.kind.to_string(),
            status: txn.status.to_string(),
            amount: txn.amount.to_string(),
            reference: txn.reference,
            recipient_account_no: txn.recipient_account_no,
            recipient_bank: txn.recipient_bank,
            description: txn.description,
            created_at: txn.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WebhookAck {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_response_shapes() {
        let ok = serde_json::to_value(ApiResponse::success("done")).unwrap();
        assert_eq!(ok["code"], 0);
        assert_eq!(ok["data"], "done");

        let err = serde_json::to_value(ApiResponse::<()>::error(
            error_codes::INSUFFICIENT_FUNDS,
            "Insufficient funds",
        ))
        .unwrap();
        assert_eq!(err["code"], 1002);
        assert!(err.get("data").is_none());
    }
}
