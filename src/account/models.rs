//! Data models for wallet accounts

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// A custodial wallet account. `account_no` is the external (bank-facing)
/// number issued by the payment processor at onboarding.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Account {
    pub id: i64,
    pub owner_id: i64,
    pub account_no: String,
    pub balance: Decimal,
    pub currency: String,
    pub bank_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
