//! Processor webhook event payloads.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::ledger::LedgerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookEventKind {
    TransferSuccess,
    TransferFailed,
    DepositSuccess,
    /// Events this ledger does not handle; acknowledged and logged.
    Unknown,
}

impl WebhookEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WebhookEventKind::TransferSuccess => "transfer.success",
            WebhookEventKind::TransferFailed => "transfer.failed",
            WebhookEventKind::DepositSuccess => "deposit.success",
            WebhookEventKind::Unknown => "unknown",
        }
    }

    /// Unrecognized kinds fold into `Unknown` so new processor event types
    /// never break delivery.
    pub fn from_wire(s: &str) -> Self {
        match s {
            "transfer.success" => WebhookEventKind::TransferSuccess,
            "transfer.failed" => WebhookEventKind::TransferFailed,
            "deposit.success" => WebhookEventKind::DepositSuccess,
            _ => WebhookEventKind::Unknown,
        }
    }
}

impl fmt::Display for WebhookEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for WebhookEventKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for WebhookEventKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(WebhookEventKind::from_wire(&raw))
    }
}

/// A signed processor event. `id` is the delivery's idempotency key.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    pub event: WebhookEventKind,
    pub id: String,
    pub data: WebhookEventData,
}

/// Event payload. Which fields are present depends on the event kind;
/// amounts arrive as strings and are parsed on demand.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookEventData {
    pub reference: Option<String>,
    pub amount: Option<String>,
    pub account_number: Option<String>,
    pub recipient_account_number: Option<String>,
    pub recipient_bank: Option<String>,
    pub reason: Option<String>,
}

impl WebhookEventData {
    pub fn required_reference(&self) -> Result<&str, LedgerError> {
        self.reference
            .as_deref()
            .ok_or_else(|| LedgerError::InvalidEvent("missing data.reference".to_string()))
    }

    pub fn required_account_number(&self) -> Result<&str, LedgerError> {
        self.account_number
            .as_deref()
            .ok_or_else(|| LedgerError::InvalidEvent("missing data.account_number".to_string()))
    }

    /// Parsed amount, if present.
    pub fn parsed_amount(&self) -> Result<Option<Decimal>, LedgerError> {
        match self.amount.as_deref() {
            None => Ok(None),
            Some(raw) => Decimal::from_str(raw)
                .map(Some)
                .map_err(|_| LedgerError::InvalidEvent(format!("invalid amount: {}", raw))),
        }
    }

    pub fn required_amount(&self) -> Result<Decimal, LedgerError> {
        self.parsed_amount()?
            .ok_or_else(|| LedgerError::InvalidEvent("missing data.amount".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_transfer_success() {
        let payload = r#"{
            "event": "transfer.success",
            "id": "evt_01J0000000000000000000001",
            "data": {
                "reference": "TRF-01J00000000000000000000000",
                "amount": "60.00",
                "recipient_account_number": "0123456789",
                "recipient_bank": "Mock Trust Bank"
            }
        }"#;

        let event: WebhookEvent = serde_json::from_str(payload).unwrap();
        assert_eq!(event.event, WebhookEventKind::TransferSuccess);
        assert_eq!(
            event.data.required_reference().unwrap(),
            "TRF-01J00000000000000000000000"
        );
        assert_eq!(
            event.data.required_amount().unwrap(),
            Decimal::from_str("60.00").unwrap()
        );
    }

    #[test]
    fn test_deserialize_deposit_success() {
        let payload = r#"{
            "event": "deposit.success",
            "id": "evt_dep_1",
            "data": {
                "reference": "PROC-REF-9",
                "amount": "25.50",
                "account_number": "0011223344"
            }
        }"#;

        let event: WebhookEvent = serde_json::from_str(payload).unwrap();
        assert_eq!(event.event, WebhookEventKind::DepositSuccess);
        assert_eq!(event.data.required_account_number().unwrap(), "0011223344");
    }

    #[test]
    fn test_unknown_event_kind_is_tolerated() {
        let payload = r#"{
            "event": "refund.created",
            "id": "evt_x",
            "data": {}
        }"#;

        let event: WebhookEvent = serde_json::from_str(payload).unwrap();
        assert_eq!(event.event, WebhookEventKind::Unknown);
    }

    #[test]
    fn test_kind_serializes_as_wire_name() {
        let json = serde_json::to_string(&WebhookEventKind::TransferFailed).unwrap();
        assert_eq!(json, r#""transfer.failed""#);
    }

    #[test]
    fn test_missing_fields_are_reported() {
        let data = WebhookEventData::default();
        assert!(data.required_reference().is_err());
        assert!(data.required_amount().is_err());
        assert!(data.parsed_amount().unwrap().is_none());

        let bad = WebhookEventData {
            amount: Some("sixty".to_string()),
            ..Default::default()
        };
        assert!(bad.parsed_amount().is_err());
    }
}
