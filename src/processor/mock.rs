//! Mock processor for dev and tests.
//!
//! Account numbers are derived deterministically from the owner's email so
//! repeated onboarding in a dev environment stays stable; transfer outcomes
//! are scriptable per test scenario.

use async_trait::async_trait;
use std::sync::Mutex;

use super::{IssuedAccount, ProcessorClient, ProcessorError, TransferAck, TransferInstruction};

/// Scripted outcome for `transfer_funds`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockBehavior {
    /// Acknowledge every transfer.
    Succeed,
    /// Decline every transfer (definite failure - triggers compensation).
    Decline,
    /// Simulate a timeout (outcome unknown - row must stay pending).
    TimeOut,
}

#[derive(Debug)]
pub struct MockProcessor {
    bank_name: String,
    behavior: Mutex<MockBehavior>,
}

impl MockProcessor {
    pub fn new() -> Self {
        Self::with_behavior(MockBehavior::Succeed)
    }

    pub fn with_behavior(behavior: MockBehavior) -> Self {
        Self {
            bank_name: "Mock Trust Bank".to_string(),
            behavior: Mutex::new(behavior),
        }
    }

    pub fn set_behavior(&self, behavior: MockBehavior) {
        *self.behavior.lock().unwrap() = behavior;
    }

    fn current_behavior(&self) -> MockBehavior {
        *self.behavior.lock().unwrap()
    }
}

impl Default for MockProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProcessorClient for MockProcessor {
    async fn create_account(
        &self,
        _name: &str,
        _phone: &str,
        email: &str,
    ) -> Result<IssuedAccount, ProcessorError> {
        // Deterministic 10-digit number from the email hash
        let digest = md5::compute(format!("wallet_{}", email));
        let seed = u64::from_le_bytes(digest.0[..8].try_into().unwrap());
        let account_number = format!("{:010}", seed % 10_000_000_000);

        Ok(IssuedAccount {
            account_number,
            bank_name: self.bank_name.clone(),
        })
    }

    async fn transfer_funds(
        &self,
        instruction: &TransferInstruction,
    ) -> Result<TransferAck, ProcessorError> {
        match self.current_behavior() {
            MockBehavior::Succeed => {
                let ack_id = uuid::Uuid::new_v4();
                tracing::debug!(
                    reference = %instruction.reference,
                    ack = %ack_id.simple(),
                    "Mock processor accepted transfer"
                );
                Ok(TransferAck {
                    status: "success".to_string(),
                })
            }
            MockBehavior::Decline => Err(ProcessorError::Declined(
                "insufficient float on mock rail".to_string(),
            )),
            MockBehavior::TimeOut => Err(ProcessorError::Timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn instruction() -> TransferInstruction {
        TransferInstruction {
            amount: Decimal::from(10),
            account_number: "0123456789".to_string(),
            bank_name: "Mock Trust Bank".to_string(),
            reference: "TRF-TEST".to_string(),
            narration: "test".to_string(),
        }
    }

    #[tokio::test]
    async fn test_account_numbers_are_deterministic() {
        let mock = MockProcessor::new();
        let a = mock.create_account("Ada", "080", "ada@example.com").await.unwrap();
        let b = mock.create_account("Ada", "080", "ada@example.com").await.unwrap();
        let c = mock.create_account("Ben", "081", "ben@example.com").await.unwrap();

        assert_eq!(a.account_number, b.account_number);
        assert_ne!(a.account_number, c.account_number);
        assert_eq!(a.account_number.len(), 10);
        assert!(a.account_number.chars().all(|ch| ch.is_ascii_digit()));
    }

    #[tokio::test]
    async fn test_scripted_outcomes() {
        let mock = MockProcessor::new();
        assert!(mock.transfer_funds(&instruction()).await.is_ok());

        mock.set_behavior(MockBehavior::Decline);
        assert!(matches!(
            mock.transfer_funds(&instruction()).await,
            Err(ProcessorError::Declined(_))
        ));

        mock.set_behavior(MockBehavior::TimeOut);
        assert!(matches!(
            mock.transfer_funds(&instruction()).await,
            Err(ProcessorError::Timeout)
        ));
    }
}
