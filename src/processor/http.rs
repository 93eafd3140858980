//! HTTP client for the hosted payment processor.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::ProcessorConfig;

use super::{IssuedAccount, ProcessorClient, ProcessorError, TransferAck, TransferInstruction};

#[derive(Debug)]
pub struct HttpProcessor {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct GenerateAccountRequest<'a> {
    first_name: &'a str,
    last_name: &'a str,
    phone: &'a str,
    email: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateAccountResponse {
    data: GenerateAccountData,
}

#[derive(Debug, Deserialize)]
struct GenerateAccountData {
    account_number: String,
    bank: String,
}

#[derive(Debug, Serialize)]
struct CreateTransferRequest<'a> {
    amount: String,
    account_number: &'a str,
    bank_name: &'a str,
    narration: &'a str,
    reference: &'a str,
}

#[derive(Debug, Deserialize)]
struct CreateTransferResponse {
    status: String,
}

impl HttpProcessor {
    pub fn new(config: &ProcessorConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .expect("Failed to build processor HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    fn map_error(e: reqwest::Error) -> ProcessorError {
        if e.is_timeout() {
            ProcessorError::Timeout
        } else {
            ProcessorError::Unavailable(e.to_string())
        }
    }
}

#[async_trait]
impl ProcessorClient for HttpProcessor {
    async fn create_account(
        &self,
        name: &str,
        phone: &str,
        email: &str,
    ) -> Result<IssuedAccount, ProcessorError> {
        let mut parts = name.splitn(2, ' ');
        let first_name = parts.next().unwrap_or("");
        let last_name = parts.next().unwrap_or("");

        let response = self
            .client
            .post(format!("{}/v1/pwbt/generate_account", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&GenerateAccountRequest {
                first_name,
                last_name,
                phone,
                email,
            })
            .send()
            .await
            .map_err(Self::map_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ProcessorError::Declined(format!("{}: {}", status, body)));
        }

        let parsed: GenerateAccountResponse =
            response.json().await.map_err(Self::map_error)?;

        Ok(IssuedAccount {
            account_number: parsed.data.account_number,
            bank_name: parsed.data.bank,
        })
    }

    async fn transfer_funds(
        &self,
        instruction: &TransferInstruction,
    ) -> Result<TransferAck, ProcessorError> {
        let response = self
            .client
            .post(format!("{}/v1/transfers/create", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&CreateTransferRequest {
                amount: instruction.amount.to_string(),
                account_number: &instruction.account_number,
                bank_name: &instruction.bank_name,
                narration: &instruction.narration,
                reference: &instruction.reference,
            })
            .send()
            .await
            .map_err(Self::map_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ProcessorError::Declined(format!("{}: {}", status, body)));
        }

        let parsed: CreateTransferResponse =
            response.json().await.map_err(Self::map_error)?;

        Ok(TransferAck {
            status: parsed.status,
        })
    }
}
