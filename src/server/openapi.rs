//! OpenAPI / Swagger UI Documentation
//!
//! - Swagger UI: `http://localhost:8080/docs`
//! - OpenAPI JSON: `http://localhost:8080/api-docs/openapi.json`

use utoipa::OpenApi;

use super::types::{
    AccountData, ApiResponse, HealthResponse, OpenAccountRequest, TransactionData,
    TransferFundsRequest, WebhookAck, WithdrawFundsRequest,
};

/// Main API Documentation struct
#[derive(OpenApi)]
#[openapi(
    info(
        title = "walletd API",
        version = "0.1.0",
        description = "Custodial wallet ledger: accounts, transfers, withdrawals, and processor webhook reconciliation.",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Development"),
    ),
    paths(
        crate::server::handlers::health,
        crate::server::handlers::open_account,
        crate::server::handlers::get_account,
        crate::server::handlers::transfer_funds,
        crate::server::handlers::withdraw_funds,
        crate::server::handlers::transaction_history,
        crate::server::handlers::processor_webhook,
    ),
    components(
        schemas(
            ApiResponse<AccountData>,
            ApiResponse<TransactionData>,
            ApiResponse<HealthResponse>,
            ApiResponse<WebhookAck>,
            OpenAccountRequest,
            TransferFundsRequest,
            WithdrawFundsRequest,
            AccountData,
            TransactionData,
            HealthResponse,
            WebhookAck,
        )
    ),
    tags(
        (name = "Accounts", description = "Account onboarding and balances"),
        (name = "Transactions", description = "Funds movement and history"),
        (name = "Webhooks", description = "Processor event reconciliation"),
        (name = "System", description = "Health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_doc_generates() {
        let doc = ApiDoc::openapi();
        let json = doc.to_json().expect("OpenAPI doc should serialize");
        assert!(json.contains("/api/v1/transfers"));
        assert!(json.contains("/webhooks/processor"));
    }
}
