//! HTTP handlers for the wallet API and the processor webhook endpoint.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
};
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;

use crate::ledger::{LedgerError, TransactionKind, TransactionStatus, coordinator::OpenAccount};
use crate::webhook::{SIGNATURE_HEADER, WebhookEvent, WebhookOutcome};

use super::state::AppState;
use super::types::{
    AccountData, ApiResponse, HealthResponse, HistoryQuery, OpenAccountRequest, TransactionData,
    TransferFundsRequest, WebhookAck, WithdrawFundsRequest, error_codes,
};

type ApiFailure = (StatusCode, Json<ApiResponse<()>>);

fn fail(e: LedgerError) -> ApiFailure {
    let (status, code) = match &e {
        LedgerError::AccountNotFound => (StatusCode::NOT_FOUND, error_codes::ACCOUNT_NOT_FOUND),
        LedgerError::TransactionNotFound(_) => {
            (StatusCode::NOT_FOUND, error_codes::TRANSACTION_NOT_FOUND)
        }
        LedgerError::AccountExists => (StatusCode::BAD_REQUEST, error_codes::ACCOUNT_EXISTS),
        LedgerError::InsufficientFunds => {
            (StatusCode::BAD_REQUEST, error_codes::INSUFFICIENT_FUNDS)
        }
        LedgerError::InvalidAmount | LedgerError::InvalidEvent(_) => {
            (StatusCode::BAD_REQUEST, error_codes::INVALID_PARAMETER)
        }
        LedgerError::InvalidTransition => (StatusCode::CONFLICT, error_codes::ALREADY_RESOLVED),
        LedgerError::Unauthorized => (StatusCode::UNAUTHORIZED, error_codes::AUTH_FAILED),
        LedgerError::GatewayTimeout
        | LedgerError::GatewayUnavailable(_)
        | LedgerError::GatewayDeclined(_) => {
            (StatusCode::BAD_GATEWAY, error_codes::GATEWAY_UNAVAILABLE)
        }
        LedgerError::Database(_)
        | LedgerError::DuplicateReference
        | LedgerError::DuplicateEvent(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, error_codes::INTERNAL_ERROR)
        }
    };
    (status, Json(ApiResponse::<()>::error(code, e.to_string())))
}

fn bad_request(msg: impl Into<String>) -> ApiFailure {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::<()>::error(error_codes::INVALID_PARAMETER, msg)),
    )
}

fn parse_amount(raw: &str) -> Result<Decimal, ApiFailure> {
    Decimal::from_str(raw).map_err(|_| bad_request(format!("Invalid amount: {}", raw)))
}

/// Service health
/// GET /health
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service and database health", body = ApiResponse<HealthResponse>)),
    tag = "System"
)]
pub async fn health(State(state): State<Arc<AppState>>) -> Json<ApiResponse<HealthResponse>> {
    let database = match state.db.health_check().await {
        Ok(()) => "up",
        Err(_) => "down",
    };
    Json(ApiResponse::success(HealthResponse {
        status: "ok".to_string(),
        database: database.to_string(),
    }))
}

/// Onboard a wallet account
/// POST /api/v1/accounts
#[utoipa::path(
    post,
    path = "/api/v1/accounts",
    request_body = OpenAccountRequest,
    responses(
        (status = 200, description = "Account created", body = ApiResponse<AccountData>),
        (status = 400, description = "Account already exists"),
        (status = 502, description = "Processor unavailable")
    ),
    tag = "Accounts"
)]
pub async fn open_account(
    State(state): State<Arc<AppState>>,
    Json(req): Json<OpenAccountRequest>,
) -> Result<Json<ApiResponse<AccountData>>, ApiFailure> {
    let account = state
        .coordinator
        .open_account(OpenAccount {
            owner_id: req.owner_id,
            name: req.name,
            phone: req.phone,
            email: req.email,
            currency: req.currency.unwrap_or_else(|| "NGN".to_string()),
        })
        .await
        .map_err(fail)?;

    Ok(Json(ApiResponse::success(account.into())))
}

/// Account and balance for an owner
/// GET /api/v1/accounts/{owner_id}
#[utoipa::path(
    get,
    path = "/api/v1/accounts/{owner_id}",
    params(("owner_id" = i64, Path, description = "Owner of the wallet account")),
    responses(
        (status = 200, description = "Account details", body = ApiResponse<AccountData>),
        (status = 404, description = "Account not found")
    ),
    tag = "Accounts"
)]
pub async fn get_account(
    State(state): State<Arc<AppState>>,
    Path(owner_id): Path<i64>,
) -> Result<Json<ApiResponse<AccountData>>, ApiFailure> {
    let account = state.coordinator.get_account(owner_id).await.map_err(fail)?;
    Ok(Json(ApiResponse::success(account.into())))
}

/// Transfer funds to an external account
/// POST /api/v1/transfers
#[utoipa::path(
    post,
    path = "/api/v1/transfers",
    request_body = TransferFundsRequest,
    responses(
        (status = 200, description = "Resulting transaction (pending, completed or failed)", body = ApiResponse<TransactionData>),
        (status = 400, description = "Insufficient funds or invalid parameters"),
        (status = 404, description = "Account not found")
    ),
    tag = "Transactions"
)]
pub async fn transfer_funds(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TransferFundsRequest>,
) -> Result<Json<ApiResponse<TransactionData>>, ApiFailure> {
    let amount = parse_amount(&req.amount)?;
    let txn = state
        .coordinator
        .transfer(req.owner_id, amount, &req.recipient_account_no, &req.recipient_bank)
        .await
        .map_err(fail)?;

    Ok(Json(ApiResponse::success(txn.into())))
}

/// Withdraw funds to the owner's registered external account
/// POST /api/v1/withdrawals
#[utoipa::path(
    post,
    path = "/api/v1/withdrawals",
    request_body = WithdrawFundsRequest,
    responses(
        (status = 200, description = "Resulting transaction", body = ApiResponse<TransactionData>),
        (status = 400, description = "Insufficient funds or invalid parameters"),
        (status = 404, description = "Account not found")
    ),
    tag = "Transactions"
)]
pub async fn withdraw_funds(
    State(state): State<Arc<AppState>>,
    Json(req): Json<WithdrawFundsRequest>,
) -> Result<Json<ApiResponse<TransactionData>>, ApiFailure> {
    let amount = parse_amount(&req.amount)?;
    let txn = state
        .coordinator
        .withdraw(req.owner_id, amount)
        .await
        .map_err(fail)?;

    Ok(Json(ApiResponse::success(txn.into())))
}

/// Transaction history, filtered
/// GET /api/v1/transactions
#[utoipa::path(
    get,
    path = "/api/v1/transactions",
    params(HistoryQuery),
    responses(
        (status = 200, description = "Transactions, newest first", body = ApiResponse<Vec<TransactionData>>),
        (status = 404, description = "Account not found")
    ),
    tag = "Transactions"
)]
pub async fn transaction_history(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<ApiResponse<Vec<TransactionData>>>, ApiFailure> {
    let kind = query
        .kind
        .as_deref()
        .map(TransactionKind::from_str)
        .transpose()
        .map_err(bad_request)?;
    let status = query
        .status
        .as_deref()
        .map(TransactionStatus::from_str)
        .transpose()
        .map_err(bad_request)?;

    let transactions = state
        .coordinator
        .transaction_history(query.owner_id, kind, status)
        .await
        .map_err(fail)?;

    Ok(Json(ApiResponse::success(
        transactions.into_iter().map(TransactionData::from).collect(),
    )))
}

/// Processor webhook endpoint
/// POST /webhooks/processor
///
/// Acknowledges once the event is durably processed or recognized as a
/// replay; rejects bad signatures with 401 and processing errors with a
/// generic failure so the processor redelivers.
#[utoipa::path(
    post,
    path = "/webhooks/processor",
    request_body(content = String, description = "Signed processor event", content_type = "application/json"),
    responses(
        (status = 200, description = "Event processed or replay acknowledged", body = ApiResponse<WebhookAck>),
        (status = 401, description = "Invalid webhook signature"),
        (status = 500, description = "Processing error, upstream should retry")
    ),
    tag = "Webhooks"
)]
pub async fn processor_webhook(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ApiResponse<WebhookAck>>, ApiFailure> {
    // Authenticity gate before anything touches the payload
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok());
    state.reconciler.verify(&body, signature).map_err(fail)?;

    let event: WebhookEvent = serde_json::from_slice(&body)
        .map_err(|e| bad_request(format!("Malformed webhook event: {}", e)))?;

    let event_id = event.id.clone();
    match state.reconciler.process(event).await {
        Ok(WebhookOutcome::Processed) => Ok(Json(ApiResponse::success(WebhookAck {
            message: "Webhook processed".to_string(),
        }))),
        Ok(WebhookOutcome::Replay) => Ok(Json(ApiResponse::success(WebhookAck {
            message: "Replay acknowledged".to_string(),
        }))),
        Ok(WebhookOutcome::Ignored) => Ok(Json(ApiResponse::success(WebhookAck {
            message: "Event ignored".to_string(),
        }))),
        Err(e) => {
            tracing::error!(event_id = %event_id, error = %e, "Webhook processing error");
            Err(fail(e))
        }
    }
}
