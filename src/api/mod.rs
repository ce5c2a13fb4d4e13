//! HTTP boundary over the transaction manager.
//!
//! Parses account ids and amounts, clamps pagination input and maps ledger
//! errors to status codes. Nothing here touches balances directly.

pub mod error;

pub use error::ApiError;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    routing::{get, post},
    Json, Router,
};
use bigdecimal::BigDecimal;
use serde::Deserialize;
use serde_json::{json, Value};
use std::str::FromStr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::warn;
use uuid::Uuid;

use crate::config::ApiConfig;
use crate::ledger::TransactionManager;
use crate::traits::LedgerStore;
use crate::utils::validation::{clamp_limit, clamp_page};

/// State shared across handlers
pub struct AppState<S: LedgerStore> {
    pub manager: Arc<TransactionManager<S>>,
    pub config: ApiConfig,
}

impl<S: LedgerStore> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            manager: Arc::clone(&self.manager),
            config: self.config.clone(),
        }
    }
}

impl<S: LedgerStore> AppState<S> {
    pub fn new(manager: TransactionManager<S>, config: ApiConfig) -> Self {
        Self {
            manager: Arc::new(manager),
            config,
        }
    }
}

/// Request body for deposits and withdrawals
#[derive(Debug, Deserialize)]
pub struct AmountRequest {
    pub amount: serde_json::Number,
}

/// Query parameters for listing transactions
#[derive(Debug, Default, Deserialize)]
pub struct TransactionsQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Creates the ledger router
pub fn create_router<S: LedgerStore + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route("/account/{id}", get(get_account::<S>))
        .route("/account/{id}/deposit", post(deposit::<S>))
        .route("/account/{id}/withdrawal", post(withdrawal::<S>))
        .route("/account/{id}/transactions", get(list_transactions::<S>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn parse_account_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|e| {
        warn!(account_id = %raw, "invalid account id");
        ApiError::BadRequest(e.to_string())
    })
}

// Reads the number through its decimal text so 20.6 stays 20.6
fn parse_amount(
    account_id: Uuid,
    payload: Result<Json<AmountRequest>, JsonRejection>,
) -> Result<BigDecimal, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!(account_id = %account_id, error = %rejection, "invalid amount body");
        ApiError::BadRequest(rejection.body_text())
    })?;

    let amount = BigDecimal::from_str(&request.amount.to_string())
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;
    if amount <= BigDecimal::from(0) {
        return Err(ApiError::BadRequest("amount must be positive".to_string()));
    }
    Ok(amount)
}

// Integers beyond i64 saturate instead of failing, so they clamp like any other
// out-of-range value. Empty values count as absent.
fn parse_query_number(name: &str, raw: Option<&str>) -> Result<Option<i64>, ApiError> {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(None);
    };
    if let Ok(value) = raw.parse::<i64>() {
        return Ok(Some(value));
    }

    let (negative, digits) = match raw.as_bytes()[0] {
        b'-' => (true, &raw[1..]),
        b'+' => (false, &raw[1..]),
        _ => (false, raw),
    };
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(Some(if negative { i64::MIN } else { i64::MAX }));
    }
    Err(ApiError::BadRequest(format!("{name} must be an integer")))
}

/// GET `/account/{id}` - fetch an account, creating it on first access
async fn get_account<S: LedgerStore + 'static>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let account_id = parse_account_id(&id)?;
    let account = state.manager.get_account(account_id).await?;
    Ok(Json(json!({ "account": account })))
}

/// POST `/account/{id}/deposit` - record a deposit
async fn deposit<S: LedgerStore + 'static>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    payload: Result<Json<AmountRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let account_id = parse_account_id(&id)?;
    let amount = parse_amount(account_id, payload)?;
    let transaction = state.manager.add_deposit(account_id, &amount).await?;
    Ok(Json(json!({ "transaction": transaction })))
}

/// POST `/account/{id}/withdrawal` - record a withdrawal
async fn withdrawal<S: LedgerStore + 'static>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    payload: Result<Json<AmountRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let account_id = parse_account_id(&id)?;
    let amount = parse_amount(account_id, payload)?;
    let transaction = state.manager.add_withdrawal(account_id, &amount).await?;
    Ok(Json(json!({ "transaction": transaction })))
}

/// GET `/account/{id}/transactions` - list transactions, most recent first
async fn list_transactions<S: LedgerStore + 'static>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    query: Result<Query<TransactionsQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let account_id = parse_account_id(&id)?;
    let Query(query) = query.map_err(|rejection| {
        warn!(account_id = %account_id, error = %rejection, "invalid pagination query");
        ApiError::BadRequest(rejection.body_text())
    })?;

    let page = clamp_page(parse_query_number("page", query.page.as_deref())?);
    let limit = clamp_limit(
        parse_query_number("limit", query.limit.as_deref())?,
        state.config.max_page_limit,
    );

    let result = state
        .manager
        .get_transactions(account_id, page, limit)
        .await?;
    Ok(Json(json!({
        "transactions": result.transactions,
        "next_page": result.next_page,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::memory_storage::MemoryStore;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_app() -> Router {
        let manager = TransactionManager::new(MemoryStore::new());
        create_router(AppState::new(manager, ApiConfig::default()))
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("Content-Type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_deposit_then_get_account() {
        let app = test_app();
        let id = Uuid::new_v4();

        let (status, body) = send(
            &app,
            "POST",
            &format!("/account/{id}/deposit"),
            Some(r#"{"amount": 10.555}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["transaction"]["amount"], "10.55");
        assert_eq!(body["transaction"]["type"], "deposit");

        let (status, body) = send(&app, "GET", &format!("/account/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["account"]["id"], id.to_string());
        assert_eq!(body["account"]["balance"], "10.55");
    }

    #[tokio::test]
    async fn test_withdrawal_uses_written_decimal() {
        let app = test_app();
        let id = Uuid::new_v4();

        send(&app, "POST", &format!("/account/{id}/deposit"), Some(r#"{"amount": 20.6}"#)).await;
        let (status, body) = send(
            &app,
            "POST",
            &format!("/account/{id}/withdrawal"),
            Some(r#"{"amount": 10.71}"#),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["transaction"]["amount"], "-10.71");
        assert_eq!(body["transaction"]["type"], "withdrawal");

        let (_, body) = send(&app, "GET", &format!("/account/{id}"), None).await;
        assert_eq!(body["account"]["balance"], "9.89");
    }

    #[tokio::test]
    async fn test_withdrawal_error_statuses() {
        let app = test_app();
        let id = Uuid::new_v4();

        let (status, body) = send(
            &app,
            "POST",
            &format!("/account/{id}/withdrawal"),
            Some(r#"{"amount": 10}"#),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "create account by making a valid deposit first");

        send(&app, "POST", &format!("/account/{id}/deposit"), Some(r#"{"amount": 1}"#)).await;
        let (status, body) = send(
            &app,
            "POST",
            &format!("/account/{id}/withdrawal"),
            Some(r#"{"amount": 2}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "not enough funds in account");
    }

    #[tokio::test]
    async fn test_new_and_drained_accounts_show_cents() {
        let app = test_app();
        let id = Uuid::new_v4();

        let (status, body) = send(&app, "GET", &format!("/account/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["account"]["balance"], "0.00");

        send(&app, "POST", &format!("/account/{id}/deposit"), Some(r#"{"amount": 5}"#)).await;
        let (_, body) = send(
            &app,
            "POST",
            &format!("/account/{id}/withdrawal"),
            Some(r#"{"amount": 5}"#),
        )
        .await;
        assert_eq!(body["transaction"]["amount"], "-5.00");

        let (_, body) = send(&app, "GET", &format!("/account/{id}"), None).await;
        assert_eq!(body["account"]["balance"], "0.00");
    }

    #[test]
    fn test_parse_query_number() {
        assert_eq!(parse_query_number("limit", None).unwrap(), None);
        assert_eq!(parse_query_number("limit", Some("")).unwrap(), None);
        assert_eq!(parse_query_number("limit", Some("10")).unwrap(), Some(10));
        assert_eq!(parse_query_number("page", Some("-3")).unwrap(), Some(-3));
        assert_eq!(
            parse_query_number("limit", Some("99999999999999999999")).unwrap(),
            Some(i64::MAX)
        );
        assert_eq!(
            parse_query_number("page", Some("-99999999999999999999")).unwrap(),
            Some(i64::MIN)
        );
        assert!(parse_query_number("limit", Some("ten")).is_err());
        assert!(parse_query_number("limit", Some("-")).is_err());
    }

    #[tokio::test]
    async fn test_huge_pagination_values_clamp() {
        let app = test_app();
        let id = Uuid::new_v4();
        for _ in 0..30 {
            send(&app, "POST", &format!("/account/{id}/deposit"), Some(r#"{"amount": 1}"#)).await;
        }

        let (status, body) = send(
            &app,
            "GET",
            &format!("/account/{id}/transactions?page=-99999999999999999999&limit=99999999999999999999"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["transactions"].as_array().unwrap().len(), 25);
        assert_eq!(body["next_page"], 1);

        let (status, _) = send(&app, "GET", &format!("/account/{id}/transactions?limit=ten"), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_rejects_bad_input() {
        let app = test_app();
        let id = Uuid::new_v4();

        let (status, _) = send(&app, "GET", "/account/not-a-uuid", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(
            &app,
            "POST",
            &format!("/account/{id}/deposit"),
            Some(r#"{"amount": 0}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "amount must be positive");

        let (status, _) = send(
            &app,
            "POST",
            &format!("/account/{id}/deposit"),
            Some(r#"{"amount": "ten"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        // Nothing above should have provisioned the account
        let (status, _) = send(&app, "GET", &format!("/account/{id}/transactions"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_transactions_clamps_pagination() {
        let app = test_app();
        let id = Uuid::new_v4();
        for _ in 0..30 {
            send(&app, "POST", &format!("/account/{id}/deposit"), Some(r#"{"amount": 1}"#)).await;
        }

        let (status, body) = send(&app, "GET", &format!("/account/{id}/transactions"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["transactions"].as_array().unwrap().len(), 25);
        assert_eq!(body["next_page"], 1);

        let (_, body) = send(
            &app,
            "GET",
            &format!("/account/{id}/transactions?page=-4&limit=100"),
            None,
        )
        .await;
        assert_eq!(body["transactions"].as_array().unwrap().len(), 25);
        assert_eq!(body["next_page"], 1);

        let (_, body) = send(
            &app,
            "GET",
            &format!("/account/{id}/transactions?page=1&limit=25"),
            None,
        )
        .await;
        assert_eq!(body["transactions"].as_array().unwrap().len(), 5);
        assert_eq!(body["next_page"], 0);

        let (_, body) = send(
            &app,
            "GET",
            &format!("/account/{id}/transactions?page=2&limit=10"),
            None,
        )
        .await;
        assert_eq!(body["transactions"].as_array().unwrap().len(), 10);
        assert_eq!(body["next_page"], 0);
    }
}
