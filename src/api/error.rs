//! HTTP error mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::types::LedgerError;

/// Errors surfaced by the HTTP boundary
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request itself was malformed
    #[error("{0}")]
    BadRequest(String),
    /// The ledger refused or failed the operation
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl ApiError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Ledger(LedgerError::AccountNotFound(_)) => StatusCode::NOT_FOUND,
            Self::Ledger(LedgerError::NotEnoughFunds { .. }) => StatusCode::BAD_REQUEST,
            Self::Ledger(LedgerError::Validation(_)) => StatusCode::BAD_REQUEST,
            Self::Ledger(LedgerError::Storage(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message returned to the client
    pub fn message(&self) -> String {
        match self {
            Self::Ledger(LedgerError::AccountNotFound(_)) => {
                "create account by making a valid deposit first".to_string()
            }
            Self::Ledger(LedgerError::NotEnoughFunds { .. }) => {
                "not enough funds in account".to_string()
            }
            Self::Ledger(LedgerError::Validation(msg)) => msg.clone(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }
        (status, Json(json!({ "error": self.message() }))).into_response()
    }
}
