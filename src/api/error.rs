use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::error::CashflowError;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Infeasible(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            ApiError::Infeasible(msg) => (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": msg })),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": msg })),
        };
        (status, axum::Json(body)).into_response()
    }
}

impl From<CashflowError> for ApiError {
    fn from(err: CashflowError) -> Self {
        match err {
            CashflowError::InvalidAmount { .. } | CashflowError::InvalidPlan(_) => {
                ApiError::BadRequest(err.to_string())
            }
            CashflowError::Infeasible { .. } => ApiError::Infeasible(err.to_string()),
            CashflowError::BackendUnavailable
            | CashflowError::SolverTimeout { .. }
            | CashflowError::SolverBug(_) => ApiError::Internal(err.to_string()),
        }
    }
}
