//! HTTP error mapping
//!
//! Maps core errors to status codes and response bodies. Internal error text
//! is never sent to the client.

use ::todo_core::TodoError;
use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Body returned for an unknown todo id
pub const NOT_FOUND_MESSAGE: &str = "ToDo ID not found!";

/// API-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("ToDo ID not found!")]
    NotFound,

    #[error("{0}")]
    Validation(String),

    #[error("Internal Server Error")]
    Internal,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<TodoError> for ApiError {
    fn from(err: TodoError) -> Self {
        match err {
            TodoError::NotFound(_) => ApiError::NotFound,
            TodoError::Validation(msg) => ApiError::Validation(msg),
            TodoError::Database(_) | TodoError::Configuration(_) | TodoError::Internal(_) => {
                ApiError::Internal
            }
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            ApiError::NotFound => (status, Json(json!(NOT_FOUND_MESSAGE))).into_response(),
            ApiError::Validation(detail) => {
                (status, Json(json!({ "detail": detail }))).into_response()
            }
            ApiError::Internal => {
                (status, Json(json!({ "detail": "Internal Server Error" }))).into_response()
            }
        }
    }
}
