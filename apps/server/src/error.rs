use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use wealthdesk_ai::AiError;
use wealthdesk_core::errors::{DatabaseError, Error as CoreError};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
    /// Message is safe to show; the cause has already been logged.
    #[error("{0}")]
    Internal(String),
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

impl ApiError {
    pub fn not_found(what: &str) -> Self {
        ApiError::NotFound(format!("{} not found", what))
    }

    /// Logs `err` and hides it behind `message`.
    pub fn failed(message: &str, err: impl std::fmt::Display) -> Self {
        tracing::error!("{}: {}", message, err);
        ApiError::Internal(message.to_string())
    }

    /// Maps an advisor failure; bad input stays a 400.
    pub fn from_ai(message: &str, err: AiError) -> Self {
        match err {
            AiError::InvalidInput(reason) => ApiError::BadRequest(reason),
            AiError::Core(core) => ApiError::Core(core),
            other => {
                tracing::error!("{} [{}]: {}", message, other.code(), other);
                ApiError::Internal(message.to_string())
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

fn core_status(err: &CoreError) -> (StatusCode, String) {
    match err {
        CoreError::NotFound(msg) | CoreError::Database(DatabaseError::NotFound(msg)) => {
            (StatusCode::NOT_FOUND, msg.clone())
        }
        CoreError::Validation(_) | CoreError::Import(_) => {
            (StatusCode::BAD_REQUEST, err.to_string())
        }
        CoreError::ConstraintViolation(msg)
        | CoreError::Database(DatabaseError::UniqueViolation(msg)) => {
            (StatusCode::CONFLICT, msg.clone())
        }
        _ => {
            tracing::error!("Request failed: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg) = match &self {
            ApiError::Core(e) => core_status(e),
            ApiError::NotFound(reason) => (StatusCode::NOT_FOUND, reason.clone()),
            ApiError::BadRequest(reason) => (StatusCode::BAD_REQUEST, reason.clone()),
            ApiError::Internal(reason) => (StatusCode::INTERNAL_SERVER_ERROR, reason.clone()),
            ApiError::Anyhow(e) => {
                tracing::error!("Request failed: {:#}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: msg,
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
