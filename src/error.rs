use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Client-caused: missing/invalid fields, bad upload, duplicate title.
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    /// Store or media-host failure; the underlying message is forwarded.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    fn kind(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "validation",
            ApiError::NotFound(_) => "not_found",
            ApiError::Internal(_) => "internal",
        }
    }
}

impl From<sea_orm::DbErr> for ApiError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Internal(anyhow::Error::new(err))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::Internal(anyhow::Error::new(err))
    }
}

/// One discriminated error shape for every API failure.
#[derive(Debug, Serialize)]
struct ErrorBody {
    kind: &'static str,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(err) => {
                tracing::error!(error = %err, "internal server error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = ErrorBody { kind: self.kind(), message: self.to_string() };
        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
