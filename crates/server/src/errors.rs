use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ErrorBody;
use service::PagerError;
use thiserror::Error;
use tracing::error;

#[derive(Debug)]
pub struct ApiError(pub StatusCode, pub String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let ApiError(status, msg) = self;
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %msg, "request failed");
        }
        (status, Json(ErrorBody { error: msg })).into_response()
    }
}

impl From<PagerError> for ApiError {
    fn from(e: PagerError) -> Self {
        ApiError(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    }
}

impl From<RedirectError> for ApiError {
    fn from(e: RedirectError) -> Self {
        ApiError(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RedirectError {
    #[error("invalid redirect location: {0:?}")]
    InvalidLocation(String),
}

impl IntoResponse for RedirectError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
