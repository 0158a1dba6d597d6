//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use medrec_auth::AuthError;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler or the access guard.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("unauthenticated: {0}")]
  Unauthenticated(&'static str),

  #[error("forbidden")]
  Forbidden,

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("not found: {0}")]
  NotFound(String),

  #[error("internal error: {0}")]
  Internal(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<medrec_core::Error> for ApiError {
  fn from(e: medrec_core::Error) -> Self {
    use medrec_core::Error;
    match e {
      Error::NotFound(_) => ApiError::NotFound("patient not found".to_string()),
      Error::Validation(m) => ApiError::BadRequest(m),
      e @ (Error::UnknownRole(_) | Error::UnknownGender(_)) => {
        ApiError::BadRequest(e.to_string())
      }
      Error::Storage(e) => ApiError::Internal(e),
    }
  }
}

impl From<AuthError> for ApiError {
  fn from(e: AuthError) -> Self {
    match e {
      AuthError::InvalidCredentials => {
        ApiError::Unauthenticated("invalid credentials")
      }
      AuthError::InvalidToken(_) => ApiError::Unauthenticated("invalid token"),
      other => ApiError::Internal(Box::new(other)),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::Unauthenticated(m) => (StatusCode::UNAUTHORIZED, (*m).to_string()),
      ApiError::Forbidden => {
        (StatusCode::FORBIDDEN, "insufficient permissions".to_string())
      }
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::Internal(e) => {
        tracing::error!(error = %e, "request failed");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          "internal server error".to_string(),
        )
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
