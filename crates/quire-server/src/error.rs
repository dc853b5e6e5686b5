//! Error type and axum `IntoResponse` implementation.

use axum::{
  Json,
  extract::rejection::JsonRejection,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error that ends request processing.
#[derive(Debug, Error)]
pub enum Error {
  /// A token was presented but the verifier rejected it or could not be
  /// asked. Reported as a malformed request.
  #[error("invalid auth token: {0}")]
  InvalidToken(#[from] quire_core::Error),

  /// The request body could not be read as the expected JSON document.
  #[error("bad request body: {}", .0.body_text())]
  BadBody(#[from] JsonRejection),

  #[error("not authenticated")]
  Unauthenticated,

  #[error("not found: {0}")]
  NotFound(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    let status = match &self {
      Error::InvalidToken(_) => StatusCode::BAD_REQUEST,
      Error::BadBody(rejection) => rejection.status(),
      Error::Unauthenticated => StatusCode::UNAUTHORIZED,
      Error::NotFound(_) => StatusCode::NOT_FOUND,
      Error::Store(e) => {
        tracing::error!(error = %e, "store request failed");
        StatusCode::INTERNAL_SERVER_ERROR
      }
    };
    (status, Json(json!({ "error": self.to_string() }))).into_response()
  }
}
