//! Error types for `quire-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The token was rejected by the verifier (malformed, expired, revoked).
  #[error("token rejected: {0}")]
  InvalidToken(String),

  /// The verifier could not be reached or answered nonsensically.
  #[error("identity verifier unavailable: {0}")]
  VerifierUnavailable(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
