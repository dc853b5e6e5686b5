pub mod articles;

use crate::error::Error;

/// Fallback for `/api` paths that match no route.
pub(crate) async fn api_not_found() -> Error {
  Error::NotFound("no such endpoint".to_string())
}
