//! Identity resolution and write-gate middlewares.
//!
//! [`resolve_identity`] runs on every `/api` request and attaches an
//! [`Identity`] extension. [`require_verified`] sits in front of mutating
//! routes only, so anonymous callers can still read.

use axum::{
  extract::{Request, State},
  middleware::Next,
  response::Response,
};
use quire_core::{identity::Identity, store::ArticleStore, verify::IdentityVerifier};

use crate::{AppState, error::Error};

/// Request header carrying the caller's token.
pub const AUTH_TOKEN_HEADER: &str = "authtoken";

/// Resolve the caller's identity and attach it to the request.
///
/// No header, or an empty one, means [`Identity::Anonymous`]. A token the
/// verifier does not accept ends the request with `400 Bad Request`.
pub async fn resolve_identity<S, V>(
  State(state): State<AppState<S, V>>,
  mut req: Request,
  next: Next,
) -> Result<Response, Error>
where
  S: ArticleStore + 'static,
  V: IdentityVerifier + 'static,
{
  let token = req
    .headers()
    .get(AUTH_TOKEN_HEADER)
    .map(|v| {
      v.to_str().map(str::to_owned).map_err(|_| {
        quire_core::Error::InvalidToken("header is not visible ASCII".to_string())
      })
    })
    .transpose()?
    .filter(|t| !t.is_empty());

  let identity = match token {
    None => Identity::Anonymous,
    Some(token) => match state.verifier.verify(&token).await {
      Ok(verified) => Identity::Verified(verified),
      Err(e) => {
        tracing::warn!(error = %e, "rejected auth token");
        return Err(e.into());
      }
    },
  };

  req.extensions_mut().insert(identity);
  Ok(next.run(req).await)
}

/// Let the request through only if [`resolve_identity`] verified the caller.
pub async fn require_verified(req: Request, next: Next) -> Result<Response, Error> {
  let anonymous = req
    .extensions()
    .get::<Identity>()
    .is_none_or(Identity::is_anonymous);
  if anonymous {
    tracing::debug!(path = %req.uri().path(), "anonymous write rejected");
    return Err(Error::Unauthenticated);
  }
  Ok(next.run(req).await)
}
