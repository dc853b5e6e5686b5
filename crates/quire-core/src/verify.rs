//! The `IdentityVerifier` trait.

use std::future::Future;

use crate::{Result, identity::VerifiedIdentity};

/// Turns an opaque bearer token into a verified identity.
///
/// Implementations fail with [`Error::InvalidToken`](crate::Error::InvalidToken)
/// when the token is rejected and
/// [`Error::VerifierUnavailable`](crate::Error::VerifierUnavailable) when no
/// answer could be obtained.
pub trait IdentityVerifier: Send + Sync {
  fn verify<'a>(
    &'a self,
    token: &'a str,
  ) -> impl Future<Output = Result<VerifiedIdentity>> + Send + 'a;
}
