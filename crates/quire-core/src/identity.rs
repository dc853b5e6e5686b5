//! Per-request caller identity.
//!
//! An identity is either anonymous (no token was presented) or verified by
//! the configured [`IdentityVerifier`](crate::verify::IdentityVerifier).
//! Downstream code matches on the variant instead of probing optional fields.

use serde::{Deserialize, Serialize};

/// A principal whose token was accepted by the identity verifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedIdentity {
  pub uid:   String,
  pub email: String,
}

/// The caller of a single request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Identity {
  #[default]
  Anonymous,
  Verified(VerifiedIdentity),
}

impl Identity {
  pub fn verified(&self) -> Option<&VerifiedIdentity> {
    match self {
      Self::Anonymous => None,
      Self::Verified(v) => Some(v),
    }
  }

  pub fn uid(&self) -> Option<&str> { self.verified().map(|v| v.uid.as_str()) }

  pub fn is_anonymous(&self) -> bool { matches!(self, Self::Anonymous) }
}

impl From<VerifiedIdentity> for Identity {
  fn from(v: VerifiedIdentity) -> Self { Self::Verified(v) }
}
