//! Identity verifier implementations.
//!
//! - [`StaticTokenVerifier`] matches SHA-256 digests of tokens listed in the
//!   configuration. Meant for local development and tests.
//! - [`RemoteVerifier`] delegates to an external HTTP token-verification
//!   service.
//! - [`ConfiguredVerifier`] picks one of the two from [`VerifierConfig`].

use std::{collections::HashMap, time::Duration};

use quire_core::{Error, Result, identity::VerifiedIdentity, verify::IdentityVerifier};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

// ─── Configuration ────────────────────────────────────────────────────────────

/// The `[verifier]` table of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum VerifierConfig {
  Static {
    #[serde(default)]
    tokens: Vec<StaticToken>,
  },
  Remote {
    url:          String,
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,
  },
}

impl Default for VerifierConfig {
  /// No tokens at all: every presented token is rejected.
  fn default() -> Self { Self::Static { tokens: Vec::new() } }
}

fn default_timeout_secs() -> u64 { 10 }

/// One accepted token, stored as the hex SHA-256 of the token itself.
#[derive(Debug, Clone, Deserialize)]
pub struct StaticToken {
  pub token_sha256: String,
  pub uid:          String,
  pub email:        String,
}

/// Lower-case hex SHA-256 of `token`, as stored in [`StaticToken`].
pub fn hash_token(token: &str) -> String { hex::encode(Sha256::digest(token.as_bytes())) }

// ─── Static ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct StaticTokenVerifier {
  by_digest: HashMap<String, VerifiedIdentity>,
}

impl StaticTokenVerifier {
  pub fn new(tokens: impl IntoIterator<Item = StaticToken>) -> Self {
    let by_digest = tokens
      .into_iter()
      .map(|t| {
        let identity = VerifiedIdentity { uid: t.uid, email: t.email };
        (t.token_sha256.to_ascii_lowercase(), identity)
      })
      .collect();
    Self { by_digest }
  }
}

impl IdentityVerifier for StaticTokenVerifier {
  async fn verify(&self, token: &str) -> Result<VerifiedIdentity> {
    self
      .by_digest
      .get(&hash_token(token))
      .cloned()
      .ok_or_else(|| Error::InvalidToken("unknown token".to_string()))
  }
}

// ─── Remote ───────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct VerifyRequest<'a> {
  token: &'a str,
}

/// Verifies tokens by POSTing `{"token": "..."}` to `url`.
///
/// A 2xx answer carrying `{"uid": "...", "email": "..."}` accepts the token;
/// any other status rejects it. Transport failures and unparseable answers
/// mean the verifier is unavailable.
#[derive(Debug, Clone)]
pub struct RemoteVerifier {
  client: reqwest::Client,
  url:    String,
}

impl RemoteVerifier {
  pub fn new(url: impl Into<String>, timeout: Duration) -> reqwest::Result<Self> {
    let client = reqwest::Client::builder().timeout(timeout).build()?;
    Ok(Self { client, url: url.into() })
  }
}

impl IdentityVerifier for RemoteVerifier {
  async fn verify(&self, token: &str) -> Result<VerifiedIdentity> {
    let resp = self
      .client
      .post(&self.url)
      .json(&VerifyRequest { token })
      .send()
      .await
      .map_err(|e| Error::VerifierUnavailable(e.to_string()))?;

    let status = resp.status();
    if !status.is_success() {
      return Err(Error::InvalidToken(format!("verifier answered {status}")));
    }

    resp
      .json::<VerifiedIdentity>()
      .await
      .map_err(|e| Error::VerifierUnavailable(format!("unreadable verifier answer: {e}")))
  }
}

// ─── Configured ───────────────────────────────────────────────────────────────

/// The verifier selected by [`VerifierConfig`].
#[derive(Debug, Clone)]
pub enum ConfiguredVerifier {
  Static(StaticTokenVerifier),
  Remote(RemoteVerifier),
}

impl ConfiguredVerifier {
  pub fn from_config(config: &VerifierConfig) -> reqwest::Result<Self> {
    Ok(match config {
      VerifierConfig::Static { tokens } => {
        Self::Static(StaticTokenVerifier::new(tokens.iter().cloned()))
      }
      VerifierConfig::Remote { url, timeout_secs } => Self::Remote(RemoteVerifier::new(
        url.clone(),
        Duration::from_secs(*timeout_secs),
      )?),
    })
  }
}

impl IdentityVerifier for ConfiguredVerifier {
  async fn verify(&self, token: &str) -> Result<VerifiedIdentity> {
    match self {
      Self::Static(v) => v.verify(token).await,
      Self::Remote(v) => v.verify(token).await,
    }
  }
}
