//! HTTP layer for Quire.
//!
//! Exposes an axum [`Router`] serving article engagement data from any
//! [`ArticleStore`], with identities resolved by any [`IdentityVerifier`].
//! Optionally hosts the browser client's build directory on every non-`/api`
//! path.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod verify;

pub use error::Error;

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::{
  Router, middleware,
  routing::{get, post, put},
};
use quire_core::{store::ArticleStore, verify::IdentityVerifier};
use serde::Deserialize;
use tower_http::{
  services::{ServeDir, ServeFile},
  trace::TraceLayer,
};

use handlers::articles;
use verify::VerifierConfig;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `QUIRE_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:       String,
  #[serde(default = "default_port")]
  pub port:       u16,
  #[serde(default = "default_store_path")]
  pub store_path: PathBuf,
  /// The browser client's build output. Not served when unset.
  #[serde(default)]
  pub static_dir: Option<PathBuf>,
  #[serde(default)]
  pub verifier:   VerifierConfig,
}

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 8000 }

fn default_store_path() -> PathBuf { PathBuf::from("quire.db") }

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers and middlewares.
pub struct AppState<S, V> {
  pub store:    Arc<S>,
  pub verifier: Arc<V>,
}

impl<S, V> Clone for AppState<S, V> {
  fn clone(&self) -> Self {
    Self {
      store:    self.store.clone(),
      verifier: self.verifier.clone(),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the application [`Router`].
///
/// Every `/api` request passes through [`auth::resolve_identity`]; the
/// mutating routes additionally pass through [`auth::require_verified`].
/// When `static_dir` is given, other paths serve files from it and fall back
/// to its `index.html` so client-side routes resolve.
pub fn router<S, V>(state: AppState<S, V>, static_dir: Option<&Path>) -> Router
where
  S: ArticleStore + 'static,
  V: IdentityVerifier + 'static,
{
  let writes = Router::new()
    .route("/articles/{name}/upvote", put(articles::upvote::<S, V>))
    .route("/articles/{name}/comments", post(articles::add_comment::<S, V>))
    .route_layer(middleware::from_fn(auth::require_verified));

  let api = Router::new()
    .route("/articles/{name}", get(articles::get_one::<S, V>))
    .merge(writes)
    .fallback(handlers::api_not_found)
    .layer(middleware::from_fn_with_state(
      state.clone(),
      auth::resolve_identity::<S, V>,
    ))
    .with_state(state);

  let mut app = Router::new().nest("/api", api);
  if let Some(dir) = static_dir {
    let index = ServeFile::new(dir.join("index.html"));
    app = app.fallback_service(ServeDir::new(dir).fallback(index));
  }
  app.layer(TraceLayer::new_for_http())
}

// ─── Integration tests ────────────────────────────────────────────────────────
