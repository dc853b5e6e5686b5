//! Handlers for `/api/articles` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/articles/{name}` | Anonymous allowed; adds `canUpvote` |
//! | `PUT`  | `/articles/{name}/upvote` | Verified only; at most once per uid |
//! | `POST` | `/articles/{name}/comments` | Verified only; body `{"text":"..."}` |

use axum::{
  Extension, Json,
  extract::{Path, State, rejection::JsonRejection},
};
use quire_core::{
  actions,
  article::{Article, ArticleView},
  identity::{Identity, VerifiedIdentity},
  store::ArticleStore,
  verify::IdentityVerifier,
};
use serde::Deserialize;

use crate::{AppState, error::Error};

/// The identity behind a gated route. The write gate guarantees it is
/// verified; this only keeps the handlers total.
fn verified_caller(identity: &Identity) -> Result<&VerifiedIdentity, Error> {
  identity.verified().ok_or(Error::Unauthenticated)
}

// ─── Read ─────────────────────────────────────────────────────────────────────

/// `GET /articles/{name}`
pub async fn get_one<S, V>(
  State(state): State<AppState<S, V>>,
  Extension(identity): Extension<Identity>,
  Path(name): Path<String>,
) -> Result<Json<ArticleView>, Error>
where
  S: ArticleStore,
  V: IdentityVerifier,
{
  let view = actions::get_article(&*state.store, &name, &identity)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?
    .ok_or_else(|| Error::NotFound(format!("article {name}")))?;
  Ok(Json(view))
}

// ─── Upvote ───────────────────────────────────────────────────────────────────

/// `PUT /articles/{name}/upvote` — returns the refreshed article whether or
/// not this call counted.
pub async fn upvote<S, V>(
  State(state): State<AppState<S, V>>,
  Extension(identity): Extension<Identity>,
  Path(name): Path<String>,
) -> Result<Json<Article>, Error>
where
  S: ArticleStore,
  V: IdentityVerifier,
{
  let voter = verified_caller(&identity)?;
  let outcome = actions::upvote(&*state.store, &name, voter)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?
    .ok_or_else(|| Error::NotFound(format!("article {name}")))?;

  if outcome.counted {
    tracing::info!(article = %name, uid = %voter.uid, upvotes = outcome.article.upvotes, "upvote recorded");
  } else {
    tracing::debug!(article = %name, uid = %voter.uid, "upvote already counted");
  }
  Ok(Json(outcome.article))
}

// ─── Comment ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CommentBody {
  pub text: String,
}

/// `POST /articles/{name}/comments` — body: `{"text":"..."}`
///
/// A body that is missing, not JSON, or lacks `text` is answered with the
/// extractor's status and the usual JSON error body.
pub async fn add_comment<S, V>(
  State(state): State<AppState<S, V>>,
  Extension(identity): Extension<Identity>,
  Path(name): Path<String>,
  body: Result<Json<CommentBody>, JsonRejection>,
) -> Result<Json<Article>, Error>
where
  S: ArticleStore,
  V: IdentityVerifier,
{
  let author = verified_caller(&identity)?;
  let Json(body) = body?;
  let article = actions::add_comment(&*state.store, &name, author, body.text)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?
    .ok_or_else(|| Error::NotFound(format!("article {name}")))?;

  tracing::info!(article = %name, posted_by = %author.email, "comment added");
  Ok(Json(article))
}
