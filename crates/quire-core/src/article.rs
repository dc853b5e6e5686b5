//! Article documents and their embedded comments.
//!
//! Field names serialise in camelCase because the browser client reads the
//! documents as-is.

use serde::{Deserialize, Serialize};

use crate::{Result, identity::Identity};

/// A comment embedded in an [`Article`]. Not independently addressable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
  /// The author's email at the time of posting.
  pub posted_by: String,
  pub text:      String,
}

/// The persisted engagement state for a named article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
  pub name:       String,
  #[serde(default)]
  pub upvotes:    u64,
  /// Who has upvoted, in order. Semantically a set: no id appears twice.
  /// Older documents may lack the field entirely.
  #[serde(default)]
  pub upvote_ids: Vec<String>,
  #[serde(default)]
  pub comments:   Vec<Comment>,
}

impl Article {
  /// A fresh article with no engagement.
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name:       name.into(),
      upvotes:    0,
      upvote_ids: Vec::new(),
      comments:   Vec::new(),
    }
  }

  pub fn has_upvoted(&self, uid: &str) -> bool {
    self.upvote_ids.iter().any(|id| id == uid)
  }

  /// Whether `identity` may still upvote. Always `false` for anonymous callers.
  pub fn can_upvote(&self, identity: &Identity) -> bool {
    identity.uid().is_some_and(|uid| !self.has_upvoted(uid))
  }

  /// Parse a JSON array of article documents, as used for seeding.
  pub fn parse_many(json: &str) -> Result<Vec<Self>> {
    Ok(serde_json::from_str(json)?)
  }
}

/// An [`Article`] as returned to a particular caller, annotated with
/// whether that caller may upvote it. `canUpvote` is never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleView {
  #[serde(flatten)]
  pub article:    Article,
  pub can_upvote: bool,
}

impl ArticleView {
  pub fn for_identity(article: Article, identity: &Identity) -> Self {
    let can_upvote = article.can_upvote(identity);
    Self { article, can_upvote }
  }
}
