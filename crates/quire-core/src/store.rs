//! The `ArticleStore` trait.
//!
//! Implemented by storage backends (e.g. `quire-store-sqlite`, or the
//! in-process [`MemoryStore`](crate::memory::MemoryStore)). The HTTP layer
//! depends on this abstraction, not on a concrete backend.

use std::future::Future;

use crate::article::{Article, Comment};

/// Abstraction over the article document store.
///
/// Every write is a single store-level operation: there is no
/// read-modify-write across calls, so two requests interleaving on the same
/// article cannot observe or produce a half-applied update.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait ArticleStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Retrieve an article by its unique name. Returns `None` if absent.
  fn find_article<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Option<Article>, Self::Error>> + Send + 'a;

  /// Append `uid` to the article's upvote ids and increment its upvote
  /// counter, only if `uid` is not already present.
  ///
  /// The presence check and both writes are evaluated atomically by the
  /// store. Returns `true` if the upvote was applied, `false` if the uid was
  /// already recorded or the article does not exist.
  fn record_upvote<'a>(
    &'a self,
    name: &'a str,
    uid: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  /// Append a comment to the article. A no-op if the article does not exist.
  fn append_comment<'a>(
    &'a self,
    name: &'a str,
    comment: Comment,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Insert a complete article document if no article with that name
  /// exists yet. Returns `false` (and leaves the stored one untouched) if it
  /// does. Used for out-of-band seeding only.
  fn seed_article(
    &self,
    article: Article,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
