//! The three article operations exposed over HTTP.
//!
//! Each is generic over [`ArticleStore`] so the HTTP layer and tests can
//! supply any backend. Missing articles surface as `Ok(None)`; the caller
//! decides how to report them.

use crate::{
  article::{Article, ArticleView, Comment},
  identity::{Identity, VerifiedIdentity},
  store::ArticleStore,
};

/// Result of [`upvote`]: the refreshed article and whether this call was the
/// one that counted.
#[derive(Debug, Clone)]
pub struct Upvoted {
  pub article: Article,
  pub counted: bool,
}

/// Fetch `name` and annotate it with `identity`'s upvote eligibility.
pub async fn get_article<S: ArticleStore>(
  store: &S,
  name: &str,
  identity: &Identity,
) -> Result<Option<ArticleView>, S::Error> {
  let article = store.find_article(name).await?;
  Ok(article.map(|a| ArticleView::for_identity(a, identity)))
}

/// Upvote `name` on behalf of `voter`, at most once per voter.
///
/// The eligibility check against the fetched document only avoids a pointless
/// write. Correctness under concurrent requests comes from
/// [`ArticleStore::record_upvote`], which re-checks the voter's absence
/// atomically. The article is always re-read so the response reflects writes
/// made by other requests too.
pub async fn upvote<S: ArticleStore>(
  store: &S,
  name: &str,
  voter: &VerifiedIdentity,
) -> Result<Option<Upvoted>, S::Error> {
  let Some(article) = store.find_article(name).await? else {
    return Ok(None);
  };

  let counted = if article.has_upvoted(&voter.uid) {
    false
  } else {
    store.record_upvote(name, &voter.uid).await?
  };

  let refreshed = store.find_article(name).await?;
  Ok(refreshed.map(|article| Upvoted { article, counted }))
}

/// Append a comment by `author` to `name`, then re-read the article.
///
/// The append is issued without checking that the article exists; a missing
/// article makes it a no-op and the re-read reports `None`.
pub async fn add_comment<S: ArticleStore>(
  store: &S,
  name: &str,
  author: &VerifiedIdentity,
  text: String,
) -> Result<Option<Article>, S::Error> {
  let comment = Comment {
    posted_by: author.email.clone(),
    text,
  };
  store.append_comment(name, comment).await?;
  store.find_article(name).await
}
