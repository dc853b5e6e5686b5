//! [`MemoryStore`] — an in-process [`ArticleStore`].
//!
//! Each operation holds the map lock for its whole read-modify-write, which
//! gives the same conditional-write guarantees as a real document store.
//! Handy as a substitute store in tests.

use std::{
  collections::HashMap,
  convert::Infallible,
  sync::{Mutex, MutexGuard, PoisonError},
};

use crate::{
  article::{Article, Comment},
  store::ArticleStore,
};

#[derive(Debug, Default)]
pub struct MemoryStore {
  articles: Mutex<HashMap<String, Article>>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  /// Build a store pre-populated with `articles`.
  pub fn with_articles(articles: impl IntoIterator<Item = Article>) -> Self {
    let map = articles.into_iter().map(|a| (a.name.clone(), a)).collect();
    Self { articles: Mutex::new(map) }
  }

  fn lock(&self) -> MutexGuard<'_, HashMap<String, Article>> {
    // A panic mid-operation leaves the map consistent: every mutation below
    // is applied in full before the guard drops.
    self.articles.lock().unwrap_or_else(PoisonError::into_inner)
  }
}

impl ArticleStore for MemoryStore {
  type Error = Infallible;

  async fn find_article(&self, name: &str) -> Result<Option<Article>, Infallible> {
    Ok(self.lock().get(name).cloned())
  }

  async fn record_upvote(&self, name: &str, uid: &str) -> Result<bool, Infallible> {
    let mut articles = self.lock();
    let Some(article) = articles.get_mut(name) else {
      return Ok(false);
    };
    if article.has_upvoted(uid) {
      return Ok(false);
    }
    article.upvote_ids.push(uid.to_owned());
    article.upvotes += 1;
    Ok(true)
  }

  async fn append_comment(&self, name: &str, comment: Comment) -> Result<(), Infallible> {
    if let Some(article) = self.lock().get_mut(name) {
      article.comments.push(comment);
    }
    Ok(())
  }

  async fn seed_article(&self, article: Article) -> Result<bool, Infallible> {
    let mut articles = self.lock();
    if articles.contains_key(&article.name) {
      return Ok(false);
    }
    articles.insert(article.name.clone(), article);
    Ok(true)
  }
}
