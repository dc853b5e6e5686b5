//! [`SqliteStore`] — the SQLite implementation of [`ArticleStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;

use quire_core::{
  article::{Article, Comment},
  store::ArticleStore,
};

use crate::{Error, Result, schema::SCHEMA};

/// Raw column values for one article, read in a single connection call.
struct RawArticle {
  upvotes:    i64,
  upvote_ids: Vec<String>,
  comments:   Vec<Comment>,
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// An article store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. Every
/// closure passed to the connection runs to completion before the next one
/// starts, and multi-statement writes additionally run in a transaction.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── ArticleStore impl ───────────────────────────────────────────────────────

impl ArticleStore for SqliteStore {
  type Error = Error;

  async fn find_article(&self, name: &str) -> Result<Option<Article>> {
    let name_str = name.to_owned();

    let raw: Option<RawArticle> = self
      .conn
      .call(move |conn| {
        let upvotes: Option<i64> = conn
          .query_row(
            "SELECT upvotes FROM articles WHERE name = ?1",
            rusqlite::params![name_str],
            |row| row.get(0),
          )
          .optional()?;

        let Some(upvotes) = upvotes else {
          return Ok(None);
        };

        let upvote_ids = conn
          .prepare(
            "SELECT uid FROM article_upvotes WHERE article_name = ?1 ORDER BY rowid",
          )?
          .query_map(rusqlite::params![name_str], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<String>>>()?;

        let comments = conn
          .prepare(
            "SELECT posted_by, text FROM comments
             WHERE article_name = ?1
             ORDER BY comment_id",
          )?
          .query_map(rusqlite::params![name_str], |row| {
            Ok(Comment {
              posted_by: row.get(0)?,
              text:      row.get(1)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(Some(RawArticle { upvotes, upvote_ids, comments }))
      })
      .await?;

    raw
      .map(|raw| {
        let upvotes = u64::try_from(raw.upvotes)
          .map_err(|_| Error::CounterOutOfRange(name.to_owned()))?;
        Ok(Article {
          name: name.to_owned(),
          upvotes,
          upvote_ids: raw.upvote_ids,
          comments: raw.comments,
        })
      })
      .transpose()
  }

  async fn record_upvote(&self, name: &str, uid: &str) -> Result<bool> {
    let name_str = name.to_owned();
    let uid_str  = uid.to_owned();

    let applied = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        // Selecting from `articles` makes the insert a no-op for a missing
        // article; the UNIQUE constraint makes it a no-op for a repeat voter.
        let inserted = tx.execute(
          "INSERT OR IGNORE INTO article_upvotes (article_name, uid)
           SELECT name, ?2 FROM articles WHERE name = ?1",
          rusqlite::params![name_str, uid_str],
        )?;
        if inserted == 1 {
          tx.execute(
            "UPDATE articles SET upvotes = upvotes + 1 WHERE name = ?1",
            rusqlite::params![name_str],
          )?;
        }
        tx.commit()?;
        Ok(inserted == 1)
      })
      .await?;

    Ok(applied)
  }

  async fn append_comment(&self, name: &str, comment: Comment) -> Result<()> {
    let name_str = name.to_owned();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO comments (article_name, posted_by, text)
           SELECT name, ?2, ?3 FROM articles WHERE name = ?1",
          rusqlite::params![name_str, comment.posted_by, comment.text],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn seed_article(&self, article: Article) -> Result<bool> {
    let upvotes = i64::try_from(article.upvotes)
      .map_err(|_| Error::CounterOutOfRange(article.name.clone()))?;

    let inserted = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let inserted = tx.execute(
          "INSERT OR IGNORE INTO articles (name, upvotes) VALUES (?1, ?2)",
          rusqlite::params![article.name, upvotes],
        )?;
        if inserted == 0 {
          return Ok(false);
        }

        {
          let mut ids = tx.prepare(
            "INSERT OR IGNORE INTO article_upvotes (article_name, uid) VALUES (?1, ?2)",
          )?;
          for uid in &article.upvote_ids {
            ids.execute(rusqlite::params![article.name, uid])?;
          }

          let mut comments = tx.prepare(
            "INSERT INTO comments (article_name, posted_by, text) VALUES (?1, ?2, ?3)",
          )?;
          for c in &article.comments {
            comments.execute(rusqlite::params![article.name, c.posted_by, c.text])?;
          }
        }

        tx.commit()?;
        Ok(true)
      })
      .await?;

    Ok(inserted)
  }
}
