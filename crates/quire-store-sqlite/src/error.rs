//! Error type for `quire-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// An upvote counter does not fit the column or the domain type.
  #[error("upvote counter out of range for article {0:?}")]
  CounterOutOfRange(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
