//! SQL schema for the Quire SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS articles (
    name     TEXT PRIMARY KEY,
    upvotes  INTEGER NOT NULL DEFAULT 0 CHECK (upvotes >= 0)
);

-- One row per (article, voter). Insertion order is the upvoteIds order.
CREATE TABLE IF NOT EXISTS article_upvotes (
    article_name TEXT NOT NULL REFERENCES articles(name),
    uid          TEXT NOT NULL,
    UNIQUE (article_name, uid)
);

-- Append-only. No UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS comments (
    comment_id   INTEGER PRIMARY KEY AUTOINCREMENT,
    article_name TEXT NOT NULL REFERENCES articles(name),
    posted_by    TEXT NOT NULL,
    text         TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS comments_article_idx ON comments(article_name);

PRAGMA user_version = 1;
";
