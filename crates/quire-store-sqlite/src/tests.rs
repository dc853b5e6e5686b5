//! Integration tests for `SqliteStore` against an in-memory database.

use quire_core::{
  article::{Article, Comment},
  store::ArticleStore,
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  let s = SqliteStore::open_in_memory()
    .await
    .expect("in-memory store");
  for name in ["learn-react", "learn-node", "mongodb"] {
    assert!(s.seed_article(Article::new(name)).await.unwrap());
  }
  s
}

fn comment(by: &str, text: &str) -> Comment {
  Comment {
    posted_by: by.into(),
    text:      text.into(),
  }
}

// ─── Reads ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn find_seeded_article() {
  let s = store().await;
  let a = s.find_article("learn-react").await.unwrap().unwrap();
  assert_eq!(a, Article::new("learn-react"));
}

#[tokio::test]
async fn find_missing_returns_none() {
  let s = store().await;
  assert!(s.find_article("rust").await.unwrap().is_none());
}

// ─── Seeding ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn seed_preserves_full_document() {
  let s = SqliteStore::open_in_memory().await.unwrap();
  let doc = Article {
    name:       "learn-react".into(),
    upvotes:    2,
    upvote_ids: vec!["u2".into(), "u1".into()],
    comments:   vec![comment("a@example.com", "one"), comment("b@example.com", "two")],
  };
  assert!(s.seed_article(doc.clone()).await.unwrap());
  assert_eq!(s.find_article("learn-react").await.unwrap().unwrap(), doc);
}

#[tokio::test]
async fn seed_does_not_overwrite() {
  let s = store().await;
  s.record_upvote("learn-react", "u1").await.unwrap();

  let mut replacement = Article::new("learn-react");
  replacement.upvotes = 40;
  assert!(!s.seed_article(replacement).await.unwrap());

  let a = s.find_article("learn-react").await.unwrap().unwrap();
  assert_eq!(a.upvotes, 1);
}

#[tokio::test]
async fn seed_legacy_counter_without_ids() {
  let s = SqliteStore::open_in_memory().await.unwrap();
  let docs = Article::parse_many(r#"[{"name":"mongodb","upvotes":5}]"#).unwrap();
  for d in docs {
    s.seed_article(d).await.unwrap();
  }
  let a = s.find_article("mongodb").await.unwrap().unwrap();
  assert_eq!(a.upvotes, 5);
  assert!(a.upvote_ids.is_empty());
  assert!(a.comments.is_empty());
}

// ─── Upvotes ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn record_upvote_applies_once() {
  let s = store().await;
  assert!(s.record_upvote("learn-react", "u1").await.unwrap());
  assert!(!s.record_upvote("learn-react", "u1").await.unwrap());

  let a = s.find_article("learn-react").await.unwrap().unwrap();
  assert_eq!(a.upvotes, 1);
  assert_eq!(a.upvote_ids, vec!["u1".to_string()]);
}

#[tokio::test]
async fn record_upvote_keeps_voter_order() {
  let s = store().await;
  for uid in ["u3", "u1", "u2"] {
    assert!(s.record_upvote("learn-node", uid).await.unwrap());
  }
  let a = s.find_article("learn-node").await.unwrap().unwrap();
  assert_eq!(a.upvotes, 3);
  assert_eq!(a.upvote_ids, vec!["u3", "u1", "u2"]);
}

#[tokio::test]
async fn record_upvote_missing_article_is_noop() {
  let s = store().await;
  assert!(!s.record_upvote("rust", "u1").await.unwrap());
  assert!(s.find_article("rust").await.unwrap().is_none());
}

#[tokio::test]
async fn same_voter_on_two_articles() {
  let s = store().await;
  assert!(s.record_upvote("learn-react", "u1").await.unwrap());
  assert!(s.record_upvote("learn-node", "u1").await.unwrap());
}

#[tokio::test]
async fn concurrent_record_upvote_applies_once() {
  let s = store().await;
  let mut tasks = tokio::task::JoinSet::new();
  for _ in 0..16 {
    let s = s.clone();
    tasks.spawn(async move { s.record_upvote("mongodb", "u1").await.unwrap() });
  }

  let mut applied = 0;
  while let Some(res) = tasks.join_next().await {
    if res.unwrap() {
      applied += 1;
    }
  }
  assert_eq!(applied, 1);

  let a = s.find_article("mongodb").await.unwrap().unwrap();
  assert_eq!(a.upvotes, 1);
  assert_eq!(a.upvote_ids.len(), 1);
}

// ─── Comments ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn append_comment_in_order() {
  let s = store().await;
  s.append_comment("learn-node", comment("a@example.com", "first")).await.unwrap();
  s.append_comment("learn-node", comment("b@example.com", "second")).await.unwrap();

  let a = s.find_article("learn-node").await.unwrap().unwrap();
  assert_eq!(
    a.comments,
    vec![comment("a@example.com", "first"), comment("b@example.com", "second")]
  );
}

#[tokio::test]
async fn append_comment_missing_article_is_noop() {
  let s = store().await;
  s.append_comment("rust", comment("a@example.com", "hi")).await.unwrap();
  assert!(s.find_article("rust").await.unwrap().is_none());
}

#[tokio::test]
async fn comments_stay_with_their_article() {
  let s = store().await;
  s.append_comment("learn-react", comment("a@example.com", "hi")).await.unwrap();
  let other = s.find_article("learn-node").await.unwrap().unwrap();
  assert!(other.comments.is_empty());
}

// ─── Persistence ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn reopen_file_keeps_state() {
  let dir  = tempfile::tempdir().unwrap();
  let path = dir.path().join("articles.db");

  {
    let s = SqliteStore::open(&path).await.unwrap();
    s.seed_article(Article::new("learn-react")).await.unwrap();
    s.record_upvote("learn-react", "u1").await.unwrap();
  }

  let s = SqliteStore::open(&path).await.unwrap();
  let a = s.find_article("learn-react").await.unwrap().unwrap();
  assert_eq!(a.upvotes, 1);
  assert_eq!(a.upvote_ids, vec!["u1".to_string()]);
}
