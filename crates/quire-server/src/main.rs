//! quire server binary.
//!
//! Reads `config.toml` (or the path given with `--config`) layered with
//! `QUIRE_*` environment variables, opens the SQLite article store, and
//! serves the JSON API plus the optional static client.
//!
//! # Helper modes
//!
//! ```text
//! quire --seed articles.json   # insert missing articles, then exit
//! quire --hash-token           # print the SHA-256 of a token read on stdin
//! ```

use std::{
  io::{self, BufRead as _, Write as _},
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::Parser;
use quire_core::{article::Article, store::ArticleStore as _};
use quire_server::{AppState, ServerConfig, verify::{ConfiguredVerifier, hash_token}};
use quire_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Quire article engagement server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Load a JSON array of articles into the store, skipping names that
  /// already exist, and exit.
  #[arg(long, value_name = "FILE")]
  seed: Option<PathBuf>,

  /// Print the SHA-256 digest of a token entered on stdin and exit.
  #[arg(long)]
  hash_token: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  if cli.hash_token {
    let token = read_token_from_stdin()?;
    println!("{}", hash_token(&token));
    return Ok(());
  }

  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(
      config::Environment::with_prefix("QUIRE")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true),
    )
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  let store_path = expand_home(&server_cfg.store_path);
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;
  tracing::info!(path = ?store_path, "opened article store");

  if let Some(seed_path) = cli.seed {
    return seed(&store, &seed_path).await;
  }

  let verifier = ConfiguredVerifier::from_config(&server_cfg.verifier)
    .context("failed to build identity verifier")?;

  let state = AppState {
    store:    Arc::new(store),
    verifier: Arc::new(verifier),
  };

  let app = quire_server::router(state, server_cfg.static_dir.as_deref());
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Insert every article in the JSON array at `path` that is not stored yet.
async fn seed(store: &SqliteStore, path: &Path) -> anyhow::Result<()> {
  let raw = std::fs::read_to_string(path)
    .with_context(|| format!("reading seed file {}", path.display()))?;
  let articles = Article::parse_many(&raw).context("parsing seed file")?;

  let (mut inserted, mut skipped) = (0usize, 0usize);
  for article in articles {
    let name = article.name.clone();
    if store
      .seed_article(article)
      .await
      .with_context(|| format!("seeding article {name:?}"))?
    {
      inserted += 1;
    } else {
      tracing::debug!(article = %name, "already present, left untouched");
      skipped += 1;
    }
  }

  tracing::info!(inserted, skipped, "seeding finished");
  Ok(())
}

/// Read one token line from stdin.
fn read_token_from_stdin() -> anyhow::Result<String> {
  print!("Token: ");
  io::stdout().flush().ok();
  let mut line = String::new();
  io::stdin().lock().read_line(&mut line)?;
  Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Resolve a leading `~/` against `$HOME`.
fn expand_home(path: &Path) -> PathBuf {
  match (path.strip_prefix("~"), std::env::var_os("HOME")) {
    (Ok(rest), Some(home)) => PathBuf::from(home).join(rest),
    _ => path.to_path_buf(),
  }
}
