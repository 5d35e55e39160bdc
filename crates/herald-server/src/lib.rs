//! HTTP server assembly for Herald.
//!
//! Loads [`ServerConfig`], opens the SQLite store it names, and wraps the
//! announcement API in request tracing.

use std::path::{Path, PathBuf};

use axum::Router;
use herald_core::AnnouncementService;
use herald_store_sqlite::SqliteStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

/// Store path that selects a throwaway in-memory database.
pub const IN_MEMORY: &str = ":memory:";

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `HERALD_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

impl ServerConfig {
  /// Layer defaults, the TOML file at `path` (if it exists), and the
  /// environment, in increasing order of precedence.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .set_default("host", "127.0.0.1")?
      .set_default("port", 8000)?
      .set_default("store_path", "herald.db")?
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("HERALD"))
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Store ────────────────────────────────────────────────────────────────────

/// Open the store named by `path`, expanding a leading `~`.
pub async fn open_store(path: &Path) -> herald_store_sqlite::Result<SqliteStore> {
  if path.as_os_str() == IN_MEMORY {
    return SqliteStore::open_in_memory().await;
  }
  SqliteStore::open(expand_tilde(path)).await
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The full application: announcement API plus per-request tracing spans.
pub fn app(store: SqliteStore) -> Router {
  herald_api::api_router(AnnouncementService::new(store.into()))
    .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  #[test]
  fn defaults_apply_without_a_file() {
    let cfg = ServerConfig::load(Path::new("/nonexistent/herald.toml")).unwrap();
    assert_eq!(cfg.port, 8000);
    assert_eq!(cfg.store_path, PathBuf::from("herald.db"));
  }

  #[test]
  fn file_values_override_defaults() {
    let path = std::env::temp_dir().join(format!("herald-config-{}.toml", std::process::id()));
    std::fs::write(&path, "port = 9123\nstore_path = \":memory:\"\n").unwrap();

    let cfg = ServerConfig::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(cfg.port, 9123);
    assert_eq!(cfg.store_path, PathBuf::from(IN_MEMORY));
    assert_eq!(cfg.address(), format!("{}:9123", cfg.host));
  }

  #[test]
  fn tilde_expands_to_home() {
    let Ok(home) = std::env::var("HOME") else { return };
    assert_eq!(expand_tilde(Path::new("~/herald.db")), PathBuf::from(home).join("herald.db"));
    assert_eq!(expand_tilde(Path::new("/srv/herald.db")), PathBuf::from("/srv/herald.db"));
  }

  async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
      Some(v) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(v.to_string())
      }
      None => Body::empty(),
    };
    let resp = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
  }

  #[tokio::test]
  async fn lifecycle_against_sqlite() {
    let store = open_store(Path::new(IN_MEMORY)).await.unwrap();
    let app = app(store);

    let (status, created) = call(
      &app,
      "POST",
      "/announcements/?username=ops",
      Some(json!({ "message": "Maintenance window", "expiration_date": "2999-01-01" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let uri = format!("/announcements/{}?username=ops", created["id"].as_str().unwrap());

    let (status, active) = call(&app, "GET", "/announcements/active", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(active["announcements"][0]["id"], created["id"]);

    let (status, updated) =
      call(&app, "PUT", &uri, Some(json!({ "start_date": "2998-12-01" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["start_date"], "2998-12-01");
    assert_eq!(updated["updated_by"], "ops");

    let (_, active) = call(&app, "GET", "/announcements/active", None).await;
    assert_eq!(active, json!({ "announcements": [] }));

    let (status, _) = call(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, all) = call(&app, "GET", "/announcements/all?username=ops", None).await;
    assert_eq!(all, json!({ "announcements": [] }));
  }
}
