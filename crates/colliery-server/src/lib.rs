//! HTTP server for the colliery record store.
//!
//! Mounts [`colliery_api`] under `/api` next to a `/health` probe, with a
//! request-tracing layer around both.

use std::{path::PathBuf, sync::Arc};

use axum::{Router, routing::get};
use colliery_core::{report::Tariffs, store::MineStore};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `COLLIERY_*` environment variables. Every key is optional.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
  pub tariffs:    Tariffs,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:       "127.0.0.1".into(),
      port:       8080,
      store_path: PathBuf::from("~/.local/share/colliery/colliery.db"),
      tariffs:    Tariffs::default(),
    }
  }
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router for `store`.
pub fn router<S>(store: Arc<S>, tariffs: Tariffs) -> Router
where
  S: MineStore + 'static,
{
  Router::new()
    .route("/health", get(health))
    .nest("/api", colliery_api::api_router(store, tariffs))
    .layer(TraceLayer::new_for_http())
}

async fn health() -> &'static str { "ok" }
