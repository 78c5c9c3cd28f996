//! Async HTTP client wrapping the colliery JSON API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use colliery_core::{
  limit::{Period, RecalcSummary},
  report::{Dashboard, LimitReport},
};
use reqwest::{Client, Response};
use serde::Deserialize;

/// Connection settings for the colliery API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

/// Async HTTP client for the colliery JSON REST API.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

/// Body of every non-2xx API response.
#[derive(Deserialize)]
struct ErrorBody {
  error: String,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!("{}/api{}", self.config.base_url.trim_end_matches('/'), path)
  }

  fn period_query(period: Period) -> [(&'static str, String); 2] {
    [("year", period.year().to_string()), ("month", period.month().to_string())]
  }

  /// Pass a 2xx response through; turn anything else into an error carrying
  /// the server's message.
  async fn check(resp: Response, what: &str) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
      return Ok(resp);
    }
    let message = resp.json::<ErrorBody>().await.map(|b| b.error).unwrap_or_default();
    Err(anyhow!("{what} → {status} {message}"))
  }

  // ── Limits ────────────────────────────────────────────────────────────────

  /// `GET /api/limits/report?year=<y>&month=<m>`
  pub async fn limit_report(&self, period: Period) -> Result<LimitReport> {
    let resp = self
      .client
      .get(self.url("/limits/report"))
      .query(&Self::period_query(period))
      .send()
      .await
      .context("GET /limits/report failed")?;

    let resp = Self::check(resp, "GET /limits/report").await?;
    resp.json().await.context("deserialising limit report")
  }

  /// `POST /api/limits/recalculate`
  pub async fn recalculate(&self) -> Result<RecalcSummary> {
    let resp = self
      .client
      .post(self.url("/limits/recalculate"))
      .send()
      .await
      .context("POST /limits/recalculate failed")?;

    let resp = Self::check(resp, "POST /limits/recalculate").await?;
    resp.json().await.context("deserialising recalculation summary")
  }

  // ── Reports ───────────────────────────────────────────────────────────────

  /// `GET /api/reports/dashboard?year=<y>&month=<m>`
  pub async fn dashboard(&self, period: Period) -> Result<Dashboard> {
    let resp = self
      .client
      .get(self.url("/reports/dashboard"))
      .query(&Self::period_query(period))
      .send()
      .await
      .context("GET /reports/dashboard failed")?;

    let resp = Self::check(resp, "GET /reports/dashboard").await?;
    resp.json().await.context("deserialising dashboard")
  }
}
