//! Read-only report endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/reports/dashboard` | `?year=&month=`, default the current month |
//! | `GET`  | `/reports/mining` | `?section_id=&from=&to=`, dates inclusive |
//! | `GET`  | `/reports/costs` | As above, priced with the server's tariffs |
//! | `GET`  | `/reports/payroll` | `?year=&month=`, default the current month |

use axum::{
  Json,
  extract::{Query, State},
};
use colliery_core::{
  journal::EventFilter,
  limit::Period,
  report::{CostSummary, Dashboard, MiningSummary, Payroll},
  store::MineStore,
};
use serde::Deserialize;

use crate::{ApiState, error::ApiError};

#[derive(Debug, Default, Deserialize)]
pub struct PeriodParams {
  pub year:  Option<i32>,
  pub month: Option<u32>,
}

impl PeriodParams {
  fn resolve(self) -> Result<Period, ApiError> {
    match (self.year, self.month) {
      (None, None) => Ok(Period::current()),
      (Some(year), Some(month)) => Ok(Period::new(year, month)?),
      _ => Err(ApiError::InvalidInput("year and month must be given together".into())),
    }
  }
}

/// `GET /reports/dashboard[?year=...&month=...]`
pub async fn dashboard<S>(
  State(state): State<ApiState<S>>,
  Query(params): Query<PeriodParams>,
) -> Result<Json<Dashboard>, ApiError>
where
  S: MineStore,
{
  let period = params.resolve()?;
  let dashboard = state.store.dashboard(period).await.map_err(ApiError::from_store)?;
  Ok(Json(dashboard))
}

/// `GET /reports/mining[?section_id=...][&from=...][&to=...]`
pub async fn mining<S>(
  State(state): State<ApiState<S>>,
  Query(filter): Query<EventFilter>,
) -> Result<Json<MiningSummary>, ApiError>
where
  S: MineStore,
{
  let summary = state.store.mining_journal(filter).await.map_err(ApiError::from_store)?;
  Ok(Json(summary))
}

/// `GET /reports/costs[?section_id=...][&from=...][&to=...]`
pub async fn costs<S>(
  State(state): State<ApiState<S>>,
  Query(filter): Query<EventFilter>,
) -> Result<Json<CostSummary>, ApiError>
where
  S: MineStore,
{
  let summary =
    state.store.cost_journal(filter, state.tariffs).await.map_err(ApiError::from_store)?;
  Ok(Json(summary))
}

/// `GET /reports/payroll[?year=...&month=...]`
pub async fn payroll<S>(
  State(state): State<ApiState<S>>,
  Query(params): Query<PeriodParams>,
) -> Result<Json<Payroll>, ApiError>
where
  S: MineStore,
{
  let period = params.resolve()?;
  let payroll = state.store.payroll(period, state.tariffs).await.map_err(ApiError::from_store)?;
  Ok(Json(payroll))
}
