//! Handlers for the limits aggregator and status report.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/limits/recalculate` | Refreshes every limit's actuals; 500 on rollback |
//! | `GET`  | `/limits/report` | Optional `?section_id=&year=&month=` |

use axum::{
  Json,
  extract::{Query, State},
};
use colliery_core::{
  limit::{LimitFilter, RecalcSummary},
  report::LimitReport,
  store::MineStore,
};

use crate::{ApiState, error::ApiError};

/// `POST /limits/recalculate`
pub async fn recalculate<S>(
  State(state): State<ApiState<S>>,
) -> Result<Json<RecalcSummary>, ApiError>
where
  S: MineStore,
{
  let summary = state.store.recalculate_actuals().await.map_err(ApiError::from_store)?;
  Ok(Json(summary))
}

/// `GET /limits/report[?section_id=...][&year=...][&month=...]`
///
/// Classifies the actuals as last recalculated; it does not refresh them.
pub async fn report<S>(
  State(state): State<ApiState<S>>,
  Query(filter): Query<LimitFilter>,
) -> Result<Json<LimitReport>, ApiError>
where
  S: MineStore,
{
  let report = state.store.limit_report(filter).await.map_err(ApiError::from_store)?;
  Ok(Json(report))
}
