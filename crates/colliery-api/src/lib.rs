//! JSON REST API for the colliery store.
//!
//! Exposes an axum [`Router`] backed by any [`colliery_core::store::MineStore`].
//! Auth, TLS, and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", colliery_api::api_router(store.clone(), tariffs))
//! ```

pub mod error;
pub mod limits;
pub mod records;
pub mod reports;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use colliery_core::{
  journal::{CostEvent, MiningEvent, TimeSheetEntry},
  limit::Limit,
  reference::{CoalGrade, Position, Section, Worker},
  report::Tariffs,
  store::MineStore,
};

pub use error::ApiError;

/// Shared handler state: the store and the tariffs reports are priced with.
pub struct ApiState<S> {
  pub store:   Arc<S>,
  pub tariffs: Tariffs,
}

impl<S> Clone for ApiState<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store), tariffs: self.tariffs } }
}

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>, tariffs: Tariffs) -> Router<()>
where
  S: MineStore + 'static,
{
  Router::new()
    // Reference data
    .merge(records::routes::<S, Position>())
    .merge(records::routes::<S, CoalGrade>())
    .merge(records::routes::<S, Section>())
    .merge(records::routes::<S, Worker>())
    // Journals
    .merge(records::routes::<S, MiningEvent>())
    .merge(records::routes::<S, CostEvent>())
    .merge(records::routes::<S, TimeSheetEntry>())
    // Limits
    .merge(records::routes::<S, Limit>())
    .route("/limits/recalculate", post(limits::recalculate::<S>))
    .route("/limits/report", get(limits::report::<S>))
    // Reports
    .route("/reports/dashboard", get(reports::dashboard::<S>))
    .route("/reports/mining", get(reports::mining::<S>))
    .route("/reports/costs", get(reports::costs::<S>))
    .route("/reports/payroll", get(reports::payroll::<S>))
    .with_state(ApiState { store, tariffs })
}
