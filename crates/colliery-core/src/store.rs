//! The data-access contract.
//!
//! Storage backends (e.g. `colliery-store-sqlite`) implement these traits;
//! the HTTP adapter and server depend only on them. A backend is a value the
//! caller owns and passes around, usually behind an `Arc`; there is no global
//! connection.

use std::future::Future;

use chrono::Utc;

use crate::{
  error::Classify,
  journal::{CostEvent, EventFilter, MiningEvent, TimeSheetEntry},
  limit::{Limit, LimitFilter, Period, RecalcSummary},
  record::Record,
  reference::{CoalGrade, Position, Section, Worker},
  report::{CostSummary, Dashboard, LimitLine, LimitReport, MiningSummary, Payroll, Tariffs},
};

/// Carries the backend's error type.
pub trait StoreBackend: Send + Sync {
  type Error: std::error::Error + Classify + Send + Sync + 'static;
}

// ─── Repository ──────────────────────────────────────────────────────────────

/// Create, read, update and delete for one record kind.
///
/// Drafts are validated before the backend touches storage. Writes that break
/// a uniqueness or reference rule fail with a constraint violation and leave
/// storage unchanged.
pub trait Repository<R: Record>: StoreBackend {
  /// Persist a new record and return it as stored.
  fn create(&self, draft: R::Draft) -> impl Future<Output = Result<R, Self::Error>> + Send + '_;

  /// Returns `None` if no record has this key.
  fn get(&self, key: R::Key) -> impl Future<Output = Result<Option<R>, Self::Error>> + Send + '_;

  fn list(&self, filter: R::Filter)
  -> impl Future<Output = Result<Vec<R>, Self::Error>> + Send + '_;

  /// Replace the user-enterable fields of an existing record. Fails with
  /// not-found if the key is absent.
  fn update(
    &self,
    key: R::Key,
    draft: R::Draft,
  ) -> impl Future<Output = Result<R, Self::Error>> + Send + '_;

  /// Fails with not-found if the key is absent, and with a constraint
  /// violation if other rows still reference the record.
  fn delete(&self, key: R::Key) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}

// ─── Mine store ──────────────────────────────────────────────────────────────

/// Everything the colliery needs from a backend: a repository for each of the
/// eight record kinds, the limits aggregator, and the report queries.
pub trait MineStore:
  Repository<Position>
  + Repository<CoalGrade>
  + Repository<Section>
  + Repository<Worker>
  + Repository<MiningEvent>
  + Repository<CostEvent>
  + Repository<TimeSheetEntry>
  + Repository<Limit>
{
  /// Recompute the actual values of every limit from the mining and cost
  /// journals.
  ///
  /// Runs as one unit of work: on failure no limit is changed and the error
  /// classifies as a transaction failure. Running it twice with unchanged
  /// journals yields identical rows.
  fn recalculate_actuals(
    &self,
  ) -> impl Future<Output = Result<RecalcSummary, <Self as StoreBackend>::Error>> + Send + '_;

  /// Limits joined with their section names, oldest period first.
  fn limit_lines(
    &self,
    filter: LimitFilter,
  ) -> impl Future<Output = Result<Vec<LimitLine>, <Self as StoreBackend>::Error>> + Send + '_;

  fn mining_journal(
    &self,
    filter: EventFilter,
  ) -> impl Future<Output = Result<MiningSummary, <Self as StoreBackend>::Error>> + Send + '_;

  fn cost_journal(
    &self,
    filter: EventFilter,
    tariffs: Tariffs,
  ) -> impl Future<Output = Result<CostSummary, <Self as StoreBackend>::Error>> + Send + '_;

  /// Hours and pay per worker who logged time within `period`.
  fn payroll(
    &self,
    period: Period,
    tariffs: Tariffs,
  ) -> impl Future<Output = Result<Payroll, <Self as StoreBackend>::Error>> + Send + '_;

  fn dashboard(
    &self,
    period: Period,
  ) -> impl Future<Output = Result<Dashboard, <Self as StoreBackend>::Error>> + Send + '_;

  /// Classify the listed limits. Reads current actuals; does not recompute
  /// them.
  fn limit_report(
    &self,
    filter: LimitFilter,
  ) -> impl Future<Output = Result<LimitReport, <Self as StoreBackend>::Error>> + Send + '_ {
    async move {
      let lines = self.limit_lines(filter).await?;
      Ok(LimitReport::build(&lines, Utc::now()))
    }
  }
}
