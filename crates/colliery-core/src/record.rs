//! The `Record` abstraction shared by all eight entity kinds.
//!
//! Each entity type names its key, the draft a user fills in to create or
//! edit one, and the criteria its list screen filters by. Storage backends
//! implement [`Repository`](crate::store::Repository) once, generically, over
//! this trait.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{Error, Result};

// ─── Kind tag ────────────────────────────────────────────────────────────────

/// Which table a record lives in. Used in errors, logs, and API paths.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
  strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RecordKind {
  Position,
  CoalGrade,
  Section,
  Worker,
  Mining,
  Cost,
  TimeSheet,
  Limit,
}

impl RecordKind {
  /// The collection segment used by the HTTP API, e.g. `coal-grades`.
  pub fn path(self) -> &'static str {
    match self {
      Self::Position => "positions",
      Self::CoalGrade => "coal-grades",
      Self::Section => "sections",
      Self::Worker => "workers",
      Self::Mining => "mining",
      Self::Cost => "costs",
      Self::TimeSheet => "timesheet",
      Self::Limit => "limits",
    }
  }
}

// ─── Traits ──────────────────────────────────────────────────────────────────

/// Input checks run before a draft reaches any store.
pub trait Validate {
  fn validate(&self) -> Result<()>;
}

/// A row of one of the colliery tables.
pub trait Record:
  Clone + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
  /// Primary key. Parsed from a single URL path segment by the API.
  type Key: Clone
    + fmt::Debug
    + fmt::Display
    + FromStr
    + Serialize
    + Send
    + Sync
    + 'static;

  /// The user-enterable fields. Derived columns (store-assigned ids, a
  /// limit's actual values) never appear here.
  type Draft: Validate + Clone + fmt::Debug + DeserializeOwned + Send + Sync + 'static;

  /// List criteria; `Default` means "everything".
  type Filter: Default + fmt::Debug + DeserializeOwned + Send + Sync + 'static;

  const KIND: RecordKind;

  fn key(&self) -> Self::Key;
}

/// Filter for record kinds whose list screen has no criteria.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NoFilter {}

// ─── Validation helpers ──────────────────────────────────────────────────────

pub(crate) fn require_text(field: &'static str, value: &str) -> Result<()> {
  if value.trim().is_empty() {
    return Err(Error::invalid(field, "must not be empty"));
  }
  Ok(())
}

pub(crate) fn require_non_negative(field: &'static str, value: f64) -> Result<()> {
  if !value.is_finite() || value < 0.0 {
    return Err(Error::invalid(field, format!("must be a non-negative number, got {value}")));
  }
  Ok(())
}

pub(crate) fn require_percentage(field: &'static str, value: f64) -> Result<()> {
  if !(0.0..=100.0).contains(&value) {
    return Err(Error::invalid(field, format!("must be within 0..=100, got {value}")));
  }
  Ok(())
}

pub(crate) fn require_positive(field: &'static str, value: f64) -> Result<()> {
  if !value.is_finite() || value <= 0.0 {
    return Err(Error::invalid(field, format!("must be greater than zero, got {value}")));
  }
  Ok(())
}
