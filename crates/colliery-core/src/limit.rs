//! Monthly planning limits and the calendar periods they cover.

use std::fmt;

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  ids::{LimitId, SectionId},
  record::{Record, RecordKind, Validate, require_non_negative},
  status::MetricKind,
};

// ─── Period ──────────────────────────────────────────────────────────────────

pub const MIN_YEAR: i32 = 2000;
pub const MAX_YEAR: i32 = 2100;

/// A calendar month. Dates carry no time zone; a date belongs to the month of
/// its own calendar fields.
///
/// The period spans the half-open range `[first_day, end_exclusive)`, which
/// keeps leap days and month lengths out of every comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "PeriodParts", into = "PeriodParts")]
pub struct Period {
  start: NaiveDate,
}

#[derive(Serialize, Deserialize)]
struct PeriodParts {
  year:  i32,
  month: u32,
}

impl TryFrom<PeriodParts> for Period {
  type Error = Error;

  fn try_from(p: PeriodParts) -> Result<Self> { Self::new(p.year, p.month) }
}

impl From<Period> for PeriodParts {
  fn from(p: Period) -> Self { Self { year: p.year(), month: p.month() } }
}

impl Period {
  pub fn new(year: i32, month: u32) -> Result<Self> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
      return Err(Error::invalid("year", format!("must be within {MIN_YEAR}..={MAX_YEAR}")));
    }
    let start = NaiveDate::from_ymd_opt(year, month, 1)
      .ok_or_else(|| Error::invalid("month", format!("must be within 1..=12, got {month}")))?;
    Ok(Self { start })
  }

  /// The period a date falls in. Not range-checked: any date has a month.
  pub fn containing(date: NaiveDate) -> Self {
    Self { start: date - Days::new(u64::from(date.day0())) }
  }

  /// The current UTC calendar month.
  pub fn current() -> Self { Self::at(Utc::now()) }

  pub fn at(instant: DateTime<Utc>) -> Self { Self::containing(instant.date_naive()) }

  pub fn year(&self) -> i32 { self.start.year() }

  pub fn month(&self) -> u32 { self.start.month() }

  pub fn first_day(&self) -> NaiveDate { self.start }

  pub fn end_exclusive(&self) -> NaiveDate { self.start + Months::new(1) }

  pub fn contains(&self, date: NaiveDate) -> bool {
    self.start <= date && date < self.end_exclusive()
  }
}

impl fmt::Display for Period {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:04}-{:02}", self.year(), self.month())
  }
}

// ─── Metrics ─────────────────────────────────────────────────────────────────

/// One value per tracked metric. Used for both the plan and the actual side
/// of a limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metrics {
  /// Coal mined, tonnes.
  pub production:  f64,
  /// Rock removed, tonnes.
  pub rock:        f64,
  /// kWh.
  pub electricity: f64,
  /// Litres.
  pub fuel:        f64,
}

impl Metrics {
  pub fn get(&self, kind: MetricKind) -> f64 {
    match kind {
      MetricKind::Production => self.production,
      MetricKind::Rock => self.rock,
      MetricKind::Electricity => self.electricity,
      MetricKind::Fuel => self.fuel,
    }
  }
}

impl std::ops::Add for Metrics {
  type Output = Metrics;

  fn add(self, rhs: Metrics) -> Metrics {
    Metrics {
      production:  self.production + rhs.production,
      rock:        self.rock + rhs.rock,
      electricity: self.electricity + rhs.electricity,
      fuel:        self.fuel + rhs.fuel,
    }
  }
}

// ─── Limit ───────────────────────────────────────────────────────────────────

/// A monthly plan for one section. At most one exists per (section, month,
/// year).
///
/// `actual` is derived: it is written only by the limits aggregator and is
/// stale between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Limit {
  pub limit_id:   LimitId,
  pub section_id: SectionId,
  pub month:      u32,
  pub year:       i32,
  pub plan:       Metrics,
  pub actual:     Metrics,
}

impl Limit {
  pub fn period(&self) -> Result<Period> { Period::new(self.year, self.month) }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitDraft {
  pub section_id: SectionId,
  pub month:      u32,
  pub year:       i32,
  pub plan:       Metrics,
}

impl Validate for LimitDraft {
  fn validate(&self) -> Result<()> {
    Period::new(self.year, self.month)?;

    let plan = &self.plan;
    require_non_negative("plan.production", plan.production)?;
    require_non_negative("plan.rock", plan.rock)?;
    require_non_negative("plan.electricity", plan.electricity)?;
    require_non_negative("plan.fuel", plan.fuel)?;

    if plan.production == 0.0 && plan.rock == 0.0 && plan.electricity == 0.0 && plan.fuel == 0.0
    {
      return Err(Error::invalid("plan", "at least one planned value must be positive"));
    }
    Ok(())
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LimitFilter {
  pub section_id: Option<SectionId>,
  pub year:       Option<i32>,
  pub month:      Option<u32>,
}

impl Record for Limit {
  type Key = LimitId;
  type Draft = LimitDraft;
  type Filter = LimitFilter;

  const KIND: RecordKind = RecordKind::Limit;

  fn key(&self) -> LimitId { self.limit_id }
}

/// The outcome of one aggregator run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecalcSummary {
  pub limits_refreshed: usize,
  pub recalculated_at:  DateTime<Utc>,
}

#[cfg(test)]
mod tests {
  use super::*;

  fn date(y: i32, m: u32, d: u32) -> NaiveDate { NaiveDate::from_ymd_opt(y, m, d).unwrap() }

  #[test]
  fn period_bounds_are_half_open() {
    let june = Period::new(2024, 6).unwrap();
    assert_eq!(june.first_day(), date(2024, 6, 1));
    assert_eq!(june.end_exclusive(), date(2024, 7, 1));
    assert!(june.contains(date(2024, 6, 30)));
    assert!(!june.contains(date(2024, 7, 1)));
    assert!(!june.contains(date(2024, 5, 31)));
  }

  #[test]
  fn leap_day_belongs_to_february() {
    let feb = Period::new(2024, 2).unwrap();
    assert!(feb.contains(date(2024, 2, 29)));
    assert_eq!(feb.end_exclusive(), date(2024, 3, 1));
    assert_eq!(Period::containing(date(2024, 2, 29)), feb);
  }

  #[test]
  fn december_rolls_into_next_year() {
    let dec = Period::new(2023, 12).unwrap();
    assert_eq!(dec.end_exclusive(), date(2024, 1, 1));
    assert_eq!(dec.to_string(), "2023-12");
  }

  #[test]
  fn out_of_range_periods_are_rejected() {
    assert!(Period::new(2024, 0).is_err());
    assert!(Period::new(2024, 13).is_err());
    assert!(Period::new(1999, 6).is_err());
    assert!(Period::new(2101, 6).is_err());
    assert!(serde_json::from_str::<Period>(r#"{"year":2024,"month":13}"#).is_err());
  }

  #[test]
  fn limit_draft_needs_a_positive_plan() {
    let mut draft = LimitDraft {
      section_id: SectionId(1),
      month:      6,
      year:       2024,
      plan:       Metrics::default(),
    };
    assert!(draft.validate().is_err());

    draft.plan.production = 1000.0;
    assert!(draft.validate().is_ok());

    draft.plan.fuel = -1.0;
    assert!(draft.validate().is_err());
  }

  #[test]
  fn metrics_deserialize_with_missing_fields() {
    let m: Metrics = serde_json::from_str(r#"{"production": 1000}"#).unwrap();
    assert_eq!(m.production, 1000.0);
    assert_eq!(m.fuel, 0.0);
  }
}
