//! Operational journals: mining output, operating costs, and the time sheet.
//!
//! Each event is dated and tagged with the section it belongs to. Mining and
//! cost events are the inputs the limits aggregator sums.

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  ids::{CostId, GradeName, MiningId, SectionId, TabNumber},
  record::{Record, RecordKind, Validate, require_non_negative, require_positive},
};

// ─── Shift ───────────────────────────────────────────────────────────────────

/// A working shift. Only two exist; stored and serialised as `1` or `2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Shift {
  First  = 1,
  Second = 2,
}

impl TryFrom<u8> for Shift {
  type Error = Error;

  fn try_from(v: u8) -> Result<Self> {
    match v {
      1 => Ok(Self::First),
      2 => Ok(Self::Second),
      other => Err(Error::invalid("shift", format!("must be 1 or 2, got {other}"))),
    }
  }
}

impl From<Shift> for u8 {
  fn from(s: Shift) -> u8 { s as u8 }
}

impl fmt::Display for Shift {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { (*self as u8).fmt(f) }
}

// ─── Mining ──────────────────────────────────────────────────────────────────

/// Tonnes of a coal grade extracted on one shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MiningEvent {
  pub mining_id:   MiningId,
  pub date:        NaiveDate,
  pub shift:       Shift,
  pub section_id:  SectionId,
  pub grade:       GradeName,
  /// Coal extracted, tonnes.
  pub coal_volume: f64,
  /// Barren rock removed alongside the coal, tonnes.
  pub rock_volume: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MiningDraft {
  pub date:        NaiveDate,
  pub shift:       Shift,
  pub section_id:  SectionId,
  pub grade:       GradeName,
  pub coal_volume: f64,
  pub rock_volume: f64,
}

impl Validate for MiningDraft {
  fn validate(&self) -> Result<()> {
    require_non_negative("coal_volume", self.coal_volume)?;
    require_non_negative("rock_volume", self.rock_volume)
  }
}

impl Record for MiningEvent {
  type Key = MiningId;
  type Draft = MiningDraft;
  type Filter = EventFilter;

  const KIND: RecordKind = RecordKind::Mining;

  fn key(&self) -> MiningId { self.mining_id }
}

// ─── Costs ───────────────────────────────────────────────────────────────────

/// Energy and fuel consumed by a section on one shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostEvent {
  pub cost_id:     CostId,
  pub date:        NaiveDate,
  pub shift:       Shift,
  pub section_id:  SectionId,
  /// kWh.
  pub electricity: f64,
  /// Litres.
  pub fuel:        f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostDraft {
  pub date:        NaiveDate,
  pub shift:       Shift,
  pub section_id:  SectionId,
  pub electricity: f64,
  pub fuel:        f64,
}

impl Validate for CostDraft {
  fn validate(&self) -> Result<()> {
    require_non_negative("electricity", self.electricity)?;
    require_non_negative("fuel", self.fuel)
  }
}

impl Record for CostEvent {
  type Key = CostId;
  type Draft = CostDraft;
  type Filter = EventFilter;

  const KIND: RecordKind = RecordKind::Cost;

  fn key(&self) -> CostId { self.cost_id }
}

/// Criteria for the mining and cost journals. Date bounds are inclusive.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventFilter {
  pub section_id: Option<SectionId>,
  pub from:       Option<NaiveDate>,
  pub to:         Option<NaiveDate>,
}

// ─── Time sheet ──────────────────────────────────────────────────────────────

pub const MAX_SHIFT_HOURS: f64 = 12.0;

/// Identifies a time-sheet row: one worker, one shift, one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSheetKey {
  pub date:       NaiveDate,
  pub shift:      Shift,
  pub tab_number: TabNumber,
}

/// Rendered as `2024-03-05_1_1001` so it fits in a single path segment.
impl fmt::Display for TimeSheetKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}_{}_{}", self.date.format("%Y-%m-%d"), self.shift, self.tab_number)
  }
}

impl FromStr for TimeSheetKey {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    let malformed =
      || Error::invalid("timesheet key", format!("expected DATE_SHIFT_TAB, got {s:?}"));

    let mut parts = s.trim().splitn(3, '_');
    let (Some(date), Some(shift), Some(tab)) = (parts.next(), parts.next(), parts.next()) else {
      return Err(malformed());
    };

    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| malformed())?;
    let shift = shift.parse::<u8>().map_err(|_| malformed())?.try_into()?;
    let tab_number = tab.parse().map_err(|_| malformed())?;

    Ok(Self { date, shift, tab_number })
  }
}

/// Hours one worker spent on one shift. The section is not entered: it is
/// taken from the worker's current assignment when the row is written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSheetEntry {
  pub date:         NaiveDate,
  pub shift:        Shift,
  pub tab_number:   TabNumber,
  pub section_id:   SectionId,
  pub hours_worked: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSheetDraft {
  pub date:         NaiveDate,
  pub shift:        Shift,
  pub tab_number:   TabNumber,
  pub hours_worked: f64,
}

impl TimeSheetDraft {
  pub fn key(&self) -> TimeSheetKey {
    TimeSheetKey { date: self.date, shift: self.shift, tab_number: self.tab_number }
  }
}

impl Validate for TimeSheetDraft {
  fn validate(&self) -> Result<()> {
    require_positive("hours_worked", self.hours_worked)?;
    if self.hours_worked > MAX_SHIFT_HOURS {
      return Err(Error::invalid(
        "hours_worked",
        format!("a shift is at most {MAX_SHIFT_HOURS} hours"),
      ));
    }
    Ok(())
  }
}

/// Criteria for the time-sheet screen. Date bounds are inclusive.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimeSheetFilter {
  pub section_id: Option<SectionId>,
  pub tab_number: Option<TabNumber>,
  pub from:       Option<NaiveDate>,
  pub to:         Option<NaiveDate>,
}

impl Record for TimeSheetEntry {
  type Key = TimeSheetKey;
  type Draft = TimeSheetDraft;
  type Filter = TimeSheetFilter;

  const KIND: RecordKind = RecordKind::TimeSheet;

  fn key(&self) -> TimeSheetKey {
    TimeSheetKey { date: self.date, shift: self.shift, tab_number: self.tab_number }
  }
}
