//! Reference tables: positions, coal grades, sections, and workers.
//!
//! These change rarely and are referenced by the operational journals. A
//! referenced row cannot be deleted; the store rejects the attempt with a
//! constraint violation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  ids::{GradeName, PositionId, SectionId, TabNumber},
  record::{
    NoFilter, Record, RecordKind, Validate, require_non_negative, require_percentage,
    require_positive, require_text,
  },
};

// ─── Position ────────────────────────────────────────────────────────────────

/// A job title workers are hired into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
  pub position_id: PositionId,
  pub name:        String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionDraft {
  pub name: String,
}

impl Validate for PositionDraft {
  fn validate(&self) -> Result<()> { require_text("name", &self.name) }
}

impl Record for Position {
  type Key = PositionId;
  type Draft = PositionDraft;
  type Filter = NoFilter;

  const KIND: RecordKind = RecordKind::Position;

  fn key(&self) -> PositionId { self.position_id }
}

// ─── Coal grade ──────────────────────────────────────────────────────────────

/// A saleable coal grade. The grade name is the natural key, so the record
/// is its own draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoalGrade {
  pub grade:           GradeName,
  /// Ash content, percent of mass.
  pub ash_content:     f64,
  /// Moisture, percent of mass.
  pub moisture:        f64,
  /// Calorific value, kcal/kg.
  pub calorific_value: i64,
  pub price_per_ton:   f64,
}

pub const MAX_CALORIFIC_VALUE: i64 = 10_000;

impl Validate for CoalGrade {
  fn validate(&self) -> Result<()> {
    require_text("grade", self.grade.as_str())?;
    require_percentage("ash_content", self.ash_content)?;
    require_percentage("moisture", self.moisture)?;
    if !(0..=MAX_CALORIFIC_VALUE).contains(&self.calorific_value) {
      return Err(Error::invalid(
        "calorific_value",
        format!("must be within 0..={MAX_CALORIFIC_VALUE}"),
      ));
    }
    require_positive("price_per_ton", self.price_per_ton)
  }
}

impl Record for CoalGrade {
  type Key = GradeName;
  type Draft = CoalGrade;
  type Filter = NoFilter;

  const KIND: RecordKind = RecordKind::CoalGrade;

  fn key(&self) -> GradeName { self.grade.clone() }
}

// ─── Section ─────────────────────────────────────────────────────────────────

/// A named subdivision of the mine with its own journals and plans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
  pub section_id: SectionId,
  pub name:       String,
  /// Worked area, m².
  pub area:       Option<f64>,
  /// Seam height, m.
  pub height:     Option<f64>,
  /// The worker in charge. Cleared automatically if that worker is removed.
  pub manager:    Option<TabNumber>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionDraft {
  pub name:    String,
  #[serde(default)]
  pub area:    Option<f64>,
  #[serde(default)]
  pub height:  Option<f64>,
  #[serde(default)]
  pub manager: Option<TabNumber>,
}

impl SectionDraft {
  pub fn named(name: impl Into<String>) -> Self {
    Self { name: name.into(), area: None, height: None, manager: None }
  }
}

impl Validate for SectionDraft {
  fn validate(&self) -> Result<()> {
    require_text("name", &self.name)?;
    if let Some(area) = self.area {
      require_non_negative("area", area)?;
    }
    if let Some(height) = self.height {
      require_non_negative("height", height)?;
    }
    Ok(())
  }
}

impl Record for Section {
  type Key = SectionId;
  type Draft = SectionDraft;
  type Filter = NoFilter;

  const KIND: RecordKind = RecordKind::Section;

  fn key(&self) -> SectionId { self.section_id }
}

// ─── Worker ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
  Male,
  Female,
}

/// An employee. The tab number is assigned by HR and supplied on create, so
/// the record is its own draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worker {
  pub tab_number:  TabNumber,
  pub full_name:   String,
  pub section_id:  SectionId,
  pub position_id: PositionId,
  /// National identification number; unique across workers.
  pub iin:         String,
  #[serde(default)]
  pub address:     Option<String>,
  #[serde(default)]
  pub phone:       Option<String>,
  #[serde(default)]
  pub gender:      Option<Gender>,
  #[serde(default)]
  pub birth_date:  Option<NaiveDate>,
}

pub const MAX_TAB_NUMBER: i64 = 999_999;
pub const MAX_IIN_LEN: usize = 12;

impl Validate for Worker {
  fn validate(&self) -> Result<()> {
    if !(1..=MAX_TAB_NUMBER).contains(&self.tab_number.0) {
      return Err(Error::invalid("tab_number", format!("must be within 1..={MAX_TAB_NUMBER}")));
    }
    require_text("full_name", &self.full_name)?;
    require_text("iin", &self.iin)?;
    if self.iin.chars().count() > MAX_IIN_LEN {
      return Err(Error::invalid("iin", format!("at most {MAX_IIN_LEN} characters")));
    }
    Ok(())
  }
}

/// Criteria for the workers screen.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkerFilter {
  pub section_id:  Option<SectionId>,
  pub position_id: Option<PositionId>,
}

impl Record for Worker {
  type Key = TabNumber;
  type Draft = Worker;
  type Filter = WorkerFilter;

  const KIND: RecordKind = RecordKind::Worker;

  fn key(&self) -> TabNumber { self.tab_number }
}
