//! Read models assembled from store rows: the limits report, the journals,
//! payroll, and the dashboard.
//!
//! None of these are stored. The store supplies rows; the arithmetic that
//! turns them into values, costs and pay lives here so every backend agrees.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::{
  ids::{LimitId, SectionId, TabNumber},
  journal::{CostEvent, MiningEvent},
  limit::{Limit, Metrics, Period},
  status::{Assessment, MetricKind, Status, assess},
};

// ─── Tariffs ─────────────────────────────────────────────────────────────────

/// Unit prices used to turn consumption and hours into money.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tariffs {
  pub electricity_per_kwh: f64,
  pub fuel_per_litre:      f64,
  pub hourly_rate:         f64,
}

impl Default for Tariffs {
  fn default() -> Self {
    Self { electricity_per_kwh: 5.5, fuel_per_litre: 55.0, hourly_rate: 1500.0 }
  }
}

// ─── Limits report ───────────────────────────────────────────────────────────

/// A limit joined with the name of its section, as listed on the limits
/// screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitLine {
  #[serde(flatten)]
  pub limit:        Limit,
  pub section_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricAssessment {
  pub metric:  MetricKind,
  pub plan:    f64,
  pub actual:  f64,
  pub percent: f64,
  pub status:  Status,
}

impl MetricAssessment {
  pub fn new(metric: MetricKind, plan: f64, actual: f64) -> Self {
    let Assessment { percent, status } = assess(actual, plan, metric.direction());
    Self { metric, plan, actual, percent, status }
  }

  /// One assessment per metric, in declaration order.
  pub fn all(plan: &Metrics, actual: &Metrics) -> Vec<Self> {
    MetricKind::iter()
      .map(|m| Self::new(m, plan.get(m), actual.get(m)))
      .collect()
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitAssessment {
  pub limit_id:     LimitId,
  pub section_id:   SectionId,
  pub section_name: String,
  pub year:         i32,
  pub month:        u32,
  pub metrics:      Vec<MetricAssessment>,
}

impl LimitAssessment {
  pub fn metric(&self, kind: MetricKind) -> Option<&MetricAssessment> {
    self.metrics.iter().find(|m| m.metric == kind)
  }

  /// True if any metric is deficient or excessive.
  pub fn is_off_plan(&self) -> bool {
    self
      .metrics
      .iter()
      .any(|m| matches!(m.status, Status::Deficient | Status::Excessive))
  }
}

impl From<&LimitLine> for LimitAssessment {
  fn from(line: &LimitLine) -> Self {
    let limit = &line.limit;
    Self {
      limit_id:     limit.limit_id,
      section_id:   limit.section_id,
      section_name: line.section_name.clone(),
      year:         limit.year,
      month:        limit.month,
      metrics:      MetricAssessment::all(&limit.plan, &limit.actual),
    }
  }
}

/// Plan against actual for every listed limit, plus totals across them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitReport {
  pub generated_at: DateTime<Utc>,
  pub lines:        Vec<LimitAssessment>,
  /// Summed actuals against summed plans, classified with the same rule.
  pub totals:       Vec<MetricAssessment>,
}

impl LimitReport {
  pub fn build(lines: &[LimitLine], generated_at: DateTime<Utc>) -> Self {
    let (plan, actual) = lines.iter().fold(
      (Metrics::default(), Metrics::default()),
      |(plan, actual), line| (plan + line.limit.plan, actual + line.limit.actual),
    );
    Self {
      generated_at,
      lines: lines.iter().map(LimitAssessment::from).collect(),
      totals: MetricAssessment::all(&plan, &actual),
    }
  }
}

// ─── Mining journal ──────────────────────────────────────────────────────────

/// A mining event valued at its grade's current price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MiningLine {
  #[serde(flatten)]
  pub event:         MiningEvent,
  pub section_name:  String,
  pub price_per_ton: f64,
  pub value:         f64,
}

impl MiningLine {
  pub fn new(event: MiningEvent, section_name: String, price_per_ton: f64) -> Self {
    let value = event.coal_volume * price_per_ton;
    Self { event, section_name, price_per_ton, value }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MiningSummary {
  pub lines:        Vec<MiningLine>,
  pub total_volume: f64,
  pub total_rock:   f64,
  pub total_value:  f64,
}

impl From<Vec<MiningLine>> for MiningSummary {
  fn from(lines: Vec<MiningLine>) -> Self {
    let total_volume = lines.iter().map(|l| l.event.coal_volume).sum();
    let total_rock = lines.iter().map(|l| l.event.rock_volume).sum();
    let total_value = lines.iter().map(|l| l.value).sum();
    Self { lines, total_volume, total_rock, total_value }
  }
}

// ─── Cost journal ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostLine {
  #[serde(flatten)]
  pub event:        CostEvent,
  pub section_name: String,
  pub cost:         f64,
}

impl CostLine {
  pub fn new(event: CostEvent, section_name: String, tariffs: &Tariffs) -> Self {
    let cost =
      event.electricity * tariffs.electricity_per_kwh + event.fuel * tariffs.fuel_per_litre;
    Self { event, section_name, cost }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostSummary {
  pub tariffs:           Tariffs,
  pub lines:             Vec<CostLine>,
  pub total_electricity: f64,
  pub total_fuel:        f64,
  pub total_cost:        f64,
}

impl CostSummary {
  pub fn new(lines: Vec<CostLine>, tariffs: Tariffs) -> Self {
    let total_electricity = lines.iter().map(|l| l.event.electricity).sum();
    let total_fuel = lines.iter().map(|l| l.event.fuel).sum();
    let total_cost = lines.iter().map(|l| l.cost).sum();
    Self { tariffs, lines, total_electricity, total_fuel, total_cost }
  }
}

// ─── Payroll ─────────────────────────────────────────────────────────────────

/// Hours one worker logged in a period, as summed by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoursWorked {
  pub tab_number:   TabNumber,
  pub full_name:    String,
  pub position:     String,
  pub section_name: String,
  pub hours:        f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollLine {
  #[serde(flatten)]
  pub worked: HoursWorked,
  pub pay:    f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payroll {
  pub period:      Period,
  pub hourly_rate: f64,
  pub lines:       Vec<PayrollLine>,
  pub total_hours: f64,
  pub total_pay:   f64,
}

impl Payroll {
  pub fn new(period: Period, worked: Vec<HoursWorked>, tariffs: &Tariffs) -> Self {
    let hourly_rate = tariffs.hourly_rate;
    let lines: Vec<PayrollLine> = worked
      .into_iter()
      .map(|worked| {
        let pay = worked.hours * hourly_rate;
        PayrollLine { worked, pay }
      })
      .collect();
    let total_hours = lines.iter().map(|l| l.worked.hours).sum();
    let total_pay = lines.iter().map(|l| l.pay).sum();
    Self { period, hourly_rate, lines, total_hours, total_pay }
  }
}

// ─── Dashboard ───────────────────────────────────────────────────────────────

/// Headline figures for the start screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
  pub period:       Period,
  pub workers:      u64,
  pub sections:     u64,
  /// Coal mined across all sections within `period`, tonnes.
  pub mined_volume: f64,
}
