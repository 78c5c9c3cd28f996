//! Plan-versus-actual status classification.
//!
//! Production is an output metric: more is better. Rock, electricity and fuel
//! are consumption metrics: staying at or under plan is the goal. Thresholds
//! are asymmetric between the two.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
  /// Higher actuals are better.
  Output,
  /// Lower actuals are better.
  Consumption,
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
  strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MetricKind {
  Production,
  Rock,
  Electricity,
  Fuel,
}

impl MetricKind {
  pub fn direction(self) -> Direction {
    match self {
      Self::Production => Direction::Output,
      Self::Rock | Self::Electricity | Self::Fuel => Direction::Consumption,
    }
  }

  pub fn unit(self) -> &'static str {
    match self {
      Self::Production | Self::Rock => "t",
      Self::Electricity => "kWh",
      Self::Fuel => "l",
    }
  }
}

/// Output metrics are `Deficient`, `Warning` or `Met`; consumption metrics are
/// `Met`, `Warning` or `Excessive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Status {
  Deficient,
  Warning,
  Met,
  Excessive,
}

const OUTPUT_WARNING_FROM: f64 = 80.0;
const OUTPUT_MET_FROM: f64 = 100.0;
const CONSUMPTION_MET_UP_TO: f64 = 100.0;
const CONSUMPTION_WARNING_UP_TO: f64 = 120.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
  /// Actual as a percentage of plan, rounded to two decimal places.
  pub percent: f64,
  pub status:  Status,
}

/// `actual / plan * 100`, rounded to two decimals. A plan that is zero,
/// negative or not a number yields `0.0`, as does a non-finite actual.
pub fn percent_of_plan(actual: f64, plan: f64) -> f64 {
  if !plan.is_finite() || plan <= 0.0 || !actual.is_finite() {
    return 0.0;
  }
  let percent = (actual / plan * 100.0 * 100.0).round() / 100.0;
  if percent.is_finite() { percent } else { 0.0 }
}

/// Classify an actual against its plan. Total and pure.
///
/// The status is decided on the rounded percentage, so a displayed `80.00`
/// never reads as deficient.
pub fn assess(actual: f64, plan: f64, direction: Direction) -> Assessment {
  let percent = percent_of_plan(actual, plan);
  let status = match direction {
    Direction::Output if percent < OUTPUT_WARNING_FROM => Status::Deficient,
    Direction::Output if percent < OUTPUT_MET_FROM => Status::Warning,
    Direction::Output => Status::Met,
    Direction::Consumption if percent <= CONSUMPTION_MET_UP_TO => Status::Met,
    Direction::Consumption if percent <= CONSUMPTION_WARNING_UP_TO => Status::Warning,
    Direction::Consumption => Status::Excessive,
  };
  Assessment { percent, status }
}

#[cfg(test)]
mod tests {
  use strum::IntoEnumIterator;

  use super::*;

  fn output(actual: f64, plan: f64) -> Assessment { assess(actual, plan, Direction::Output) }

  fn consumption(actual: f64, plan: f64) -> Assessment {
    assess(actual, plan, Direction::Consumption)
  }

  #[test]
  fn zero_plan_gives_zero_percent() {
    for actual in [0.0, 1.0, 1e9] {
      let o = output(actual, 0.0);
      assert_eq!(o.percent, 0.0);
      assert_eq!(o.status, Status::Deficient);

      let c = consumption(actual, 0.0);
      assert_eq!(c.percent, 0.0);
      assert_eq!(c.status, Status::Met);
    }
  }

  #[test]
  fn degenerate_inputs_never_panic() {
    assert_eq!(output(f64::NAN, 100.0).percent, 0.0);
    assert_eq!(output(100.0, f64::NAN).percent, 0.0);
    assert_eq!(output(f64::INFINITY, 100.0).percent, 0.0);
    assert_eq!(output(100.0, -5.0).percent, 0.0);
    assert_eq!(consumption(f64::MAX, f64::MIN_POSITIVE).percent, 0.0);
  }

  #[test]
  fn output_boundaries() {
    assert_eq!(output(799.9, 1000.0).status, Status::Deficient);
    assert_eq!(output(800.0, 1000.0).status, Status::Warning);
    assert_eq!(output(999.9, 1000.0).status, Status::Warning);
    assert_eq!(output(1000.0, 1000.0).status, Status::Met);
    assert_eq!(output(1500.0, 1000.0).status, Status::Met);
  }

  #[test]
  fn consumption_boundaries() {
    assert_eq!(consumption(1000.0, 1000.0).status, Status::Met);
    assert_eq!(consumption(1000.1, 1000.0).status, Status::Warning);
    assert_eq!(consumption(1200.0, 1000.0).status, Status::Warning);
    assert_eq!(consumption(1200.1, 1000.0).status, Status::Excessive);
    assert_eq!(consumption(0.0, 1000.0).status, Status::Met);
  }

  #[test]
  fn status_uses_the_rounded_percentage() {
    // 79.996% displays as 80.00 and must classify the same way.
    let a = output(79.996, 100.0);
    assert_eq!(a.percent, 80.0);
    assert_eq!(a.status, Status::Warning);

    let c = consumption(120.004, 100.0);
    assert_eq!(c.percent, 120.0);
    assert_eq!(c.status, Status::Warning);
  }

  #[test]
  fn production_shortfall_scenario() {
    let a = assess(550.0, 1000.0, MetricKind::Production.direction());
    assert_eq!(a.percent, 55.0);
    assert_eq!(a.status, Status::Deficient);
  }

  #[test]
  fn rock_overrun_scenario() {
    let a = assess(550.0, 500.0, MetricKind::Rock.direction());
    assert_eq!(a.percent, 110.0);
    assert_eq!(a.status, Status::Warning);
  }

  #[test]
  fn only_production_is_an_output_metric() {
    let outputs: Vec<_> =
      MetricKind::iter().filter(|m| m.direction() == Direction::Output).collect();
    assert_eq!(outputs, vec![MetricKind::Production]);
  }

  #[test]
  fn percent_rounds_to_two_decimals() {
    assert_eq!(percent_of_plan(1.0, 3.0), 33.33);
    assert_eq!(percent_of_plan(2.0, 3.0), 66.67);
  }
}
