//! The limits aggregator.
//!
//! Every limit's actual values are recomputed from scratch from the mining
//! and cost journals. Both UPDATEs run in one transaction on the store's
//! connection thread; nothing else can interleave with them, and a failure in
//! either leaves every limit as it was.

use chrono::Utc;
use colliery_core::limit::RecalcSummary;

use crate::{Result, SqliteStore};

// A limit's period is the half-open range of `YYYY-MM-DD` strings
// `[first of month, first of next month)`. SQLite's `+1 month` on a first of
// month is exact, December included.

/// Production and rock come from the mining journal.
const REFRESH_FROM_MINING: &str = "
UPDATE limits
   SET (actual_production, actual_rock) = (
       SELECT COALESCE(SUM(m.coal_volume), 0), COALESCE(SUM(m.rock_volume), 0)
         FROM mining m
        WHERE m.section_id   = limits.section_id
          AND m.mining_date >= printf('%04d-%02d-01', limits.year, limits.month)
          AND m.mining_date <  date(printf('%04d-%02d-01', limits.year, limits.month), '+1 month'))";

/// Electricity and fuel come from the cost journal.
const REFRESH_FROM_COSTS: &str = "
UPDATE limits
   SET (actual_electricity, actual_fuel) = (
       SELECT COALESCE(SUM(c.electricity), 0), COALESCE(SUM(c.fuel), 0)
         FROM costs c
        WHERE c.section_id = limits.section_id
          AND c.cost_date >= printf('%04d-%02d-01', limits.year, limits.month)
          AND c.cost_date <  date(printf('%04d-%02d-01', limits.year, limits.month), '+1 month'))";

impl SqliteStore {
  pub(crate) async fn recalculate(&self) -> Result<RecalcSummary> {
    let outcome = self
      .conn
      .call(|conn| {
        // Dropping `tx` on any early return rolls it back.
        let tx = conn.transaction()?;
        let refreshed = tx.execute(REFRESH_FROM_MINING, [])?;
        tx.execute(REFRESH_FROM_COSTS, [])?;
        tx.commit()?;
        Ok(refreshed)
      })
      .await;

    match outcome {
      Ok(limits_refreshed) => {
        tracing::info!(limits_refreshed, "limit actuals recalculated");
        Ok(RecalcSummary { limits_refreshed, recalculated_at: Utc::now() })
      }
      Err(e) => {
        tracing::warn!(error = %e, "limit recalculation rolled back");
        Err(colliery_core::Error::TransactionFailure(e.to_string()).into())
      }
    }
  }
}
