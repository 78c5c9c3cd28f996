//! [`SqliteStore`]: the SQLite implementation of [`MineStore`].

use std::path::Path;

use rusqlite::{OptionalExtension as _, params_from_iter};

use colliery_core::{
  journal::{CostEvent, EventFilter, MiningEvent},
  limit::{Limit, LimitFilter, Period, RecalcSummary},
  record::{Record, Validate},
  report::{
    CostLine, CostSummary, Dashboard, HoursWorked, LimitLine, MiningLine, MiningSummary, Payroll,
    Tariffs,
  },
  store::{MineStore, Repository, StoreBackend},
};

use crate::{
  Error, Result, encode,
  schema::SCHEMA,
  table::{self, COST_WIDTH, LIMIT_WIDTH, MINING_WIDTH, Table},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A colliery record store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted and every
/// clone talks to the same database thread.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store; useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

impl StoreBackend for SqliteStore {
  type Error = Error;
}

// ─── Generic repository ──────────────────────────────────────────────────────

impl<R: Table> Repository<R> for SqliteStore {
  async fn create(&self, draft: R::Draft) -> Result<R> {
    draft.validate()?;

    let params = R::insert_params(&draft);
    let select = table::select_by_key::<R>();

    let created = self
      .conn
      .call(move |conn| {
        if conn.execute(R::INSERT, params_from_iter(params))? == 0 {
          return Ok(None);
        }
        let key = R::inserted_key(&draft, conn.last_insert_rowid());
        let row = conn.query_row(&select, params_from_iter(R::key_params(&key)), R::from_row)?;
        Ok(Some(row))
      })
      .await?;

    // Only the time sheet's INSERT ... SELECT can write nothing: the worker
    // it names does not exist.
    let record = created.ok_or_else(|| {
      colliery_core::Error::ConstraintViolation(format!("{} refers to an unknown row", R::KIND))
    })?;

    tracing::debug!(kind = %R::KIND, key = %record.key(), "record created");
    Ok(record)
  }

  async fn get(&self, key: R::Key) -> Result<Option<R>> {
    let sql = table::select_by_key::<R>();
    let params = R::key_params(&key);

    let record = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(&sql, params_from_iter(params), R::from_row).optional()?)
      })
      .await?;
    Ok(record)
  }

  async fn list(&self, filter: R::Filter) -> Result<Vec<R>> {
    let (sql, params) = table::select_filtered::<R>(&filter);

    let records = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(params_from_iter(params), R::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(records)
  }

  async fn update(&self, key: R::Key, draft: R::Draft) -> Result<R> {
    draft.validate()?;

    let update = table::update_by_key::<R>();
    let select = table::select_by_key::<R>();
    let mut params = R::draft_params(&draft);
    params.extend(R::key_params(&key));
    let new_key = R::updated_key(key.clone(), &draft);
    let new_key_params = R::key_params(&new_key);

    let updated = self
      .conn
      .call(move |conn| {
        if conn.execute(&update, params_from_iter(params))? == 0 {
          return Ok(None);
        }
        let row = conn.query_row(&select, params_from_iter(new_key_params), R::from_row)?;
        Ok(Some(row))
      })
      .await?;

    let record = updated.ok_or_else(|| colliery_core::Error::not_found(R::KIND, &key))?;
    tracing::debug!(kind = %R::KIND, %key, "record updated");
    Ok(record)
  }

  async fn delete(&self, key: R::Key) -> Result<()> {
    let sql = table::delete_by_key::<R>();
    let params = R::key_params(&key);

    let deleted = self
      .conn
      .call(move |conn| Ok(conn.execute(&sql, params_from_iter(params))?))
      .await?;

    if deleted == 0 {
      return Err(colliery_core::Error::not_found(R::KIND, &key).into());
    }
    tracing::debug!(kind = %R::KIND, %key, "record deleted");
    Ok(())
  }
}

// ─── Reports ─────────────────────────────────────────────────────────────────

const PAYROLL: &str = "
SELECT w.tab_number, w.full_name, p.name, s.name, SUM(t.hours_worked)
  FROM timesheet t
  JOIN workers   w ON w.tab_number  = t.tab_number
  JOIN positions p ON p.position_id = w.position_id
  JOIN sections  s ON s.section_id  = t.section_id
 WHERE t.work_date >= ? AND t.work_date < ?
 GROUP BY w.tab_number, s.section_id
 ORDER BY w.tab_number, s.section_id";

const DASHBOARD: &str = "
SELECT (SELECT COUNT(*) FROM workers),
       (SELECT COUNT(*) FROM sections),
       (SELECT COALESCE(SUM(coal_volume), 0) FROM mining
         WHERE mining_date >= ?1 AND mining_date < ?2)";

impl MineStore for SqliteStore {
  async fn recalculate_actuals(&self) -> Result<RecalcSummary> { self.recalculate().await }

  async fn limit_lines(&self, filter: LimitFilter) -> Result<Vec<LimitLine>> {
    let (where_sql, params) = table::where_clause(Limit::conditions(&filter));
    let sql = format!(
      "SELECT {}, s.name FROM limits JOIN sections s USING (section_id) {where_sql} ORDER BY {}",
      Limit::COLUMNS,
      Limit::ORDER_BY,
    );

    let lines = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(params_from_iter(params), |row| {
            Ok(LimitLine { limit: Limit::from_row(row)?, section_name: row.get(LIMIT_WIDTH)? })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(lines)
  }

  async fn mining_journal(&self, filter: EventFilter) -> Result<MiningSummary> {
    let (where_sql, params) = table::where_clause(MiningEvent::conditions(&filter));
    let sql = format!(
      "SELECT {}, s.name, g.price_per_ton
         FROM mining
         JOIN sections s USING (section_id)
         JOIN coal_grades g USING (grade)
         {where_sql}
        ORDER BY {}",
      MiningEvent::COLUMNS,
      MiningEvent::ORDER_BY,
    );

    let lines = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(params_from_iter(params), |row| {
            Ok(MiningLine::new(
              MiningEvent::from_row(row)?,
              row.get(MINING_WIDTH)?,
              row.get(MINING_WIDTH + 1)?,
            ))
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(MiningSummary::from(lines))
  }

  async fn cost_journal(&self, filter: EventFilter, tariffs: Tariffs) -> Result<CostSummary> {
    let (where_sql, params) = table::where_clause(CostEvent::conditions(&filter));
    let sql = format!(
      "SELECT {}, s.name FROM costs JOIN sections s USING (section_id) {where_sql} ORDER BY {}",
      CostEvent::COLUMNS,
      CostEvent::ORDER_BY,
    );

    let lines = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(params_from_iter(params), |row| {
            Ok(CostLine::new(CostEvent::from_row(row)?, row.get(COST_WIDTH)?, &tariffs))
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(CostSummary::new(lines, tariffs))
  }

  async fn payroll(&self, period: Period, tariffs: Tariffs) -> Result<Payroll> {
    let bounds = [encode::date(period.first_day()), encode::date(period.end_exclusive())];

    let worked = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(PAYROLL)?;
        let rows = stmt
          .query_map(params_from_iter(bounds), |row| {
            Ok(HoursWorked {
              tab_number:   row.get::<_, i64>(0)?.into(),
              full_name:    row.get(1)?,
              position:     row.get(2)?,
              section_name: row.get(3)?,
              hours:        row.get(4)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(Payroll::new(period, worked, &tariffs))
  }

  async fn dashboard(&self, period: Period) -> Result<Dashboard> {
    let bounds = [encode::date(period.first_day()), encode::date(period.end_exclusive())];

    let (workers, sections, mined_volume) = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(DASHBOARD, params_from_iter(bounds), |row| {
          Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?, row.get::<_, f64>(2)?))
        })?)
      })
      .await?;

    Ok(Dashboard {
      period,
      workers: workers.unsigned_abs(),
      sections: sections.unsigned_abs(),
      mined_volume,
    })
  }
}
