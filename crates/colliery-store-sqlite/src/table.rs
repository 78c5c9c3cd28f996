//! How each record kind maps onto its SQLite table.
//!
//! The generic repository in [`crate::store`] assembles its statements from
//! the constant fragments declared here. Values are always bound, never
//! interpolated.

use colliery_core::{
  ids::{CostId, LimitId, MiningId, PositionId, SectionId},
  journal::{CostEvent, EventFilter, MiningEvent, TimeSheetEntry, TimeSheetFilter},
  limit::{Limit, LimitFilter, Metrics},
  record::{NoFilter, Record},
  reference::{CoalGrade, Position, Section, Worker, WorkerFilter},
};
use rusqlite::{Row, types::Value};

use crate::encode;

/// One `?`-bearing condition and the value bound to it.
pub type Condition = (&'static str, Value);

pub trait Table: Record {
  const TABLE: &'static str;
  /// Column list in the order `from_row` reads them.
  const COLUMNS: &'static str;
  /// Placeholders bound by `key_params`.
  const KEY_WHERE: &'static str;
  /// Placeholders bound by `insert_params`.
  const INSERT: &'static str;
  /// `UPDATE ... SET ...` without a WHERE clause. Placeholders bound by
  /// `draft_params`, followed by the key.
  const UPDATE_SET: &'static str;
  const ORDER_BY: &'static str;

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;

  fn key_params(key: &Self::Key) -> Vec<Value>;

  fn draft_params(draft: &Self::Draft) -> Vec<Value>;

  fn insert_params(draft: &Self::Draft) -> Vec<Value> { Self::draft_params(draft) }

  fn conditions(filter: &Self::Filter) -> Vec<Condition>;

  /// The key of a row just written by `INSERT`.
  fn inserted_key(draft: &Self::Draft, rowid: i64) -> Self::Key;

  /// The key after an update. Natural keys follow the draft.
  fn updated_key(key: Self::Key, _draft: &Self::Draft) -> Self::Key { key }
}

// ─── Statement assembly ──────────────────────────────────────────────────────

pub fn select_by_key<T: Table>() -> String {
  format!("SELECT {} FROM {} WHERE {}", T::COLUMNS, T::TABLE, T::KEY_WHERE)
}

pub fn update_by_key<T: Table>() -> String { format!("{} WHERE {}", T::UPDATE_SET, T::KEY_WHERE) }

pub fn delete_by_key<T: Table>() -> String {
  format!("DELETE FROM {} WHERE {}", T::TABLE, T::KEY_WHERE)
}

/// Split conditions into a `WHERE` clause (empty if none) and its values.
pub fn where_clause(conditions: Vec<Condition>) -> (String, Vec<Value>) {
  if conditions.is_empty() {
    return (String::new(), Vec::new());
  }
  let (fragments, values): (Vec<&'static str>, Vec<Value>) = conditions.into_iter().unzip();
  (format!("WHERE {}", fragments.join(" AND ")), values)
}

pub fn select_filtered<T: Table>(filter: &T::Filter) -> (String, Vec<Value>) {
  let (where_sql, values) = where_clause(T::conditions(filter));
  let sql = format!("SELECT {} FROM {} {where_sql} ORDER BY {}", T::COLUMNS, T::TABLE, T::ORDER_BY);
  (sql, values)
}

fn push<V: Into<Value>>(out: &mut Vec<Condition>, sql: &'static str, value: Option<V>) {
  if let Some(v) = value {
    out.push((sql, v.into()));
  }
}

// ─── Reference tables ────────────────────────────────────────────────────────

impl Table for Position {
  const TABLE: &'static str = "positions";
  const COLUMNS: &'static str = "position_id, name";
  const KEY_WHERE: &'static str = "position_id = ?";
  const INSERT: &'static str = "INSERT INTO positions (name) VALUES (?)";
  const UPDATE_SET: &'static str = "UPDATE positions SET name = ?";
  const ORDER_BY: &'static str = "position_id";

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self { position_id: PositionId(row.get(0)?), name: row.get(1)? })
  }

  fn key_params(key: &PositionId) -> Vec<Value> { vec![key.0.into()] }

  fn draft_params(draft: &Self::Draft) -> Vec<Value> { vec![draft.name.clone().into()] }

  fn conditions(_: &NoFilter) -> Vec<Condition> { Vec::new() }

  fn inserted_key(_: &Self::Draft, rowid: i64) -> PositionId { PositionId(rowid) }
}

impl Table for CoalGrade {
  const TABLE: &'static str = "coal_grades";
  const COLUMNS: &'static str = "grade, ash_content, moisture, calorific_value, price_per_ton";
  const KEY_WHERE: &'static str = "grade = ?";
  const INSERT: &'static str = "INSERT INTO coal_grades
     (grade, ash_content, moisture, calorific_value, price_per_ton)
     VALUES (?, ?, ?, ?, ?)";
  const UPDATE_SET: &'static str = "UPDATE coal_grades SET
     grade = ?, ash_content = ?, moisture = ?, calorific_value = ?, price_per_ton = ?";
  const ORDER_BY: &'static str = "grade";

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      grade:           row.get::<_, String>(0)?.into(),
      ash_content:     row.get(1)?,
      moisture:        row.get(2)?,
      calorific_value: row.get(3)?,
      price_per_ton:   row.get(4)?,
    })
  }

  fn key_params(key: &Self::Key) -> Vec<Value> { vec![key.as_str().to_owned().into()] }

  fn draft_params(g: &CoalGrade) -> Vec<Value> {
    vec![
      g.grade.as_str().to_owned().into(),
      g.ash_content.into(),
      g.moisture.into(),
      g.calorific_value.into(),
      g.price_per_ton.into(),
    ]
  }

  fn conditions(_: &NoFilter) -> Vec<Condition> { Vec::new() }

  fn inserted_key(draft: &CoalGrade, _: i64) -> Self::Key { draft.grade.clone() }

  fn updated_key(_: Self::Key, draft: &CoalGrade) -> Self::Key { draft.grade.clone() }
}

impl Table for Section {
  const TABLE: &'static str = "sections";
  const COLUMNS: &'static str = "section_id, name, area, height, manager";
  const KEY_WHERE: &'static str = "section_id = ?";
  const INSERT: &'static str =
    "INSERT INTO sections (name, area, height, manager) VALUES (?, ?, ?, ?)";
  const UPDATE_SET: &'static str =
    "UPDATE sections SET name = ?, area = ?, height = ?, manager = ?";
  const ORDER_BY: &'static str = "section_id";

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      section_id: SectionId(row.get(0)?),
      name:       row.get(1)?,
      area:       row.get(2)?,
      height:     row.get(3)?,
      manager:    row.get::<_, Option<i64>>(4)?.map(Into::into),
    })
  }

  fn key_params(key: &SectionId) -> Vec<Value> { vec![key.0.into()] }

  fn draft_params(d: &Self::Draft) -> Vec<Value> {
    vec![
      d.name.clone().into(),
      d.area.into(),
      d.height.into(),
      d.manager.map(|m| m.0).into(),
    ]
  }

  fn conditions(_: &NoFilter) -> Vec<Condition> { Vec::new() }

  fn inserted_key(_: &Self::Draft, rowid: i64) -> SectionId { SectionId(rowid) }
}

impl Table for Worker {
  const TABLE: &'static str = "workers";
  const COLUMNS: &'static str = "tab_number, full_name, section_id, position_id, iin, \
                                 address, phone, gender, birth_date";
  const KEY_WHERE: &'static str = "tab_number = ?";
  const INSERT: &'static str = "INSERT INTO workers
     (tab_number, full_name, section_id, position_id, iin, address, phone, gender, birth_date)
     VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)";
  const UPDATE_SET: &'static str = "UPDATE workers SET
     tab_number = ?, full_name = ?, section_id = ?, position_id = ?, iin = ?,
     address = ?, phone = ?, gender = ?, birth_date = ?";
  const ORDER_BY: &'static str = "tab_number";

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      tab_number:  row.get::<_, i64>(0)?.into(),
      full_name:   row.get(1)?,
      section_id:  SectionId(row.get(2)?),
      position_id: PositionId(row.get(3)?),
      iin:         row.get(4)?,
      address:     row.get(5)?,
      phone:       row.get(6)?,
      gender:      encode::decode_gender(row, 7)?,
      birth_date:  row.get(8)?,
    })
  }

  fn key_params(key: &Self::Key) -> Vec<Value> { vec![key.0.into()] }

  fn draft_params(w: &Worker) -> Vec<Value> {
    vec![
      w.tab_number.0.into(),
      w.full_name.clone().into(),
      w.section_id.0.into(),
      w.position_id.0.into(),
      w.iin.clone().into(),
      w.address.clone().into(),
      w.phone.clone().into(),
      encode::gender(w.gender),
      encode::opt_date(w.birth_date),
    ]
  }

  fn conditions(f: &WorkerFilter) -> Vec<Condition> {
    let mut out = Vec::new();
    push(&mut out, "section_id = ?", f.section_id.map(|s| s.0));
    push(&mut out, "position_id = ?", f.position_id.map(|p| p.0));
    out
  }

  fn inserted_key(draft: &Worker, _: i64) -> Self::Key { draft.tab_number }

  fn updated_key(_: Self::Key, draft: &Worker) -> Self::Key { draft.tab_number }
}

// ─── Journals ────────────────────────────────────────────────────────────────

fn event_conditions(f: &EventFilter, date_column: DateColumn) -> Vec<Condition> {
  let mut out = Vec::new();
  push(&mut out, "section_id = ?", f.section_id.map(|s| s.0));
  push(&mut out, date_column.from, f.from.map(encode::date));
  push(&mut out, date_column.to, f.to.map(encode::date));
  out
}

/// Inclusive bounds on a journal's date column.
struct DateColumn {
  from: &'static str,
  to:   &'static str,
}

const MINING_DATE: DateColumn =
  DateColumn { from: "mining_date >= ?", to: "mining_date <= ?" };
const COST_DATE: DateColumn = DateColumn { from: "cost_date >= ?", to: "cost_date <= ?" };
const WORK_DATE: DateColumn = DateColumn { from: "work_date >= ?", to: "work_date <= ?" };

impl Table for MiningEvent {
  const TABLE: &'static str = "mining";
  const COLUMNS: &'static str =
    "mining_id, mining_date, shift, section_id, grade, coal_volume, rock_volume";
  const KEY_WHERE: &'static str = "mining_id = ?";
  const INSERT: &'static str = "INSERT INTO mining
     (mining_date, shift, section_id, grade, coal_volume, rock_volume)
     VALUES (?, ?, ?, ?, ?, ?)";
  const UPDATE_SET: &'static str = "UPDATE mining SET
     mining_date = ?, shift = ?, section_id = ?, grade = ?, coal_volume = ?, rock_volume = ?";
  const ORDER_BY: &'static str = "mining_date DESC, mining_id DESC";

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      mining_id:   MiningId(row.get(0)?),
      date:        row.get(1)?,
      shift:       encode::decode_shift(row, 2)?,
      section_id:  SectionId(row.get(3)?),
      grade:       row.get::<_, String>(4)?.into(),
      coal_volume: row.get(5)?,
      rock_volume: row.get(6)?,
    })
  }

  fn key_params(key: &MiningId) -> Vec<Value> { vec![key.0.into()] }

  fn draft_params(d: &Self::Draft) -> Vec<Value> {
    vec![
      encode::date(d.date),
      encode::shift(d.shift),
      d.section_id.0.into(),
      d.grade.as_str().to_owned().into(),
      d.coal_volume.into(),
      d.rock_volume.into(),
    ]
  }

  fn conditions(f: &EventFilter) -> Vec<Condition> { event_conditions(f, MINING_DATE) }

  fn inserted_key(_: &Self::Draft, rowid: i64) -> MiningId { MiningId(rowid) }
}

impl Table for CostEvent {
  const TABLE: &'static str = "costs";
  const COLUMNS: &'static str = "cost_id, cost_date, shift, section_id, electricity, fuel";
  const KEY_WHERE: &'static str = "cost_id = ?";
  const INSERT: &'static str = "INSERT INTO costs
     (cost_date, shift, section_id, electricity, fuel)
     VALUES (?, ?, ?, ?, ?)";
  const UPDATE_SET: &'static str = "UPDATE costs SET
     cost_date = ?, shift = ?, section_id = ?, electricity = ?, fuel = ?";
  const ORDER_BY: &'static str = "cost_date DESC, cost_id DESC";

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      cost_id:     CostId(row.get(0)?),
      date:        row.get(1)?,
      shift:       encode::decode_shift(row, 2)?,
      section_id:  SectionId(row.get(3)?),
      electricity: row.get(4)?,
      fuel:        row.get(5)?,
    })
  }

  fn key_params(key: &CostId) -> Vec<Value> { vec![key.0.into()] }

  fn draft_params(d: &Self::Draft) -> Vec<Value> {
    vec![
      encode::date(d.date),
      encode::shift(d.shift),
      d.section_id.0.into(),
      d.electricity.into(),
      d.fuel.into(),
    ]
  }

  fn conditions(f: &EventFilter) -> Vec<Condition> { event_conditions(f, COST_DATE) }

  fn inserted_key(_: &Self::Draft, rowid: i64) -> CostId { CostId(rowid) }
}

/// The section is never bound from the draft: both statements read it from
/// the worker row. An unknown worker inserts nothing, or fails the NOT NULL
/// check on update.
impl Table for TimeSheetEntry {
  const TABLE: &'static str = "timesheet";
  const COLUMNS: &'static str = "work_date, shift, tab_number, section_id, hours_worked";
  const KEY_WHERE: &'static str = "work_date = ? AND shift = ? AND tab_number = ?";
  const INSERT: &'static str = "INSERT INTO timesheet
     (work_date, shift, tab_number, section_id, hours_worked)
     SELECT ?, ?, ?, section_id, ? FROM workers WHERE tab_number = ?";
  const UPDATE_SET: &'static str = "UPDATE timesheet SET
     work_date = ?, shift = ?, tab_number = ?,
     section_id = (SELECT section_id FROM workers WHERE tab_number = ?),
     hours_worked = ?";
  const ORDER_BY: &'static str = "work_date DESC, shift, tab_number";

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      date:         row.get(0)?,
      shift:        encode::decode_shift(row, 1)?,
      tab_number:   row.get::<_, i64>(2)?.into(),
      section_id:   SectionId(row.get(3)?),
      hours_worked: row.get(4)?,
    })
  }

  fn key_params(key: &Self::Key) -> Vec<Value> {
    vec![encode::date(key.date), encode::shift(key.shift), key.tab_number.0.into()]
  }

  fn draft_params(d: &Self::Draft) -> Vec<Value> {
    vec![
      encode::date(d.date),
      encode::shift(d.shift),
      d.tab_number.0.into(),
      d.tab_number.0.into(),
      d.hours_worked.into(),
    ]
  }

  fn insert_params(d: &Self::Draft) -> Vec<Value> {
    vec![
      encode::date(d.date),
      encode::shift(d.shift),
      d.tab_number.0.into(),
      d.hours_worked.into(),
      d.tab_number.0.into(),
    ]
  }

  fn conditions(f: &TimeSheetFilter) -> Vec<Condition> {
    let mut out = Vec::new();
    push(&mut out, "section_id = ?", f.section_id.map(|s| s.0));
    push(&mut out, "tab_number = ?", f.tab_number.map(|t| t.0));
    push(&mut out, WORK_DATE.from, f.from.map(encode::date));
    push(&mut out, WORK_DATE.to, f.to.map(encode::date));
    out
  }

  fn inserted_key(draft: &Self::Draft, _: i64) -> Self::Key { draft.key() }

  fn updated_key(_: Self::Key, draft: &Self::Draft) -> Self::Key { draft.key() }
}

// ─── Limits ──────────────────────────────────────────────────────────────────

impl Table for Limit {
  const TABLE: &'static str = "limits";
  const COLUMNS: &'static str = "limit_id, section_id, month, year, \
                                 plan_production, plan_rock, plan_electricity, plan_fuel, \
                                 actual_production, actual_rock, actual_electricity, actual_fuel";
  const KEY_WHERE: &'static str = "limit_id = ?";
  const INSERT: &'static str = "INSERT INTO limits
     (section_id, month, year, plan_production, plan_rock, plan_electricity, plan_fuel)
     VALUES (?, ?, ?, ?, ?, ?, ?)";
  /// Actuals are left alone; they belong to the aggregator.
  const UPDATE_SET: &'static str = "UPDATE limits SET
     section_id = ?, month = ?, year = ?,
     plan_production = ?, plan_rock = ?, plan_electricity = ?, plan_fuel = ?";
  const ORDER_BY: &'static str = "year, month, section_id";

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      limit_id:   LimitId(row.get(0)?),
      section_id: SectionId(row.get(1)?),
      month:      row.get(2)?,
      year:       row.get(3)?,
      plan:       Metrics {
        production:  row.get(4)?,
        rock:        row.get(5)?,
        electricity: row.get(6)?,
        fuel:        row.get(7)?,
      },
      actual:     Metrics {
        production:  row.get(8)?,
        rock:        row.get(9)?,
        electricity: row.get(10)?,
        fuel:        row.get(11)?,
      },
    })
  }

  fn key_params(key: &LimitId) -> Vec<Value> { vec![key.0.into()] }

  fn draft_params(d: &Self::Draft) -> Vec<Value> {
    vec![
      d.section_id.0.into(),
      d.month.into(),
      d.year.into(),
      d.plan.production.into(),
      d.plan.rock.into(),
      d.plan.electricity.into(),
      d.plan.fuel.into(),
    ]
  }

  fn conditions(f: &LimitFilter) -> Vec<Condition> {
    let mut out = Vec::new();
    push(&mut out, "section_id = ?", f.section_id.map(|s| s.0));
    push(&mut out, "year = ?", f.year);
    push(&mut out, "month = ?", f.month);
    out
  }

  fn inserted_key(_: &Self::Draft, rowid: i64) -> LimitId { LimitId(rowid) }
}

/// Number of columns in [`Limit::COLUMNS`]; joined queries read extra
/// columns from this index on.
pub const LIMIT_WIDTH: usize = 12;
pub const MINING_WIDTH: usize = 7;
pub const COST_WIDTH: usize = 6;
