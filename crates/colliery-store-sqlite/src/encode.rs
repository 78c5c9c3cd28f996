//! Conversions between domain values and SQLite column values.
//!
//! Dates are stored as `YYYY-MM-DD` text so that lexical order is calendar
//! order and period bounds compare with plain `>=` / `<`. Shifts are stored as
//! `1` / `2`, genders as lowercase words.

use chrono::NaiveDate;
use colliery_core::{journal::Shift, reference::Gender};
use rusqlite::{
  Row,
  types::{Type, Value},
};

// ─── Encode ──────────────────────────────────────────────────────────────────

pub fn date(d: NaiveDate) -> Value { Value::Text(d.format("%Y-%m-%d").to_string()) }

pub fn opt_date(d: Option<NaiveDate>) -> Value { d.map(date).unwrap_or(Value::Null) }

pub fn shift(s: Shift) -> Value { Value::Integer(i64::from(u8::from(s))) }

pub fn gender(g: Option<Gender>) -> Value {
  match g {
    Some(Gender::Male) => Value::Text("male".into()),
    Some(Gender::Female) => Value::Text("female".into()),
    None => Value::Null,
  }
}

// ─── Decode ──────────────────────────────────────────────────────────────────

pub fn decode_shift(row: &Row<'_>, idx: usize) -> rusqlite::Result<Shift> {
  let raw: u8 = row.get(idx)?;
  Shift::try_from(raw)
    .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Integer, Box::new(e)))
}

pub fn decode_gender(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<Gender>> {
  let raw: Option<String> = row.get(idx)?;
  match raw.as_deref() {
    None => Ok(None),
    Some("male") => Ok(Some(Gender::Male)),
    Some("female") => Ok(Some(Gender::Female)),
    Some(other) => Err(rusqlite::Error::FromSqlConversionFailure(
      idx,
      Type::Text,
      format!("unknown gender: {other:?}").into(),
    )),
  }
}
