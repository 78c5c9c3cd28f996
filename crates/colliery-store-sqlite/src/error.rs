//! Error type for `colliery-store-sqlite`.

use colliery_core::{Classify, ErrorKind};
use rusqlite::ErrorCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Validation, not-found, constraint and rollback failures. SQLite
  /// constraint errors are folded into this variant on conversion.
  #[error(transparent)]
  Core(#[from] colliery_core::Error),

  #[error("database error: {0}")]
  Database(tokio_rusqlite::Error),
}

impl From<tokio_rusqlite::Error> for Error {
  fn from(err: tokio_rusqlite::Error) -> Self {
    match constraint_message(&err) {
      Some(msg) => Self::Core(colliery_core::Error::ConstraintViolation(msg)),
      None => Self::Database(err),
    }
  }
}

/// The SQLite message if `err` is a UNIQUE, FOREIGN KEY, CHECK or NOT NULL
/// failure.
fn constraint_message(err: &tokio_rusqlite::Error) -> Option<String> {
  let tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(failure, msg)) = err else {
    return None;
  };
  (failure.code == ErrorCode::ConstraintViolation)
    .then(|| msg.clone().unwrap_or_else(|| failure.to_string()))
}

impl Classify for Error {
  fn kind(&self) -> ErrorKind {
    match self {
      Self::Core(e) => e.kind(),
      Self::Database(_) => ErrorKind::Storage,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
