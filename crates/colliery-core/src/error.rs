//! Error types for `colliery-core`.

use thiserror::Error;

use crate::record::RecordKind;

/// The coarse class of a failure, shared by every layer.
///
/// Backends classify their own errors into one of these so that callers (the
/// HTTP adapter, the terminal UI) can react without knowing which store is
/// underneath.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  /// A field is outside its declared range; nothing reached the store.
  InvalidInput,
  /// The addressed row does not exist.
  NotFound,
  /// A uniqueness or foreign-key rule rejected the write.
  ConstraintViolation,
  /// A multi-row unit of work was rolled back.
  TransactionFailure,
  /// Anything else the backend could not do.
  Storage,
}

/// Implemented by every error type a store backend can return.
pub trait Classify {
  fn kind(&self) -> ErrorKind;
}

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid {field}: {reason}")]
  InvalidInput {
    field:  &'static str,
    reason: String,
  },

  #[error("{kind} {key} not found")]
  NotFound { kind: RecordKind, key: String },

  #[error("constraint violation: {0}")]
  ConstraintViolation(String),

  #[error("transaction rolled back: {0}")]
  TransactionFailure(String),
}

impl Error {
  pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
    Self::InvalidInput { field, reason: reason.into() }
  }

  pub fn not_found(kind: RecordKind, key: impl ToString) -> Self {
    Self::NotFound { kind, key: key.to_string() }
  }
}

impl Classify for Error {
  fn kind(&self) -> ErrorKind {
    match self {
      Self::InvalidInput { .. } => ErrorKind::InvalidInput,
      Self::NotFound { .. } => ErrorKind::NotFound,
      Self::ConstraintViolation(_) => ErrorKind::ConstraintViolation,
      Self::TransactionFailure(_) => ErrorKind::TransactionFailure,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
