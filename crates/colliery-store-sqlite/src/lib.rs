//! SQLite backend for the colliery record store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on one dedicated
//! thread without blocking the async runtime. Every statement is a constant
//! string with bound parameters.

mod encode;
mod recalc;
mod schema;
mod seed;
mod store;
mod table;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
