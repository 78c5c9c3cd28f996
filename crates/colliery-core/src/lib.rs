//! Core types and trait definitions for the colliery record store.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Every other crate depends on it: the entity model, input validation, the
//! data-access contract, and the plan-versus-actual status classifier all
//! live here.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod ids;
pub mod journal;
pub mod limit;
pub mod record;
pub mod reference;
pub mod report;
pub mod status;
pub mod store;

pub use error::{Classify, Error, ErrorKind, Result};
