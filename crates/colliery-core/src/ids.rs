//! Typed keys for every record kind.
//!
//! Integer keys are thin newtypes so a section id can never be passed where a
//! worker's tab number is expected. All of them serialise as bare values.

use std::{convert::Infallible, fmt, num::ParseIntError, str::FromStr};

use serde::{Deserialize, Serialize};

macro_rules! integer_key {
  ($(#[$meta:meta])* $name:ident) => {
    $(#[$meta])*
    #[derive(
      Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    )]
    #[serde(transparent)]
    pub struct $name(pub i64);

    impl fmt::Display for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { self.0.fmt(f) }
    }

    impl FromStr for $name {
      type Err = ParseIntError;

      fn from_str(s: &str) -> Result<Self, Self::Err> { s.trim().parse().map(Self) }
    }

    impl From<i64> for $name {
      fn from(v: i64) -> Self { Self(v) }
    }
  };
}

integer_key! {
  /// Store-assigned identity of a [`Position`](crate::reference::Position).
  PositionId
}

integer_key! {
  /// Store-assigned identity of a [`Section`](crate::reference::Section).
  SectionId
}

integer_key! {
  /// A worker's personnel ("tab") number; assigned by HR, not by the store.
  TabNumber
}

integer_key! {
  MiningId
}

integer_key! {
  CostId
}

integer_key! {
  LimitId
}

/// Natural key of a coal grade (its trade name, e.g. "Anthracite").
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GradeName(pub String);

impl GradeName {
  pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for GradeName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl FromStr for GradeName {
  type Err = Infallible;

  fn from_str(s: &str) -> Result<Self, Self::Err> { Ok(Self(s.to_owned())) }
}

impl From<&str> for GradeName {
  fn from(s: &str) -> Self { Self(s.to_owned()) }
}

impl From<String> for GradeName {
  fn from(s: String) -> Self { Self(s) }
}
