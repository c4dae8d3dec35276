//! Per-kind rules: how each primitive looks in JSON and which driver values it
//! can be scanned from.

use serde::{Deserializer, Serializer};

use crate::driver::{DriverValue, ValueType};
use crate::error::NihilError;

mod boolean;
mod byte;
mod numeric;
mod text;
pub(crate) mod time;

pub trait Primitive: Sized + Default {
  const KIND: ValueType;

  fn encode<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error>;

  fn decode<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error>;

  /// Converts a non-null driver value.
  fn from_driver(src: &DriverValue) -> Result<Self, NihilError>;

  fn to_driver(&self) -> DriverValue;
}
