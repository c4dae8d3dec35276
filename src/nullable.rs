//! The capability contract shared by every nullable wrapper, and the two JSON
//! algorithms written against it.

use log::trace;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::driver::DriverValue;
use crate::error::NihilError;
use crate::kinds::Primitive;

pub const NULL_LITERAL: &[u8] = b"null";

/// What a wrapper must expose for [`marshal`] and [`unmarshal`] to drive it.
pub trait Nullable {
  type Value: Primitive;

  fn is_present(&self) -> bool;

  /// Meaningless unless [`Nullable::is_present`] holds.
  fn value(&self) -> &Self::Value;

  fn set_present(&mut self, present: bool);

  fn set_value(&mut self, value: Self::Value);

  /// Populates the wrapper from a driver-supplied value. `Null` makes it absent.
  fn scan(&mut self, src: &DriverValue) -> Result<(), NihilError>;

  /// `DriverValue::Null` when absent.
  fn driver_value(&self) -> Result<DriverValue, NihilError>;
}

struct Encoded<'a, T>(&'a T);

impl<'a, T: Primitive> Serialize for Encoded<'a, T> {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    self.0.encode(serializer)
  }
}

struct Decoded<T>(T);

impl<'de, T: Primitive> Deserialize<'de> for Decoded<T> {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    T::decode(deserializer).map(Decoded)
  }
}

pub fn marshal<N: Nullable>(nullable: &N) -> Result<Vec<u8>, NihilError> {
  if !nullable.is_present() {
    return Ok(NULL_LITERAL.to_vec());
  }

  serde_json::to_vec(&Encoded(nullable.value())).map_err(NihilError::Encoding)
}

/// Only the exact bytes `null` mark absence; anything else, including `null`
/// with surrounding whitespace, goes to the decoder. On a decoding error the
/// wrapper's previous state is not restored.
pub fn unmarshal<N: Nullable>(nullable: &mut N, bytes: &[u8]) -> Result<(), NihilError> {
  if bytes == NULL_LITERAL {
    nullable.set_present(false);
    return Ok(());
  }

  let Decoded(value): Decoded<N::Value> = serde_json::from_slice(bytes).map_err(NihilError::Decoding)?;
  trace!("unmarshaled {}", <N::Value as Primitive>::KIND);

  nullable.set_value(value);
  nullable.set_present(true);
  Ok(())
}
