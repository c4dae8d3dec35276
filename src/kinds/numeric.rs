use log::debug;
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::value::RawValue;
use std::convert::TryFrom;
use std::str::FromStr;

use super::Primitive;
use crate::driver::{DriverValue, ValueType};
use crate::error::NihilError;
use crate::nil::{NilFloat64, NilInt16, NilInt32, NilInt64};
use crate::schema::{DataType, Dialect};
use crate::tag::TagSettings;

/// Integral floats below this magnitude are written as plain decimal digits.
const MAX_PLAIN_FLOAT: f64 = 1e21;

/// Floats that fit an i64 without rounding.
const MAX_SCANNED_FLOAT: f64 = 9_007_199_254_740_992.0;

fn integral_float(f: f64) -> Option<i64> {
  if f.is_finite() && f.fract() == 0.0 && f.abs() <= MAX_SCANNED_FLOAT {
    Some(f as i64)
  } else {
    None
  }
}

/// Shortest text for a float, switching to exponent form outside
/// `1e-4 <= |f| < 1e6`, with at least two exponent digits (`1e+06`).
pub(super) fn format_float(f: f64) -> String {
  if f.is_nan() {
    return "NaN".to_string();
  }
  if f.is_infinite() {
    return if f > 0.0 { "+Inf" } else { "-Inf" }.to_string();
  }

  let shortest = format!("{:e}", f);
  let (mantissa, exponent) = match shortest.split_once('e') {
    Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
    None => return f.to_string(),
  };

  if f == 0.0 || (-4..6).contains(&exponent) {
    return f.to_string();
  }

  let sign = if exponent < 0 { '-' } else { '+' };
  format!("{}e{}{:02}", mantissa, sign, exponent.abs())
}

pub(super) fn scan_integer<T>(src: &DriverValue) -> Result<T, NihilError>
where
  T: Primitive + TryFrom<i64> + FromStr,
{
  let converted = match src {
    DriverValue::Float64(f) => integral_float(*f).and_then(|i| T::try_from(i).ok()),
    DriverValue::Text(_) | DriverValue::Bytes(_) => src.as_text().and_then(|s| s.parse::<T>().ok()),
    _ => src.as_i64().and_then(|i| T::try_from(i).ok()),
  };

  match converted {
    Some(value) => {
      if src.as_i64().is_none() {
        debug!("converted {} {} to {}", src.type_of(), src, T::KIND);
      }
      Ok(value)
    }
    None => Err(NihilError::unsupported(src, T::KIND)),
  }
}

macro_rules! integer_primitive {
  ($ty:ty, $kind:ident, $serialize:ident) => {
    impl Primitive for $ty {
      const KIND: ValueType = ValueType::$kind;

      fn encode<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.$serialize(*self)
      }

      fn decode<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <$ty>::deserialize(deserializer)
      }

      fn from_driver(src: &DriverValue) -> Result<Self, NihilError> {
        scan_integer(src)
      }

      fn to_driver(&self) -> DriverValue {
        DriverValue::$kind(*self)
      }
    }
  };
}

integer_primitive!(i16, Int16, serialize_i16);
integer_primitive!(i32, Int32, serialize_i32);
integer_primitive!(i64, Int64, serialize_i64);

impl Primitive for f64 {
  const KIND: ValueType = ValueType::Float64;

  /// `88.0` is written as `88` and `1e20` as `100000000000000000000`.
  /// Negative zero is written as `-0`.
  fn encode<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    if !self.is_finite() {
      return Err(S::Error::custom(format_args!(
        "unsupported float value: {}",
        self
      )));
    }

    if self.fract() != 0.0 || self.abs() >= MAX_PLAIN_FLOAT {
      return serializer.serialize_f64(*self);
    }

    match integral_float(*self) {
      Some(i) if !(i == 0 && self.is_sign_negative()) => serializer.serialize_i64(i),
      // Negative zero and zero-padded digits past 2^53 have no serde_json number form.
      _ => RawValue::from_string(self.to_string())
        .map_err(S::Error::custom)?
        .serialize(serializer),
    }
  }

  fn decode<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    f64::deserialize(deserializer)
  }

  fn from_driver(src: &DriverValue) -> Result<Self, NihilError> {
    if let DriverValue::Float64(f) = src {
      return Ok(*f);
    }

    let converted = match src.as_i64() {
      Some(i) => Some(i as f64),
      None => src.as_text().and_then(|s| s.parse::<f64>().ok()),
    };

    match converted {
      Some(f) => {
        debug!("converted {} {} to float64", src.type_of(), src);
        Ok(f)
      }
      None => Err(NihilError::unsupported(src, Self::KIND)),
    }
  }

  fn to_driver(&self) -> DriverValue {
    DriverValue::Float64(*self)
  }
}

impl DataType for NilFloat64 {
  fn data_type() -> &'static str {
    "float"
  }

  fn db_data_type(dialect: &Dialect, _tags: &TagSettings) -> String {
    match dialect {
      Dialect::MySql => "DOUBLE",
      Dialect::Postgres => "DOUBLE PRECISION",
      Dialect::Sqlite => "REAL",
      Dialect::SqlServer => "FLOAT",
      Dialect::Other(_) => "DOUBLE",
    }
    .to_string()
  }
}

impl DataType for NilInt16 {
  fn data_type() -> &'static str {
    "smallint"
  }

  fn db_data_type(dialect: &Dialect, _tags: &TagSettings) -> String {
    match dialect {
      Dialect::Sqlite => "INTEGER",
      _ => "SMALLINT",
    }
    .to_string()
  }
}

impl DataType for NilInt32 {
  fn data_type() -> &'static str {
    "int"
  }

  fn db_data_type(dialect: &Dialect, _tags: &TagSettings) -> String {
    match dialect {
      Dialect::Postgres | Dialect::Sqlite => "INTEGER",
      _ => "INT",
    }
    .to_string()
  }
}

impl DataType for NilInt64 {
  fn data_type() -> &'static str {
    "bigint"
  }

  fn db_data_type(dialect: &Dialect, _tags: &TagSettings) -> String {
    match dialect {
      Dialect::Sqlite => "INTEGER",
      _ => "BIGINT",
    }
    .to_string()
  }
}
