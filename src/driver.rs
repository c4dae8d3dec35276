use chrono::{DateTime, Utc};
use std::fmt;

use crate::kinds::time::format_timestamp;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum ValueType {
  Null,
  Bool,
  Byte,
  Int16,
  Int32,
  Int64,
  Float64,
  Text,
  Bytes,
  Timestamp,
}

impl ValueType {
  pub fn name(self) -> &'static str {
    match self {
      ValueType::Null => "null",
      ValueType::Bool => "bool",
      ValueType::Byte => "byte",
      ValueType::Int16 => "int16",
      ValueType::Int32 => "int32",
      ValueType::Int64 => "int64",
      ValueType::Float64 => "float64",
      ValueType::Text => "text",
      ValueType::Bytes => "bytes",
      ValueType::Timestamp => "timestamp",
    }
  }
}

impl fmt::Display for ValueType {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// A value as exchanged with a database driver, in either direction.
///
/// There is no 8-bit variant: byte values travel as `Int64`.
#[derive(Debug, PartialEq, Clone)]
pub enum DriverValue {
  Null,
  Bool(bool),
  Int16(i16),
  Int32(i32),
  Int64(i64),
  Float64(f64),
  Text(String),
  Bytes(Vec<u8>),
  Timestamp(DateTime<Utc>),
}

impl DriverValue {
  pub fn type_of(&self) -> ValueType {
    match self {
      DriverValue::Null => ValueType::Null,
      DriverValue::Bool(_) => ValueType::Bool,
      DriverValue::Int16(_) => ValueType::Int16,
      DriverValue::Int32(_) => ValueType::Int32,
      DriverValue::Int64(_) => ValueType::Int64,
      DriverValue::Float64(_) => ValueType::Float64,
      DriverValue::Text(_) => ValueType::Text,
      DriverValue::Bytes(_) => ValueType::Bytes,
      DriverValue::Timestamp(_) => ValueType::Timestamp,
    }
  }

  pub fn is_null(&self) -> bool {
    matches!(self, DriverValue::Null)
  }

  /// Any of the integer variants, widened.
  pub(crate) fn as_i64(&self) -> Option<i64> {
    match self {
      DriverValue::Int16(i) => Some(i64::from(*i)),
      DriverValue::Int32(i) => Some(i64::from(*i)),
      DriverValue::Int64(i) => Some(*i),
      _ => None,
    }
  }

  /// The textual payload of `Text`, or of `Bytes` when they are UTF-8.
  pub(crate) fn as_text(&self) -> Option<&str> {
    match self {
      DriverValue::Text(s) => Some(s),
      DriverValue::Bytes(b) => std::str::from_utf8(b).ok(),
      _ => None,
    }
  }
}

impl fmt::Display for DriverValue {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      DriverValue::Null => f.write_str("NULL"),
      DriverValue::Bool(b) => write!(f, "{}", b),
      DriverValue::Int16(i) => write!(f, "{}", i),
      DriverValue::Int32(i) => write!(f, "{}", i),
      DriverValue::Int64(i) => write!(f, "{}", i),
      DriverValue::Float64(v) => write!(f, "{}", v),
      DriverValue::Text(s) => write!(f, "{:?}", s),
      DriverValue::Bytes(b) => write!(f, "<{} bytes>", b.len()),
      DriverValue::Timestamp(t) => f.write_str(&format_timestamp(t)),
    }
  }
}
