use log::debug;
use serde::{Deserialize, Deserializer, Serializer};

use super::Primitive;
use crate::driver::{DriverValue, ValueType};
use crate::error::NihilError;
use crate::nil::NilBool;
use crate::schema::{DataType, Dialect};
use crate::tag::TagSettings;

fn parse_bool(s: &str) -> Option<bool> {
  match s {
    "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
    "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
    _ => None,
  }
}

impl Primitive for bool {
  const KIND: ValueType = ValueType::Bool;

  fn encode<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_bool(*self)
  }

  fn decode<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    bool::deserialize(deserializer)
  }

  fn from_driver(src: &DriverValue) -> Result<Self, NihilError> {
    let converted = match src {
      DriverValue::Bool(b) => Some(*b),
      DriverValue::Text(_) | DriverValue::Bytes(_) => src.as_text().and_then(parse_bool),
      _ => match src.as_i64() {
        Some(0) => Some(false),
        Some(1) => Some(true),
        _ => None,
      },
    };

    match converted {
      Some(b) => {
        if src.type_of() != ValueType::Bool {
          debug!("converted {} {} to bool", src.type_of(), src);
        }
        Ok(b)
      }
      None => Err(NihilError::unsupported(src, Self::KIND)),
    }
  }

  fn to_driver(&self) -> DriverValue {
    DriverValue::Bool(*self)
  }
}

impl DataType for NilBool {
  fn data_type() -> &'static str {
    "boolean"
  }

  fn db_data_type(dialect: &Dialect, _tags: &TagSettings) -> String {
    match dialect {
      Dialect::SqlServer => "BIT",
      _ => "BOOLEAN",
    }
    .to_string()
  }
}
