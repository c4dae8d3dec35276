use log::debug;
use serde::{Deserialize, Deserializer, Serializer};

use super::numeric::format_float;
use super::time::format_timestamp;
use super::Primitive;
use crate::driver::{DriverValue, ValueType};
use crate::error::NihilError;
use crate::nil::NilString;
use crate::schema::{DataType, Dialect};
use crate::tag::TagSettings;

impl Primitive for String {
  const KIND: ValueType = ValueType::Text;

  fn encode<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(self)
  }

  fn decode<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    String::deserialize(deserializer)
  }

  fn from_driver(src: &DriverValue) -> Result<Self, NihilError> {
    let converted = match src {
      DriverValue::Text(s) => return Ok(s.clone()),
      DriverValue::Bytes(_) => src.as_text().map(str::to_string),
      DriverValue::Bool(b) => Some(b.to_string()),
      DriverValue::Int16(_) | DriverValue::Int32(_) | DriverValue::Int64(_) => {
        src.as_i64().map(|i| i.to_string())
      }
      DriverValue::Float64(f) => Some(format_float(*f)),
      DriverValue::Timestamp(t) => Some(format_timestamp(t)),
      DriverValue::Null => None,
    };

    match converted {
      Some(s) => {
        debug!("converted {} {} to text", src.type_of(), src);
        Ok(s)
      }
      None => Err(NihilError::unsupported(src, Self::KIND)),
    }
  }

  fn to_driver(&self) -> DriverValue {
    DriverValue::Text(self.clone())
  }
}

impl DataType for NilString {
  fn data_type() -> &'static str {
    "string"
  }

  fn db_data_type(dialect: &Dialect, tags: &TagSettings) -> String {
    match tags.get("SIZE") {
      Some(size) => match dialect {
        Dialect::Sqlite => "TEXT".to_string(),
        Dialect::SqlServer => format!("NVARCHAR({})", size),
        _ => format!("VARCHAR({})", size),
      },
      None => match dialect {
        Dialect::MySql => "LONGTEXT",
        Dialect::SqlServer => "NVARCHAR(MAX)",
        _ => "TEXT",
      }
      .to_string(),
    }
  }
}
