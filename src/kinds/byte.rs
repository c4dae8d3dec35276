use serde::{Deserialize, Deserializer, Serializer};

use super::numeric::scan_integer;
use super::Primitive;
use crate::driver::{DriverValue, ValueType};
use crate::error::NihilError;
use crate::nil::NilByte;
use crate::schema::{DataType, Dialect};
use crate::tag::TagSettings;

impl Primitive for u8 {
  const KIND: ValueType = ValueType::Byte;

  fn encode<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u8(*self)
  }

  fn decode<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    u8::deserialize(deserializer)
  }

  fn from_driver(src: &DriverValue) -> Result<Self, NihilError> {
    scan_integer(src)
  }

  /// Widened, since not every backend has an unsigned 8-bit column type.
  fn to_driver(&self) -> DriverValue {
    DriverValue::Int64(i64::from(*self))
  }
}

impl DataType for NilByte {
  fn data_type() -> &'static str {
    "tinyint"
  }

  fn db_data_type(dialect: &Dialect, _tags: &TagSettings) -> String {
    match dialect {
      Dialect::MySql => "TINYINT UNSIGNED",
      Dialect::Postgres => "SMALLINT",
      Dialect::Sqlite => "INTEGER",
      Dialect::SqlServer | Dialect::Other(_) => "TINYINT",
    }
    .to_string()
  }
}
