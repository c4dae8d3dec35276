//! `rusqlite` integration: every wrapper binds as a parameter and reads back
//! from a column through its driver value.

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, Value, ValueRef};

use crate::driver::DriverValue;
use crate::kinds::time::format_timestamp;
use crate::kinds::Primitive;
use crate::nil::Nil;
use crate::nullable::Nullable;

fn to_sqlite(value: DriverValue) -> Value {
  match value {
    DriverValue::Null => Value::Null,
    DriverValue::Bool(b) => Value::Integer(i64::from(b)),
    DriverValue::Int16(i) => Value::Integer(i64::from(i)),
    DriverValue::Int32(i) => Value::Integer(i64::from(i)),
    DriverValue::Int64(i) => Value::Integer(i),
    DriverValue::Float64(f) => Value::Real(f),
    DriverValue::Text(s) => Value::Text(s),
    DriverValue::Bytes(b) => Value::Blob(b),
    DriverValue::Timestamp(t) => Value::Text(format_timestamp(&t)),
  }
}

fn from_sqlite(value: ValueRef<'_>) -> DriverValue {
  match value {
    ValueRef::Null => DriverValue::Null,
    ValueRef::Integer(i) => DriverValue::Int64(i),
    ValueRef::Real(f) => DriverValue::Float64(f),
    ValueRef::Text(t) => match std::str::from_utf8(t) {
      Ok(s) => DriverValue::Text(s.to_string()),
      Err(_) => DriverValue::Bytes(t.to_vec()),
    },
    ValueRef::Blob(b) => DriverValue::Bytes(b.to_vec()),
  }
}

impl<T: Primitive> ToSql for Nil<T> {
  fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
    let value = self
      .driver_value()
      .map_err(|err| rusqlite::Error::ToSqlConversionFailure(Box::new(err)))?;
    Ok(ToSqlOutput::Owned(to_sqlite(value)))
  }
}

impl<T: Primitive> FromSql for Nil<T> {
  fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
    let mut nil = Nil::default();
    nil
      .scan(&from_sqlite(value))
      .map_err(|err| FromSqlError::Other(Box::new(err)))?;
    Ok(nil)
  }
}
