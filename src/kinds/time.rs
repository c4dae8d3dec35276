use chrono::{DateTime, Datelike, NaiveDateTime, TimeZone, Utc};
use log::debug;
use serde::de::Error as _;
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serializer};

use super::Primitive;
use crate::driver::{DriverValue, ValueType};
use crate::error::NihilError;
use crate::nil::NilTime;
use crate::schema::{DataType, Dialect};
use crate::tag::TagSettings;

/// Layout some drivers use for `DATETIME` columns stored as text.
const SQL_DATETIME: &str = "%Y-%m-%d %H:%M:%S%.f";

/// RFC 3339 in UTC. Sub-second digits are written only up to the last
/// nonzero one (`.25Z`, `.0000001Z`), and not at all for whole seconds.
pub(crate) fn format_timestamp(t: &DateTime<Utc>) -> String {
  let mut out = t.format("%Y-%m-%dT%H:%M:%S").to_string();

  let nanos = t.timestamp_subsec_nanos() % 1_000_000_000;
  if nanos != 0 {
    let digits = format!("{:09}", nanos);
    out.push('.');
    out.push_str(digits.trim_end_matches('0'));
  }

  out.push('Z');
  out
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
  if let Ok(t) = DateTime::parse_from_rfc3339(s) {
    return Some(t.with_timezone(&Utc));
  }

  NaiveDateTime::parse_from_str(s, SQL_DATETIME)
    .ok()
    .map(|naive| Utc.from_utc_datetime(&naive))
}

impl Primitive for DateTime<Utc> {
  const KIND: ValueType = ValueType::Timestamp;

  fn encode<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    if !(0..=9999).contains(&self.year()) {
      return Err(S::Error::custom(format_args!(
        "timestamp year {} outside of range [0,9999]",
        self.year()
      )));
    }

    serializer.serialize_str(&format_timestamp(self))
  }

  fn decode<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let s = String::deserialize(deserializer)?;
    DateTime::parse_from_rfc3339(&s)
      .map(|t| t.with_timezone(&Utc))
      .map_err(D::Error::custom)
  }

  fn from_driver(src: &DriverValue) -> Result<Self, NihilError> {
    if let DriverValue::Timestamp(t) = src {
      return Ok(*t);
    }

    match src.as_text().and_then(parse_timestamp) {
      Some(t) => {
        debug!("parsed timestamp from {} {}", src.type_of(), src);
        Ok(t)
      }
      None => Err(NihilError::unsupported(src, Self::KIND)),
    }
  }

  fn to_driver(&self) -> DriverValue {
    DriverValue::Timestamp(*self)
  }
}

impl DataType for NilTime {
  fn data_type() -> &'static str {
    "time"
  }

  fn db_data_type(dialect: &Dialect, tags: &TagSettings) -> String {
    match tags.get("PRECISION") {
      Some(precision) => match dialect {
        Dialect::MySql => format!("DATETIME({})", precision),
        Dialect::Postgres => format!("TIMESTAMP({}) WITH TIME ZONE", precision),
        Dialect::SqlServer => format!("DATETIME2({})", precision),
        Dialect::Sqlite | Dialect::Other(_) => "DATETIME".to_string(),
      },
      None => match dialect {
        Dialect::Postgres => "TIMESTAMP WITH TIME ZONE",
        Dialect::SqlServer => "DATETIME2",
        _ => "DATETIME",
      }
      .to_string(),
    }
  }
}
