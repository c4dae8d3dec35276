//! The nullable wrapper record and its eight named kinds. Its serde
//! implementations only work with `serde_json`; see [`Nil`].
//!
//! ```
//! use nihil::{NilInt32, NilString};
//!
//! #[derive(serde::Serialize)]
//! struct User {
//!   name: NilString,
//!   age: NilInt32,
//! }
//!
//! let user = User {
//!   name: NilString::new("John".to_string()),
//!   age: NilInt32::null(),
//! };
//!
//! assert_eq!(serde_json::to_string(&user).unwrap(), r#"{"name":"John","age":null}"#);
//! ```

use chrono::{DateTime, Utc};
use log::trace;
use serde::de::Error as _;
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::value::RawValue;

use crate::driver::DriverValue;
use crate::error::NihilError;
use crate::kinds::Primitive;
use crate::nullable::{marshal, unmarshal, Nullable};

/// A value that is either present or absent. `value` is meaningless while
/// `valid` is false.
///
/// # JSON only
///
/// `Serialize` and `Deserialize` exchange the text produced by [`marshal`]
/// and read by [`unmarshal`] as a `serde_json::value::RawValue`. They work
/// with `serde_json` (`to_string`, `to_vec`, `to_writer`, `to_value`,
/// `from_str`, `from_slice`) and nothing else: any other serde format sees
/// serde_json's private raw-value struct instead of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Nil<T> {
  pub valid: bool,
  pub value: T,
}

pub type NilBool = Nil<bool>;
pub type NilByte = Nil<u8>;
pub type NilInt16 = Nil<i16>;
pub type NilInt32 = Nil<i32>;
pub type NilInt64 = Nil<i64>;
pub type NilFloat64 = Nil<f64>;
pub type NilString = Nil<String>;
pub type NilTime = Nil<DateTime<Utc>>;

impl<T> Nil<T> {
  pub fn new(value: T) -> Nil<T> {
    Nil { valid: true, value }
  }

  pub fn as_option(&self) -> Option<&T> {
    if self.valid {
      Some(&self.value)
    } else {
      None
    }
  }

  pub fn into_option(self) -> Option<T> {
    if self.valid {
      Some(self.value)
    } else {
      None
    }
  }
}

impl<T: Default> Nil<T> {
  pub fn null() -> Nil<T> {
    Nil {
      valid: false,
      value: T::default(),
    }
  }
}

impl<T: Default> From<Option<T>> for Nil<T> {
  fn from(option: Option<T>) -> Self {
    match option {
      Some(value) => Nil::new(value),
      None => Nil::null(),
    }
  }
}

impl<T> From<Nil<T>> for Option<T> {
  fn from(nil: Nil<T>) -> Self {
    nil.into_option()
  }
}

impl<T: Primitive> Nullable for Nil<T> {
  type Value = T;

  fn is_present(&self) -> bool {
    self.valid
  }

  fn value(&self) -> &T {
    &self.value
  }

  fn set_present(&mut self, present: bool) {
    self.valid = present;
  }

  fn set_value(&mut self, value: T) {
    self.value = value;
  }

  fn scan(&mut self, src: &DriverValue) -> Result<(), NihilError> {
    trace!("scanning {} into {}", src.type_of(), T::KIND);

    if src.is_null() {
      self.valid = false;
      self.value = T::default();
      return Ok(());
    }

    self.value = T::from_driver(src)?;
    self.valid = true;
    Ok(())
  }

  fn driver_value(&self) -> Result<DriverValue, NihilError> {
    if !self.valid {
      return Ok(DriverValue::Null);
    }
    Ok(self.value.to_driver())
  }
}

impl<T: Primitive> Serialize for Nil<T> {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let bytes = marshal(self).map_err(S::Error::custom)?;
    let json = String::from_utf8(bytes).map_err(S::Error::custom)?;
    let raw = RawValue::from_string(json).map_err(S::Error::custom)?;
    raw.serialize(serializer)
  }
}

impl<'de, T: Primitive> Deserialize<'de> for Nil<T> {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let raw = <Box<RawValue>>::deserialize(deserializer)?;
    let mut nil = Nil::default();
    unmarshal(&mut nil, raw.get().as_bytes()).map_err(D::Error::custom)?;
    Ok(nil)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;
  use proptest::prelude::*;

  fn round_trip<T: Primitive>(nil: &Nil<T>) -> Nil<T> {
    let bytes = marshal(nil).expect("Marshaling should succeed.");
    let mut decoded = Nil::default();
    unmarshal(&mut decoded, &bytes).expect("Unmarshaling marshaled output should succeed.");
    decoded
  }

  fn assert_double_round_trip<T: Primitive>(nil: &Nil<T>) {
    let first = marshal(nil).unwrap();
    let second = marshal(&round_trip(nil)).unwrap();
    assert_eq!(first, second);
  }

  #[test]
  fn default_is_absent() {
    let nil = NilInt64::default();
    assert!(!nil.valid);
    assert_eq!(nil, NilInt64::null());
  }

  #[test]
  fn option_conversions() {
    assert_eq!(NilInt32::from(Some(5)), NilInt32::new(5));
    assert_eq!(NilInt32::from(None), NilInt32::null());
    assert_eq!(Option::<i32>::from(NilInt32::new(5)), Some(5));

    let garbage = NilInt32 {
      valid: false,
      value: 17,
    };
    assert_eq!(garbage.as_option(), None);
    assert_eq!(garbage.into_option(), None);
  }

  #[test]
  fn null_overrides_any_prior_state() {
    let mut s = NilString::new("kept".to_string());
    unmarshal(&mut s, b"null").unwrap();
    assert!(!s.valid);

    let mut t = NilTime::null();
    unmarshal(&mut t, b"null").unwrap();
    assert!(!t.valid);
  }

  #[test]
  fn absent_values_marshal_to_null() {
    assert_eq!(marshal(&NilBool::null()).unwrap(), b"null");
    assert_eq!(marshal(&NilByte::null()).unwrap(), b"null");
    assert_eq!(marshal(&NilInt16::null()).unwrap(), b"null");
    assert_eq!(marshal(&NilInt32::null()).unwrap(), b"null");
    assert_eq!(marshal(&NilInt64::null()).unwrap(), b"null");
    assert_eq!(marshal(&NilFloat64::null()).unwrap(), b"null");
    assert_eq!(marshal(&NilString::null()).unwrap(), b"null");
    assert_eq!(marshal(&NilTime::null()).unwrap(), b"null");
  }

  #[test]
  fn double_round_trip_of_absent_values() {
    assert_double_round_trip(&NilBool::null());
    assert_double_round_trip(&NilByte::null());
    assert_double_round_trip(&NilInt16::null());
    assert_double_round_trip(&NilInt32::null());
    assert_double_round_trip(&NilInt64::null());
    assert_double_round_trip(&NilFloat64::null());
    assert_double_round_trip(&NilString::null());
    assert_double_round_trip(&NilTime::null());
  }

  #[test]
  fn serde_embeds_raw_json() {
    let values = vec![NilInt32::new(1), NilInt32::null(), NilInt32::new(-3)];
    assert_eq!(serde_json::to_string(&values).unwrap(), "[1,null,-3]");

    let decoded: Vec<NilInt32> = serde_json::from_str("[ 1 , null,-3 ]").unwrap();
    assert_eq!(decoded, values);
  }

  #[test]
  fn serde_json_values_see_plain_json() {
    assert_eq!(
      serde_json::to_value(&NilInt32::new(5)).unwrap(),
      serde_json::json!(5)
    );
    assert_eq!(
      serde_json::to_value(&NilString::null()).unwrap(),
      serde_json::Value::Null
    );
    assert_eq!(
      serde_json::to_value(&vec![NilFloat64::new(1.5), NilFloat64::null()]).unwrap(),
      serde_json::json!([1.5, null])
    );
  }

  #[test]
  fn serde_reports_decoding_errors() {
    serde_json::from_str::<NilByte>("300").expect_err("300 is not a byte.");
    serde_json::from_str::<NilBool>("\"true\"").expect_err("A string is not a bool.");
  }

  #[test]
  fn serde_reports_encoding_errors() {
    serde_json::to_string(&NilFloat64::new(f64::NAN)).expect_err("NaN cannot be encoded.");
  }

  #[test]
  fn pretty_printing_keeps_values() {
    let t = NilTime::new(Utc.with_ymd_and_hms(2023, 10, 15, 14, 30, 0).unwrap());
    assert_eq!(
      serde_json::to_string_pretty(&vec![t]).unwrap(),
      "[\n  \"2023-10-15T14:30:00Z\"\n]"
    );
  }

  #[test]
  fn failed_scan_keeps_prior_state() {
    let mut i = NilInt32::new(8);
    i.scan(&DriverValue::Text("eight".to_string()))
      .expect_err("Not a number.");
    assert_eq!(i, NilInt32::new(8));
  }

  fn timestamp_strategy() -> impl Strategy<Value = DateTime<Utc>> {
    // 0001-01-01 up to 9999-12-31, with nanoseconds.
    (-62_135_596_800i64..253_402_300_799i64, 0u32..1_000_000_000u32)
      .prop_map(|(secs, nanos)| Utc.timestamp_opt(secs, nanos).unwrap())
  }

  proptest! {
    #[test]
    fn bool_round_trips(b in any::<bool>()) {
      prop_assert_eq!(round_trip(&NilBool::new(b)), NilBool::new(b));
      assert_double_round_trip(&NilBool::new(b));
    }

    #[test]
    fn byte_round_trips(b in any::<u8>()) {
      prop_assert_eq!(round_trip(&NilByte::new(b)), NilByte::new(b));
      assert_double_round_trip(&NilByte::new(b));
    }

    #[test]
    fn int16_round_trips(i in any::<i16>()) {
      prop_assert_eq!(round_trip(&NilInt16::new(i)), NilInt16::new(i));
      assert_double_round_trip(&NilInt16::new(i));
    }

    #[test]
    fn int32_round_trips(i in any::<i32>()) {
      prop_assert_eq!(round_trip(&NilInt32::new(i)), NilInt32::new(i));
      assert_double_round_trip(&NilInt32::new(i));
    }

    #[test]
    fn int64_round_trips(i in any::<i64>()) {
      prop_assert_eq!(round_trip(&NilInt64::new(i)), NilInt64::new(i));
      assert_double_round_trip(&NilInt64::new(i));
    }

    #[test]
    fn float_round_trips_exactly(f in any::<f64>().prop_filter("finite", |f| f.is_finite())) {
      let decoded = round_trip(&NilFloat64::new(f));
      prop_assert!(decoded.valid);
      prop_assert_eq!(decoded.value.to_bits(), f.to_bits());
      assert_double_round_trip(&NilFloat64::new(f));
    }

    #[test]
    fn string_round_trips(s in any::<String>()) {
      let nil = NilString::new(s);
      prop_assert_eq!(round_trip(&nil), nil.clone());
      assert_double_round_trip(&nil);
    }

    #[test]
    fn time_round_trips_to_the_same_instant(t in timestamp_strategy()) {
      let decoded = round_trip(&NilTime::new(t));
      prop_assert!(decoded.valid);
      prop_assert_eq!(decoded.value, t);
      assert_double_round_trip(&NilTime::new(t));
    }

    #[test]
    fn absent_values_ignore_garbage(i in any::<i64>(), f in any::<f64>(), s in any::<String>()) {
      let int = NilInt64 { valid: false, value: i };
      let float = NilFloat64 { valid: false, value: f };
      let text = NilString { valid: false, value: s };

      prop_assert_eq!(marshal(&int).unwrap(), b"null".to_vec());
      prop_assert_eq!(marshal(&float).unwrap(), b"null".to_vec());
      prop_assert_eq!(marshal(&text).unwrap(), b"null".to_vec());
      assert_double_round_trip(&int);
      assert_double_round_trip(&float);
      assert_double_round_trip(&text);
    }

    #[test]
    fn null_wins_over_any_prior_value(i in any::<i64>(), valid in any::<bool>()) {
      let mut nil = NilInt64 { valid, value: i };
      unmarshal(&mut nil, b"null").unwrap();
      prop_assert!(!nil.valid);
    }
  }
}
