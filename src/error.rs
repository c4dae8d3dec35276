use crate::driver::{DriverValue, ValueType};
use crate::tag::Rule;

#[derive(Debug, thiserror::Error)]
pub enum NihilError {
  /// The JSON input is neither `null` nor a valid encoding of the target kind.
  #[error("failed to decode JSON value: {0}")]
  Decoding(#[source] serde_json::Error),

  /// The encoder rejected a present value.
  #[error("failed to encode JSON value: {0}")]
  Encoding(#[source] serde_json::Error),

  #[error("cannot scan {} value {value} into {target}", .value.type_of())]
  UnsupportedStorage {
    value: DriverValue,
    target: ValueType,
  },
}

impl NihilError {
  pub(crate) fn unsupported(value: &DriverValue, target: ValueType) -> Self {
    NihilError::UnsupportedStorage {
      value: value.clone(),
      target,
    }
  }
}

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
  #[error("invalid tag {tag:?}: {source}")]
  InvalidTag {
    tag: String,
    #[source]
    source: Box<pest::error::Error<Rule>>,
  },
}
