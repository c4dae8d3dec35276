use pest::iterators::Pair;
use pest::Parser;
use std::collections::HashMap;
use std::str::FromStr;

use crate::error::SchemaError;

#[derive(Parser)]
#[grammar = "tag.pest"]
struct TagParser;

/// Settings from an ORM field tag such as `size:100;not null`.
///
/// Keys are upper-cased; a key given without a value maps to itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSettings(HashMap<String, String>);

fn unescape(value: &str) -> String {
  value.replace("\\;", ";")
}

fn parse_setting(pair: Pair<Rule>) -> Option<(String, String)> {
  assert_eq!(pair.as_rule(), Rule::setting);
  let mut inner = pair.into_inner();

  let key = inner.next()?.as_str().trim().to_uppercase();
  if key.is_empty() {
    return None;
  }

  let value = match inner.next() {
    Some(value) => unescape(value.as_str()),
    None => key.clone(),
  };

  Some((key, value))
}

impl TagSettings {
  pub fn parse(tag: &str) -> Result<TagSettings, SchemaError> {
    let pairs = TagParser::parse(Rule::tag, tag).map_err(|err| SchemaError::InvalidTag {
      tag: tag.to_string(),
      source: Box::new(err),
    })?;

    let settings = pairs
      .flat_map(|pair| pair.into_inner())
      .filter(|pair| pair.as_rule() == Rule::setting)
      .filter_map(parse_setting)
      .collect();

    Ok(TagSettings(settings))
  }

  pub fn get(&self, key: &str) -> Option<&str> {
    self.0.get(&key.to_uppercase()).map(String::as_str)
  }

  pub fn contains(&self, key: &str) -> bool {
    self.0.contains_key(&key.to_uppercase())
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

impl FromStr for TagSettings {
  type Err = SchemaError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    TagSettings::parse(s)
  }
}
