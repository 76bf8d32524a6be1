use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Errors raised while reading option overrides from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RawOptionError {
  #[error("option override '{0}' must look like NAME=VALUE")]
  Malformed(String),

  #[error("option '{name}' expects True or False, got '{value}'")]
  InvalidValue { name: String, value: String },
}

/// Parse a recipe-style boolean (`True`/`False`, case-insensitive)
pub fn parse_bool(name: &str, value: &str) -> Result<bool, RawOptionError> {
  match value.to_ascii_lowercase().as_str() {
    "true" => Ok(true),
    "false" => Ok(false),
    _ => Err(RawOptionError::InvalidValue {
      name: name.to_string(),
      value: value.to_string(),
    }),
  }
}

/// Option overrides as supplied by the caller, before validation.
///
/// Keys are not checked against any recipe here; that happens in
/// [`resolve`](super::resolve).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawOptions(BTreeMap<String, bool>);

impl RawOptions {
  pub fn new() -> Self {
    Self::default()
  }

  /// Set an override. Later values for the same name win.
  pub fn set(&mut self, name: &str, value: bool) -> &mut Self {
    self.0.insert(name.to_string(), value);
    self
  }

  /// Parse a `NAME=VALUE` pair and record it.
  pub fn set_pair(&mut self, pair: &str) -> Result<&mut Self, RawOptionError> {
    let (name, value) = pair
      .split_once('=')
      .ok_or_else(|| RawOptionError::Malformed(pair.to_string()))?;
    let name = name.trim();
    if name.is_empty() {
      return Err(RawOptionError::Malformed(pair.to_string()));
    }
    let value = parse_bool(name, value.trim())?;
    Ok(self.set(name, value))
  }

  /// Merge `other` on top of `self`; values in `other` win.
  pub fn merge(&mut self, other: &RawOptions) {
    for (name, value) in &other.0 {
      self.0.insert(name.clone(), *value);
    }
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
    self.0.iter().map(|(k, v)| (k.as_str(), *v))
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

impl<S: Into<String>> FromIterator<(S, bool)> for RawOptions {
  fn from_iter<I: IntoIterator<Item = (S, bool)>>(iter: I) -> Self {
    Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
  }
}

/// Resolved option values.
///
/// The mapping is sparse: an absent key means the option does not apply to the
/// target platform, which is distinct from the option being `false`. Keys are
/// kept sorted so that serialization and hashing are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionSet(BTreeMap<String, bool>);

impl OptionSet {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn get(&self, name: &str) -> Option<bool> {
    self.0.get(name).copied()
  }

  pub fn contains(&self, name: &str) -> bool {
    self.0.contains_key(name)
  }

  /// True only when the option is present and set
  pub fn is_enabled(&self, name: &str) -> bool {
    self.get(name) == Some(true)
  }

  pub fn insert(&mut self, name: &str, value: bool) {
    self.0.insert(name.to_string(), value);
  }

  pub fn remove(&mut self, name: &str) -> Option<bool> {
    self.0.remove(name)
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
    self.0.iter().map(|(k, v)| (k.as_str(), *v))
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

impl<S: Into<String>> FromIterator<(S, bool)> for OptionSet {
  fn from_iter<I: IntoIterator<Item = (S, bool)>>(iter: I) -> Self {
    Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
  }
}

impl fmt::Display for OptionSet {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{{")?;
    for (i, (name, value)) in self.iter().enumerate() {
      if i > 0 {
        write!(f, ", ")?;
      }
      write!(f, "{}: {}", name, if value { "True" } else { "False" })?;
    }
    write!(f, "}}")
  }
}
