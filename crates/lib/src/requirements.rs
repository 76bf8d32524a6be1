//! Package references and dependency declarations.
//!
//! A reference is written `name/[range]`, e.g. `glad/[>=2.0]`. The range is a
//! semver requirement evaluated by the external resolver; here it is parsed
//! once so malformed recipe data fails early.

use std::fmt;
use std::str::FromStr;

use semver::{Version, VersionReq};
use serde::{Deserialize, Serialize};

/// Errors raised while parsing a package reference.
#[derive(Debug, thiserror::Error)]
pub enum PackageRefError {
  #[error("package reference '{0}' must look like 'name/[range]'")]
  Malformed(String),

  #[error("package reference '{reference}' has an empty name")]
  EmptyName { reference: String },

  #[error("invalid version range in '{reference}': {source}")]
  Range {
    reference: String,
    #[source]
    source: semver::Error,
  },
}

/// A package name plus the version range it must satisfy
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PackageRef {
  pub name: String,
  pub range: VersionReq,
}

impl PackageRef {
  pub fn parse(reference: &str) -> Result<Self, PackageRefError> {
    let (name, range) = reference
      .split_once('/')
      .ok_or_else(|| PackageRefError::Malformed(reference.to_string()))?;
    if name.is_empty() {
      return Err(PackageRefError::EmptyName {
        reference: reference.to_string(),
      });
    }
    let range = range
      .strip_prefix('[')
      .and_then(|r| r.strip_suffix(']'))
      .ok_or_else(|| PackageRefError::Malformed(reference.to_string()))?;
    let range = VersionReq::parse(range).map_err(|source| PackageRefError::Range {
      reference: reference.to_string(),
      source,
    })?;
    Ok(Self {
      name: name.to_string(),
      range,
    })
  }

  /// Whether `version` satisfies this reference's range
  pub fn accepts(&self, version: &Version) -> bool {
    self.range.matches(version)
  }
}

impl fmt::Display for PackageRef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}/[{}]", self.name, self.range)
  }
}

impl FromStr for PackageRef {
  type Err = PackageRefError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::parse(s)
  }
}

impl TryFrom<String> for PackageRef {
  type Error = PackageRefError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    Self::parse(&value)
  }
}

impl From<PackageRef> for String {
  fn from(value: PackageRef) -> Self {
    value.to_string()
  }
}

/// When a dependency is needed
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lifecycle {
  /// Tool needed only while building (e.g. cmake)
  Build,
  /// Linked into the package and needed by consumers
  Runtime,
  /// Needed only to build and run the package's own tests
  Test,
}

impl Lifecycle {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Build => "build",
      Self::Runtime => "runtime",
      Self::Test => "test",
    }
  }
}

impl fmt::Display for Lifecycle {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// A single dependency declaration handed to the external resolver
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DependencySpec {
  pub reference: PackageRef,
  /// Headers must also be visible to consumers of this package
  pub transitive_headers: bool,
  pub lifecycle: Lifecycle,
}

impl DependencySpec {
  pub fn runtime(reference: PackageRef) -> Self {
    Self {
      reference,
      transitive_headers: false,
      lifecycle: Lifecycle::Runtime,
    }
  }

  pub fn test(reference: PackageRef) -> Self {
    Self {
      reference,
      transitive_headers: false,
      lifecycle: Lifecycle::Test,
    }
  }

  pub fn tool(reference: PackageRef) -> Self {
    Self {
      reference,
      transitive_headers: false,
      lifecycle: Lifecycle::Build,
    }
  }

  pub fn with_transitive_headers(mut self) -> Self {
    self.transitive_headers = true;
    self
  }

  pub fn name(&self) -> &str {
    &self.reference.name
  }

  /// Whether consumers of the built package must see this dependency
  pub fn is_exposed(&self) -> bool {
    self.lifecycle == Lifecycle::Runtime && self.transitive_headers
  }
}

impl fmt::Display for DependencySpec {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} ({}", self.reference, self.lifecycle)?;
    if self.transitive_headers {
      write!(f, ", transitive headers")?;
    }
    write!(f, ")")
  }
}
