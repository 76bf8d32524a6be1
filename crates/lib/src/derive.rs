//! Requirement and define derivation.
//!
//! Maps a resolved [`OptionSet`] onto the dependency declarations the external
//! resolver must satisfy and the preprocessor defines the toolchain must set.
//! The capability table is read in declaration order, so the output is stable
//! across runs.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::options::OptionSet;
use crate::profile::Recipe;
use crate::requirements::DependencySpec;

/// Preprocessor defines switched on by enabled features.
///
/// Iteration follows the order in which defines were added; adding a define
/// twice keeps the first position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureDefineSet(Vec<String>);

impl FeatureDefineSet {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn insert(&mut self, define: &str) -> bool {
    if self.contains(define) {
      return false;
    }
    self.0.push(define.to_string());
    true
  }

  pub fn contains(&self, define: &str) -> bool {
    self.0.iter().any(|d| d == define)
  }

  pub fn iter(&self) -> impl Iterator<Item = &str> {
    self.0.iter().map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

impl<'a> FromIterator<&'a str> for FeatureDefineSet {
  fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
    let mut set = Self::new();
    for define in iter {
      set.insert(define);
    }
    set
  }
}

impl fmt::Display for FeatureDefineSet {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{{{}}}", self.0.join(", "))
  }
}

/// Output of [`derive_dependencies`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Derivation {
  /// Dependency declarations, test requirements first
  pub requires: Vec<DependencySpec>,
  pub defines: FeatureDefineSet,
}

impl Derivation {
  /// Count of declarations for a given package name
  pub fn count_of(&self, name: &str) -> usize {
    self.requires.iter().filter(|d| d.name() == name).count()
  }
}

/// Derive requirements and defines from resolved options.
///
/// The recipe's test requirements are always present. Every capability whose
/// option is enabled adds its requirements (with transitive headers, since
/// consumers include the backend loader through our headers) and its defines.
pub fn derive_dependencies(options: &OptionSet, recipe: &Recipe) -> Derivation {
  let mut derivation = Derivation::default();

  for reference in &recipe.test_requires {
    derivation.requires.push(DependencySpec::test(reference.clone()));
  }

  for capability in recipe.capabilities.iter() {
    if !options.is_enabled(&capability.option) {
      debug!(option = %capability.option, "capability disabled");
      continue;
    }
    for reference in &capability.requires {
      if derivation.requires.iter().any(|d| d.reference == *reference) {
        continue;
      }
      debug!(option = %capability.option, requirement = %reference, "adding capability requirement");
      derivation
        .requires
        .push(DependencySpec::runtime(reference.clone()).with_transitive_headers());
    }
    for define in &capability.defines {
      derivation.defines.insert(define);
    }
  }

  derivation
}

/// Tool requirements needed only while building the package
pub fn derive_build_requirements(recipe: &Recipe) -> Vec<DependencySpec> {
  recipe
    .tool_requires
    .iter()
    .map(|reference| DependencySpec::tool(reference.clone()))
    .collect()
}
