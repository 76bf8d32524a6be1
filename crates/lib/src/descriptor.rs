//! Package descriptor emission.
//!
//! The descriptor is what a consumer reads to link against the built package:
//! library names, preprocessor defines it must also set, and the dependencies
//! whose headers leak through ours.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::derive::FeatureDefineSet;
use crate::options::OptionSet;
use crate::profile::Recipe;
use crate::requirements::DependencySpec;

/// Consumer-facing package contract
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageDescriptor {
  /// Libraries to link, in link order
  pub libs: Vec<String>,
  /// Defines propagated to consumers
  pub defines: FeatureDefineSet,
  /// Dependencies re-exposed to consumers
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub requires: Vec<DependencySpec>,
}

impl PackageDescriptor {
  /// Re-expose the transitive-headers runtime dependencies from `requires`.
  ///
  /// Test and build-time dependencies never reach consumers.
  pub fn expose_requires(mut self, requires: &[DependencySpec]) -> Self {
    for dep in requires.iter().filter(|d| d.is_exposed()) {
      if !self.requires.contains(dep) {
        self.requires.push(dep.clone());
      }
    }
    self
  }
}

/// Emit the descriptor for a resolved configuration.
///
/// Every define derived for the build is propagated so consumers get the same
/// feature view without restating the options.
pub fn emit(recipe: &Recipe, options: &OptionSet, defines: &FeatureDefineSet) -> PackageDescriptor {
  debug!(reference = %recipe.reference(), %options, %defines, "emitting package descriptor");
  PackageDescriptor {
    libs: recipe.libs.clone(),
    defines: defines.clone(),
    requires: Vec::new(),
  }
}
