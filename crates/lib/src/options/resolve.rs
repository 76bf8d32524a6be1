//! Option resolution.
//!
//! Resolution turns caller overrides into the final [`OptionSet`] for one
//! recipe invocation:
//! 1. Check the toolchain's declared C++ standard against the recipe minimum
//! 2. Reject overrides for options the recipe does not declare
//! 3. Overlay the overrides on the recipe defaults
//! 4. Drop `fPIC` on platforms without position independent code
//!
//! Resolution is pure: identical inputs always produce identical output.

use thiserror::Error;
use tracing::{debug, warn};

use super::{OptionSet, RawOptions};
use crate::consts::OPT_FPIC;
use crate::platform::{CppStd, Platform};
use crate::profile::Recipe;

/// Errors that can occur during option resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
  /// The toolchain's standard level is below what the recipe needs.
  #[error("{reference} requires C++{required} but the toolchain declares C++{supplied}")]
  Validation {
    reference: String,
    required: CppStd,
    supplied: CppStd,
  },

  /// An override names an option the recipe does not declare.
  #[error("option '{name}' is not declared by {reference} (known options: {known})")]
  UnknownOption {
    name: String,
    reference: String,
    known: String,
  },
}

/// Resolve `raw` overrides against `recipe` for `platform`.
///
/// # Errors
///
/// Returns [`ResolveError::Validation`] before looking at any option when the
/// declared C++ standard is too old, and [`ResolveError::UnknownOption`] for
/// overrides the recipe does not declare. Nothing is produced on failure.
pub fn resolve(recipe: &Recipe, raw: &RawOptions, platform: &Platform) -> Result<OptionSet, ResolveError> {
  validate_cppstd(recipe, platform)?;

  if let Some((name, _)) = raw.iter().find(|(name, _)| !recipe.declares(name)) {
    return Err(ResolveError::UnknownOption {
      name: name.to_string(),
      reference: recipe.reference(),
      known: recipe
        .options
        .iter()
        .map(|o| o.name.as_str())
        .collect::<Vec<_>>()
        .join(", "),
    });
  }

  let mut options = recipe.default_options();
  for (name, value) in raw.iter() {
    debug!(option = name, value, "applying option override");
    options.insert(name, value);
  }

  if !platform.os.supports_fpic() && options.remove(OPT_FPIC).is_some() {
    if raw.iter().any(|(name, _)| name == OPT_FPIC) {
      warn!(os = %platform.os, "ignoring fPIC override: option does not apply on this platform");
    }
    debug!(os = %platform.os, "removed fPIC option");
  }

  debug!(reference = %recipe.reference(), %options, "resolved options");
  Ok(options)
}

fn validate_cppstd(recipe: &Recipe, platform: &Platform) -> Result<(), ResolveError> {
  let supplied = platform.compiler.cppstd;
  if supplied.at_least(recipe.min_cppstd) {
    return Ok(());
  }
  Err(ResolveError::Validation {
    reference: recipe.reference(),
    required: recipe.min_cppstd,
    supplied,
  })
}
