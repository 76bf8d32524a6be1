//! Toolchain adapter.
//!
//! The recipe never compiles anything itself. It hands a [`ToolchainConfig`]
//! (cache variables plus the dependencies to fetch) and a [`Layout`] to an
//! implementation of [`Toolchain`], which does the real work.
//!
//! # Submodules
//!
//! - [`plan`] - a [`Toolchain`] that records the commands it would run

pub mod plan;

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::consts::{OPT_FPIC, OPT_SHARED};
use crate::derive::FeatureDefineSet;
use crate::options::OptionSet;
use crate::platform::{BuildType, Platform};
use crate::requirements::DependencySpec;

pub use plan::{CommandPlan, ToolchainStep};

/// Errors reported by a toolchain implementation.
#[derive(Debug, thiserror::Error)]
pub enum ToolchainError {
  #[error("toolchain {step} step failed: {message}")]
  Step { step: &'static str, message: String },
}

/// A CMake cache variable value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CacheValue {
  Bool(bool),
  String(String),
}

impl fmt::Display for CacheValue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Bool(true) => write!(f, "ON"),
      Self::Bool(false) => write!(f, "OFF"),
      Self::String(s) => write!(f, "{}", s),
    }
  }
}

/// Everything the toolchain needs to configure the build
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolchainConfig {
  /// Cache variables in the order they are passed
  pub variables: Vec<(String, CacheValue)>,
  /// Packages to fetch before compiling, in declaration order
  pub dependencies: Vec<DependencySpec>,
}

impl ToolchainConfig {
  /// Translate settings, options and defines into cache variables.
  ///
  /// `BUILD_SHARED_LIBS` and `CMAKE_POSITION_INDEPENDENT_CODE` are only emitted
  /// when the matching option is present; an absent `fPIC` means no PIC flag at
  /// all reaches the compiler.
  pub fn generate(
    platform: &Platform,
    options: &OptionSet,
    defines: &FeatureDefineSet,
    dependencies: Vec<DependencySpec>,
  ) -> Self {
    let cppstd = platform.compiler.cppstd;
    let mut variables = vec![
      (
        "CMAKE_BUILD_TYPE".to_string(),
        CacheValue::String(platform.build_type.to_string()),
      ),
      (
        "CMAKE_CXX_STANDARD".to_string(),
        CacheValue::String(cppstd.level().to_string()),
      ),
      (
        "CMAKE_CXX_EXTENSIONS".to_string(),
        CacheValue::Bool(cppstd.gnu_extensions()),
      ),
    ];
    if let Some(shared) = options.get(OPT_SHARED) {
      variables.push(("BUILD_SHARED_LIBS".to_string(), CacheValue::Bool(shared)));
    }
    if let Some(fpic) = options.get(OPT_FPIC) {
      variables.push(("CMAKE_POSITION_INDEPENDENT_CODE".to_string(), CacheValue::Bool(fpic)));
    }
    for define in defines.iter() {
      variables.push((define.to_string(), CacheValue::Bool(true)));
    }

    Self { variables, dependencies }
  }

  pub fn get(&self, name: &str) -> Option<&CacheValue> {
    self.variables.iter().find(|(n, _)| n == name).map(|(_, v)| v)
  }

  /// Render the variables as `-DNAME=VALUE` arguments
  pub fn definitions(&self) -> Vec<String> {
    self
      .variables
      .iter()
      .map(|(name, value)| format!("-D{}={}", name, value))
      .collect()
  }
}

/// Source, build and generator folders for one build type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
  pub build_type: BuildType,
  pub source_folder: PathBuf,
  pub build_folder: PathBuf,
  pub generators_folder: PathBuf,
}

impl Layout {
  /// Single-config CMake layout: `build/<BuildType>` with generators below it
  pub fn cmake(build_type: BuildType) -> Self {
    let build_folder = PathBuf::from("build").join(build_type.as_str());
    Self {
      build_type,
      source_folder: PathBuf::from("."),
      generators_folder: build_folder.join("generators"),
      build_folder,
    }
  }
}

/// External build tool driven by the recipe lifecycle
pub trait Toolchain {
  fn configure(&mut self, config: &ToolchainConfig, layout: &Layout) -> Result<(), ToolchainError>;

  fn build(&mut self, layout: &Layout) -> Result<(), ToolchainError>;

  /// Build and run the package's own tests
  fn test(&mut self, layout: &Layout) -> Result<(), ToolchainError>;

  fn install(&mut self, layout: &Layout) -> Result<(), ToolchainError>;
}
