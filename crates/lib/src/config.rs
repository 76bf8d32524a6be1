//! Build configuration files.
//!
//! A build configuration is a small TOML document naming the recipe profile,
//! the target settings and option overrides:
//!
//! ```toml
//! profile = "v1"
//!
//! [settings]
//! os = "Linux"
//! arch = "x86_64"
//! build_type = "Release"
//!
//! [settings.compiler]
//! name = "gcc"
//! version = "13"
//! cppstd = "17"
//!
//! [options]
//! shared = false
//! OpenGL = true
//! ```
//!
//! Every field is optional. Missing settings fall back to the host platform.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::options::RawOptions;
use crate::platform::{Arch, BuildType, CompilerKind, CppStd, Os, Platform};
use crate::profile::Profile;

/// Errors that can occur while loading a build configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  #[error("failed to read config {path}: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to parse config {path}: {source}")]
  Parse {
    path: PathBuf,
    #[source]
    source: toml::de::Error,
  },

  #[error("could not detect the host {0}; set it explicitly")]
  UndetectedHost(&'static str),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompilerConfig {
  pub name: Option<CompilerKind>,
  pub version: Option<String>,
  pub cppstd: Option<CppStd>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsConfig {
  pub os: Option<Os>,
  pub arch: Option<Arch>,
  pub build_type: Option<BuildType>,
  pub compiler: Option<CompilerConfig>,
}

/// Parsed build configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
  pub profile: Option<Profile>,
  #[serde(default)]
  pub settings: SettingsConfig,
  #[serde(default)]
  pub options: RawOptions,
}

impl BuildConfig {
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    let config = Self::parse(&content).map_err(|source| ConfigError::Parse {
      path: path.to_path_buf(),
      source,
    })?;
    debug!(path = %path.display(), "loaded build configuration");
    Ok(config)
  }

  pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
    toml::from_str(content)
  }

  /// Target platform: declared settings over host detection.
  ///
  /// Changing the OS without naming a compiler selects that OS's default
  /// compiler; explicit compiler fields then apply on top.
  pub fn platform(&self) -> Result<Platform, ConfigError> {
    let os = match self.settings.os {
      Some(os) => os,
      None => Os::current().ok_or(ConfigError::UndetectedHost("os"))?,
    };
    let arch = match self.settings.arch {
      Some(arch) => arch,
      None => Arch::current().ok_or(ConfigError::UndetectedHost("arch"))?,
    };

    let mut platform = Platform::new(arch, os);
    if let Some(build_type) = self.settings.build_type {
      platform.build_type = build_type;
    }
    if let Some(compiler) = &self.settings.compiler {
      if let Some(name) = compiler.name {
        platform.compiler.name = name;
      }
      if let Some(version) = &compiler.version {
        platform.compiler.version = version.clone();
      }
      if let Some(cppstd) = compiler.cppstd {
        platform.compiler.cppstd = cppstd;
      }
    }
    Ok(platform)
  }
}
