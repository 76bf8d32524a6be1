//! Package index adapter.
//!
//! Once a package is built, its [`PackageRecord`] is handed to a
//! [`PackageIndex`] so that consumers resolving `scythe` inherit its libraries,
//! defines and re-exposed dependencies.
//!
//! # Submodules
//!
//! - [`directory`] - JSON files under a local directory

pub mod directory;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::descriptor::PackageDescriptor;
use crate::options::OptionSet;
use crate::platform::Platform;
use crate::profile::Profile;
use crate::requirements::{DependencySpec, Lifecycle};
use crate::util::hash::{HashError, Hashable, ObjectHash};

pub use directory::DirectoryIndex;

/// Errors that can occur while storing or reading index records.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
  #[error("failed to write {path}: {source}")]
  Write {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to read {path}: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to serialize package record: {0}")]
  Serialize(#[source] serde_json::Error),

  #[error("corrupt package record {path}: {source}")]
  Corrupt {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("invalid package reference '{0}'")]
  InvalidReference(String),
}

/// The inputs that identify one binary package.
///
/// Hashing this yields the package id: same recipe version, settings, options
/// and runtime requirements always map to the same binary.
#[derive(Debug, Clone, Serialize)]
pub struct BinaryConfig<'a> {
  pub reference: &'a str,
  pub settings: &'a Platform,
  pub options: &'a OptionSet,
  pub requires: Vec<&'a DependencySpec>,
}

impl Hashable for BinaryConfig<'_> {}

/// Compute the package id of a configuration.
///
/// Only runtime requirements participate; test and tool requirements do not
/// change the produced binary.
pub fn package_id(
  reference: &str,
  settings: &Platform,
  options: &OptionSet,
  requires: &[DependencySpec],
) -> Result<ObjectHash, HashError> {
  BinaryConfig {
    reference,
    settings,
    options,
    requires: requires
      .iter()
      .filter(|d| d.lifecycle == Lifecycle::Runtime)
      .collect(),
  }
  .compute_hash()
}

/// What the index stores for one binary package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRecord {
  /// `name/version`
  pub reference: String,
  pub package_id: ObjectHash,
  pub profile: Profile,
  pub settings: Platform,
  pub options: OptionSet,
  pub descriptor: PackageDescriptor,
}

/// Consumer-facing package store
pub trait PackageIndex {
  /// Store a record, taking ownership of it. Returns where it was stored.
  fn publish(&mut self, record: PackageRecord) -> Result<PathBuf, IndexError>;

  /// Look up a stored record. `Ok(None)` when absent.
  fn lookup(&self, reference: &str, package_id: &ObjectHash) -> Result<Option<PackageRecord>, IndexError>;
}
