//! Directory-backed package index.
//!
//! Layout: `<root>/<name>/<version>/<package_id>.json`, one pretty-printed
//! [`PackageRecord`] per file.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use super::{IndexError, PackageIndex, PackageRecord};
use crate::platform::paths::index_dir;
use crate::util::hash::ObjectHash;

/// Package index stored as JSON files under a root directory
#[derive(Debug, Clone)]
pub struct DirectoryIndex {
  root: PathBuf,
}

impl DirectoryIndex {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  /// Index at the default location (`SCYTHE_RECIPE_INDEX` or the data dir).
  pub fn default_index() -> Option<Self> {
    index_dir().map(Self::new)
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  /// Path of the record file for `reference` and `package_id`
  pub fn record_path(&self, reference: &str, package_id: &ObjectHash) -> Result<PathBuf, IndexError> {
    let (name, version) = reference
      .split_once('/')
      .filter(|(name, version)| !name.is_empty() && !version.is_empty())
      .ok_or_else(|| IndexError::InvalidReference(reference.to_string()))?;
    Ok(
      self
        .root
        .join(name)
        .join(version)
        .join(format!("{}.json", package_id)),
    )
  }
}

impl PackageIndex for DirectoryIndex {
  fn publish(&mut self, record: PackageRecord) -> Result<PathBuf, IndexError> {
    let path = self.record_path(&record.reference, &record.package_id)?;
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent).map_err(|source| IndexError::Write {
        path: parent.to_path_buf(),
        source,
      })?;
    }

    let json = serde_json::to_string_pretty(&record).map_err(IndexError::Serialize)?;
    fs::write(&path, json).map_err(|source| IndexError::Write {
      path: path.clone(),
      source,
    })?;

    info!(reference = %record.reference, package_id = %record.package_id, path = %path.display(), "published package");
    Ok(path)
  }

  fn lookup(&self, reference: &str, package_id: &ObjectHash) -> Result<Option<PackageRecord>, IndexError> {
    let path = self.record_path(reference, package_id)?;
    if !path.exists() {
      return Ok(None);
    }
    let content = fs::read_to_string(&path).map_err(|source| IndexError::Read {
      path: path.clone(),
      source,
    })?;
    let record = serde_json::from_str(&content).map_err(|source| IndexError::Corrupt { path, source })?;
    Ok(Some(record))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::descriptor::PackageDescriptor;
  use crate::platform::{Arch, Os, Platform};
  use crate::profile::Profile;
  use tempfile::TempDir;

  fn record() -> PackageRecord {
    let recipe = Profile::V2.recipe().unwrap();
    PackageRecord {
      reference: recipe.reference(),
      package_id: ObjectHash("0123456789abcdef0123".to_string()),
      profile: Profile::V2,
      settings: Platform::new(Arch::X86_64, Os::Windows),
      options: [("shared", true)].into_iter().collect(),
      descriptor: PackageDescriptor {
        libs: recipe.libs.clone(),
        ..Default::default()
      },
    }
  }

  #[test]
  fn publish_then_lookup_returns_the_record() {
    let temp = TempDir::new().unwrap();
    let mut index = DirectoryIndex::new(temp.path());

    let path = index.publish(record()).unwrap();
    assert_eq!(
      path,
      temp.path().join("scythe").join("2.0").join("0123456789abcdef0123.json")
    );

    let found = index
      .lookup("scythe/2.0", &ObjectHash("0123456789abcdef0123".to_string()))
      .unwrap();
    assert_eq!(found, Some(record()));
  }

  #[test]
  fn lookup_of_missing_record_is_none() {
    let temp = TempDir::new().unwrap();
    let index = DirectoryIndex::new(temp.path());

    let found = index.lookup("scythe/1.0", &ObjectHash("ffff".to_string())).unwrap();
    assert!(found.is_none());
  }

  #[test]
  fn corrupt_record_is_reported() {
    let temp = TempDir::new().unwrap();
    let index = DirectoryIndex::new(temp.path());
    let id = ObjectHash("abc".to_string());
    let path = index.record_path("scythe/1.0", &id).unwrap();
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "{ not json").unwrap();

    assert!(matches!(index.lookup("scythe/1.0", &id), Err(IndexError::Corrupt { .. })));
  }

  #[test]
  fn rejects_references_without_version() {
    let index = DirectoryIndex::new("/tmp/unused");
    assert!(matches!(
      index.record_path("scythe", &ObjectHash("abc".to_string())),
      Err(IndexError::InvalidReference(_))
    ));
  }
}
