//! Content hashing for package ids.
//!
//! A binary package is identified by a truncated SHA-256 of the JSON form of
//! its configuration. All hashed types serialize maps in sorted order, so the
//! same configuration always yields the same id.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::consts::PACKAGE_ID_LEN;

pub type HashError = serde_json::Error;

/// A content-addressed hash identifying one binary configuration.
///
/// Lowercase hexadecimal, `PACKAGE_ID_LEN` characters, e.g. `"a1b2c3d4e5f6789012ab"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObjectHash(pub String);

impl std::fmt::Display for ObjectHash {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

pub trait Hashable: Serialize {
  fn compute_hash(&self) -> Result<ObjectHash, HashError> {
    let serialized = serde_json::to_string(self)?;
    let mut hasher = Sha256::new();
    hasher.update(serialized.as_bytes());
    let full = format!("{:x}", hasher.finalize());
    Ok(ObjectHash(full[..PACKAGE_ID_LEN].to_string()))
  }
}
