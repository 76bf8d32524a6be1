use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ParseSettingError;

/// Operating system variants a recipe can target
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Os {
  Linux,
  MacOs,
  Windows,
}

impl Os {
  /// Detect the current operating system at runtime
  pub fn current() -> Option<Self> {
    match std::env::consts::OS {
      "linux" => Some(Self::Linux),
      "macos" => Some(Self::MacOs),
      "windows" => Some(Self::Windows),
      _ => None,
    }
  }

  /// Returns the lowercase string identifier for this OS
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Linux => "linux",
      Self::MacOs => "darwin",
      Self::Windows => "windows",
    }
  }

  /// Whether position independent code is a compiler choice on this OS.
  ///
  /// Windows binaries have no fPIC concept, so the option is never offered there.
  pub fn supports_fpic(&self) -> bool {
    !matches!(self, Self::Windows)
  }
}

impl fmt::Display for Os {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl FromStr for Os {
  type Err = ParseSettingError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "linux" => Ok(Self::Linux),
      "darwin" | "macos" => Ok(Self::MacOs),
      "windows" => Ok(Self::Windows),
      _ => Err(ParseSettingError::UnknownOs(s.to_string())),
    }
  }
}

impl TryFrom<String> for Os {
  type Error = ParseSettingError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    value.parse()
  }
}

impl From<Os> for String {
  fn from(value: Os) -> Self {
    value.as_str().to_string()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn current_returns_supported_os() {
    assert!(Os::current().is_some(), "Current OS should be supported");
  }

  #[test]
  fn macos_uses_darwin_identifier() {
    assert_eq!(Os::MacOs.as_str(), "darwin");
  }

  #[test]
  fn parses_recipe_and_triple_spellings() {
    assert_eq!("Windows".parse::<Os>().unwrap(), Os::Windows);
    assert_eq!("Macos".parse::<Os>().unwrap(), Os::MacOs);
    assert_eq!("darwin".parse::<Os>().unwrap(), Os::MacOs);
    assert_eq!("LINUX".parse::<Os>().unwrap(), Os::Linux);
    assert!(matches!("plan9".parse::<Os>(), Err(ParseSettingError::UnknownOs(_))));
  }

  #[test]
  fn only_windows_lacks_fpic() {
    assert!(Os::Linux.supports_fpic());
    assert!(Os::MacOs.supports_fpic());
    assert!(!Os::Windows.supports_fpic());
  }
}
