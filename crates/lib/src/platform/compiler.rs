//! Compiler settings and C++ standard levels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Os, ParseSettingError};

/// Standard levels a toolchain may declare, in publication order.
const KNOWN_LEVELS: [u16; 7] = [98, 11, 14, 17, 20, 23, 26];

/// A C++ language standard level, optionally with GNU extensions (`gnu17`).
///
/// Levels compare by publication year so that `98` sorts before `11`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CppStd {
  level: u16,
  gnu: bool,
}

impl CppStd {
  pub const CPP17: CppStd = CppStd { level: 17, gnu: false };

  /// Build a standard level from its two-digit form.
  pub fn new(level: u16) -> Result<Self, ParseSettingError> {
    if KNOWN_LEVELS.contains(&level) {
      Ok(Self { level, gnu: false })
    } else {
      Err(ParseSettingError::InvalidCppStd(level.to_string()))
    }
  }

  pub fn with_gnu_extensions(mut self) -> Self {
    self.gnu = true;
    self
  }

  pub fn level(&self) -> u16 {
    self.level
  }

  pub fn gnu_extensions(&self) -> bool {
    self.gnu
  }

  /// Year the standard was published.
  pub fn year(&self) -> u16 {
    if self.level >= 98 { 1900 + self.level } else { 2000 + self.level }
  }

  /// Whether this level satisfies a minimum requirement. Extensions are ignored.
  pub fn at_least(&self, required: CppStd) -> bool {
    self.year() >= required.year()
  }

  /// Every level this crate recognizes, oldest first.
  pub fn known_levels() -> impl Iterator<Item = CppStd> {
    KNOWN_LEVELS.into_iter().map(|level| CppStd { level, gnu: false })
  }
}

impl fmt::Display for CppStd {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.gnu {
      write!(f, "gnu{}", self.level)
    } else {
      write!(f, "{}", self.level)
    }
  }
}

impl FromStr for CppStd {
  type Err = ParseSettingError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let (digits, gnu) = match s.strip_prefix("gnu") {
      Some(rest) => (rest, true),
      None => (s, false),
    };
    let level: u16 = digits
      .parse()
      .map_err(|_| ParseSettingError::InvalidCppStd(s.to_string()))?;
    let std = CppStd::new(level).map_err(|_| ParseSettingError::InvalidCppStd(s.to_string()))?;
    Ok(if gnu { std.with_gnu_extensions() } else { std })
  }
}

impl TryFrom<String> for CppStd {
  type Error = ParseSettingError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    value.parse()
  }
}

impl From<CppStd> for String {
  fn from(value: CppStd) -> Self {
    value.to_string()
  }
}

/// Compiler families understood by the toolchain adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CompilerKind {
  Gcc,
  Clang,
  AppleClang,
  Msvc,
}

impl CompilerKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Gcc => "gcc",
      Self::Clang => "clang",
      Self::AppleClang => "apple-clang",
      Self::Msvc => "msvc",
    }
  }
}

impl fmt::Display for CompilerKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl FromStr for CompilerKind {
  type Err = ParseSettingError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "gcc" => Ok(Self::Gcc),
      "clang" => Ok(Self::Clang),
      "apple-clang" => Ok(Self::AppleClang),
      "msvc" => Ok(Self::Msvc),
      _ => Err(ParseSettingError::UnknownCompiler(s.to_string())),
    }
  }
}

impl TryFrom<String> for CompilerKind {
  type Error = ParseSettingError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    value.parse()
  }
}

impl From<CompilerKind> for String {
  fn from(value: CompilerKind) -> Self {
    value.as_str().to_string()
  }
}

/// The `compiler` setting: family, version and declared standard level
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Compiler {
  pub name: CompilerKind,
  pub version: String,
  pub cppstd: CppStd,
}

impl Compiler {
  pub fn new(name: CompilerKind, version: &str, cppstd: CppStd) -> Self {
    Self {
      name,
      version: version.to_string(),
      cppstd,
    }
  }

  pub fn with_cppstd(mut self, cppstd: CppStd) -> Self {
    self.cppstd = cppstd;
    self
  }

  /// The compiler a host of the given OS is assumed to use when nothing is declared.
  pub fn default_for(os: Os) -> Self {
    let cppstd = CppStd::CPP17;
    match os {
      Os::Linux => Self::new(CompilerKind::Gcc, "13", cppstd),
      Os::MacOs => Self::new(CompilerKind::AppleClang, "15", cppstd),
      Os::Windows => Self::new(CompilerKind::Msvc, "194", cppstd),
    }
  }
}

impl fmt::Display for Compiler {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} {} (C++{})", self.name, self.version, self.cppstd)
  }
}
