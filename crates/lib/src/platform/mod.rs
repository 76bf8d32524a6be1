//! Target platform settings.
//!
//! A [`Platform`] carries the four recipe settings (`os`, `arch`, `compiler`,
//! `build_type`). The resolver only looks at `os` (fPIC applicability) and at
//! `compiler.cppstd` (minimum standard validation); the rest flows through to
//! the toolchain and into the package id.

pub mod arch;
pub mod build_type;
pub mod compiler;
pub mod os;
pub mod paths;

pub use arch::Arch;
pub use build_type::BuildType;
pub use compiler::{Compiler, CompilerKind, CppStd};
pub use os::Os;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Errors raised while parsing a setting value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseSettingError {
  #[error("unknown os '{0}' (expected linux, darwin or windows)")]
  UnknownOs(String),

  #[error("unknown arch '{0}' (expected x86_64 or aarch64)")]
  UnknownArch(String),

  #[error("unknown compiler '{0}' (expected gcc, clang, apple-clang or msvc)")]
  UnknownCompiler(String),

  #[error("unknown build type '{0}'")]
  UnknownBuildType(String),

  #[error("invalid C++ standard '{0}'")]
  InvalidCppStd(String),

  #[error("unknown setting '{0}'")]
  UnknownSetting(String),
}

/// The settings a recipe is configured against
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Platform {
  pub os: Os,
  pub arch: Arch,
  pub compiler: Compiler,
  pub build_type: BuildType,
}

impl Platform {
  /// Create a platform with the default compiler for `os`
  pub fn new(arch: Arch, os: Os) -> Self {
    Self {
      os,
      arch,
      compiler: Compiler::default_for(os),
      build_type: BuildType::default(),
    }
  }

  /// Detect the host platform at runtime
  ///
  /// Returns `None` if the OS or architecture is not supported
  pub fn detect() -> Option<Self> {
    Some(Self::new(Arch::current()?, Os::current()?))
  }

  pub fn with_compiler(mut self, compiler: Compiler) -> Self {
    self.compiler = compiler;
    self
  }

  pub fn with_cppstd(mut self, cppstd: CppStd) -> Self {
    self.compiler.cppstd = cppstd;
    self
  }

  pub fn with_build_type(mut self, build_type: BuildType) -> Self {
    self.build_type = build_type;
    self
  }

  /// Returns the platform triple string (e.g., "aarch64-darwin")
  pub fn triple(&self) -> String {
    format!("{}-{}", self.arch, self.os)
  }

  /// Apply a single `key=value` setting override.
  ///
  /// Keys follow the recipe settings: `os`, `arch`, `build_type`, `compiler`,
  /// `compiler.version` and `compiler.cppstd`.
  ///
  /// Changing `os` while the compiler is still the previous OS's default
  /// switches to the new OS's default compiler, keeping the declared standard.
  pub fn set(&mut self, key: &str, value: &str) -> Result<(), ParseSettingError> {
    match key {
      "os" => self.set_os(value.parse()?),
      "arch" => self.arch = value.parse()?,
      "build_type" => self.build_type = value.parse()?,
      "compiler" => self.compiler.name = value.parse()?,
      "compiler.version" => self.compiler.version = value.to_string(),
      "compiler.cppstd" => self.compiler.cppstd = value.parse()?,
      _ => return Err(ParseSettingError::UnknownSetting(key.to_string())),
    }
    Ok(())
  }
}

impl Platform {
  fn set_os(&mut self, os: Os) {
    let previous = Compiler::default_for(self.os);
    if self.compiler.name == previous.name && self.compiler.version == previous.version {
      let cppstd = self.compiler.cppstd;
      self.compiler = Compiler::default_for(os).with_cppstd(cppstd);
    }
    self.os = os;
  }
}

impl fmt::Display for Platform {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.triple())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn platform_triple_format() {
    let platform = Platform::new(Arch::Aarch64, Os::MacOs);
    assert_eq!(platform.triple(), "aarch64-darwin");

    let platform = Platform::new(Arch::X86_64, Os::Linux);
    assert_eq!(platform.triple(), "x86_64-linux");
  }

  #[test]
  fn set_overrides_individual_settings() {
    let mut platform = Platform::new(Arch::X86_64, Os::Linux);
    platform.set("os", "Windows").unwrap();
    platform.set("compiler", "msvc").unwrap();
    platform.set("compiler.version", "193").unwrap();
    platform.set("compiler.cppstd", "20").unwrap();
    platform.set("build_type", "Debug").unwrap();

    assert_eq!(platform.os, Os::Windows);
    assert_eq!(platform.compiler.name, CompilerKind::Msvc);
    assert_eq!(platform.compiler.version, "193");
    assert_eq!(platform.compiler.cppstd.level(), 20);
    assert_eq!(platform.build_type, BuildType::Debug);
  }

  #[test]
  fn set_os_picks_that_os_default_compiler() {
    let mut platform = Platform::new(Arch::X86_64, Os::Linux).with_cppstd(CppStd::new(20).unwrap());
    platform.set("os", "Windows").unwrap();

    assert_eq!(platform.compiler.name, CompilerKind::Msvc);
    assert_eq!(platform.compiler.version, "194");
    assert_eq!(platform.compiler.cppstd.level(), 20);
    assert_eq!(platform, Platform::new(Arch::X86_64, Os::Windows).with_cppstd(CppStd::new(20).unwrap()));
  }

  #[test]
  fn set_os_keeps_an_explicit_compiler() {
    let mut platform = Platform::new(Arch::X86_64, Os::Linux);
    platform.set("compiler", "clang").unwrap();
    platform.set("os", "darwin").unwrap();

    assert_eq!(platform.os, Os::MacOs);
    assert_eq!(platform.compiler.name, CompilerKind::Clang);
  }

  #[test]
  fn set_rejects_unknown_keys() {
    let mut platform = Platform::new(Arch::X86_64, Os::Linux);
    assert_eq!(
      platform.set("compiler.runtime", "static"),
      Err(ParseSettingError::UnknownSetting("compiler.runtime".to_string()))
    );
  }

  #[test]
  fn default_compiler_declares_cpp17() {
    for os in [Os::Linux, Os::MacOs, Os::Windows] {
      assert_eq!(Platform::new(Arch::X86_64, os).compiler.cppstd.level(), 17);
    }
  }
}
