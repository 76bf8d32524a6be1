//! Versioned recipe profiles.
//!
//! Each recipe version is a self-contained profile. Version 2 is not a superset
//! of version 1: it drops the `OpenGL` option together with its capability
//! table, so the two are kept as separate data rather than flags on one path.
//!
//! A [`Recipe`] is plain immutable data, built fresh by [`Profile::recipe`] for
//! every invocation. Nothing here is shared or mutated across runs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::{OPT_FPIC, OPT_OPENGL, OPT_SHARED};
use crate::options::OptionSet;
use crate::platform::CppStd;
use crate::requirements::{PackageRef, PackageRefError};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown recipe profile '{0}' (expected v1 or v2)")]
pub struct UnknownProfile(pub String);

/// Selectable recipe version
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Profile {
  /// Version 1.0: rendering backend selectable through the `OpenGL` option
  V1,
  /// Version 2.0: no backend toggle, no backend dependency
  V2,
}

impl Profile {
  pub const ALL: [Profile; 2] = [Profile::V1, Profile::V2];

  /// The newest recipe version
  pub fn latest() -> Self {
    Self::V2
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::V1 => "v1",
      Self::V2 => "v2",
    }
  }

  /// Build the immutable recipe data for this version.
  pub fn recipe(&self) -> Result<Recipe, PackageRefError> {
    match self {
      Self::V1 => Recipe::from_data(*self, &V1),
      Self::V2 => Recipe::from_data(*self, &V2),
    }
  }
}

impl fmt::Display for Profile {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl FromStr for Profile {
  type Err = UnknownProfile;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "v1" | "1" | "1.0" => Ok(Self::V1),
      "v2" | "2" | "2.0" => Ok(Self::V2),
      _ => Err(UnknownProfile(s.to_string())),
    }
  }
}

impl TryFrom<String> for Profile {
  type Error = UnknownProfile;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    value.parse()
  }
}

impl From<Profile> for String {
  fn from(value: Profile) -> Self {
    value.as_str().to_string()
  }
}

/// A declared option and its default value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionDecl {
  pub name: String,
  pub default: bool,
}

/// Requirements and defines switched on by a single option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capability {
  /// Option that enables this capability
  pub option: String,
  pub requires: Vec<PackageRef>,
  pub defines: Vec<String>,
}

/// Ordered capability table. Iteration order is the declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityTable {
  entries: Vec<Capability>,
}

impl CapabilityTable {
  pub fn new(entries: Vec<Capability>) -> Self {
    Self { entries }
  }

  pub fn iter(&self) -> impl Iterator<Item = &Capability> {
    self.entries.iter()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

/// Everything a recipe version declares about the package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
  pub profile: Profile,
  pub name: String,
  pub version: String,
  pub license: String,
  pub author: String,
  pub url: String,
  pub description: String,
  pub topics: Vec<String>,
  pub settings: Vec<String>,
  pub options: Vec<OptionDecl>,
  pub capabilities: CapabilityTable,
  pub test_requires: Vec<PackageRef>,
  pub tool_requires: Vec<PackageRef>,
  pub exports_sources: Vec<String>,
  pub libs: Vec<String>,
  pub min_cppstd: CppStd,
}

impl Recipe {
  fn from_data(profile: Profile, data: &RecipeData) -> Result<Self, PackageRefError> {
    let parse_all =
      |refs: &[&str]| -> Result<Vec<PackageRef>, PackageRefError> { refs.iter().map(|r| PackageRef::parse(r)).collect() };

    let capabilities = data
      .capabilities
      .iter()
      .map(|&(option, requires, defines)| -> Result<Capability, PackageRefError> {
        Ok(Capability {
          option: option.to_string(),
          requires: parse_all(requires)?,
          defines: to_strings(defines),
        })
      })
      .collect::<Result<Vec<_>, _>>()?;

    Ok(Self {
      profile,
      name: data.name.to_string(),
      version: data.version.to_string(),
      license: LICENSE.to_string(),
      author: AUTHOR.to_string(),
      url: URL.to_string(),
      description: DESCRIPTION.to_string(),
      topics: to_strings(data.topics),
      settings: to_strings(&SETTINGS),
      options: data
        .options
        .iter()
        .map(|(name, default)| OptionDecl {
          name: name.to_string(),
          default: *default,
        })
        .collect(),
      capabilities: CapabilityTable::new(capabilities),
      test_requires: parse_all(data.test_requires)?,
      tool_requires: parse_all(data.tool_requires)?,
      exports_sources: to_strings(&EXPORTS_SOURCES),
      libs: to_strings(data.libs),
      min_cppstd: CppStd::CPP17,
    })
  }

  /// The `name/version` reference of the package this recipe produces
  pub fn reference(&self) -> String {
    format!("{}/{}", self.name, self.version)
  }

  /// Whether `option` is declared by this recipe version
  pub fn declares(&self, option: &str) -> bool {
    self.options.iter().any(|o| o.name == option)
  }

  /// The default option mapping, before platform adjustments
  pub fn default_options(&self) -> OptionSet {
    self.options.iter().map(|o| (o.name.clone(), o.default)).collect()
  }
}

fn to_strings(items: &[&str]) -> Vec<String> {
  items.iter().map(|s| s.to_string()).collect()
}

const LICENSE: &str = "MIT";
const AUTHOR: &str = "Shtille v.shtille@gmail.com";
const URL: &str = "https://github.com/Shtille/scythe";
const DESCRIPTION: &str = "A graphics framework";
const SETTINGS: [&str; 4] = ["os", "compiler", "build_type", "arch"];
const EXPORTS_SOURCES: [&str; 7] = [
  "CMakeLists.txt",
  "conan_setup.cmake",
  "scythe.cmake",
  "src/*",
  "include/*",
  "examples/*",
  "tests/*",
];

/// (option, requires, defines)
type CapabilityRow = (&'static str, &'static [&'static str], &'static [&'static str]);

struct RecipeData {
  name: &'static str,
  version: &'static str,
  topics: &'static [&'static str],
  options: &'static [(&'static str, bool)],
  capabilities: &'static [CapabilityRow],
  test_requires: &'static [&'static str],
  tool_requires: &'static [&'static str],
  libs: &'static [&'static str],
}

const V1: RecipeData = RecipeData {
  name: "scythe",
  version: "1.0",
  topics: &["framework", "graphics", "OpenGL"],
  options: &[(OPT_SHARED, false), (OPT_FPIC, true), (OPT_OPENGL, true)],
  capabilities: &[(OPT_OPENGL, &["glad/[>=2.0]"], &["SCYTHE_USE_OPENGL"])],
  test_requires: &["gtest/[>=1.15.0]"],
  tool_requires: &["cmake/[>3.15]"],
  libs: &["scythe"],
};

const V2: RecipeData = RecipeData {
  name: "scythe",
  version: "2.0",
  topics: &["framework", "graphics"],
  options: &[(OPT_SHARED, false), (OPT_FPIC, true)],
  capabilities: &[],
  test_requires: &["gtest/[>=1.15.0]"],
  tool_requires: &["cmake/[>3.15]"],
  libs: &["scythe"],
};

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn every_profile_builds() {
    for profile in Profile::ALL {
      let recipe = profile.recipe().unwrap();
      assert_eq!(recipe.profile, profile);
      assert_eq!(recipe.libs, vec!["scythe".to_string()]);
      assert_eq!(recipe.min_cppstd.level(), 17);
    }
  }

  #[test]
  fn v1_declares_opengl_capability() {
    let recipe = Profile::V1.recipe().unwrap();
    assert!(recipe.declares(OPT_OPENGL));

    let capabilities: Vec<_> = recipe.capabilities.iter().collect();
    assert_eq!(capabilities.len(), 1);
    let opengl = capabilities[0];
    assert_eq!(opengl.option, OPT_OPENGL);
    assert_eq!(opengl.requires[0].name, "glad");
    assert_eq!(opengl.defines, vec!["SCYTHE_USE_OPENGL".to_string()]);
  }

  #[test]
  fn v2_drops_opengl_entirely() {
    let recipe = Profile::V2.recipe().unwrap();
    assert!(!recipe.declares(OPT_OPENGL));
    assert!(recipe.capabilities.is_empty());
    assert!(!recipe.topics.contains(&"OpenGL".to_string()));
  }

  #[test]
  fn default_options_match_declarations() {
    let defaults = Profile::V1.recipe().unwrap().default_options();
    assert_eq!(defaults.get(OPT_SHARED), Some(false));
    assert_eq!(defaults.get(OPT_FPIC), Some(true));
    assert_eq!(defaults.get(OPT_OPENGL), Some(true));
    assert_eq!(defaults.len(), 3);
  }

  #[test]
  fn parses_profile_names() {
    assert_eq!("v1".parse::<Profile>().unwrap(), Profile::V1);
    assert_eq!("2.0".parse::<Profile>().unwrap(), Profile::V2);
    assert_eq!("V2".parse::<Profile>().unwrap(), Profile::V2);
    assert!("v3".parse::<Profile>().is_err());
  }

  #[test]
  fn reference_joins_name_and_version() {
    assert_eq!(Profile::V1.recipe().unwrap().reference(), "scythe/1.0");
    assert_eq!(Profile::V2.recipe().unwrap().reference(), "scythe/2.0");
  }
}
