//! Shared target selection flags.
//!
//! Every lifecycle command needs the same inputs: a recipe profile, the
//! target settings and option overrides. Values are layered as
//! host detection < config file < command line flags.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use scythe_recipe_lib::config::BuildConfig;
use scythe_recipe_lib::options::RawOptions;
use scythe_recipe_lib::platform::{CppStd, Platform};
use scythe_recipe_lib::profile::Profile;
use scythe_recipe_lib::run::RecipeRun;

#[derive(Debug, Clone, Default, Args)]
pub struct TargetArgs {
  /// Recipe profile to use (v1 or v2) [default: v2]
  #[arg(short, long)]
  pub profile: Option<Profile>,

  /// Build configuration file (TOML)
  #[arg(short, long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Option override, may be repeated (e.g. -o OpenGL=False)
  #[arg(short = 'o', long = "option", value_name = "NAME=VALUE")]
  pub options: Vec<String>,

  /// Setting override, may be repeated (e.g. -s os=Windows, -s compiler.cppstd=20)
  #[arg(short = 's', long = "setting", value_name = "KEY=VALUE")]
  pub settings: Vec<String>,

  /// C++ standard declared by the toolchain (shorthand for -s compiler.cppstd=...)
  #[arg(long, value_name = "LEVEL")]
  pub cppstd: Option<CppStd>,
}

/// Fully layered inputs for one recipe run
#[derive(Debug)]
pub struct Target {
  pub profile: Profile,
  pub options: RawOptions,
  pub platform: Platform,
}

impl TargetArgs {
  pub fn target(&self) -> Result<Target> {
    let config = match &self.config {
      Some(path) => BuildConfig::load(path)?,
      None => BuildConfig::default(),
    };

    let profile = self.profile.or(config.profile).unwrap_or_else(Profile::latest);

    let mut platform = config.platform()?;
    for pair in &self.settings {
      let (key, value) = pair
        .split_once('=')
        .with_context(|| format!("Setting override '{}' must look like KEY=VALUE", pair))?;
      platform
        .set(key.trim(), value.trim())
        .with_context(|| format!("Invalid setting override '{}'", pair))?;
    }
    if let Some(cppstd) = self.cppstd {
      platform.compiler.cppstd = cppstd;
    }

    let mut options = config.options.clone();
    for pair in &self.options {
      options.set_pair(pair)?;
    }

    debug!(%profile, %platform, ?options, "target selected");
    Ok(Target {
      profile,
      options,
      platform,
    })
  }
}

impl Target {
  /// Start a run and configure it
  pub fn configure(self) -> Result<RecipeRun> {
    let mut run = RecipeRun::new(self.profile).context("Failed to load recipe")?;
    run
      .configure(&self.options, self.platform)
      .with_context(|| format!("Failed to configure {}", run.recipe().reference()))?;
    Ok(run)
  }
}
