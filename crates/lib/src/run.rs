//! Recipe lifecycle for a single invocation.
//!
//! A [`RecipeRun`] moves through
//! `Unresolved → Resolved → DependenciesDerived → (Built → Packaged) → PackageEmitted`
//! and never revisits a stage. A failed standard validation moves it to
//! `Failed`, from which nothing else can run. Each invocation creates its own
//! run; nothing is shared between runs.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::derive::{Derivation, derive_build_requirements, derive_dependencies};
use crate::descriptor::{PackageDescriptor, emit};
use crate::index::{IndexError, PackageIndex, PackageRecord, package_id};
use crate::options::{OptionSet, RawOptions, ResolveError, resolve};
use crate::platform::Platform;
use crate::profile::{Profile, Recipe};
use crate::requirements::{DependencySpec, PackageRefError};
use crate::toolchain::{Layout, Toolchain, ToolchainConfig, ToolchainError};
use crate::util::hash::HashError;

/// Where a run currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
  Unresolved,
  Resolved,
  DependenciesDerived,
  Built,
  Packaged,
  PackageEmitted,
  Failed,
}

impl fmt::Display for Stage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      Self::Unresolved => "unresolved",
      Self::Resolved => "resolved",
      Self::DependenciesDerived => "dependencies derived",
      Self::Built => "built",
      Self::Packaged => "packaged",
      Self::PackageEmitted => "package emitted",
      Self::Failed => "failed",
    };
    write!(f, "{}", name)
  }
}

/// Lifecycle commands exposed to the orchestrator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
  Configure,
  Build,
  Package,
  PackageInfo,
  Publish,
}

impl fmt::Display for Phase {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      Self::Configure => "configure",
      Self::Build => "build",
      Self::Package => "package",
      Self::PackageInfo => "package_info",
      Self::Publish => "publish",
    };
    write!(f, "{}", name)
  }
}

/// Errors that can occur while driving a recipe run.
#[derive(Debug, Error)]
pub enum RunError {
  #[error("invalid recipe data: {0}")]
  Recipe(#[from] PackageRefError),

  #[error(transparent)]
  Resolve(#[from] ResolveError),

  #[error("cannot run {phase} while the recipe is {stage}")]
  OutOfOrder { phase: Phase, stage: Stage },

  #[error("{phase} failed: {source}")]
  Toolchain {
    phase: Phase,
    #[source]
    source: ToolchainError,
  },

  #[error("cannot publish a package that was never installed")]
  NotInstalled,

  #[error("failed to compute package id: {0}")]
  PackageId(#[source] HashError),

  #[error(transparent)]
  Index(#[from] IndexError),
}

/// State of one recipe invocation
#[derive(Debug)]
pub struct RecipeRun {
  recipe: Recipe,
  stage: Stage,
  platform: Option<Platform>,
  options: Option<OptionSet>,
  derivation: Option<Derivation>,
  toolchain_config: Option<ToolchainConfig>,
  descriptor: Option<PackageDescriptor>,
  installed: bool,
}

impl RecipeRun {
  pub fn new(profile: Profile) -> Result<Self, RunError> {
    Ok(Self {
      recipe: profile.recipe()?,
      stage: Stage::Unresolved,
      platform: None,
      options: None,
      derivation: None,
      toolchain_config: None,
      descriptor: None,
      installed: false,
    })
  }

  pub fn recipe(&self) -> &Recipe {
    &self.recipe
  }

  pub fn stage(&self) -> Stage {
    self.stage
  }

  pub fn platform(&self) -> Option<&Platform> {
    self.platform.as_ref()
  }

  pub fn options(&self) -> Option<&OptionSet> {
    self.options.as_ref()
  }

  pub fn derivation(&self) -> Option<&Derivation> {
    self.derivation.as_ref()
  }

  pub fn toolchain_config(&self) -> Option<&ToolchainConfig> {
    self.toolchain_config.as_ref()
  }

  pub fn build_requirements(&self) -> Vec<DependencySpec> {
    derive_build_requirements(&self.recipe)
  }

  pub fn layout(&self) -> Option<Layout> {
    self.platform.as_ref().map(|p| Layout::cmake(p.build_type))
  }

  fn expect_stage(&self, phase: Phase, allowed: &[Stage]) -> Result<(), RunError> {
    if allowed.contains(&self.stage) {
      Ok(())
    } else {
      Err(RunError::OutOfOrder {
        phase,
        stage: self.stage,
      })
    }
  }

  fn out_of_order(&self, phase: Phase) -> RunError {
    RunError::OutOfOrder {
      phase,
      stage: self.stage,
    }
  }

  /// Resolve options and derive requirements and defines.
  ///
  /// A C++ standard validation failure leaves the run in [`Stage::Failed`].
  /// A rejected option override leaves it `Unresolved` so it can be retried.
  pub fn configure(&mut self, raw: &RawOptions, platform: Platform) -> Result<(), RunError> {
    self.expect_stage(Phase::Configure, &[Stage::Unresolved])?;

    let options = match resolve(&self.recipe, raw, &platform) {
      Ok(options) => options,
      Err(err) => {
        if matches!(err, ResolveError::Validation { .. }) {
          self.stage = Stage::Failed;
        }
        return Err(err.into());
      }
    };
    self.stage = Stage::Resolved;
    info!(reference = %self.recipe.reference(), platform = %platform, %options, "options resolved");

    let derivation = derive_dependencies(&options, &self.recipe);
    let mut dependencies = self.build_requirements();
    dependencies.extend(derivation.requires.iter().cloned());
    self.toolchain_config = Some(ToolchainConfig::generate(
      &platform,
      &options,
      &derivation.defines,
      dependencies,
    ));
    info!(
      requires = derivation.requires.len(),
      defines = %derivation.defines,
      "dependencies derived"
    );

    self.platform = Some(platform);
    self.options = Some(options);
    self.derivation = Some(derivation);
    self.stage = Stage::DependenciesDerived;
    Ok(())
  }

  /// Configure, build and test through `toolchain`.
  pub fn build(&mut self, toolchain: &mut dyn Toolchain) -> Result<(), RunError> {
    self.expect_stage(Phase::Build, &[Stage::DependenciesDerived])?;
    let (Some(config), Some(layout)) = (self.toolchain_config.as_ref(), self.layout()) else {
      return Err(self.out_of_order(Phase::Build));
    };

    let wrap = |source: ToolchainError| RunError::Toolchain {
      phase: Phase::Build,
      source,
    };
    toolchain.configure(config, &layout).map_err(wrap)?;
    toolchain.build(&layout).map_err(wrap)?;
    toolchain.test(&layout).map_err(wrap)?;

    self.stage = Stage::Built;
    info!(build_folder = %layout.build_folder.display(), "build finished");
    Ok(())
  }

  /// Install the built artifacts through `toolchain`.
  pub fn package(&mut self, toolchain: &mut dyn Toolchain) -> Result<(), RunError> {
    self.expect_stage(Phase::Package, &[Stage::Built])?;
    let Some(layout) = self.layout() else {
      return Err(self.out_of_order(Phase::Package));
    };

    toolchain.install(&layout).map_err(|source| RunError::Toolchain {
      phase: Phase::Package,
      source,
    })?;

    self.installed = true;
    self.stage = Stage::Packaged;
    info!("package installed");
    Ok(())
  }

  /// Emit the consumer-facing descriptor.
  pub fn package_info(&mut self) -> Result<PackageDescriptor, RunError> {
    self.expect_stage(
      Phase::PackageInfo,
      &[Stage::DependenciesDerived, Stage::Built, Stage::Packaged],
    )?;
    let (Some(options), Some(derivation)) = (self.options.as_ref(), self.derivation.as_ref()) else {
      return Err(self.out_of_order(Phase::PackageInfo));
    };

    let descriptor = emit(&self.recipe, options, &derivation.defines).expose_requires(&derivation.requires);
    self.descriptor = Some(descriptor.clone());
    self.stage = Stage::PackageEmitted;
    info!(libs = ?descriptor.libs, defines = %descriptor.defines, "package info emitted");
    Ok(descriptor)
  }

  /// Build the index record for the emitted package.
  pub fn record(&self) -> Result<PackageRecord, RunError> {
    self.expect_stage(Phase::Publish, &[Stage::PackageEmitted])?;
    let (Some(platform), Some(options), Some(derivation), Some(descriptor)) = (
      self.platform.as_ref(),
      self.options.as_ref(),
      self.derivation.as_ref(),
      self.descriptor.as_ref(),
    ) else {
      return Err(self.out_of_order(Phase::Publish));
    };

    let reference = self.recipe.reference();
    let package_id = package_id(&reference, platform, options, &derivation.requires).map_err(RunError::PackageId)?;
    Ok(PackageRecord {
      reference,
      package_id,
      profile: self.recipe.profile,
      settings: platform.clone(),
      options: options.clone(),
      descriptor: descriptor.clone(),
    })
  }

  /// Hand the package record to `index`, ending the run.
  pub fn publish(self, index: &mut dyn PackageIndex) -> Result<PathBuf, RunError> {
    if self.stage == Stage::PackageEmitted && !self.installed {
      return Err(RunError::NotInstalled);
    }
    let record = self.record()?;
    Ok(index.publish(record)?)
  }
}
