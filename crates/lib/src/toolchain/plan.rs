//! Dry-run toolchain that records command lines instead of running them.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Layout, Toolchain, ToolchainConfig, ToolchainError};

/// One recorded toolchain invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolchainStep {
  /// Lifecycle step name (`configure`, `build`, `test`, `install`)
  pub step: String,
  pub program: String,
  pub args: Vec<String>,
}

impl ToolchainStep {
  fn cmake(step: &str, args: Vec<String>) -> Self {
    Self {
      step: step.to_string(),
      program: "cmake".to_string(),
      args,
    }
  }
}

impl fmt::Display for ToolchainStep {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.program)?;
    for arg in &self.args {
      write!(f, " {}", arg)?;
    }
    Ok(())
  }
}

/// Records the `cmake` invocations a real toolchain would perform
#[derive(Debug, Clone, Default)]
pub struct CommandPlan {
  steps: Vec<ToolchainStep>,
  fetched: Vec<String>,
}

impl CommandPlan {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn steps(&self) -> &[ToolchainStep] {
    &self.steps
  }

  /// Dependencies the plan would fetch before configuring, as references
  pub fn fetched(&self) -> &[String] {
    &self.fetched
  }

  pub fn into_steps(self) -> Vec<ToolchainStep> {
    self.steps
  }

  fn record(&mut self, step: ToolchainStep) {
    debug!(step = %step.step, command = %step, "recorded toolchain step");
    self.steps.push(step);
  }
}

impl Toolchain for CommandPlan {
  fn configure(&mut self, config: &ToolchainConfig, layout: &Layout) -> Result<(), ToolchainError> {
    self.fetched = config.dependencies.iter().map(|d| d.reference.to_string()).collect();

    let mut args = vec![
      "-S".to_string(),
      layout.source_folder.display().to_string(),
      "-B".to_string(),
      layout.build_folder.display().to_string(),
    ];
    args.extend(config.definitions());
    self.record(ToolchainStep::cmake("configure", args));
    Ok(())
  }

  fn build(&mut self, layout: &Layout) -> Result<(), ToolchainError> {
    let args = vec![
      "--build".to_string(),
      layout.build_folder.display().to_string(),
      "--config".to_string(),
      layout.build_type.to_string(),
    ];
    self.record(ToolchainStep::cmake("build", args));
    Ok(())
  }

  fn test(&mut self, layout: &Layout) -> Result<(), ToolchainError> {
    let args = vec![
      "--build".to_string(),
      layout.build_folder.display().to_string(),
      "--config".to_string(),
      layout.build_type.to_string(),
      "--target".to_string(),
      "test".to_string(),
    ];
    self.record(ToolchainStep::cmake("test", args));
    Ok(())
  }

  fn install(&mut self, layout: &Layout) -> Result<(), ToolchainError> {
    let args = vec![
      "--install".to_string(),
      layout.build_folder.display().to_string(),
      "--config".to_string(),
      layout.build_type.to_string(),
    ];
    self.record(ToolchainStep::cmake("install", args));
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::platform::BuildType;
  use crate::toolchain::CacheValue;

  #[test]
  fn records_steps_in_call_order() {
    let layout = Layout::cmake(BuildType::Release);
    let mut plan = CommandPlan::new();

    plan.configure(&ToolchainConfig::default(), &layout).unwrap();
    plan.build(&layout).unwrap();
    plan.test(&layout).unwrap();
    plan.install(&layout).unwrap();

    let steps: Vec<_> = plan.steps().iter().map(|s| s.step.as_str()).collect();
    assert_eq!(steps, vec!["configure", "build", "test", "install"]);
  }

  #[test]
  fn configure_passes_cache_variables() {
    let layout = Layout::cmake(BuildType::Release);
    let config = ToolchainConfig {
      variables: vec![("BUILD_SHARED_LIBS".to_string(), CacheValue::Bool(true))],
      dependencies: Vec::new(),
    };
    let mut plan = CommandPlan::new();
    plan.configure(&config, &layout).unwrap();

    let line = plan.steps()[0].to_string();
    assert!(line.starts_with("cmake -S . -B build"));
    assert!(line.ends_with("-DBUILD_SHARED_LIBS=ON"));
  }
}
