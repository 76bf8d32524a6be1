//! Implementation of the `scythe-recipe package` command.
//!
//! Runs the whole lifecycle against the dry-run toolchain and publishes the
//! resulting package record to a directory index.

use std::path::PathBuf;

use anyhow::{Context, Result};

use scythe_recipe_lib::index::DirectoryIndex;
use scythe_recipe_lib::toolchain::CommandPlan;

use crate::output::{print_json, print_stat, print_success};
use crate::target::TargetArgs;

pub fn cmd_package(args: &TargetArgs, index: Option<PathBuf>, json: bool) -> Result<()> {
  let mut index = match index {
    Some(root) => DirectoryIndex::new(root),
    None => DirectoryIndex::default_index().context("Could not determine the package index directory")?,
  };

  let mut run = args.target()?.configure()?;
  let mut plan = CommandPlan::new();
  run.build(&mut plan).context("Build failed")?;
  run.package(&mut plan).context("Install failed")?;
  run.package_info().context("Failed to emit package info")?;

  let record = run.record()?;
  let path = run.publish(&mut index).context("Failed to publish package")?;

  if json {
    return print_json(&serde_json::json!({
      "reference": record.reference,
      "package_id": record.package_id,
      "path": path,
      "descriptor": record.descriptor,
    }));
  }

  print_success(&format!("Packaged {}", record.reference));
  print_stat("Package id", &record.package_id.to_string());
  print_stat("Options", &record.options.to_string());
  print_stat("Defines", &record.descriptor.defines.to_string());
  print_stat("Record", &path.display().to_string());
  Ok(())
}
