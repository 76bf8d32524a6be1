//! Implementation of the `scythe-recipe package-info` command.

use anyhow::{Context, Result};

use crate::output::{print_item, print_json, print_section, print_success};
use crate::target::TargetArgs;

pub fn cmd_package_info(args: &TargetArgs, json: bool) -> Result<()> {
  let mut run = args.target()?.configure()?;
  let descriptor = run.package_info().context("Failed to emit package info")?;

  if json {
    return print_json(&descriptor);
  }

  print_success(&format!("Package info for {}", run.recipe().reference()));

  print_section("Libraries:");
  for lib in &descriptor.libs {
    print_item(lib);
  }

  print_section("Defines:");
  if descriptor.defines.is_empty() {
    println!("    (none)");
  }
  for define in descriptor.defines.iter() {
    print_item(define);
  }

  if !descriptor.requires.is_empty() {
    print_section("Exposed requirements:");
    for dep in &descriptor.requires {
      print_item(&dep.to_string());
    }
  }

  Ok(())
}
