//! Implementation of the `scythe-recipe build` command.
//!
//! Configures the recipe and drives a dry-run toolchain, printing the
//! commands a real build would execute.

use anyhow::{Context, Result};

use scythe_recipe_lib::toolchain::CommandPlan;

use crate::output::{print_info, print_json, print_section, print_success, symbols};
use crate::target::TargetArgs;

pub fn cmd_build(args: &TargetArgs, json: bool) -> Result<()> {
  let mut run = args.target()?.configure()?;
  let mut plan = CommandPlan::new();
  run.build(&mut plan).context("Build failed")?;

  if json {
    return print_json(&serde_json::json!({
      "reference": run.recipe().reference(),
      "fetch": plan.fetched(),
      "steps": plan.steps(),
    }));
  }

  print_success(&format!("Build plan for {}", run.recipe().reference()));

  print_section("Fetch:");
  for reference in plan.fetched() {
    println!("    {} {}", symbols::ARROW, reference);
  }

  print_section("Commands:");
  for step in plan.steps() {
    println!("    {} {}", symbols::ARROW, step);
  }

  println!();
  print_info("Dry run: no commands were executed.");
  Ok(())
}
