//! Implementation of the `scythe-recipe configure` command.
//!
//! Resolves options, derives requirements and defines, and shows the cache
//! variables the toolchain would receive.

use anyhow::Result;

use crate::output::{format_bool, print_item, print_json, print_section, print_stat, print_success};
use crate::target::TargetArgs;

pub fn cmd_configure(args: &TargetArgs, json: bool) -> Result<()> {
  let run = args.target()?.configure()?;
  let recipe = run.recipe();
  let build_requires = run.build_requirements();

  let (Some(platform), Some(options), Some(derivation), Some(toolchain)) =
    (run.platform(), run.options(), run.derivation(), run.toolchain_config())
  else {
    anyhow::bail!("configure finished without producing a configuration");
  };

  if json {
    return print_json(&serde_json::json!({
      "reference": recipe.reference(),
      "profile": recipe.profile,
      "settings": platform,
      "options": options,
      "requires": derivation.requires,
      "build_requires": build_requires,
      "defines": derivation.defines,
      "variables": toolchain.variables,
    }));
  }

  print_success(&format!("Configured {} for {}", recipe.reference(), platform));
  print_stat("Compiler", &platform.compiler.to_string());
  print_stat("Build type", platform.build_type.as_str());

  print_section("Options:");
  for (name, value) in options.iter() {
    print_item(&format!("{} = {}", name, format_bool(value)));
  }

  print_section("Requirements:");
  for dep in derivation.requires.iter().chain(build_requires.iter()) {
    print_item(&dep.to_string());
  }

  print_section("Defines:");
  if derivation.defines.is_empty() {
    println!("    (none)");
  }
  for define in derivation.defines.iter() {
    print_item(define);
  }

  print_section("Cache variables:");
  for definition in toolchain.definitions() {
    print_item(&definition);
  }

  Ok(())
}
