//! Implementation of the `scythe-recipe info` command.
//!
//! Shows the recipe metadata of a profile and the detected host platform.

use anyhow::{Context, Result};

use scythe_recipe_lib::platform::Platform;
use scythe_recipe_lib::profile::Profile;

use crate::output::{format_bool, print_item, print_json, print_section, print_stat, print_success};

pub fn cmd_info(profile: Option<Profile>, json: bool) -> Result<()> {
  let profile = profile.unwrap_or_else(Profile::latest);
  let recipe = profile.recipe().context("Failed to load recipe")?;
  let host = Platform::detect();

  if json {
    return print_json(&serde_json::json!({ "recipe": recipe, "host": host }));
  }

  print_success(&format!("{} ({})", recipe.reference(), profile));
  print_stat("Description", &recipe.description);
  print_stat("License", &recipe.license);
  print_stat("Author", &recipe.author);
  print_stat("URL", &recipe.url);
  print_stat("Topics", &recipe.topics.join(", "));
  print_stat("Settings", &recipe.settings.join(", "));
  print_stat("Minimum C++", &recipe.min_cppstd.to_string());

  print_section("Options:");
  for option in &recipe.options {
    print_item(&format!("{} (default: {})", option.name, format_bool(option.default)));
  }

  if !recipe.capabilities.is_empty() {
    print_section("Capabilities:");
    for capability in recipe.capabilities.iter() {
      let requires: Vec<String> = capability.requires.iter().map(|r| r.to_string()).collect();
      print_item(&format!(
        "{}: requires [{}], defines [{}]",
        capability.option,
        requires.join(", "),
        capability.defines.join(", ")
      ));
    }
  }

  print_section("Host:");
  match host {
    Some(platform) => {
      print_stat("Platform", &platform.triple());
      print_stat("Compiler", &platform.compiler.to_string());
      print_stat("Build type", platform.build_type.as_str());
    }
    None => println!("  Could not detect platform."),
  }

  Ok(())
}
