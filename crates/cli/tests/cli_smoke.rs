//! CLI smoke tests for scythe-recipe.
//!
//! These tests run the binary end to end and check exit codes and the key
//! lines of its output.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serial_test::serial;
use tempfile::TempDir;

/// Get a Command for the scythe-recipe binary.
fn recipe_cmd() -> Command {
  cargo_bin_cmd!("scythe-recipe")
}

/// Create a temp directory with a build configuration file.
fn temp_config(content: &str) -> TempDir {
  let temp = TempDir::new().unwrap();
  std::fs::write(temp.path().join("build.toml"), content).unwrap();
  temp
}

const WINDOWS_V2_CONFIG: &str = r#"
profile = "v2"

[settings]
os = "Windows"
arch = "x86_64"

[options]
shared = true
"#;

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_flag_works() {
  recipe_cmd()
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("Usage"));
}

#[test]
fn version_flag_works() {
  recipe_cmd()
    .arg("--version")
    .assert()
    .success()
    .stdout(predicate::str::contains("scythe-recipe"));
}

#[test]
fn subcommand_help_works() {
  for cmd in &["info", "configure", "build", "package", "package-info"] {
    recipe_cmd()
      .arg(cmd)
      .arg("--help")
      .assert()
      .success()
      .stdout(predicate::str::contains("Usage"));
  }
}

// =============================================================================
// Info
// =============================================================================

#[test]
fn info_describes_v1_capabilities() {
  recipe_cmd()
    .args(["info", "--profile", "v1"])
    .assert()
    .success()
    .stdout(predicate::str::contains("scythe/1.0"))
    .stdout(predicate::str::contains("SCYTHE_USE_OPENGL"));
}

#[test]
fn info_rejects_unknown_profile() {
  recipe_cmd().args(["info", "--profile", "v9"]).assert().failure();
}

// =============================================================================
// Configure
// =============================================================================

#[test]
fn configure_v1_linux_as_json() {
  let output = recipe_cmd()
    .args([
      "configure", "-p", "v1", "-s", "os=Linux", "-s", "arch=x86_64", "-o", "OpenGL=True", "--format", "json",
    ])
    .output()
    .unwrap();
  assert!(output.status.success());

  let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(json["reference"], "scythe/1.0");
  assert_eq!(json["options"]["fPIC"], true);
  assert_eq!(json["options"]["OpenGL"], true);
  assert_eq!(json["defines"], serde_json::json!(["SCYTHE_USE_OPENGL"]));
  assert_eq!(json["requires"][0]["reference"], "gtest/[>=1.15.0]");
  assert_eq!(json["requires"][1]["reference"], "glad/[>=2.0]");
  assert_eq!(json["requires"][1]["transitive_headers"], true);
}

#[test]
fn configure_from_config_file_drops_fpic_on_windows() {
  let temp = temp_config(WINDOWS_V2_CONFIG);
  let output = recipe_cmd()
    .args(["configure", "--format", "json", "-c"])
    .arg(temp.path().join("build.toml"))
    .output()
    .unwrap();
  assert!(output.status.success());

  let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(json["options"], serde_json::json!({ "shared": true }));
  assert_eq!(json["defines"], serde_json::json!([]));
}

#[test]
fn fpic_override_on_windows_warns_once() {
  let output = recipe_cmd()
    .args(["configure", "-p", "v2", "-s", "os=Windows", "-s", "arch=x86_64", "-o", "fPIC=True"])
    .output()
    .unwrap();
  assert!(output.status.success());

  let stderr = String::from_utf8_lossy(&output.stderr);
  assert_eq!(stderr.matches("ignoring fPIC override").count(), 1);
}

#[test]
fn configure_fails_below_cpp17() {
  recipe_cmd()
    .args(["configure", "-s", "os=Linux", "-s", "arch=x86_64", "--cppstd", "14"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("requires C++17"))
    .stderr(predicate::str::contains("C++14"));
}

#[test]
fn configure_rejects_opengl_on_v2() {
  recipe_cmd()
    .args(["configure", "-p", "v2", "-s", "os=Linux", "-s", "arch=x86_64", "-o", "OpenGL=True"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("OpenGL"));
}

#[test]
fn configure_rejects_malformed_option() {
  recipe_cmd()
    .args(["configure", "-s", "os=Linux", "-s", "arch=x86_64", "-o", "shared"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("NAME=VALUE"));
}

// =============================================================================
// Build / package
// =============================================================================

#[test]
fn build_prints_cmake_plan() {
  recipe_cmd()
    .args(["build", "-p", "v1", "-s", "os=Linux", "-s", "arch=x86_64"])
    .assert()
    .success()
    .stdout(predicate::str::contains("-DSCYTHE_USE_OPENGL=ON"))
    .stdout(predicate::str::contains("--target test"));
}

#[test]
fn package_info_v2_has_no_defines() {
  let output = recipe_cmd()
    .args(["package-info", "-p", "v2", "-s", "os=Windows", "-s", "arch=x86_64", "--format", "json"])
    .output()
    .unwrap();
  assert!(output.status.success());

  let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(json["libs"], serde_json::json!(["scythe"]));
  assert_eq!(json["defines"], serde_json::json!([]));
}

#[test]
#[serial]
fn package_publishes_to_index_dir() {
  let temp = TempDir::new().unwrap();
  let index = temp.path().join("index");

  recipe_cmd()
    .args(["package", "-p", "v1", "-s", "os=Linux", "-s", "arch=x86_64", "--index"])
    .arg(&index)
    .assert()
    .success()
    .stdout(predicate::str::contains("Packaged scythe/1.0"));

  let version_dir = index.join("scythe").join("1.0");
  let records: Vec<_> = std::fs::read_dir(&version_dir).unwrap().flatten().collect();
  assert_eq!(records.len(), 1);

  let record: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(records[0].path()).unwrap()).unwrap();
  assert_eq!(record["descriptor"]["defines"], serde_json::json!(["SCYTHE_USE_OPENGL"]));
  assert_eq!(record["descriptor"]["requires"][0]["reference"], "glad/[>=2.0]");
}

#[test]
#[serial]
fn package_honors_index_env_var() {
  let temp = TempDir::new().unwrap();

  recipe_cmd()
    .env("SCYTHE_RECIPE_INDEX", temp.path())
    .args(["package", "-p", "v2", "-s", "os=Linux", "-s", "arch=aarch64"])
    .assert()
    .success();

  assert!(temp.path().join("scythe").join("2.0").is_dir());
}
