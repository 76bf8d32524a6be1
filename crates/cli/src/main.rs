mod cmd;
mod output;
mod target;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use scythe_recipe_lib::profile::Profile;

use crate::cmd::{cmd_build, cmd_configure, cmd_info, cmd_package, cmd_package_info};
use crate::output::{OutputFormat, print_error};
use crate::target::TargetArgs;

/// scythe-recipe - packaging recipe for the scythe graphics framework
#[derive(Parser)]
#[command(name = "scythe-recipe")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Output format
  #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
  format: OutputFormat,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Show recipe metadata and the detected host platform
  Info {
    /// Recipe profile to describe (v1 or v2) [default: v2]
    #[arg(short, long)]
    profile: Option<Profile>,
  },

  /// Resolve options and derive requirements and defines
  Configure(TargetArgs),

  /// Configure, then show the toolchain commands a build would run
  Build(TargetArgs),

  /// Run the full lifecycle and publish the package to the local index
  Package {
    #[command(flatten)]
    target: TargetArgs,

    /// Package index directory (default: $SCYTHE_RECIPE_INDEX or the data dir)
    #[arg(long, value_name = "DIR")]
    index: Option<PathBuf>,
  },

  /// Show the descriptor consumers of the package would see
  PackageInfo(TargetArgs),
}

fn main() {
  let cli = Cli::parse();

  let filter = if cli.verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
  };
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  if let Err(err) = run(cli) {
    print_error(&format!("{:#}", err));
    std::process::exit(1);
  }
}

fn run(cli: Cli) -> Result<()> {
  let json = cli.format.is_json();
  match cli.command {
    Commands::Info { profile } => cmd_info(profile, json),
    Commands::Configure(args) => cmd_configure(&args, json),
    Commands::Build(args) => cmd_build(&args, json),
    Commands::Package { target, index } => cmd_package(&target, index, json),
    Commands::PackageInfo(args) => cmd_package_info(&args, json),
  }
}
