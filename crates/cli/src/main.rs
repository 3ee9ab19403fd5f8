mod cmd;
mod output;

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tunimake_lib::execute::BuildOptions;
use tunimake_lib::rules::DEFAULT_RULEFILE;

use crate::output::{OutputFormat, print_error};

/// tunimake - recompile what changed, then link
#[derive(Parser)]
#[command(name = "tunimake")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Path to the rule file
  #[arg(default_value = DEFAULT_RULEFILE)]
  rulefile: PathBuf,

  /// Show what would be compiled and linked without running anything
  #[arg(short = 'n', long)]
  dry_run: bool,

  /// Keep the object file when its compile fails
  #[arg(long)]
  keep_failed_objects: bool,

  /// Print the parsed rule file and exit
  #[arg(long)]
  print_rules: bool,

  /// Summary format
  #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
  format: OutputFormat,

  /// Enable debug logging (every file checked)
  #[arg(short, long)]
  verbose: bool,
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "info" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .with_ansi(std::io::stderr().is_terminal())
    .with_target(false)
    .without_time()
    .init();

  let result = if cli.print_rules {
    cmd::cmd_print_rules(&cli.rulefile)
  } else {
    let options = BuildOptions {
      dry_run: cli.dry_run,
      keep_failed_objects: cli.keep_failed_objects,
    };
    cmd::cmd_build(&cli.rulefile, &options, cli.format)
  };

  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      print_error(&format!("{:#}", e));
      ExitCode::FAILURE
    }
  }
}
