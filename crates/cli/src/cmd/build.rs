//! Implementation of the default `tunimake [RULEFILE]` command.
//!
//! Loads the rule file, recompiles stale sources, links, and prints a
//! summary.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info};

use tunimake_lib::build::{BuildReport, run_build};
use tunimake_lib::execute::BuildOptions;

use crate::output::{OutputFormat, format_duration, print_info, print_json, print_stat, print_success};

/// Execute the build.
///
/// Errors carry the failing stage and error kind as context so the
/// operator sees where the run stopped.
pub fn cmd_build(rulefile: &Path, options: &BuildOptions, format: OutputFormat) -> Result<()> {
  let started = Instant::now();
  debug!(
    rulefile = %rulefile.display(),
    dry_run = options.dry_run,
    keep_failed_objects = options.keep_failed_objects,
    "starting build"
  );

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let report = rt.block_on(run_build(rulefile, options)).map_err(|e| {
    let message = format!("build failed while {} ({})", e.stage(), e.kind());
    anyhow::Error::new(e).context(message)
  })?;

  info!(elapsed = %format_duration(started.elapsed()), "build complete");

  if format.is_json() {
    return print_json(&report);
  }

  print_summary(&report, started.elapsed());
  Ok(())
}

fn print_summary(report: &BuildReport, elapsed: std::time::Duration) {
  let output = report.output.display();

  if report.dry_run {
    print_info(&format!(
      "Dry run: {} to compile, {} up to date, then link {}",
      report.compiled.len(),
      report.up_to_date.len(),
      output
    ));
  } else {
    print_success(&format!("Built {} in {}", output, format_duration(elapsed)));
  }

  print_stat("Compiled", &report.compiled.len().to_string());
  print_stat("Up to date", &report.up_to_date.len().to_string());
  for source in &report.compiled {
    println!("    {}", source.display());
  }
}
