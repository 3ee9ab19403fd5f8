//! Build driver.
//!
//! Runs one build from a rule file: load, validate, compile every source in
//! declaration order, then link once. The first error aborts the run; no
//! later source is attempted and the link step is skipped.

mod types;

use std::path::Path;

use tracing::{debug, info};

use crate::error::Error;
use crate::execute::{BuildOptions, CompileOutcome, compile_source, link_objects};
use crate::rules::{BuildSpec, load_rules};

pub use types::*;

/// Load a rule file and run the build it describes.
pub async fn run_build(rulefile: &Path, options: &BuildOptions) -> Result<BuildReport, Error> {
  enter(Stage::Loading);
  info!(rulefile = %rulefile.display(), "loading rules");
  let spec = load_rules(rulefile)?;

  enter(Stage::Validating);
  spec.validate()?;

  build_spec(&spec, options).await
}

/// Compile and link an already validated spec.
pub async fn build_spec(spec: &BuildSpec, options: &BuildOptions) -> Result<BuildReport, Error> {
  let mut report = BuildReport {
    output: spec.output.clone(),
    dry_run: options.dry_run,
    ..Default::default()
  };

  enter(Stage::Compiling);
  let total = spec.sources.len();
  for (index, source) in spec.sources.iter().enumerate() {
    debug!(index = index + 1, total, source = %source.display(), "processing source");
    match compile_source(spec, source, options).await? {
      CompileOutcome::Compiled => report.compiled.push(source.clone()),
      CompileOutcome::UpToDate => report.up_to_date.push(source.clone()),
    }
  }

  enter(Stage::Linking);
  report.linked = link_objects(spec, options).await?;

  enter(Stage::Done);
  info!(
    compiled = report.compiled.len(),
    up_to_date = report.up_to_date.len(),
    "build finished"
  );
  Ok(report)
}

fn enter(stage: Stage) {
  debug!(stage = %stage, "entering stage");
}
