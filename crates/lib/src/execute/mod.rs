//! Compiler and linker execution.
//!
//! Both steps spawn the configured compiler, wait for it, and map a failed
//! start or a non-zero exit to a [`ToolError`]. Children inherit stdout and
//! stderr so compiler diagnostics reach the terminal unchanged.

mod types;

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::Path;

use tokio::process::Command;
use tracing::{debug, error, info, warn};

use crate::error::Error;
use crate::rules::{BuildSpec, object_path};
use crate::stale::check_staleness;

pub use types::*;

/// Command that compiles `source` into `object`.
///
/// `<compiler> [flags] -c <source> -o <object>`; the flag string is one
/// argument and is left out when empty.
pub fn compile_invocation(spec: &BuildSpec, source: &Path, object: &Path) -> Invocation {
  let mut args = flag_args(spec);
  args.push("-c".into());
  args.push(source.into());
  args.push("-o".into());
  args.push(object.into());

  Invocation {
    program: spec.compiler.clone(),
    args,
  }
}

/// Command that links every object into the output executable.
///
/// `<compiler> [flags] <objects...> -l<lib>... -o <output>`, objects and
/// libraries in declaration order.
pub fn link_invocation(spec: &BuildSpec) -> Invocation {
  let mut args = flag_args(spec);
  args.extend(spec.objects().into_iter().map(OsString::from));
  args.extend(spec.libraries.iter().map(|lib| OsString::from(format!("-l{}", lib))));
  args.push("-o".into());
  args.push(spec.output.as_os_str().to_owned());

  Invocation {
    program: spec.compiler.clone(),
    args,
  }
}

fn flag_args(spec: &BuildSpec) -> Vec<OsString> {
  if spec.flags.is_empty() {
    Vec::new()
  } else {
    vec![OsString::from(&spec.flags)]
  }
}

/// Spawn an invocation and wait for it to exit.
pub async fn run_invocation(invocation: &Invocation, step: Step, target: &Path) -> Result<(), ToolError> {
  debug!(program = %invocation.program, args = invocation.args.len(), "spawning process");

  let status = Command::new(&invocation.program)
    .args(&invocation.args)
    .status()
    .await
    .map_err(|source| ToolError::Spawn {
      step,
      target: target.to_path_buf(),
      program: invocation.program.clone(),
      source,
    })?;

  if !status.success() {
    error!(step = %step, target = %target.display(), code = ?status.code(), "process failed");
    return Err(ToolError::Failed {
      step,
      target: target.to_path_buf(),
      code: status.code(),
    });
  }

  Ok(())
}

/// Bring the object for one source up to date.
///
/// Spawns nothing when the object is current. A failed compile removes the
/// object file unless `keep_failed_objects` is set, so a partial object is
/// never mistaken for a current one on the next run.
pub async fn compile_source(spec: &BuildSpec, source: &Path, options: &BuildOptions) -> Result<CompileOutcome, Error> {
  let object = object_path(source);
  let staleness = check_staleness(source, &object, &spec.headers)?;
  if !staleness.needs_rebuild() {
    return Ok(CompileOutcome::UpToDate);
  }

  let invocation = compile_invocation(spec, source, &object);
  if options.dry_run {
    info!(command = %invocation, "would compile");
    return Ok(CompileOutcome::Compiled);
  }

  info!(command = %invocation, "compiling");
  if let Err(e) = run_invocation(&invocation, Step::Compile, source).await {
    if matches!(e, ToolError::Failed { .. }) && !options.keep_failed_objects {
      remove_failed_object(&object);
    }
    return Err(e.into());
  }

  Ok(CompileOutcome::Compiled)
}

/// Link all objects into the output executable.
///
/// Returns `false` in a dry run, where nothing is spawned.
pub async fn link_objects(spec: &BuildSpec, options: &BuildOptions) -> Result<bool, Error> {
  let invocation = link_invocation(spec);
  if options.dry_run {
    info!(command = %invocation, "would link");
    return Ok(false);
  }

  info!(command = %invocation, "linking");
  run_invocation(&invocation, Step::Link, &spec.output).await?;
  info!(output = %spec.output.display(), "linked");
  Ok(true)
}

fn remove_failed_object(object: &Path) {
  match std::fs::remove_file(object) {
    Ok(()) => info!(object = %object.display(), "removed object left by failed compile"),
    Err(e) if e.kind() == ErrorKind::NotFound => {}
    Err(e) => warn!(object = %object.display(), error = %e, "failed to remove object left by failed compile"),
  }
}
