//! Types for compile and link execution.

use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Which external step a command belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
  Compile,
  Link,
}

impl fmt::Display for Step {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Step::Compile => write!(f, "compile"),
      Step::Link => write!(f, "link"),
    }
  }
}

/// Errors from spawning the compiler or linker.
#[derive(Debug, Error)]
pub enum ToolError {
  /// The process could not be started at all.
  #[error("{step} step for {} could not start {program}", target.display())]
  Spawn {
    step: Step,
    /// Source file for a compile, output executable for a link.
    target: PathBuf,
    program: String,
    #[source]
    source: std::io::Error,
  },

  /// The process ran and did not exit successfully.
  #[error("{step} step failed for {}: {}", target.display(), describe_exit(*code))]
  Failed {
    step: Step,
    /// Source file for a compile, output executable for a link.
    target: PathBuf,
    /// Exit code, `None` if the process was killed by a signal.
    code: Option<i32>,
  },
}

impl ToolError {
  pub fn step(&self) -> Step {
    match self {
      ToolError::Spawn { step, .. } | ToolError::Failed { step, .. } => *step,
    }
  }
}

fn describe_exit(code: Option<i32>) -> String {
  match code {
    Some(code) => format!("exit code {}", code),
    None => "terminated by signal".to_string(),
  }
}

/// A fully built external command: program plus argument list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
  pub program: String,
  pub args: Vec<OsString>,
}

impl fmt::Display for Invocation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.program)?;
    for arg in &self.args {
      write!(f, " {}", arg.to_string_lossy())?;
    }
    Ok(())
  }
}

/// Options controlling how a build is executed.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildOptions {
  /// Report what would run without spawning anything.
  pub dry_run: bool,
  /// Leave the object file in place when its compile fails.
  pub keep_failed_objects: bool,
}

/// What happened to one source during the compile stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompileOutcome {
  /// The compiler ran (or would have, in a dry run).
  Compiled,
  /// The object was current; nothing was spawned.
  UpToDate,
}
