//! Types for the build driver.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// Driver states, in the order a successful run passes through them.
///
/// Any error moves the run to a terminal failed state; [`crate::Error::stage`]
/// reports which of these it was raised in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
  Loading,
  Validating,
  Compiling,
  Linking,
  Done,
}

impl fmt::Display for Stage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Stage::Loading => write!(f, "loading"),
      Stage::Validating => write!(f, "validating"),
      Stage::Compiling => write!(f, "compiling"),
      Stage::Linking => write!(f, "linking"),
      Stage::Done => write!(f, "done"),
    }
  }
}

/// Summary of a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
  /// Sources that were compiled (or would be, in a dry run), in order.
  pub compiled: Vec<PathBuf>,
  /// Sources whose objects were already current.
  pub up_to_date: Vec<PathBuf>,
  /// The executable named by the rule file.
  pub output: PathBuf,
  /// Whether the link step actually ran.
  pub linked: bool,
  pub dry_run: bool,
}
