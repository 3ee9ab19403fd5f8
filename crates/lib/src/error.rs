//! Crate-level error type.
//!
//! Every failure is fatal to the run. [`Error::kind`] classifies it and
//! [`Error::stage`] names the driver stage it was raised in.

use std::fmt;

use thiserror::Error;

use crate::build::Stage;
use crate::execute::{Step, ToolError};
use crate::rules::ConfigError;
use crate::stale::StatError;

/// Any error that aborts a build.
#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Config(#[from] ConfigError),

  #[error(transparent)]
  Stat(#[from] StatError),

  #[error(transparent)]
  Tool(#[from] ToolError),
}

/// Broad classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  /// Rule file missing, unreadable, or incomplete.
  Config,
  /// A declared source or header could not be stat'd.
  Io,
  /// The compiler or linker failed to start or exited non-zero.
  Build,
}

impl fmt::Display for ErrorKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ErrorKind::Config => write!(f, "config error"),
      ErrorKind::Io => write!(f, "io error"),
      ErrorKind::Build => write!(f, "build error"),
    }
  }
}

impl Error {
  pub fn kind(&self) -> ErrorKind {
    match self {
      Error::Config(_) => ErrorKind::Config,
      Error::Stat(_) => ErrorKind::Io,
      Error::Tool(_) => ErrorKind::Build,
    }
  }

  /// The driver stage that was running when this error was raised.
  pub fn stage(&self) -> Stage {
    match self {
      Error::Config(ConfigError::Read { .. }) => Stage::Loading,
      Error::Config(_) => Stage::Validating,
      Error::Stat(_) => Stage::Compiling,
      Error::Tool(e) => match e.step() {
        Step::Compile => Stage::Compiling,
        Step::Link => Stage::Linking,
      },
    }
  }
}
