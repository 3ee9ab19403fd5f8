//! Staleness detection.
//!
//! An object file is stale when it is missing, or when its source or any
//! declared header was modified strictly after it. Equal timestamps count as
//! up to date.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use thiserror::Error;
use tracing::{debug, info};

/// A declared source or header could not be stat'd.
#[derive(Debug, Error)]
#[error("cannot stat {}", path.display())]
pub struct StatError {
  pub path: PathBuf,
  #[source]
  pub source: std::io::Error,
}

/// Outcome of checking one object file against its inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Staleness {
  /// The object is at least as new as every input.
  UpToDate,
  /// The object does not exist.
  MissingObject,
  /// The source was modified after the object.
  SourceNewer,
  /// This header was modified after the object.
  HeaderNewer(PathBuf),
}

impl Staleness {
  pub fn needs_rebuild(&self) -> bool {
    !matches!(self, Staleness::UpToDate)
  }
}

impl fmt::Display for Staleness {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Staleness::UpToDate => write!(f, "up to date"),
      Staleness::MissingObject => write!(f, "object file does not exist"),
      Staleness::SourceNewer => write!(f, "source is newer than object"),
      Staleness::HeaderNewer(header) => write!(f, "header {} is newer than object", header.display()),
    }
  }
}

/// Decide whether `object` must be regenerated from `source`.
///
/// Checks run in a fixed order: source exists, object exists, source
/// newer, then each header in declaration order. The first hit wins, so a
/// missing header is only reported when nothing earlier already forced a
/// rebuild.
pub fn check_staleness(source: &Path, object: &Path, headers: &[PathBuf]) -> Result<Staleness, StatError> {
  debug!(source = %source.display(), "checking source");
  let source_time = modified(source)?;

  debug!(object = %object.display(), "checking object");
  let object_time = match std::fs::metadata(object).and_then(|m| m.modified()) {
    Ok(time) => time,
    Err(e) => {
      debug!(object = %object.display(), error = %e, "object not readable");
      return Ok(log_decision(source, Staleness::MissingObject));
    }
  };

  if source_time > object_time {
    return Ok(log_decision(source, Staleness::SourceNewer));
  }

  for header in headers {
    debug!(header = %header.display(), "checking header");
    if modified(header)? > object_time {
      return Ok(log_decision(source, Staleness::HeaderNewer(header.clone())));
    }
  }

  Ok(log_decision(source, Staleness::UpToDate))
}

/// Boolean form of [`check_staleness`].
pub fn needs_rebuild(source: &Path, object: &Path, headers: &[PathBuf]) -> Result<bool, StatError> {
  check_staleness(source, object, headers).map(|s| s.needs_rebuild())
}

fn modified(path: &Path) -> Result<SystemTime, StatError> {
  std::fs::metadata(path)
    .and_then(|m| m.modified())
    .map_err(|source| StatError {
      path: path.to_path_buf(),
      source,
    })
}

fn log_decision(source: &Path, staleness: Staleness) -> Staleness {
  if staleness.needs_rebuild() {
    info!(source = %source.display(), reason = %staleness, "needs recompilation");
  } else {
    info!(source = %source.display(), "does not need to be recompiled");
  }
  staleness
}
