//! Types for the rule file model.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Rule file name used when none is given on the command line.
pub const DEFAULT_RULEFILE: &str = "tunimakefile";

/// Line marker for the compiler executable.
pub const MARKER_COMPILER: char = 'K';
/// Line marker for the flag string.
pub const MARKER_FLAGS: char = 'F';
/// Line marker for a comma-separated list of source files.
pub const MARKER_SOURCES: char = 'C';
/// Line marker for a comma-separated list of header files.
pub const MARKER_HEADERS: char = 'H';
/// Line marker for a comma-separated list of libraries.
pub const MARKER_LIBRARIES: char = 'L';
/// Line marker for the executable name.
pub const MARKER_OUTPUT: char = 'E';

/// In-memory form of a parsed rule file.
///
/// Built once per run and never mutated after loading. Paths are kept
/// exactly as written and resolved against the working directory when used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildSpec {
  /// Compiler executable, also used as the linker front-end.
  pub compiler: String,
  /// Flag string passed as a single argument to every compile and link.
  pub flags: String,
  /// Source files, compiled in this order.
  pub sources: Vec<PathBuf>,
  /// Headers every source depends on.
  pub headers: Vec<PathBuf>,
  /// Library names, rendered as `-l<name>` when linking.
  pub libraries: Vec<String>,
  /// Executable produced by the link step.
  pub output: PathBuf,
}

/// A single decoded rule file line.
///
/// Scalar directives overwrite the previous value, list directives append.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
  Compiler(String),
  Flags(String),
  Sources(Vec<PathBuf>),
  Headers(Vec<PathBuf>),
  Libraries(Vec<String>),
  Output(PathBuf),
}

/// Errors raised while loading or validating a rule file.
#[derive(Debug, Error)]
pub enum ConfigError {
  /// The rule file could not be opened or read.
  #[error("cannot read rule file {}", path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// No `K` line, or an empty one.
  #[error("rule file does not name a compiler (K line)")]
  MissingCompiler,

  /// No `E` line, or an empty one.
  #[error("rule file does not name an output executable (E line)")]
  MissingOutput,

  /// No `C` line with at least one entry.
  #[error("rule file does not list any source files (C line)")]
  NoSources,
}
