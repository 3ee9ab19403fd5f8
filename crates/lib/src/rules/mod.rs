//! Rule file model and loader.
//!
//! A rule file is a flat, line-oriented description of one build:
//!
//! ```text
//! # comment
//! K cc
//! F -Wall
//! C main.c, util.c
//! H util.h
//! L m
//! E app
//! ```
//!
//! `K`, `F` and `E` are scalars (last one wins), `C`, `H` and `L` are
//! comma-separated lists that accumulate across lines.

mod parse;
mod types;

use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub use parse::{decode_line, load_rules, parse_rules};
pub use types::*;

/// Extension appended to a source path to name its object file.
pub const OBJECT_SUFFIX: &str = ".o";

/// Object file for a source: the source path with `.o` appended.
///
/// `src/main.c` becomes `src/main.c.o`; the object always lives next to
/// its source.
pub fn object_path(source: &Path) -> PathBuf {
  let mut object = OsString::from(source.as_os_str());
  object.push(OBJECT_SUFFIX);
  PathBuf::from(object)
}

impl BuildSpec {
  /// Apply one directive, returning the updated spec.
  pub fn apply(mut self, directive: Directive) -> Self {
    match directive {
      Directive::Compiler(compiler) => self.compiler = compiler,
      Directive::Flags(flags) => self.flags = flags,
      Directive::Sources(sources) => self.sources.extend(sources),
      Directive::Headers(headers) => self.headers.extend(headers),
      Directive::Libraries(libraries) => self.libraries.extend(libraries),
      Directive::Output(output) => self.output = output,
    }
    self
  }

  /// Check the fields a build cannot run without.
  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.compiler.is_empty() {
      return Err(ConfigError::MissingCompiler);
    }
    if self.sources.is_empty() {
      return Err(ConfigError::NoSources);
    }
    if self.output.as_os_str().is_empty() {
      return Err(ConfigError::MissingOutput);
    }
    Ok(())
  }

  /// Object files for every source, in source order.
  pub fn objects(&self) -> Vec<PathBuf> {
    self.sources.iter().map(|source| object_path(source)).collect()
  }

  /// Render back to rule file text.
  ///
  /// Empty scalars and empty lists produce no line, so parsing the result
  /// gives back an equal spec.
  pub fn to_rules(&self) -> String {
    let mut out = String::new();

    push_line(&mut out, MARKER_COMPILER, &self.compiler);
    push_line(&mut out, MARKER_FLAGS, &self.flags);
    push_line(&mut out, MARKER_SOURCES, &join_paths(&self.sources));
    push_line(&mut out, MARKER_HEADERS, &join_paths(&self.headers));
    push_line(&mut out, MARKER_LIBRARIES, &self.libraries.join(", "));
    push_line(&mut out, MARKER_OUTPUT, &self.output.to_string_lossy());

    out
  }
}

fn push_line(out: &mut String, marker: char, value: &str) {
  if value.is_empty() {
    return;
  }
  out.push(marker);
  out.push(' ');
  out.push_str(value);
  out.push('\n');
}

fn join_paths(paths: &[PathBuf]) -> String {
  paths
    .iter()
    .map(|p| p.to_string_lossy().into_owned())
    .collect::<Vec<_>>()
    .join(", ")
}
