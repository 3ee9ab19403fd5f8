//! Rule file decoding.
//!
//! Each line is decoded on its own into at most one [`Directive`]; the
//! directives are then folded into a [`BuildSpec`] in file order.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::rules::types::{
  BuildSpec, ConfigError, Directive, MARKER_COMPILER, MARKER_FLAGS, MARKER_HEADERS, MARKER_LIBRARIES, MARKER_OUTPUT,
  MARKER_SOURCES,
};

/// Read and parse a rule file.
///
/// Only fails if the file cannot be read. Required fields are checked
/// separately by [`BuildSpec::validate`].
pub fn load_rules(path: &Path) -> Result<BuildSpec, ConfigError> {
  let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
    path: path.to_path_buf(),
    source,
  })?;
  debug!(path = %path.display(), bytes = content.len(), "read rule file");
  Ok(parse_rules(&content))
}

/// Parse rule file text into a [`BuildSpec`].
pub fn parse_rules(content: &str) -> BuildSpec {
  content
    .lines()
    .enumerate()
    .filter_map(|(index, line)| decode_line(index + 1, line))
    .fold(BuildSpec::default(), BuildSpec::apply)
}

/// Decode one line. Blank lines, comments and unknown markers yield `None`.
pub fn decode_line(line_no: usize, line: &str) -> Option<Directive> {
  let line = line.trim();
  if line.is_empty() || line.starts_with('#') {
    return None;
  }

  let (marker, value) = match line.split_once(char::is_whitespace) {
    Some((marker, value)) => (marker, value.trim()),
    None => (line, ""),
  };

  let mut chars = marker.chars();
  let (Some(marker_char), None) = (chars.next(), chars.next()) else {
    warn!(line = line_no, marker = %marker, "ignoring line with unknown marker");
    return None;
  };

  let directive = match marker_char {
    MARKER_COMPILER => Directive::Compiler(value.to_string()),
    MARKER_FLAGS => Directive::Flags(value.to_string()),
    MARKER_SOURCES => Directive::Sources(split_list(value).map(PathBuf::from).collect()),
    MARKER_HEADERS => Directive::Headers(split_list(value).map(PathBuf::from).collect()),
    MARKER_LIBRARIES => Directive::Libraries(split_list(value).map(str::to_string).collect()),
    MARKER_OUTPUT => Directive::Output(PathBuf::from(value)),
    _ => {
      warn!(line = line_no, marker = %marker, "ignoring line with unknown marker");
      return None;
    }
  };

  if value.is_empty() {
    warn!(line = line_no, marker = %marker, "marker has no value");
  }

  Some(directive)
}

/// Split a comma-separated list, trimming entries and dropping empty ones.
fn split_list(value: &str) -> impl Iterator<Item = &str> {
  value.split(',').map(str::trim).filter(|entry| !entry.is_empty())
}
