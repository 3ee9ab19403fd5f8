//! Implementation of `tunimake --print-rules`.

use std::path::Path;

use anyhow::{Context, Result};

use tunimake_lib::rules::load_rules;

/// Load and validate the rule file, then print it in normalised form.
pub fn cmd_print_rules(rulefile: &Path) -> Result<()> {
  let spec = load_rules(rulefile).with_context(|| format!("Failed to load rules: {}", rulefile.display()))?;
  spec
    .validate()
    .with_context(|| format!("Invalid rules: {}", rulefile.display()))?;

  print!("{}", spec.to_rules());
  Ok(())
}
