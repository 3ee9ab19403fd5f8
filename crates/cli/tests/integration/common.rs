//! Shared test helpers for CLI integration tests.
//!
//! Builds run in a temp directory with `/bin/sh` as the compiler and a
//! recording script as the flag string, so every compile and link appends
//! its arguments to `invocations.log` and writes the file named after `-o`.
//! Any argument matching `*fail*.c` makes the script exit 1.

use std::fs::File;
use std::path::PathBuf;
use std::time::{Duration, UNIX_EPOCH};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Mirrors `RECORDER` in `crates/lib/src/util/testutil.rs`; change both together.
const RECORDER: &str = r#"printf '%s\n' "$*" >> "$TUNIMAKE_TEST_LOG"
out=
prev=
for arg in "$@"; do
  if [ "$prev" = "-o" ]; then out="$arg"; fi
  prev="$arg"
done
printf 'object\n' > "$out"
for arg in "$@"; do
  case "$arg" in
    *fail*.c) exit 1 ;;
  esac
done
exit 0
"#;

/// Isolated project directory.
pub struct TestEnv {
  pub temp: TempDir,
  log: PathBuf,
  script: PathBuf,
}

impl TestEnv {
  pub fn new() -> Self {
    let temp = TempDir::new().unwrap();
    let log = temp.path().join("invocations.log");
    let script = temp.path().join("fake-cc.sh");
    std::fs::write(&script, RECORDER.replace("$TUNIMAKE_TEST_LOG", &log.to_string_lossy())).unwrap();
    Self { temp, log, script }
  }

  pub fn path(&self, relative_path: &str) -> PathBuf {
    self.temp.path().join(relative_path)
  }

  /// Write a file relative to the temp directory.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.path(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
  }

  /// Pin a file's modification time to `secs` after the epoch.
  pub fn set_mtime(&self, relative_path: &str, secs: u64) {
    let file = File::options().write(true).open(self.path(relative_path)).unwrap();
    file.set_modified(UNIX_EPOCH + Duration::from_secs(secs)).unwrap();
  }

  /// Compiler and flag lines pointing at the recording script.
  pub fn toolchain_rules(&self) -> String {
    format!("K /bin/sh\nF {}\n", self.script.display())
  }

  /// Write `tunimakefile` with the fake toolchain followed by `rest`, and
  /// create every listed source with an old timestamp.
  pub fn project(&self, sources: &[&str], rest: &str) {
    for source in sources {
      self.write_file(source, "int x;\n");
      self.set_mtime(source, 1_000);
    }
    let rules = format!("{}C {}\n{}", self.toolchain_rules(), sources.join(", "), rest);
    self.write_file("tunimakefile", &rules);
  }

  /// Argument lines of every recorded invocation, in order.
  pub fn invocations(&self) -> Vec<String> {
    match std::fs::read_to_string(&self.log) {
      Ok(content) => content.lines().map(str::to_string).collect(),
      Err(_) => Vec::new(),
    }
  }

  /// The tunimake binary, run from the project directory.
  pub fn tunimake(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("tunimake");
    cmd.current_dir(self.temp.path());
    cmd.env_remove("RUST_LOG");
    cmd
  }
}
