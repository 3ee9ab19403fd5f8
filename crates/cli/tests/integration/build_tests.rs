//! Build integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn fresh_build_compiles_and_links() {
  let env = TestEnv::new();
  env.project(&["a.c"], "E app\n");

  env
    .tunimake()
    .assert()
    .success()
    .stdout(predicate::str::contains("Built app"));

  assert_eq!(env.invocations(), vec!["-c a.c -o a.c.o", "a.c.o -o app"]);
  assert!(env.path("a.c.o").exists());
  assert!(env.path("app").exists());
}

#[test]
fn explicit_rulefile_argument() {
  let env = TestEnv::new();
  env.project(&["a.c"], "E app\n");
  std::fs::rename(env.path("tunimakefile"), env.path("rules.txt")).unwrap();

  env.tunimake().arg("rules.txt").assert().success();

  assert!(env.path("app").exists());
}

#[test]
fn libraries_are_linked_in_order() {
  let env = TestEnv::new();
  env.project(&["a.c", "b.c"], "L m, z\nL pthread\nE app\n");

  env.tunimake().assert().success();

  assert_eq!(
    env.invocations().last().unwrap(),
    "a.c.o b.c.o -lm -lz -lpthread -o app"
  );
}

#[test]
fn second_run_only_links() {
  let env = TestEnv::new();
  env.project(&["a.c"], "H a.h\nE app\n");
  env.write_file("a.h", "");
  env.set_mtime("a.h", 1_000);

  env.tunimake().assert().success();
  env
    .tunimake()
    .assert()
    .success()
    .stdout(predicate::str::contains("Compiled: 0"))
    .stdout(predicate::str::contains("Up to date: 1"));

  assert_eq!(
    env.invocations(),
    vec!["-c a.c -o a.c.o", "a.c.o -o app", "a.c.o -o app"]
  );
}

#[test]
fn touched_header_recompiles() {
  let env = TestEnv::new();
  env.project(&["a.c"], "H a.h\nE app\n");
  env.write_file("a.h", "");
  env.set_mtime("a.h", 1_000);
  env.write_file("a.c.o", "object\n");
  env.set_mtime("a.c.o", 2_000);
  env.set_mtime("a.h", 3_000);

  env.tunimake().assert().success();

  assert_eq!(env.invocations(), vec!["-c a.c -o a.c.o", "a.c.o -o app"]);
}

#[test]
fn missing_output_line_fails_before_spawning() {
  let env = TestEnv::new();
  env.project(&["a.c"], "");

  env
    .tunimake()
    .assert()
    .failure()
    .stderr(predicate::str::contains("build failed while validating (config error)"))
    .stderr(predicate::str::contains("E line"));

  assert!(env.invocations().is_empty());
}

#[test]
fn missing_rulefile_fails() {
  let env = TestEnv::new();

  env
    .tunimake()
    .assert()
    .failure()
    .stderr(predicate::str::contains("build failed while loading (config error)"))
    .stderr(predicate::str::contains("tunimakefile"));
}

#[test]
fn compile_failure_stops_the_run() {
  let env = TestEnv::new();
  env.project(&["a.c", "fail.c", "c.c"], "E app\n");

  env
    .tunimake()
    .assert()
    .failure()
    .stderr(predicate::str::contains("build failed while compiling (build error)"))
    .stderr(predicate::str::contains("fail.c"));

  assert_eq!(
    env.invocations(),
    vec!["-c a.c -o a.c.o", "-c fail.c -o fail.c.o"]
  );
  assert!(!env.path("fail.c.o").exists());
  assert!(!env.path("c.c.o").exists());
  assert!(!env.path("app").exists());
}

#[test]
fn keep_failed_objects_flag() {
  let env = TestEnv::new();
  env.project(&["fail.c"], "E app\n");

  env.tunimake().arg("--keep-failed-objects").assert().failure();

  assert!(env.path("fail.c.o").exists());
}

#[test]
fn missing_header_is_io_error() {
  let env = TestEnv::new();
  env.project(&["a.c"], "H gone.h\nE app\n");
  env.write_file("a.c.o", "object\n");
  env.set_mtime("a.c.o", 2_000);

  env
    .tunimake()
    .assert()
    .failure()
    .stderr(predicate::str::contains("(io error)"))
    .stderr(predicate::str::contains("gone.h"));

  assert!(env.invocations().is_empty());
}

#[test]
fn missing_compiler_is_build_error() {
  let env = TestEnv::new();
  env.write_file("a.c", "");
  env.write_file("tunimakefile", "K /nonexistent/tunimake-cc\nC a.c\nE app\n");

  env
    .tunimake()
    .env("RUST_LOG", "error")
    .assert()
    .failure()
    .stderr(predicate::str::contains("build failed while compiling (build error)"))
    .stderr(predicate::str::contains(
      "compile step for a.c could not start /nonexistent/tunimake-cc",
    ));
}

#[test]
fn dry_run_spawns_nothing() {
  let env = TestEnv::new();
  env.project(&["a.c"], "E app\n");

  env
    .tunimake()
    .arg("--dry-run")
    .assert()
    .success()
    .stdout(predicate::str::contains("Dry run: 1 to compile"));

  assert!(env.invocations().is_empty());
  assert!(!env.path("app").exists());
}

#[test]
fn json_summary() {
  let env = TestEnv::new();
  env.project(&["a.c", "b.c"], "E app\n");
  env.write_file("b.c.o", "object\n");
  env.set_mtime("b.c.o", 2_000);

  let output = env.tunimake().args(["--format", "json"]).output().unwrap();
  assert!(output.status.success());

  let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(report["compiled"], serde_json::json!(["a.c"]));
  assert_eq!(report["up_to_date"], serde_json::json!(["b.c"]));
  assert_eq!(report["output"], "app");
  assert_eq!(report["linked"], true);
  assert_eq!(report["dry_run"], false);
}

#[test]
fn staleness_decisions_are_logged() {
  let env = TestEnv::new();
  env.project(&["a.c"], "E app\n");

  env
    .tunimake()
    .assert()
    .success()
    .stderr(predicate::str::contains("needs recompilation"));
}

#[test]
fn verbose_logs_rulefile_and_options() {
  let env = TestEnv::new();
  env.project(&["a.c"], "E app\n");

  env
    .tunimake()
    .args(["--verbose", "--dry-run"])
    .assert()
    .success()
    .stderr(predicate::str::contains("starting build"));
}
