// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Integration tests for the `zo` binary.
//! Each test writes a source file to a temp dir, runs a command on it,
//! and checks the exit status and output.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

use tempfile::TempDir;

fn zo(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_zo"))
        .args(args)
        .env("NO_COLOR", "1")
        .env_remove("ZO_LOG")
        .output()
        .expect("failed to run zo")
}

fn source_file(dir: &TempDir, name: &str, src: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, src).unwrap();
    path
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

const BROKEN: &str = "fun main() {\n  imu = 1;\n}\n";

#[test]
fn check_accepts_clean_file() {
    let dir = TempDir::new().unwrap();
    let path = source_file(&dir, "ok.zo", "fun main() { imu x := 1; }\n");
    let out = zo(&["check", path.to_str().unwrap()]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert!(stdout(&out).contains("=== Check OK ==="));
}

#[test]
fn check_reports_errors() {
    let dir = TempDir::new().unwrap();
    let path = source_file(&dir, "bad.zo", BROKEN);
    let out = zo(&["check", path.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
    let err = stderr(&out);
    assert!(err.contains("error[E0101]"), "{}", err);
    assert!(err.contains("bad.zo:2:7"), "{}", err);
    assert!(err.contains("=== Check FAILED: 1 error ==="), "{}", err);
}

#[test]
fn check_json_report() {
    let dir = TempDir::new().unwrap();
    let path = source_file(&dir, "bad.zo", BROKEN);
    let out = zo(&["check", "--format", "json", path.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
    let json = stdout(&out);
    assert!(json.contains("\"success\": false"), "{}", json);
    assert!(json.contains("\"code\": \"E0101\""), "{}", json);
    assert!(stderr(&out).is_empty());
}

#[test]
fn parse_prints_sexp() {
    let dir = TempDir::new().unwrap();
    let path = source_file(&dir, "add.zo", "fun add(a: int, b: int) -> int { a + b }");
    let out = zo(&["parse", "--sexp", path.to_str().unwrap()]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert!(stdout(&out).starts_with("(source_file"));
}

#[test]
fn parse_prints_tree_and_banner() {
    let dir = TempDir::new().unwrap();
    let path = source_file(&dir, "add.zo", "fun add(a: int, b: int) -> int { a + b }");
    let out = zo(&["parse", path.to_str().unwrap()]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("AST (1 items)"));
    assert!(text.contains("=== Parse OK ==="));
}

#[test]
fn parse_failure_exits_nonzero() {
    let dir = TempDir::new().unwrap();
    let path = source_file(&dir, "bad.zo", BROKEN);
    let out = zo(&["parse", path.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("=== Parse FAILED: 1 error ==="));
}

#[test]
fn lex_lists_tokens() {
    let dir = TempDir::new().unwrap();
    let path = source_file(&dir, "t.zo", "imu x := 1;");
    let out = zo(&["lex", path.to_str().unwrap()]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("Tokens (6)"), "{}", text);
    assert!(text.contains("Imu"));
    assert!(text.contains("Lex: 6 tokens OK"));
}

#[test]
fn lex_reports_bad_character() {
    let dir = TempDir::new().unwrap();
    let path = source_file(&dir, "t.zo", "imu x := 1 ~ 2;");
    let out = zo(&["lex", path.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("E0001"));
}

#[test]
fn fmt_prints_canonical_layout() {
    let dir = TempDir::new().unwrap();
    let path = source_file(&dir, "f.zo", "fun add(a:int,b:int)->int{a+b}");
    let out = zo(&["fmt", path.to_str().unwrap()]);
    assert!(out.status.success());
    assert_eq!(stdout(&out), "fun add(a: int, b: int) -> int {\n  a + b\n}\n");

    let out = zo(&["fmt", "--indent", "4", path.to_str().unwrap()]);
    assert_eq!(stdout(&out), "fun add(a: int, b: int) -> int {\n    a + b\n}\n");
}

#[test]
fn fmt_check_and_write() {
    let dir = TempDir::new().unwrap();
    let path = source_file(&dir, "f.zo", "fun main(){go();}");
    let p = path.to_str().unwrap();

    let out = zo(&["fmt", "--check", p]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stdout(&out).contains("would reformat"));

    let out = zo(&["fmt", "--write", p]);
    assert!(out.status.success());
    assert_eq!(fs::read_to_string(&path).unwrap(), "fun main() {\n  go();\n}\n");

    let out = zo(&["fmt", "--check", p]);
    assert!(out.status.success());
}

#[test]
fn fmt_refuses_broken_source() {
    let dir = TempDir::new().unwrap();
    let path = source_file(&dir, "bad.zo", BROKEN);
    let out = zo(&["fmt", "--write", path.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(fs::read_to_string(&path).unwrap(), BROKEN);
}

#[test]
fn explain_known_and_unknown_codes() {
    let out = zo(&["explain", "E0103"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("ternary without guard"));

    let out = zo(&["explain", "e0005"]);
    assert!(stdout(&out).contains("unterminated block comment"));

    let out = zo(&["explain", "E9999"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("unknown error code"));

    let out = zo(&["explain"]);
    assert!(stdout(&out).contains("E0201"));
}

#[test]
fn usage_errors() {
    let out = zo(&["frobnicate"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("unknown command"));

    let out = zo(&["check"]);
    assert_eq!(out.status.code(), Some(1));

    let out = zo(&["check", "--bogus", "x.zo"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("unknown option"));

    let out = zo(&["check", "/no/such/file.zo"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("reading"));
}

#[test]
fn help_and_version() {
    let out = zo(&["version"]);
    assert_eq!(stdout(&out).trim(), format!("zo {}", env!("CARGO_PKG_VERSION")));

    let out = zo(&["help"]);
    assert!(stdout(&out).contains("explain"));

    let out = zo(&["fmt", "--help"]);
    assert!(stdout(&out).contains("--indent"));
}
