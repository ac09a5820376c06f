//! End-to-end tests running the `pdfsplice` binary.

use std::process::{Command, Output};

use crate::common::{Workspace, labels_of};

fn pdfsplice(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pdfsplice"))
        .args(args)
        .env("NO_COLOR", "1")
        .env_remove("PDFSPLICE_COMPRESSION")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run pdfsplice")
}

fn arg(path: &std::path::Path) -> &str {
    path.to_str().expect("temp paths are UTF-8")
}

#[test]
fn test_no_arguments_fails() {
    let output = pdfsplice(&[]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_unknown_command_fails() {
    let output = pdfsplice(&["shuffle", "a.pdf"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_help_and_version_succeed() {
    let help = pdfsplice(&["--help"]);
    assert_eq!(help.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&help.stdout).contains("remove"));

    let version = pdfsplice(&["--version"]);
    assert_eq!(version.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&version.stdout).contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_insert_without_position_fails() {
    let output = pdfsplice(&["insert", "base.pdf", "add.pdf", "out.pdf"]);
    assert_eq!(output.status.code(), Some(1));
}

#[tokio::test]
async fn test_invalid_page_list_fails() {
    let ws = Workspace::new();
    let input = ws.pdf("in.pdf", &["p1", "p2"]);
    let out = ws.path("out.pdf");

    let output = pdfsplice(&["remove", arg(&input), arg(&out), "1,x"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid page number"));
    assert!(stderr.contains("Usage: pdfsplice remove <INPUT> <OUTPUT> <PAGES>"));
    assert!(!out.exists());
}

#[tokio::test]
async fn test_missing_input_fails() {
    let ws = Workspace::new();
    let out = ws.path("out.pdf");

    let output = pdfsplice(&["remove", arg(&ws.path("nope.pdf")), arg(&out), "1"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("not found"));
    assert!(!out.exists());
}

#[tokio::test]
async fn test_remove_writes_output() {
    let ws = Workspace::new();
    let input = ws.pdf("in.pdf", &["p1", "p2", "p3"]);
    let out = ws.path("out.pdf");

    let output = pdfsplice(&["remove", arg(&input), arg(&out), "2"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Successfully created"));
    assert_eq!(labels_of(&out).await, vec!["p1", "p3"]);
}

#[tokio::test]
async fn test_quiet_mode_prints_nothing() {
    let ws = Workspace::new();
    let base = ws.pdf("base.pdf", &["b1"]);
    let add = ws.pdf("add.pdf", &["a1"]);
    let out = ws.path("out.pdf");

    let output = pdfsplice(&["--quiet", "append", arg(&base), arg(&add), arg(&out)]);

    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty());
    assert_eq!(labels_of(&out).await, vec!["b1", "a1"]);
}

#[tokio::test]
async fn test_insert_negative_position() {
    let ws = Workspace::new();
    let base = ws.pdf("base.pdf", &["b1", "b2"]);
    let add = ws.pdf("add.pdf", &["a1"]);
    let out = ws.path("out.pdf");

    let output = pdfsplice(&["insert", arg(&base), arg(&add), arg(&out), "-1"]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(labels_of(&out).await, vec!["a1", "b1", "b2"]);
}

#[tokio::test]
async fn test_multiple_skips_missing_file() {
    let ws = Workspace::new();
    let f1 = ws.pdf("f1.pdf", &["x"]);
    let f3 = ws.pdf("f3.pdf", &["z"]);
    let out = ws.path("out.pdf");

    let output = pdfsplice(&[
        "multiple",
        arg(&out),
        arg(&f1),
        arg(&ws.path("f2.pdf")),
        arg(&f3),
    ]);

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Skipping"));
    assert_eq!(labels_of(&out).await, vec!["x", "z"]);
}

#[tokio::test]
async fn test_multiple_aborts_on_unreadable_file() {
    let ws = Workspace::new();
    let good = ws.pdf("good.pdf", &["g"]);
    let bad = ws.path("bad.pdf");
    std::fs::write(&bad, b"garbage").expect("Failed to write file");
    let out = ws.path("out.pdf");

    let output = pdfsplice(&["multiple", arg(&out), arg(&good), arg(&bad)]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to load PDF"));
    assert!(!out.exists());
}

#[tokio::test]
async fn test_multiple_with_only_missing_inputs_succeeds() {
    let ws = Workspace::new();
    let out = ws.path("out.pdf");

    let output = pdfsplice(&["multiple", arg(&out), arg(&ws.path("a.pdf"))]);

    assert_eq!(output.status.code(), Some(0));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Skipping"));
    assert!(stderr.contains("no pages"));
    assert!(labels_of(&out).await.is_empty());
}

#[tokio::test]
async fn test_skipped_input_is_reported_once() {
    let ws = Workspace::new();
    let f1 = ws.pdf("f1.pdf", &["x"]);
    let out = ws.path("out.pdf");

    let output = pdfsplice(&["multiple", arg(&out), arg(&f1), arg(&ws.path("gone.pdf"))]);

    assert_eq!(output.status.code(), Some(0));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("gone.pdf").count(), 1);
}

#[tokio::test]
async fn test_missing_output_directory_is_not_a_usage_error() {
    let ws = Workspace::new();
    let input = ws.pdf("in.pdf", &["p1", "p2"]);
    let out = ws.path("missing").join("out.pdf");

    let output = pdfsplice(&["remove", arg(&input), arg(&out), "1"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Cannot write output"));
    assert!(!stderr.contains("for usage information"));
}

#[tokio::test]
async fn test_upper_case_command() {
    let ws = Workspace::new();
    let input = ws.pdf("in.pdf", &["p1", "p2", "p3"]);
    let out = ws.path("out.pdf");

    let output = pdfsplice(&["REMOVE", arg(&input), arg(&out), "3"]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(labels_of(&out).await, vec!["p1", "p2"]);
}

#[tokio::test]
async fn test_dry_run_writes_nothing() {
    let ws = Workspace::new();
    let base = ws.pdf("base.pdf", &["b1", "b2"]);
    let add = ws.pdf("add.pdf", &["a1"]);
    let out = ws.path("out.pdf");

    let output = pdfsplice(&["--dry-run", "prepend", arg(&base), arg(&add), arg(&out)]);

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("would contain 3 pages"));
    assert!(!out.exists());
}

#[tokio::test]
async fn test_info_prints_page_count() {
    let ws = Workspace::new();
    let input = ws.pdf("in.pdf", &["a", "b"]);

    let output = pdfsplice(&["info", arg(&input)]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("PDF Information"));
    assert!(stdout.contains("Pages: 2"));
}
