use std::fs;
use std::io::Write;
use std::process::{Command, Stdio};

use tempfile::NamedTempFile;

fn run_dysh(command: &str) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_dysh"))
        .args(["-c", command])
        .stdin(Stdio::null())
        .output()
        .expect("failed to execute dysh")
}

#[test]
fn input_redirect_feeds_command() {
    let mut input = NamedTempFile::new().expect("create temp input");
    writeln!(input, "hello").unwrap();
    writeln!(input, "world").unwrap();

    let cmd = format!("cat < {}", input.path().display());
    let output = run_dysh(&cmd);

    assert!(output.status.success(), "command failed: {:?}", output);
    assert_eq!(String::from_utf8_lossy(&output.stdout), "hello\nworld\n");
}

#[test]
fn output_redirect_writes_file() {
    let file = NamedTempFile::new().expect("create temp output");
    let path = file.path().to_path_buf();
    drop(file);

    let output = run_dysh(&format!("echo hi > {}", path.display()));
    assert!(output.status.success(), "command failed: {:?}", output);
    assert_eq!(String::from_utf8_lossy(&output.stdout), "");
    assert_eq!(fs::read_to_string(&path).unwrap(), "hi\n");

    fs::remove_file(&path).ok();
}

#[test]
fn redirect_round_trip() {
    let file = NamedTempFile::new().expect("create temp file");
    let path = file.path().to_path_buf();
    drop(file);

    let output = run_dysh(&format!("echo hi > {}", path.display()));
    assert!(output.status.success());
    let output = run_dysh(&format!("cat < {}", path.display()));
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "hi\n");

    fs::remove_file(&path).ok();
}

#[test]
fn append_redirect_does_not_truncate() {
    let file = NamedTempFile::new().expect("create temp file");
    let path = file.path().to_path_buf();
    drop(file);

    assert!(run_dysh(&format!("echo one >> {}", path.display()))
        .status
        .success());
    assert!(run_dysh(&format!("echo two >> {}", path.display()))
        .status
        .success());
    assert_eq!(fs::read_to_string(&path).unwrap(), "one\ntwo\n");

    fs::remove_file(&path).ok();
}

#[test]
fn truncating_redirect_replaces_contents() {
    let file = NamedTempFile::new().expect("create temp file");
    let path = file.path().to_path_buf();
    drop(file);

    assert!(run_dysh(&format!("echo one > {}", path.display()))
        .status
        .success());
    assert!(run_dysh(&format!("echo two > {}", path.display()))
        .status
        .success());
    assert_eq!(fs::read_to_string(&path).unwrap(), "two\n");

    fs::remove_file(&path).ok();
}

#[test]
fn missing_input_redirect_degrades_to_unset() {
    // the open fails at parse time; the stage still runs, reading the
    // (empty) inherited stdin
    let missing = std::env::temp_dir().join("dysh_missing_input_test.txt");
    fs::remove_file(&missing).ok();

    let output = run_dysh(&format!("cat < {}", missing.display()));
    assert!(output.status.success(), "interpreter died: {:?}", output);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("dysh_missing_input_test.txt"),
        "open failure not reported: {stderr:?}"
    );
}

#[test]
fn redirect_takes_precedence_over_pipe() {
    let mut input = NamedTempFile::new().expect("create temp input");
    writeln!(input, "from-file").unwrap();

    // the second stage reads the file, not the pipe
    let cmd = format!("echo from-pipe | cat < {}", input.path().display());
    let output = run_dysh(&cmd);
    assert!(output.status.success(), "command failed: {:?}", output);
    assert_eq!(String::from_utf8_lossy(&output.stdout), "from-file\n");
}
