use std::process::{Command, Stdio};

fn run_dysh(command: &str) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_dysh"))
        .args(["-c", command])
        .stdin(Stdio::null())
        .output()
        .expect("failed to execute dysh")
}

#[test]
fn single_stage_runs_to_completion() {
    let output = run_dysh("echo hello");
    assert!(output.status.success(), "command failed: {:?}", output);
    assert_eq!(String::from_utf8_lossy(&output.stdout), "hello\n");
}

#[test]
fn pipe_connects_stage_output_to_next_stage_input() {
    let output = run_dysh("echo hello | cat");
    assert!(output.status.success(), "command failed: {:?}", output);
    assert_eq!(String::from_utf8_lossy(&output.stdout), "hello\n");
}

#[test]
fn three_stage_pipeline() {
    let output = run_dysh("echo hello | cat | cat");
    assert!(output.status.success(), "command failed: {:?}", output);
    assert_eq!(String::from_utf8_lossy(&output.stdout), "hello\n");
}

#[test]
fn pipe_closure_propagates_end_of_input() {
    // the first stage produces no output; the second must still see EOF
    let output = run_dysh("false | cat");
    assert!(output.status.success(), "pipeline hung or failed: {:?}", output);
    assert_eq!(String::from_utf8_lossy(&output.stdout), "");
}

#[test]
fn hello_builtin_runs_in_process() {
    let output = run_dysh("hello");
    assert!(output.status.success(), "command failed: {:?}", output);
    assert_eq!(String::from_utf8_lossy(&output.stdout), "Hello, World\n");
}

#[test]
fn builtin_works_as_a_pipeline_stage() {
    let output = run_dysh("hello | cat");
    assert!(output.status.success(), "command failed: {:?}", output);
    assert_eq!(String::from_utf8_lossy(&output.stdout), "Hello, World\n");
}

#[test]
fn background_launch_prints_id_and_group() {
    let output = run_dysh("sleep 0.2 &");
    assert!(output.status.success(), "command failed: {:?}", output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let line = stdout.trim_end();
    // `[<id>] <group-id>`
    assert!(line.starts_with("[1] "), "unexpected notice: {stdout:?}");
    let pgid: &str = &line["[1] ".len()..];
    assert!(
        pgid.chars().all(|c| c.is_ascii_digit()) && !pgid.is_empty(),
        "group id is not numeric: {stdout:?}"
    );
}

#[test]
fn jobs_with_no_tracked_jobs_prints_nothing() {
    let output = run_dysh("jobs");
    assert!(output.status.success(), "command failed: {:?}", output);
    assert_eq!(String::from_utf8_lossy(&output.stdout), "");
}

#[test]
fn unknown_job_id_is_not_fatal() {
    let output = run_dysh("fg 1");
    assert!(output.status.success(), "fg treated a user error as fatal");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Job 1 not found"),
        "missing not-found message: {stderr:?}"
    );

    let output = run_dysh("bg 7");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Job 7 not found"));
}

#[test]
fn fg_without_argument_prints_usage() {
    let output = run_dysh("fg");
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage: fg <jobid>"), "stderr: {stderr:?}");
}

#[test]
fn unknown_program_reports_and_continues() {
    let output = run_dysh("no_such_program_zzz");
    // the child reports the failed replacement; the interpreter itself is fine
    assert!(output.status.success(), "interpreter died: {:?}", output);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("no_such_program_zzz"),
        "stderr did not name the program: {stderr:?}"
    );
}

#[test]
fn empty_stage_is_a_no_op() {
    let output = run_dysh("echo hi ||");
    assert!(output.status.success(), "command failed: {:?}", output);
    assert_eq!(String::from_utf8_lossy(&output.stdout), "hi\n");
}
