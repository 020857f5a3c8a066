use super::foreground::ForegroundGuard;
use super::fork::fork_stage;
use super::state::{JobState, ProcessState};
use super::wait;
use crate::parser::{Command, Pipeline};
use crate::shell::Shell;
use anyhow::{Context as _, Result};
use dysh_builtin::Builtin;
use dysh_types::Context;
use libc::{STDIN_FILENO, STDOUT_FILENO};
use nix::errno::Errno;
use nix::unistd::{close, pipe, setpgid, Pid};
use std::os::unix::io::{AsRawFd, RawFd};
use tracing::{debug, warn};

/// Runs a parsed pipeline to completion or to a stop/backgrounding point,
/// updating the job table as needed.
pub fn execute_pipeline(shell: &mut Shell, ctx: &mut Context, pipeline: Pipeline) -> Result<()> {
    let Pipeline {
        commands,
        background,
        display,
    } = pipeline;

    // Zero-argv stages (`||`, stray pipes) are no-ops, not launch attempts.
    let mut stages: Vec<Command> = commands
        .into_iter()
        .filter(|command| !command.argv.is_empty())
        .collect();
    if stages.is_empty() {
        return Ok(());
    }

    ctx.foreground = !background;

    // A lone foreground builtin runs in the interpreter process. Forked into
    // a child, a terminal-manipulating builtin such as `fg` would sit in a
    // process group without terminal ownership and be suspended by SIGTTOU
    // the moment it claimed the terminal.
    if !background && stages.len() == 1 {
        if let Some(builtin) = stages[0].builtin {
            if let Some(command) = stages.pop() {
                return run_builtin_inline(shell, ctx, builtin, command);
            }
        }
    }

    let pgid = launch_stages(shell, ctx, stages, background, &display)?;

    if background {
        let disp = &display;
        debug!("pipeline {:?} running in background pgid:{}", disp, pgid);
        return Ok(());
    }
    wait_foreground(shell, ctx, pgid, &display)
}

/// Forks every stage, wiring a pipe between each consecutive pair. Returns
/// the pipeline's process-group id (the first stage's pid).
fn launch_stages(
    shell: &mut Shell,
    ctx: &Context,
    stages: Vec<Command>,
    background: bool,
    display: &str,
) -> Result<Pid> {
    let mut pgid: Option<Pid> = None;
    let mut prev_read: Option<RawFd> = None;
    let count = stages.len();

    for (index, mut command) in stages.into_iter().enumerate() {
        let last = index + 1 == count;
        let next_pipe = if last {
            None
        } else {
            match pipe() {
                Ok(ends) => Some(ends),
                Err(err) => {
                    abandon_launch(prev_read.take(), None);
                    return Err(err).context("failed pipe");
                }
            }
        };

        let stdin = prev_read.unwrap_or(STDIN_FILENO);
        let stdout = next_pipe.map(|(_, write)| write).unwrap_or(STDOUT_FILENO);
        let close_in_child = next_pipe.map(|(read, _)| read);

        let pid = match fork_stage(ctx, shell, &mut command, pgid, stdin, stdout, close_in_child) {
            Ok(pid) => pid,
            Err(err) => {
                // Earlier stages keep running disconnected; closing our pipe
                // ends at least lets them observe end-of-input.
                abandon_launch(prev_read.take(), next_pipe);
                return Err(err);
            }
        };

        // Redundant with the child's own setpgid: whichever side runs first
        // establishes membership before anyone signals or waits on the group.
        match setpgid(pid, pgid.unwrap_or(pid)) {
            Ok(_) | Err(Errno::EACCES) => {} // EACCES: the child already exec'd
            Err(err) => warn!("failed setpgid for {}: {}", pid, err),
        }

        if pgid.is_none() {
            pgid = Some(pid);
            shell.jobs.register_group(pid, display);
            if background {
                let job_id = shell.jobs.add(pid, display.to_string(), JobState::Running);
                println!("[{job_id}] {pid}");
            }
        }

        if let Some(fd) = prev_read.take() {
            close(fd).context("failed close")?;
        }
        if let Some((read, write)) = next_pipe {
            close(write).context("failed close")?;
            prev_read = Some(read);
        }
        // `command` drops here, closing the interpreter's copies of any
        // redirection handles that were duplicated into the child.
    }

    pgid.context("pipeline launched without a process group")
}

fn abandon_launch(prev_read: Option<RawFd>, next_pipe: Option<(RawFd, RawFd)>) {
    if let Some(fd) = prev_read {
        close(fd).ok();
    }
    if let Some((read, write)) = next_pipe {
        close(read).ok();
        close(write).ok();
    }
}

/// Blocks on the whole group until it exits or any member stops. A stopped
/// pipeline becomes a tracked job; its still-running members are left to the
/// reaper.
fn wait_foreground(shell: &mut Shell, ctx: &Context, pgid: Pid, display: &str) -> Result<()> {
    let _guard = ForegroundGuard::new(ctx, pgid)?;
    loop {
        match wait::wait_group(pgid) {
            Some((_, ProcessState::Stopped(_))) => {
                let job_id = shell
                    .jobs
                    .add(pgid, display.to_string(), JobState::Stopped);
                println!("[{job_id}] STOPPED {display}");
                break;
            }
            Some(_) => continue,
            None => {
                // every member of the group has been reaped
                shell.jobs.forget_group(pgid);
                break;
            }
        }
    }
    Ok(())
}

/// Fast path: the builtin runs in-process, with any parse-time redirections
/// mapped onto the context's descriptors.
fn run_builtin_inline(
    shell: &mut Shell,
    ctx: &mut Context,
    builtin: Builtin,
    mut command: Command,
) -> Result<()> {
    let stdin_file = command.stdin_redirect.take();
    let stdout_file = command.stdout_redirect.take();
    if let Some(ref file) = stdin_file {
        ctx.infile = file.as_raw_fd();
    }
    if let Some(ref file) = stdout_file {
        ctx.outfile = file.as_raw_fd();
    }

    let status = builtin.run(ctx, command.argv, shell);
    debug!("builtin {} exited {:?}", builtin.name(), status);
    ctx.reset();
    Ok(())
}
