use super::signal;
use crate::parser::Command;
use crate::shell::{Shell, SHELL_TERMINAL};
use anyhow::{Context as _, Result};
use dysh_types::{Context, ExitStatus};
use libc::{STDERR_FILENO, STDIN_FILENO, STDOUT_FILENO};
use nix::unistd::{close, dup2, execvp, fork, getpid, setpgid, tcsetpgrp, ForkResult, Pid};
use std::ffi::CString;
use std::os::unix::io::{IntoRawFd, RawFd};
use tracing::debug;

/// Forks one pipeline stage. `stdin`/`stdout` are the pipe endpoints (or the
/// standard streams) this stage is wired to; `close_in_child` is the read end
/// of the pipe to the next stage, which the child inherits but must not hold
/// open. Returns the child's pid to the parent; the child never returns.
pub(crate) fn fork_stage(
    ctx: &Context,
    shell: &mut Shell,
    command: &mut Command,
    pgid: Option<Pid>,
    stdin: RawFd,
    stdout: RawFd,
    close_in_child: Option<RawFd>,
) -> Result<Pid> {
    let pid = unsafe { fork().context("failed fork")? };

    match pid {
        ForkResult::Parent { child } => {
            debug!("forked stage {:?} pid:{}", command.name(), child);
            Ok(child)
        }
        ForkResult::Child => {
            let code = match launch_stage(ctx, shell, command, pgid, stdin, stdout, close_in_child)
            {
                Ok(code) => code,
                Err(err) => {
                    eprintln!("dysh: {err:#}");
                    1
                }
            };
            std::process::exit(code);
        }
    }
}

/// Child-side setup: join the pipeline's process group (the first stage
/// becomes the leader), claim the terminal for foreground jobs, restore
/// default signal dispositions, wire the standard streams, then run the
/// builtin or replace the process image.
fn launch_stage(
    ctx: &Context,
    shell: &mut Shell,
    command: &mut Command,
    pgid: Option<Pid>,
    stdin: RawFd,
    stdout: RawFd,
    close_in_child: Option<RawFd>,
) -> Result<i32> {
    let pid = getpid();
    let pgid = pgid.unwrap_or(pid);
    setpgid(pid, pgid).context("failed setpgid")?;

    if ctx.foreground && ctx.interactive {
        // SIGTTOU is still ignored here (inherited from the interpreter), so
        // this succeeds even before the group owns the terminal.
        tcsetpgrp(SHELL_TERMINAL, pgid).context("failed tcsetpgrp")?;
    }

    signal::reset_job_control_signals();

    if let Some(fd) = close_in_child {
        close(fd).context("failed close")?;
    }

    wire_stage_io(command, stdin, stdout)?;

    if let Some(builtin) = command.builtin {
        let mut ctx = ctx.clone();
        ctx.infile = STDIN_FILENO;
        ctx.outfile = STDOUT_FILENO;
        ctx.errfile = STDERR_FILENO;
        let argv = std::mem::take(&mut command.argv);
        let code = match builtin.run(&ctx, argv, shell) {
            ExitStatus::ExitedWith(code) => code,
            ExitStatus::Running(_) => 0,
        };
        return Ok(code);
    }

    let cmd = CString::new(command.argv[0].clone()).context("failed new CString")?;
    let argv: Vec<CString> = command
        .argv
        .iter()
        .map(|arg| CString::new(arg.as_str()))
        .collect::<Result<_, _>>()
        .context("failed new CString")?;

    debug!("execvp {:?} pid:{} pgid:{}", cmd, pid, pgid);
    let err = execvp(&cmd, &argv).expect_err("execvp returned on success");
    // Only reachable when the program could not be replaced.
    eprintln!("dysh: {}: {}", command.argv[0], err);
    std::process::exit(1);
}

/// Explicit redirections take precedence over pipe wiring; a pipe end
/// displaced by a redirection is closed so end-of-input can propagate.
fn wire_stage_io(command: &mut Command, stdin: RawFd, stdout: RawFd) -> Result<()> {
    match command.stdin_redirect.take() {
        Some(file) => {
            if stdin != STDIN_FILENO {
                close(stdin).context("failed close")?;
            }
            copy_fd(file.into_raw_fd(), STDIN_FILENO)?;
        }
        None => copy_fd(stdin, STDIN_FILENO)?,
    }
    match command.stdout_redirect.take() {
        Some(file) => {
            if stdout != STDOUT_FILENO {
                close(stdout).context("failed close")?;
            }
            copy_fd(file.into_raw_fd(), STDOUT_FILENO)?;
        }
        None => copy_fd(stdout, STDOUT_FILENO)?,
    }
    Ok(())
}

fn copy_fd(src: RawFd, dst: RawFd) -> Result<()> {
    if src != dst {
        dup2(src, dst).context("failed dup2")?;
        close(src).context("failed close")?;
    }
    Ok(())
}
