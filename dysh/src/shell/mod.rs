pub mod job;

use crate::parser;
use crate::process::signal;
use crate::process::JobTable;
use anyhow::Result;
use dysh_builtin::ShellProxy;
use dysh_types::Context;
use libc::{c_int, STDIN_FILENO};
use nix::unistd::{getpgrp, getpid, Pid};
use tracing::{debug, warn};

pub const SHELL_TERMINAL: c_int = STDIN_FILENO;

/// Session state for one interpreter process, passed explicitly to whatever
/// needs it. The only ambient state is the SIGCHLD flag the handler sets.
#[derive(Debug)]
pub struct Shell {
    pub pid: Pid,
    pub pgid: Pid,
    pub(crate) jobs: JobTable,
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}

impl Shell {
    pub fn new() -> Self {
        Shell {
            pid: getpid(),
            pgid: getpgrp(),
            jobs: JobTable::new(),
        }
    }

    /// The interpreter ignores the terminal-generated job-control signals
    /// (they belong to foreground jobs) and records SIGCHLD arrivals for the
    /// reaper. Children restore the defaults before exec.
    pub fn set_signals(&mut self) {
        signal::ignore_job_control_signals();
        if let Err(e) = signal::install_sigchld_handler() {
            warn!("failed to install SIGCHLD handler: {}", e);
        }
        debug!("signal handlers installed");
    }

    /// Parses and runs one input line.
    pub fn eval_line(&mut self, ctx: &mut Context, input: &str) -> Result<()> {
        let pipeline = parser::parse_line(input);
        if pipeline.is_empty() {
            return Ok(());
        }
        debug!("eval {:?}", pipeline.display);
        crate::process::execute_pipeline(self, ctx, pipeline)
    }

    /// Runs the reaper if a child-status-change notification arrived since
    /// the last check.
    pub fn poll_jobs(&mut self) {
        if signal::take_sigchld() {
            self.reconcile_jobs();
        }
    }

    /// Reconciles the job table with reality; see [`job::reconcile_jobs`].
    pub fn reconcile_jobs(&mut self) {
        job::reconcile_jobs(self);
    }
}

impl ShellProxy for Shell {
    fn dispatch(&mut self, ctx: &Context, cmd: &str, argv: Vec<String>) -> Result<()> {
        match cmd {
            "jobs" => job::list_jobs(self, ctx),
            "fg" => job::continue_job(self, ctx, argv, true),
            "bg" => job::continue_job(self, ctx, argv, false),
            _ => {
                warn!("unknown dispatch: {}", cmd);
                Ok(())
            }
        }
    }
}
