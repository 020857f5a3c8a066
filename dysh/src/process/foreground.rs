use crate::shell::SHELL_TERMINAL;
use anyhow::{Context as _, Result};
use dysh_types::Context;
use nix::unistd::{tcsetpgrp, Pid};
use tracing::{debug, warn};

/// Hands the controlling terminal to a job's process group for the duration
/// of a blocking wait.
///
/// Restoration runs in Drop so the interpreter gets its terminal back on
/// every exit path, including an interrupted wait; a terminal left assigned
/// to a dead group would hang the next prompt read.
pub struct ForegroundGuard {
    shell_pgid: Pid,
    interactive: bool,
}

impl ForegroundGuard {
    pub fn new(ctx: &Context, pgid: Pid) -> Result<Self> {
        if ctx.interactive {
            tcsetpgrp(SHELL_TERMINAL, pgid).context("failed tcsetpgrp")?;
            debug!("terminal handed to pgid {}", pgid);
        }
        Ok(ForegroundGuard {
            shell_pgid: ctx.shell_pgid,
            interactive: ctx.interactive,
        })
    }
}

impl Drop for ForegroundGuard {
    fn drop(&mut self) {
        if self.interactive {
            if let Err(err) = tcsetpgrp(SHELL_TERMINAL, self.shell_pgid) {
                warn!("failed to restore terminal to pgid {}: {}", self.shell_pgid, err);
            } else {
                debug!("terminal restored to pgid {}", self.shell_pgid);
            }
        }
    }
}
