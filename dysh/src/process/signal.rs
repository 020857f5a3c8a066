use anyhow::Result;
use dysh_types::DyshError;
use nix::sys::signal::{killpg, sigaction, SaFlags, SigAction, SigHandler, SigSet, Signal};
use nix::unistd::Pid;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

static SIGCHLD_PENDING: AtomicBool = AtomicBool::new(false);

extern "C" fn handle_sigchld(_: i32) {
    // Only record that something changed; the job table is reconciled
    // synchronously from the main loop.
    SIGCHLD_PENDING.store(true, Ordering::SeqCst);
}

pub(crate) fn install_sigchld_handler() -> Result<()> {
    let handler = SigHandler::Handler(handle_sigchld);
    let action = SigAction::new(handler, SaFlags::SA_RESTART, SigSet::empty());
    unsafe {
        sigaction(Signal::SIGCHLD, &action)?;
    }
    debug!("SIGCHLD handler installed");
    Ok(())
}

/// Consumes the pending child-status-change notification, if any.
pub(crate) fn take_sigchld() -> bool {
    SIGCHLD_PENDING.swap(false, Ordering::SeqCst)
}

/// The interpreter must survive the terminal-generated signals its
/// foreground jobs are supposed to receive.
pub(crate) fn ignore_job_control_signals() {
    let action = SigAction::new(SigHandler::SigIgn, SaFlags::empty(), SigSet::empty());
    unsafe {
        for signal in [
            Signal::SIGINT,
            Signal::SIGQUIT,
            Signal::SIGTSTP,
            Signal::SIGTTIN,
            Signal::SIGTTOU,
        ] {
            if let Err(e) = sigaction(signal, &action) {
                tracing::warn!("failed to ignore {:?}: {}", signal, e);
            }
        }
    }
}

/// Restore default dispositions in a forked child before it takes over the
/// terminal or execs (refer https://www.gnu.org/software/libc/manual/html_node/Launching-Jobs.html).
pub(crate) fn reset_job_control_signals() {
    let action = SigAction::new(SigHandler::SigDfl, SaFlags::empty(), SigSet::empty());
    unsafe {
        for signal in [
            Signal::SIGINT,
            Signal::SIGQUIT,
            Signal::SIGTSTP,
            Signal::SIGTTIN,
            Signal::SIGTTOU,
            Signal::SIGCHLD,
        ] {
            sigaction(signal, &action).expect("failed to sigaction");
        }
    }
}

/// Sends SIGCONT to a whole process group.
pub(crate) fn send_cont(pgid: Pid) -> Result<(), DyshError> {
    debug!("send SIGCONT to pgid {}", pgid);
    killpg(pgid, Signal::SIGCONT)
        .map_err(|err| DyshError::System(format!("failed to continue group {pgid}: {err}")))
}
