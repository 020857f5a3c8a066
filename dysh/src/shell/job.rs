use crate::process::foreground::ForegroundGuard;
use crate::process::signal::send_cont;
use crate::process::state::{JobState, ProcessState};
use crate::process::wait;
use crate::shell::Shell;
use anyhow::Result;
use dysh_types::Context;
use tracing::debug;

/// The reaper: drains every outstanding status change non-blocking and folds
/// it into the job table.
///
/// Transitions are keyed on the group leader (pid == pgid); a non-leader
/// stage exiting first must not remove the job, so its events fall through
/// the pgid lookups below. A group can stop before the launch path finished
/// recording it — in that case the entry is created here, from the launch
/// registry.
pub fn reconcile_jobs(shell: &mut Shell) {
    while let Some((pid, state)) = wait::wait_any() {
        match state {
            ProcessState::Completed(status) => {
                if let Some(job) = shell.jobs.remove(pid) {
                    debug!("job [{}] {:?} done status:{}", job.job_id, job.cmd, status);
                }
                shell.jobs.forget_group(pid);
            }
            ProcessState::Stopped(_) => {
                if !shell.jobs.set_state(pid, JobState::Stopped) {
                    if let Some(cmd) = shell.jobs.launched_cmd(pid).map(str::to_string) {
                        shell.jobs.add(pid, cmd, JobState::Stopped);
                    }
                }
            }
            ProcessState::Continued(_) => {
                shell.jobs.set_state(pid, JobState::Running);
            }
        }
    }
}

/// `jobs`: one line per tracked job, in table order.
pub fn list_jobs(shell: &Shell, ctx: &Context) -> Result<()> {
    for job in shell.jobs.iter() {
        ctx.write_stdout(&format!("[{}] {} {}", job.job_id, job.state, job.cmd))?;
    }
    Ok(())
}

/// `fg` / `bg`: resume a stopped job, with or without the terminal.
///
/// Unknown ids and a missing argument are user errors: a message on the
/// error stream, no state change.
pub fn continue_job(
    shell: &mut Shell,
    ctx: &Context,
    argv: Vec<String>,
    foreground: bool,
) -> Result<()> {
    let name = if foreground { "fg" } else { "bg" };
    let Some(job_id) = argv.get(1).and_then(|arg| arg.parse::<usize>().ok()) else {
        ctx.write_stderr(&format!("Usage: {name} <jobid>"))?;
        return Ok(());
    };
    let Some(job) = shell.jobs.find_by_id(job_id) else {
        ctx.write_stderr(&format!("Job {job_id} not found"))?;
        return Ok(());
    };
    let pgid = job.pgid;
    let cmd = job.cmd.clone();

    if foreground {
        debug!("fg job [{}] pgid:{}", job_id, pgid);
        let _guard = ForegroundGuard::new(ctx, pgid)?;
        send_cont(pgid)?;
        shell.jobs.set_state(pgid, JobState::Running);
        loop {
            match wait::wait_group(pgid) {
                Some((_, ProcessState::Stopped(_))) => {
                    shell.jobs.set_state(pgid, JobState::Stopped);
                    break;
                }
                Some(_) => continue,
                None => {
                    shell.jobs.remove(pgid);
                    shell.jobs.forget_group(pgid);
                    break;
                }
            }
        }
    } else {
        debug!("bg job [{}] pgid:{}", job_id, pgid);
        send_cont(pgid)?;
        shell.jobs.set_state(pgid, JobState::Running);
        ctx.write_stdout(&format!("[{job_id}] {cmd} &"))?;
    }
    Ok(())
}
