use super::state::ProcessState;
use nix::sys::wait::{waitpid, WaitPidFlag, WaitStatus};
use nix::unistd::Pid;
use tracing::{debug, error};

/// Blocking wait for the next status change in one process group. Returns
/// None once the group has no more waitable members.
pub fn wait_group(pgid: Pid) -> Option<(Pid, ProcessState)> {
    let target = Pid::from_raw(-pgid.as_raw());
    decode(waitpid(target, Some(WaitPidFlag::WUNTRACED)))
}

/// Non-blocking sweep over all outstanding descendants; one call per
/// observed status change. Used by the reaper.
pub fn wait_any() -> Option<(Pid, ProcessState)> {
    let options = WaitPidFlag::WNOHANG | WaitPidFlag::WUNTRACED | WaitPidFlag::WCONTINUED;
    decode(waitpid(None, Some(options)))
}

fn decode(result: nix::Result<WaitStatus>) -> Option<(Pid, ProcessState)> {
    let res = match result {
        Ok(WaitStatus::Exited(pid, status)) => (pid, ProcessState::Completed(status as u8)),
        Ok(WaitStatus::Signaled(pid, _signal, _)) => (pid, ProcessState::Completed(1)),
        Ok(WaitStatus::Stopped(pid, _signal)) => (pid, ProcessState::Stopped(pid)),
        Ok(WaitStatus::Continued(pid)) => (pid, ProcessState::Continued(pid)),
        Err(nix::errno::Errno::ECHILD) | Ok(WaitStatus::StillAlive) => {
            return None;
        }
        status => {
            error!("unexpected waitpid event: {:?}", status);
            return None;
        }
    };
    debug!("waitpid pid:{} state:{}", res.0, res.1);
    Some(res)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nix::sys::signal::Signal;

    #[test]
    fn decode_maps_exit_statuses() {
        let pid = Pid::from_raw(42);
        assert_eq!(
            decode(Ok(WaitStatus::Exited(pid, 0))),
            Some((pid, ProcessState::Completed(0)))
        );
        assert_eq!(
            decode(Ok(WaitStatus::Exited(pid, 3))),
            Some((pid, ProcessState::Completed(3)))
        );
        assert_eq!(
            decode(Ok(WaitStatus::Signaled(pid, Signal::SIGKILL, false))),
            Some((pid, ProcessState::Completed(1)))
        );
    }

    #[test]
    fn decode_maps_stop_and_continue() {
        let pid = Pid::from_raw(42);
        assert_eq!(
            decode(Ok(WaitStatus::Stopped(pid, Signal::SIGTSTP))),
            Some((pid, ProcessState::Stopped(pid)))
        );
        assert_eq!(
            decode(Ok(WaitStatus::Continued(pid))),
            Some((pid, ProcessState::Continued(pid)))
        );
    }

    #[test]
    fn decode_ends_on_no_more_children() {
        assert_eq!(decode(Err(nix::errno::Errno::ECHILD)), None);
        assert_eq!(decode(Ok(WaitStatus::StillAlive)), None);
    }

    #[test]
    fn wait_any_without_children_is_none() {
        // The test harness has no unwaited children of its own.
        assert_eq!(wait_any(), None);
    }
}
