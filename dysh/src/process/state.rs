use nix::unistd::Pid;

/// One waitpid observation of a child.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ProcessState {
    Completed(u8),
    Stopped(Pid),
    Continued(Pid),
}

impl std::fmt::Display for ProcessState {
    fn fmt(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ProcessState::Completed(_) => formatter.write_str("completed"),
            ProcessState::Stopped(_) => formatter.write_str("stopped"),
            ProcessState::Continued(_) => formatter.write_str("continued"),
        }
    }
}

/// Run state of a tracked job, as shown by `jobs`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum JobState {
    Running,
    Stopped,
    Done,
}

impl std::fmt::Display for JobState {
    fn fmt(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            JobState::Running => formatter.write_str("RUNNING"),
            JobState::Stopped => formatter.write_str("STOPPED"),
            JobState::Done => formatter.write_str("DONE"),
        }
    }
}
