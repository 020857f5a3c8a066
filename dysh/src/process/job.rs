use super::state::JobState;
use nix::unistd::Pid;
use std::collections::HashMap;
use tracing::debug;

/// The interpreter's record of one launched pipeline's process group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub pgid: Pid,
    pub job_id: usize,
    pub cmd: String,
    pub state: JobState,
}

/// Session-scoped job bookkeeping, keyed by process-group id.
///
/// `launched` tracks every pipeline group the orchestrator has started but
/// whose termination has not been observed yet. The reaper uses it to create
/// a Stopped entry for a group that stopped before the main path got around
/// to recording it as a job.
#[derive(Debug, Default)]
pub struct JobTable {
    jobs: Vec<Job>,
    next_job_id: usize,
    launched: HashMap<Pid, String>,
}

impl JobTable {
    pub fn new() -> Self {
        JobTable {
            jobs: Vec::new(),
            next_job_id: 1,
            launched: HashMap::new(),
        }
    }

    /// Records a freshly launched pipeline group for the reaper.
    pub fn register_group(&mut self, pgid: Pid, cmd: &str) {
        self.launched.insert(pgid, cmd.to_string());
    }

    /// Drops the launch record once the group leader's termination has been
    /// accounted for.
    pub fn forget_group(&mut self, pgid: Pid) {
        self.launched.remove(&pgid);
    }

    pub fn launched_cmd(&self, pgid: Pid) -> Option<&str> {
        self.launched.get(&pgid).map(String::as_str)
    }

    /// Creates a job entry and returns its id. Ids increase monotonically
    /// and are never reused while the job exists.
    pub fn add(&mut self, pgid: Pid, cmd: String, state: JobState) -> usize {
        let job_id = self.next_job_id;
        self.next_job_id += 1;
        debug!("add job [{}] pgid:{} state:{}", job_id, pgid, state);
        self.jobs.push(Job {
            pgid,
            job_id,
            cmd,
            state,
        });
        job_id
    }

    pub fn remove(&mut self, pgid: Pid) -> Option<Job> {
        let index = self.jobs.iter().position(|job| job.pgid == pgid)?;
        let job = self.jobs.remove(index);
        debug!("remove job [{}] pgid:{}", job.job_id, job.pgid);
        Some(job)
    }

    pub fn find_by_id(&self, job_id: usize) -> Option<&Job> {
        self.jobs.iter().find(|job| job.job_id == job_id)
    }

    pub fn find_by_pgid(&self, pgid: Pid) -> Option<&Job> {
        self.jobs.iter().find(|job| job.pgid == pgid)
    }

    /// Updates the state of the job owning `pgid`. Returns false when no such
    /// job is tracked.
    pub fn set_state(&mut self, pgid: Pid, state: JobState) -> bool {
        match self.jobs.iter_mut().find(|job| job.pgid == pgid) {
            Some(job) => {
                debug!("job [{}] {} -> {}", job.job_id, job.state, state);
                job.state = state;
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Job> {
        self.jobs.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_ids_increase_monotonically() {
        let mut table = JobTable::new();
        let a = table.add(Pid::from_raw(100), "sleep 5".into(), JobState::Running);
        let b = table.add(Pid::from_raw(200), "cat".into(), JobState::Running);
        assert_eq!(a, 1);
        assert_eq!(b, 2);

        // removal does not recycle ids
        table.remove(Pid::from_raw(200));
        let c = table.add(Pid::from_raw(300), "wc".into(), JobState::Running);
        assert_eq!(c, 3);
    }

    #[test]
    fn remove_is_keyed_by_group_id() {
        let mut table = JobTable::new();
        table.add(Pid::from_raw(100), "sleep 5".into(), JobState::Running);

        // a non-leader pid must not remove the entry
        assert!(table.remove(Pid::from_raw(101)).is_none());
        assert!(table.find_by_pgid(Pid::from_raw(100)).is_some());

        let removed = table.remove(Pid::from_raw(100)).unwrap();
        assert_eq!(removed.job_id, 1);
        assert!(table.is_empty());
    }

    #[test]
    fn set_state_reports_unknown_groups() {
        let mut table = JobTable::new();
        table.add(Pid::from_raw(100), "sleep 5".into(), JobState::Running);

        assert!(table.set_state(Pid::from_raw(100), JobState::Stopped));
        assert_eq!(
            table.find_by_id(1).unwrap().state,
            JobState::Stopped
        );
        assert!(!table.set_state(Pid::from_raw(999), JobState::Running));
    }

    #[test]
    fn launched_groups_are_remembered_until_forgotten() {
        let mut table = JobTable::new();
        let pgid = Pid::from_raw(100);
        table.register_group(pgid, "cat | wc");
        assert_eq!(table.launched_cmd(pgid), Some("cat | wc"));

        table.forget_group(pgid);
        assert_eq!(table.launched_cmd(pgid), None);
    }

    #[test]
    fn find_by_id_is_independent_of_order() {
        let mut table = JobTable::new();
        table.add(Pid::from_raw(100), "a".into(), JobState::Running);
        table.add(Pid::from_raw(200), "b".into(), JobState::Stopped);
        table.remove(Pid::from_raw(100));
        let job = table.find_by_id(2).unwrap();
        assert_eq!(job.cmd, "b");
        assert_eq!(job.state, JobState::Stopped);
    }
}
