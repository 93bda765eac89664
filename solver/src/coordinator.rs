use super::{Job, JobId, Rank, Resolution, SolverError};

/// Rank 0's extra duties: issue the root query, catch its answer and decide when the
/// cluster is done.
#[derive(Debug)]
pub struct Coordinator<S> {
    rank: Rank,
    root: S,
    request: Option<JobId>,
    resolution: Option<Resolution>,
    finish_broadcast: bool,
}

impl<S: Clone> Coordinator<S> {
    pub fn new(rank: Rank, root: S) -> Self {
        Self {
            rank,
            root,
            request: None,
            resolution: None,
            finish_broadcast: false,
        }
    }

    pub fn root(&self) -> &S {
        &self.root
    }

    /// The lookup that starts the run. Its answer comes back to the coordinating rank under
    /// `job_id`.
    pub fn seed(&mut self, job_id: JobId) -> Job<S> {
        self.request = Some(job_id);

        Job::Lookup {
            position: self.root.clone(),
            origin: self.rank,
            job_id,
        }
    }

    pub fn is_root_request(&self, job_id: JobId) -> bool {
        self.request == Some(job_id)
    }

    pub fn record(&mut self, resolution: Resolution) -> Result<(), SolverError> {
        if let Some(existing) = self.resolution {
            return Err(SolverError::protocol(
                self.rank,
                format!("root resolved twice ({} then {})", existing, resolution),
            ));
        }

        self.resolution = Some(resolution);

        Ok(())
    }

    pub fn resolution(&self) -> Option<Resolution> {
        self.resolution
    }

    /// True exactly once: the first time it is asked after the root resolved.
    pub fn take_finish(&mut self) -> bool {
        if self.resolution.is_some() && !self.finish_broadcast {
            self.finish_broadcast = true;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::Outcome;

    const ROOT_JOB: JobId = JobId { rank: 0, counter: 0 };

    #[test]
    fn test_seed_targets_root() {
        let mut coordinator = Coordinator::new(0, 9u32);

        let job = coordinator.seed(ROOT_JOB);

        assert_eq!(
            job,
            Job::Lookup {
                position: 9,
                origin: 0,
                job_id: ROOT_JOB
            }
        );
        assert!(coordinator.is_root_request(ROOT_JOB));
        assert!(!coordinator.is_root_request(JobId { rank: 0, counter: 1 }));
    }

    #[test]
    fn test_finish_only_after_resolution_and_only_once() {
        let mut coordinator = Coordinator::new(0, 9u32);
        coordinator.seed(ROOT_JOB);

        assert!(!coordinator.take_finish());

        coordinator.record(Resolution::primitive(Outcome::Loss)).unwrap();

        assert!(coordinator.take_finish());
        assert!(!coordinator.take_finish());
    }

    #[test]
    fn test_record_twice_is_protocol_error() {
        let mut coordinator = Coordinator::new(0, 9u32);
        coordinator.record(Resolution::primitive(Outcome::Win)).unwrap();

        assert!(matches!(
            coordinator.record(Resolution::primitive(Outcome::Win)),
            Err(SolverError::Protocol { rank: 0, .. })
        ));
        assert_eq!(
            coordinator.resolution(),
            Some(Resolution::primitive(Outcome::Win))
        );
    }
}
