use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use super::{Rank, Resolution};

/// Identifies an outstanding request cluster-wide. The issuing rank is part of the id so
/// counters on different ranks never collide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId {
    pub rank: Rank,
    pub counter: u64,
}

impl Display for JobId {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.rank, self.counter)
    }
}

#[derive(Debug)]
pub struct JobIdGenerator {
    rank: Rank,
    counter: u64,
}

impl JobIdGenerator {
    pub fn new(rank: Rank) -> Self {
        Self { rank, counter: 0 }
    }

    pub fn next_id(&mut self) -> JobId {
        let id = JobId {
            rank: self.rank,
            counter: self.counter,
        };

        self.counter += 1;

        id
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobKind {
    Finished,
    Lookup,
    Resolve,
    SendBack,
    Distribute,
    CheckForUpdates,
}

impl JobKind {
    /// Higher runs first. In-flight computations drain before new work fans out, which keeps
    /// the set of pending records small.
    pub fn priority(self) -> u8 {
        match self {
            JobKind::Finished => 5,
            JobKind::Lookup => 4,
            JobKind::Resolve => 3,
            JobKind::SendBack => 2,
            JobKind::Distribute => 1,
            JobKind::CheckForUpdates => 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Job<S> {
    Finished,
    Lookup {
        position: S,
        origin: Rank,
        job_id: JobId,
    },
    Resolve {
        position: S,
        job_id: JobId,
        resolution: Resolution,
    },
    SendBack {
        position: S,
        resolution: Resolution,
        origin: Rank,
        job_id: JobId,
    },
    Distribute {
        position: S,
    },
    CheckForUpdates,
}

impl<S> Job<S> {
    pub fn kind(&self) -> JobKind {
        match self {
            Job::Finished => JobKind::Finished,
            Job::Lookup { .. } => JobKind::Lookup,
            Job::Resolve { .. } => JobKind::Resolve,
            Job::SendBack { .. } => JobKind::SendBack,
            Job::Distribute { .. } => JobKind::Distribute,
            Job::CheckForUpdates => JobKind::CheckForUpdates,
        }
    }

    pub fn priority(&self) -> u8 {
        self.kind().priority()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_ids_are_unique_per_rank() {
        let mut rank_0 = JobIdGenerator::new(0);
        let mut rank_1 = JobIdGenerator::new(1);

        let a = rank_0.next_id();
        let b = rank_0.next_id();
        let c = rank_1.next_id();

        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.counter, c.counter);
    }

    #[test]
    fn test_priority_order() {
        let kinds = [
            JobKind::Finished,
            JobKind::Lookup,
            JobKind::Resolve,
            JobKind::SendBack,
            JobKind::Distribute,
            JobKind::CheckForUpdates,
        ];

        assert!(kinds
            .windows(2)
            .all(|pair| pair[0].priority() > pair[1].priority()));
    }

    #[test]
    fn test_job_id_display() {
        let id = JobId { rank: 3, counter: 17 };

        assert_eq!(id.to_string(), "3:17");
    }
}
