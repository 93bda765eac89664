use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use super::{combine, JobId, Rank, Resolution, SolverError};

/// A requester waiting on the resolution of a position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dependent {
    pub origin: Rank,
    pub job_id: JobId,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Request {
    /// The position was unseen, the caller must distribute it.
    First,
    /// The position is already being computed, the requester was queued behind it.
    Pending,
}

#[derive(Debug)]
struct Aggregation<S> {
    position: S,
    outstanding: usize,
    collected: Vec<Resolution>,
}

/// Everything a rank knows about the positions it owns and the expansions it started.
///
/// A position is `PENDING` while it has a dependent list and `RESOLVED` once it is in the
/// resolved map. Aggregation records are keyed by the job id their child lookups carry.
#[derive(Debug)]
pub struct ResolutionTable<S> {
    rank: Rank,
    resolved: HashMap<S, Resolution>,
    pending: HashMap<JobId, Aggregation<S>>,
    dependents: HashMap<S, Vec<Dependent>>,
    peak_pending: usize,
}

impl<S> ResolutionTable<S>
where
    S: Hash + Eq + Clone + Debug,
{
    /// An empty table for the positions owned by `rank`.
    pub fn new(rank: Rank) -> Self {
        Self {
            rank,
            resolved: HashMap::new(),
            pending: HashMap::new(),
            dependents: HashMap::new(),
            peak_pending: 0,
        }
    }

    pub fn resolved(&self, position: &S) -> Option<Resolution> {
        self.resolved.get(position).copied()
    }

    pub fn is_pending(&self, position: &S) -> bool {
        self.dependents.contains_key(position)
    }

    pub fn dependents_of(&self, position: &S) -> &[Dependent] {
        self.dependents
            .get(position)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Records `dependent` as waiting on an unresolved position.
    pub fn request(&mut self, position: S, dependent: Dependent) -> Request {
        let dependents = self.dependents.entry(position).or_default();
        dependents.push(dependent);

        if dependents.len() == 1 {
            Request::First
        } else {
            Request::Pending
        }
    }

    /// Starts aggregating `outstanding` child resolutions for `position` under `job_id`.
    pub fn open(&mut self, job_id: JobId, position: S, outstanding: usize) -> Result<(), SolverError> {
        if self.pending.contains_key(&job_id) {
            return Err(SolverError::protocol(
                self.rank,
                format!("job {} opened twice for {:?}", job_id, position),
            ));
        }

        self.pending.insert(
            job_id,
            Aggregation {
                position,
                outstanding,
                collected: Vec::with_capacity(outstanding),
            },
        );

        self.peak_pending = self.peak_pending.max(self.pending.len());

        Ok(())
    }

    /// Folds one child resolution into the record for `job_id`. Returns the parent and its
    /// combined resolution once the last child has reported; the record is gone by then.
    pub fn aggregate(
        &mut self,
        job_id: JobId,
        resolution: Resolution,
    ) -> Result<Option<(S, Resolution)>, SolverError> {
        let aggregation = self
            .pending
            .get_mut(&job_id)
            .ok_or(SolverError::UnknownJob(job_id))?;

        aggregation.collected.push(resolution);
        aggregation.outstanding -= 1;

        if aggregation.outstanding > 0 {
            return Ok(None);
        }

        let aggregation = self
            .pending
            .remove(&job_id)
            .ok_or(SolverError::UnknownJob(job_id))?;

        let combined = combine(&aggregation.collected);

        Ok(Some((aggregation.position, combined)))
    }

    /// Writes the final resolution of `position` and hands back everyone waiting on it.
    pub fn settle(&mut self, position: S, resolution: Resolution) -> Result<Vec<Dependent>, SolverError> {
        if let Some(existing) = self.resolved.get(&position) {
            return Err(SolverError::protocol(
                self.rank,
                format!("{:?} resolved twice ({} then {})", position, existing, resolution),
            ));
        }

        let dependents = self.dependents.remove(&position).unwrap_or_default();
        self.resolved.insert(position, resolution);

        Ok(dependents)
    }

    pub fn resolved_len(&self) -> usize {
        self.resolved.len()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn peak_pending(&self) -> usize {
        self.peak_pending
    }
}
