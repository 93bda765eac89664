//! JSON framing for the jobs that cross between ranks.
//!
//! Each frame is a flat record `{kind, position, origin_rank, job_id, payload}`. Only
//! `LOOKUP`, `RESOLVE` and `FINISHED` are ever transmitted; the other kinds are rank-local.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{Job, JobId, JobKind, Rank, Resolution, SolverError};

#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<S> {
    pub kind: JobKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<S>,
    pub origin_rank: Rank,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_id: Option<JobId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Resolution>,
}

/// Encodes `job` as sent by rank `sender`.
pub fn encode<S: Serialize>(job: &Job<S>, sender: Rank) -> Result<Vec<u8>, SolverError> {
    let envelope = match job {
        Job::Lookup {
            position,
            origin,
            job_id,
        } => Envelope {
            kind: JobKind::Lookup,
            position: Some(position),
            origin_rank: *origin,
            job_id: Some(*job_id),
            payload: None,
        },
        Job::Resolve {
            position,
            job_id,
            resolution,
        } => Envelope {
            kind: JobKind::Resolve,
            position: Some(position),
            origin_rank: sender,
            job_id: Some(*job_id),
            payload: Some(*resolution),
        },
        Job::Finished => Envelope {
            kind: JobKind::Finished,
            position: None,
            origin_rank: sender,
            job_id: None,
            payload: None,
        },
        other => {
            return Err(SolverError::protocol(
                sender,
                format!("{:?} jobs are never transmitted", other.kind()),
            ))
        }
    };

    Ok(serde_json::to_vec(&envelope)?)
}

/// Decodes a frame that arrived at rank `receiver`.
pub fn decode<S: DeserializeOwned>(frame: &[u8], receiver: Rank) -> Result<Job<S>, SolverError> {
    let envelope: Envelope<S> = serde_json::from_slice(frame)?;
    let kind = envelope.kind;

    let missing = |field: &str| {
        SolverError::protocol(
            receiver,
            format!(
                "{:?} message from rank {} is missing its {}",
                kind, envelope.origin_rank, field
            ),
        )
    };

    let job = match kind {
        JobKind::Lookup => Job::Lookup {
            position: envelope.position.ok_or_else(|| missing("position"))?,
            origin: envelope.origin_rank,
            job_id: envelope.job_id.ok_or_else(|| missing("job_id"))?,
        },
        JobKind::Resolve => Job::Resolve {
            position: envelope.position.ok_or_else(|| missing("position"))?,
            job_id: envelope.job_id.ok_or_else(|| missing("job_id"))?,
            resolution: envelope.payload.ok_or_else(|| missing("payload"))?,
        },
        JobKind::Finished => Job::Finished,
        other => {
            return Err(SolverError::protocol(
                receiver,
                format!(
                    "rank {} sent a {:?} job, which is rank-local",
                    envelope.origin_rank, other
                ),
            ))
        }
    };

    Ok(job)
}
