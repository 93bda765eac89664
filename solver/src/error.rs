use thiserror::Error;

use super::{JobId, Rank};

#[derive(Debug, Error)]
pub enum SolverError {
    #[error("invalid configuration: {0}")]
    Config(String),

    /// `rank` is the rank that detected the violation.
    #[error("protocol error on rank {rank}: {detail}")]
    Protocol { rank: Rank, detail: String },

    #[error("resolve received for unknown job {0}")]
    UnknownJob(JobId),

    #[error("transport error on rank {rank}: {detail}")]
    Transport { rank: Rank, detail: String },

    #[error("malformed message")]
    Codec(#[from] serde_json::Error),

    #[error("rank {rank} failed")]
    Rank {
        rank: Rank,
        #[source]
        source: Box<SolverError>,
    },

    #[error("rank {rank} panicked")]
    Panicked { rank: Rank },
}

impl SolverError {
    pub fn protocol(rank: Rank, detail: impl Into<String>) -> Self {
        SolverError::Protocol {
            rank,
            detail: detail.into(),
        }
    }

    pub fn transport(rank: Rank, detail: impl Into<String>) -> Self {
        SolverError::Transport {
            rank,
            detail: detail.into(),
        }
    }
}
