use crossbeam::channel::{unbounded, Receiver, Sender, TryRecvError};
use log::trace;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::wire::{decode, encode};
use super::{Job, Rank, SolverError};

/// Rank-addressed, fire-and-forget messaging between the workers of a cluster.
///
/// Messages between one pair of ranks arrive in the order they were sent. Nothing is
/// promised across different pairs.
pub trait Transport<S> {
    fn rank(&self) -> Rank;
    fn ranks(&self) -> usize;
    fn send(&self, to: Rank, job: &Job<S>) -> Result<(), SolverError>;

    /// Takes one arrived message if there is one. Never blocks.
    fn try_receive(&self) -> Result<Option<Job<S>>, SolverError>;
}

/// In-process transport. Every rank owns an inbox and a sender into every inbox, its own
/// included; frames go through the wire codec exactly as they would between processes.
pub struct ChannelTransport {
    rank: Rank,
    peers: Vec<Sender<Vec<u8>>>,
    inbox: Receiver<Vec<u8>>,
}

/// Builds the fully connected set of transports for `ranks` workers, indexed by rank.
pub fn channel_mesh(ranks: usize) -> Vec<ChannelTransport> {
    let (senders, receivers): (Vec<_>, Vec<_>) = (0..ranks).map(|_| unbounded()).unzip();

    receivers
        .into_iter()
        .enumerate()
        .map(|(rank, inbox)| ChannelTransport {
            rank,
            peers: senders.clone(),
            inbox,
        })
        .collect()
}

impl<S> Transport<S> for ChannelTransport
where
    S: Serialize + DeserializeOwned,
{
    fn rank(&self) -> Rank {
        self.rank
    }

    fn ranks(&self) -> usize {
        self.peers.len()
    }

    fn send(&self, to: Rank, job: &Job<S>) -> Result<(), SolverError> {
        let peer = self.peers.get(to).ok_or_else(|| {
            SolverError::transport(
                self.rank,
                format!("rank {} is outside a cluster of {}", to, self.peers.len()),
            )
        })?;

        let frame = encode(job, self.rank)?;
        trace!("Rank {} -> {}: {} bytes", self.rank, to, frame.len());

        peer.send(frame).map_err(|_| {
            SolverError::transport(self.rank, format!("rank {} is no longer receiving", to))
        })
    }

    fn try_receive(&self) -> Result<Option<Job<S>>, SolverError> {
        match self.inbox.try_recv() {
            Ok(frame) => decode(&frame, self.rank).map(Some),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => {
                Err(SolverError::transport(self.rank, "inbox is disconnected"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::JobId;
    use subtraction::GameState;

    fn lookup(pile: u32, counter: u64) -> Job<GameState> {
        Job::Lookup {
            position: GameState::new(pile),
            origin: 0,
            job_id: JobId { rank: 0, counter },
        }
    }

    #[test]
    fn test_mesh_assigns_ranks() {
        let mesh = channel_mesh(3);

        let ranks = mesh
            .iter()
            .map(|t| Transport::<GameState>::rank(t))
            .collect::<Vec<_>>();

        assert_eq!(ranks, vec![0, 1, 2]);
        assert!(mesh.iter().all(|t| Transport::<GameState>::ranks(t) == 3));
    }

    #[test]
    fn test_empty_inbox_is_none() {
        let mesh = channel_mesh(2);

        assert_eq!(Transport::<GameState>::try_receive(&mesh[1]).unwrap(), None);
    }

    #[test]
    fn test_pairwise_fifo() {
        let mesh = channel_mesh(2);

        for counter in 0..3 {
            mesh[0].send(1, &lookup(counter as u32, counter)).unwrap();
        }

        let received = std::iter::from_fn(|| mesh[1].try_receive().unwrap())
            .collect::<Vec<Job<GameState>>>();

        assert_eq!(received, vec![lookup(0, 0), lookup(1, 1), lookup(2, 2)]);
    }

    #[test]
    fn test_send_to_self() {
        let mesh = channel_mesh(1);

        mesh[0].send(0, &lookup(4, 0)).unwrap();

        assert_eq!(mesh[0].try_receive().unwrap(), Some(lookup(4, 0)));
    }

    #[test]
    fn test_send_out_of_range_is_transport_error() {
        let mesh = channel_mesh(2);

        assert!(matches!(
            mesh[0].send(5, &lookup(1, 0)),
            Err(SolverError::Transport { rank: 0, .. })
        ));
    }

    #[test]
    fn test_send_to_dropped_rank_is_transport_error() {
        let mut mesh = channel_mesh(2);
        mesh.pop();

        assert!(matches!(
            mesh[0].send(1, &lookup(1, 0)),
            Err(SolverError::Transport { .. })
        ));
    }
}
