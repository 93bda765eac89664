use common::TranspositionHash;

use super::{Rank, SolverError};

/// Static assignment of positions to ranks. There is no load balancing: a position always
/// belongs to `transposition_hash % ranks`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Partition {
    ranks: usize,
}

impl Partition {
    pub fn new(ranks: usize) -> Result<Self, SolverError> {
        if ranks == 0 {
            return Err(SolverError::Config(
                "a cluster needs at least one rank".to_string(),
            ));
        }

        Ok(Self { ranks })
    }

    pub fn ranks(&self) -> usize {
        self.ranks
    }

    pub fn owner<S: TranspositionHash>(&self, position: &S) -> Rank {
        (position.transposition_hash() % self.ranks as u64) as Rank
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use subtraction::GameState;

    #[test]
    fn test_zero_ranks_is_config_error() {
        assert!(matches!(Partition::new(0), Err(SolverError::Config(_))));
    }

    #[test]
    fn test_owner_is_stable() {
        let a = Partition::new(5).unwrap();
        let b = Partition::new(5).unwrap();

        for pile in 0..100 {
            let position = GameState::new(pile);
            assert_eq!(a.owner(&position), a.owner(&position));
            assert_eq!(a.owner(&position), b.owner(&position));
        }
    }

    #[test]
    fn test_owner_is_in_range() {
        let partition = Partition::new(3).unwrap();

        assert!((0..100).all(|pile| partition.owner(&GameState::new(pile)) < 3));
    }

    #[test]
    fn test_single_rank_owns_everything() {
        let partition = Partition::new(1).unwrap();

        assert!((0..100).all(|pile| partition.owner(&GameState::new(pile)) == 0));
    }

    #[test]
    fn test_positions_spread_across_ranks() {
        let partition = Partition::new(4).unwrap();
        let mut counts = [0usize; 4];

        for pile in 0..400 {
            counts[partition.owner(&GameState::new(pile))] += 1;
        }

        assert!(counts.iter().all(|count| *count > 0));
    }
}
