/// A hash of a game state that is stable across processes and runs.
///
/// `std::hash::Hash` combined with a randomly seeded hasher may differ from one rank to
/// the next, so anything that partitions states between ranks must go through this trait.
pub trait TranspositionHash {
    fn transposition_hash(&self) -> u64;
}

/// Finalizer from splitmix64. Spreads small or sequential keys across the full `u64` range.
pub fn mix64(mut x: u64) -> u64 {
    x = (x ^ (x >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94d049bb133111eb);
    x ^ (x >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mix64_is_deterministic() {
        assert_eq!(mix64(42), mix64(42));
    }

    #[test]
    fn test_mix64_separates_neighbours() {
        assert_ne!(mix64(1), mix64(2));
    }
}
