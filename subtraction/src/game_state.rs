use std::fmt::{self, Display, Formatter};

use common::{mix64, TranspositionHash};
use serde::{Deserialize, Serialize};

/// A single pile of counters.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameState {
    pub pile: u32,
}

impl GameState {
    pub fn new(pile: u32) -> Self {
        Self { pile }
    }

    pub fn take(&self, count: u32) -> Self {
        assert!(count <= self.pile, "Cannot take {} from a pile of {}", count, self.pile);

        Self {
            pile: self.pile - count,
        }
    }
}

impl TranspositionHash for GameState {
    fn transposition_hash(&self) -> u64 {
        mix64(self.pile as u64)
    }
}

impl Display for GameState {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "pile({})", self.pile)
    }
}
