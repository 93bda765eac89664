use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// The game-theoretic value of a position for the player to move.
///
/// An undecided position has no `Outcome`; see `GameEngine::terminal_state`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    Win,
    Loss,
    Tie,
    Draw,
}

impl Outcome {
    /// The same result seen by the opponent.
    pub fn negate(self) -> Self {
        match self {
            Outcome::Win => Outcome::Loss,
            Outcome::Loss => Outcome::Win,
            Outcome::Tie => Outcome::Tie,
            Outcome::Draw => Outcome::Draw,
        }
    }

    fn preference(self) -> u8 {
        match self {
            Outcome::Win => 3,
            Outcome::Tie => 2,
            Outcome::Draw => 1,
            Outcome::Loss => 0,
        }
    }
}

/// Orders outcomes by how much the player to move prefers them: `Win > Tie > Draw > Loss`.
impl Ord for Outcome {
    fn cmp(&self, other: &Self) -> Ordering {
        self.preference().cmp(&other.preference())
    }
}

impl PartialOrd for Outcome {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let name = match self {
            Outcome::Win => "WIN",
            Outcome::Loss => "LOSS",
            Outcome::Tie => "TIE",
            Outcome::Draw => "DRAW",
        };

        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negate_swaps_win_and_loss() {
        assert_eq!(Outcome::Win.negate(), Outcome::Loss);
        assert_eq!(Outcome::Loss.negate(), Outcome::Win);
    }

    #[test]
    fn test_negate_keeps_tie_and_draw() {
        assert_eq!(Outcome::Tie.negate(), Outcome::Tie);
        assert_eq!(Outcome::Draw.negate(), Outcome::Draw);
    }

    #[test]
    fn test_preference_order() {
        let mut outcomes = vec![Outcome::Draw, Outcome::Win, Outcome::Loss, Outcome::Tie];
        outcomes.sort();

        assert_eq!(
            outcomes,
            vec![Outcome::Loss, Outcome::Draw, Outcome::Tie, Outcome::Win]
        );
    }

    #[test]
    fn test_serializes_as_upper_case_name() {
        assert_eq!(serde_json::to_string(&Outcome::Loss).unwrap(), "\"LOSS\"");
        assert_eq!(
            serde_json::from_str::<Outcome>("\"TIE\"").unwrap(),
            Outcome::Tie
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Outcome::Draw.to_string(), "DRAW");
    }
}
