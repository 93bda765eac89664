use std::fmt::{self, Display, Formatter};

use engine::Outcome;
use serde::{Deserialize, Serialize};

/// A solved value: the outcome for the player to move and the number of moves until the
/// game ends under optimal play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resolution {
    pub outcome: Outcome,
    pub remoteness: u32,
}

impl Resolution {
    pub fn new(outcome: Outcome, remoteness: u32) -> Self {
        Self {
            outcome,
            remoteness,
        }
    }

    pub fn primitive(outcome: Outcome) -> Self {
        Self::new(outcome, 0)
    }
}

impl Display for Resolution {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{} in {}", self.outcome, self.remoteness)
    }
}

/// Negamax over the children's resolutions, each seen from the opponent's side.
///
/// The mover picks the best negated outcome under `Win > Tie > Draw > Loss`. A win is taken
/// as quickly as possible, a loss is dragged out as long as possible. A position without
/// children is a loss: the player to move cannot move.
pub fn combine(children: &[Resolution]) -> Resolution {
    let best = match children.iter().map(|child| child.outcome.negate()).max() {
        Some(best) => best,
        None => return Resolution::primitive(Outcome::Loss),
    };

    let options = children
        .iter()
        .filter(|child| child.outcome.negate() == best)
        .map(|child| child.remoteness);

    let remoteness = if best == Outcome::Loss {
        options.max()
    } else {
        options.min()
    };

    let remoteness = remoteness.unwrap_or(0);

    Resolution::new(best, remoteness + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(outcome: Outcome, remoteness: u32) -> Resolution {
        Resolution::new(outcome, remoteness)
    }

    #[test]
    fn test_no_children_is_loss() {
        assert_eq!(combine(&[]), r(Outcome::Loss, 0));
    }

    #[test]
    fn test_any_losing_child_is_win() {
        let children = [r(Outcome::Win, 1), r(Outcome::Loss, 4), r(Outcome::Loss, 2)];

        assert_eq!(combine(&children), r(Outcome::Win, 3));
    }

    #[test]
    fn test_all_winning_children_is_loss() {
        let children = [r(Outcome::Win, 1), r(Outcome::Win, 5)];

        assert_eq!(combine(&children), r(Outcome::Loss, 6));
    }

    #[test]
    fn test_tie_preferred_over_draw() {
        let children = [r(Outcome::Win, 1), r(Outcome::Draw, 2), r(Outcome::Tie, 7)];

        assert_eq!(combine(&children), r(Outcome::Tie, 8));
    }

    #[test]
    fn test_draw_preferred_over_loss() {
        let children = [r(Outcome::Win, 1), r(Outcome::Draw, 3)];

        assert_eq!(combine(&children), r(Outcome::Draw, 4));
    }

    #[test]
    fn test_win_preferred_over_tie() {
        let children = [r(Outcome::Tie, 0), r(Outcome::Loss, 0)];

        assert_eq!(combine(&children), r(Outcome::Win, 1));
    }

    #[test]
    fn test_tie_takes_shortest_tie() {
        let children = [r(Outcome::Tie, 4), r(Outcome::Tie, 2)];

        assert_eq!(combine(&children), r(Outcome::Tie, 3));
    }
}
