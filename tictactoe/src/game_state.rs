use std::fmt::{self, Display, Formatter};

use common::{mix64, TranspositionHash};
use serde::{Deserialize, Serialize};

use super::{has_line, FULL_BOARD};

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub p1_turn_to_move: bool,
    pub p1_piece_board: u16,
    pub p2_piece_board: u16,
}

impl GameState {
    pub fn initial() -> Self {
        Self {
            p1_turn_to_move: true,
            p1_piece_board: 0,
            p2_piece_board: 0,
        }
    }

    pub fn player_to_move(&self) -> usize {
        if self.p1_turn_to_move {
            1
        } else {
            2
        }
    }

    pub fn place(&self, cell: u8) -> Self {
        let piece = 1u16 << cell;
        assert!(
            self.empty_cells() & piece != 0,
            "Cell {} is already occupied",
            cell
        );

        let mut p1_piece_board = self.p1_piece_board;
        let mut p2_piece_board = self.p2_piece_board;

        if self.p1_turn_to_move {
            p1_piece_board |= piece;
        } else {
            p2_piece_board |= piece;
        }

        Self {
            p1_turn_to_move: !self.p1_turn_to_move,
            p1_piece_board,
            p2_piece_board,
        }
    }

    pub fn empty_cells(&self) -> u16 {
        !(self.p1_piece_board | self.p2_piece_board) & FULL_BOARD
    }

    /// Whether the player who just moved completed a line.
    pub fn previous_mover_won(&self) -> bool {
        let previous_board = if self.p1_turn_to_move {
            self.p2_piece_board
        } else {
            self.p1_piece_board
        };

        has_line(previous_board)
    }

    pub fn is_full(&self) -> bool {
        self.empty_cells() == 0
    }
}

impl TranspositionHash for GameState {
    fn transposition_hash(&self) -> u64 {
        let packed = self.p1_piece_board as u64
            | (self.p2_piece_board as u64) << 9
            | (self.p1_turn_to_move as u64) << 18;

        mix64(packed)
    }
}

impl Display for GameState {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        for row in (0..3).rev() {
            for col in 0..3 {
                let piece = 1u16 << (row * 3 + col);
                let mark = if self.p1_piece_board & piece != 0 {
                    'X'
                } else if self.p2_piece_board & piece != 0 {
                    'O'
                } else {
                    '.'
                };
                write!(f, "{}", mark)?;
            }
            if row > 0 {
                writeln!(f)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_switches_player() {
        let state = GameState::initial().place(4);

        assert!(!state.p1_turn_to_move);
        assert_eq!(state.p1_piece_board, 1 << 4);
        assert_eq!(state.player_to_move(), 2);
    }

    #[test]
    fn test_previous_mover_won() {
        let state = GameState::initial()
            .place(0)
            .place(3)
            .place(1)
            .place(4)
            .place(2);

        assert!(state.previous_mover_won());
    }

    #[test]
    fn test_transposition_hash_depends_on_move_order_only_through_position() {
        let a = GameState::initial().place(0).place(4).place(8);
        let b = GameState::initial().place(8).place(4).place(0);

        assert_eq!(a, b);
        assert_eq!(a.transposition_hash(), b.transposition_hash());
    }

    #[test]
    fn test_display() {
        let state = GameState::initial().place(0).place(8);

        assert_eq!(state.to_string(), "..O\n...\nX..");
    }

    #[test]
    fn test_serde_round_trip_keeps_turn() {
        let state = GameState::initial().place(4);
        let json = serde_json::to_string(&state).unwrap();

        assert_eq!(serde_json::from_str::<GameState>(&json).unwrap(), state);
    }
}
