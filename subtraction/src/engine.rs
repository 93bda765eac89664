use engine::{GameEngine, Outcome};

use super::{Action, GameState, SubtractionOptions};

/// Single-pile subtraction game: the mover removes between one and `max_take` counters,
/// and a player facing an empty pile has lost.
pub struct Engine {
    initial_pile: u32,
    max_take: u32,
}

impl Engine {
    pub fn new(options: &SubtractionOptions) -> Self {
        Self {
            initial_pile: options.pile,
            max_take: options.max_take,
        }
    }

    pub fn with_pile(pile: u32) -> Self {
        Self::new(&SubtractionOptions {
            pile,
            ..SubtractionOptions::default()
        })
    }
}

impl GameEngine for Engine {
    type Action = Action;
    type State = GameState;

    fn initial_state(&self) -> Self::State {
        GameState::new(self.initial_pile)
    }

    fn take_action(&self, game_state: &Self::State, action: &Self::Action) -> Self::State {
        match action {
            Action::Take(count) => game_state.take(*count),
        }
    }

    fn valid_actions(&self, game_state: &Self::State) -> Vec<Self::Action> {
        (1..=self.max_take.min(game_state.pile))
            .map(Action::Take)
            .collect()
    }

    fn terminal_state(&self, game_state: &Self::State) -> Option<Outcome> {
        if game_state.pile == 0 {
            Some(Outcome::Loss)
        } else {
            None
        }
    }
}
