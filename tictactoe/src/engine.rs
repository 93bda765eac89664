use engine::{GameEngine, Outcome};

use super::{Action, GameState};

#[derive(Default)]
pub struct Engine {}

impl Engine {
    pub fn new() -> Self {
        Self {}
    }
}

impl GameEngine for Engine {
    type Action = Action;
    type State = GameState;

    fn initial_state(&self) -> Self::State {
        GameState::initial()
    }

    fn take_action(&self, game_state: &Self::State, action: &Self::Action) -> Self::State {
        match action {
            Action::Place(cell) => game_state.place(*cell),
        }
    }

    fn valid_actions(&self, game_state: &Self::State) -> Vec<Self::Action> {
        let empty_cells = game_state.empty_cells();

        (0..9u8)
            .filter(|cell| empty_cells & (1 << cell) != 0)
            .map(Action::Place)
            .collect()
    }

    fn terminal_state(&self, game_state: &Self::State) -> Option<Outcome> {
        if game_state.previous_mover_won() {
            Some(Outcome::Loss)
        } else if game_state.is_full() {
            Some(Outcome::Tie)
        } else {
            None
        }
    }
}
