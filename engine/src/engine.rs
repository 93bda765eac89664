use super::{GameState, Outcome};

/// The rules of a game, as consumed by the solver.
pub trait GameEngine {
    type Action;
    type State: GameState;

    fn initial_state(&self) -> Self::State;
    fn take_action(&self, game_state: &Self::State, action: &Self::Action) -> Self::State;
    fn valid_actions(&self, game_state: &Self::State) -> Vec<Self::Action>;

    /// The outcome for the player to move if the state is primitive, `None` while undecided.
    fn terminal_state(&self, game_state: &Self::State) -> Option<Outcome>;
}
