use engine::{GameEngine, Outcome};

/// Stateless view of a game's positions as the solver sees them.
pub struct GameStateAdapter<'a, E> {
    engine: &'a E,
}

impl<'a, E> GameStateAdapter<'a, E>
where
    E: GameEngine,
{
    pub fn new(engine: &'a E) -> Self {
        Self { engine }
    }

    pub fn terminal_value(&self, position: &E::State) -> Option<Outcome> {
        self.engine.terminal_state(position)
    }

    /// Children of `position`, one per legal action. Calling it again yields the same sequence.
    pub fn expand<'b>(&'b self, position: &'b E::State) -> impl Iterator<Item = E::State> + 'b {
        let engine: &'b E = self.engine;

        engine
            .valid_actions(position)
            .into_iter()
            .map(move |action| engine.take_action(position, &action))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use subtraction::{Engine, GameState};

    #[test]
    fn test_expand_applies_every_action() {
        let engine = Engine::with_pile(5);
        let adapter = GameStateAdapter::new(&engine);
        let position = GameState::new(5);

        let children = adapter.expand(&position).collect::<Vec<_>>();

        assert_eq!(children, vec![GameState::new(4), GameState::new(3)]);
    }

    #[test]
    fn test_expand_is_restartable() {
        let engine = Engine::with_pile(5);
        let adapter = GameStateAdapter::new(&engine);
        let position = GameState::new(2);

        let first = adapter.expand(&position).collect::<Vec<_>>();
        let second = adapter.expand(&position).collect::<Vec<_>>();

        assert_eq!(first, second);
    }

    #[test]
    fn test_terminal_value_delegates() {
        let engine = Engine::with_pile(5);
        let adapter = GameStateAdapter::new(&engine);

        assert_eq!(adapter.terminal_value(&GameState::new(0)), Some(Outcome::Loss));
        assert_eq!(adapter.terminal_value(&GameState::new(5)), None);
    }
}
