//! Single-threaded recursive solver used to check the distributed one.

use std::collections::HashMap;

use engine::GameEngine;

use super::{combine, GameStateAdapter, Resolution};

pub fn solve<E: GameEngine>(engine: &E, position: &E::State) -> Resolution {
    let adapter = GameStateAdapter::new(engine);
    let mut memo = HashMap::new();

    solve_memo(&adapter, position, &mut memo)
}

fn solve_memo<E: GameEngine>(
    adapter: &GameStateAdapter<E>,
    position: &E::State,
    memo: &mut HashMap<E::State, Resolution>,
) -> Resolution {
    if let Some(resolution) = memo.get(position) {
        return *resolution;
    }

    let resolution = match adapter.terminal_value(position) {
        Some(outcome) => Resolution::primitive(outcome),
        None => {
            let children = adapter
                .expand(position)
                .map(|child| solve_memo(adapter, &child, memo))
                .collect::<Vec<_>>();

            combine(&children)
        }
    };

    memo.insert(position.clone(), resolution);

    resolution
}
