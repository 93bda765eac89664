pub mod engine;
pub mod game_state;
pub mod outcome;

pub use crate::engine::*;
pub use crate::game_state::*;
pub use crate::outcome::*;
