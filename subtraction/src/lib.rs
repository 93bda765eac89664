pub mod action;
pub mod engine;
pub mod game_state;
pub mod options;

pub use crate::action::*;
pub use crate::engine::*;
pub use crate::game_state::*;
pub use crate::options::*;
