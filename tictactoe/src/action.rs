use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// Places the mover's mark on a cell, numbered 0-8 row-major.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum Action {
    Place(u8),
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let Action::Place(cell) = self;
        write!(f, "{}", cell)
    }
}
