use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum Action {
    Take(u32),
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let Action::Take(count) = self;
        write!(f, "-{}", count)
    }
}
