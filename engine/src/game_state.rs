use std::fmt::Debug;
use std::hash::Hash;

use common::TranspositionHash;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A position. Must be serializable so it can be shipped to the rank that owns it.
pub trait GameState:
    Hash + Eq + Clone + Debug + Serialize + DeserializeOwned + TranspositionHash + Send
{
}

impl<T> GameState for T where
    T: Hash + Eq + Clone + Debug + Serialize + DeserializeOwned + TranspositionHash + Send
{
}
