pub mod config;
pub mod env;
pub mod fs;
pub mod transposition_hash;

pub use config::*;
pub use env::*;
pub use fs::*;
pub use transposition_hash::*;
