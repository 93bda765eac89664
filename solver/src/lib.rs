pub mod abort;
pub mod adapter;
pub mod cluster;
pub mod coordinator;
pub mod error;
pub mod job;
pub mod options;
pub mod partition;
pub mod reference;
pub mod resolution;
pub mod resolution_table;
pub mod scheduler;
pub mod transport;
pub mod wire;
pub mod worker;

pub use abort::*;
pub use adapter::*;
pub use cluster::*;
pub use coordinator::*;
pub use error::*;
pub use job::*;
pub use options::*;
pub use partition::*;
pub use resolution::*;
pub use resolution_table::*;
pub use scheduler::*;
pub use transport::*;
pub use worker::*;

/// Index of a worker in the cluster, `0..ranks`.
pub type Rank = usize;
