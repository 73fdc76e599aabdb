//! Incremental shortest-path replanning over graphs whose traversability
//! changes between queries.
//!
//! [`DStarLite`] searches backwards from the goal and keeps its per-node cost
//! estimates between calls. When the caller reports changed nodes through
//! [`DStarLite::notify_environment_changes`], only the part of the search space
//! those changes invalidate is repaired.
//!
//! The frontier is an [`IndexedQueue`]: a binary min-heap with a node → slot
//! map, giving logarithmic arbitrary removal and key updates.
//!
//! # Trait hierarchy
//!
//! | Trait | Used by |
//! |---|---|
//! | [`Graph`] | the engine (read-only, borrowed per call) |
//! | [`DynamicGraph`] : [`Graph`] | the caller, to block/unblock nodes between calls |

mod config;
mod dstar;
mod error;
mod key;
mod path;
mod queue;
mod relax;
mod traits;

#[cfg(test)]
mod test_graph;

pub use config::{DEFAULT_EPSILON, SearchConfig};
pub use dstar::{DStarLite, SearchState};
pub use error::{QueueError, SearchError};
pub use key::Key;
pub use path::path_cost;
pub use queue::{IndexedQueue, QueueEntry};
pub use traits::{DynamicGraph, Graph};
