//! Error types for the frontier queue and the planner.

use thiserror::Error;

/// Contract violations reported by [`crate::IndexedQueue`].
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum QueueError {
    /// `top`, `top_key`, `peek` or `pop` on an empty queue.
    #[error("queue is empty")]
    EmptyQueue,
    /// `insert` of a node that is already queued.
    #[error("node is already queued")]
    DuplicateNode,
    /// `remove` or `update` of a node that is not queued.
    #[error("node is not queued")]
    NodeNotFound,
}

/// Error returned by [`crate::DStarLite`] entry points.
///
/// An unreachable goal or a blocked endpoint is not an error: those calls
/// return an empty path.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum SearchError {
    /// Replanning was requested before any fresh search established a goal.
    #[error("replanning requested before a fresh search set a goal")]
    NotInitialized,
    /// The frontier rejected an operation the planner believed valid.
    #[error("frontier invariant violated: {0}")]
    Frontier(#[from] QueueError),
}
