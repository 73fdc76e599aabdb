//! **replan-core** — geometry primitives shared by the *replan* crates.
//!
//! [`Point`] is the node identity used by grid graphs: two points are the same
//! node exactly when their coordinates match. Nothing else (walkability, cost)
//! is stored in it, so copies held by a planner can never disagree with the
//! live graph.

pub mod geom;

pub use geom::{Point, Range, RangeIter};
