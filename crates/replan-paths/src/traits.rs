use std::fmt::Debug;
use std::hash::Hash;

/// Read-only graph capability consumed by the planner.
///
/// Implementations decide storage and adjacency rules; the planner only asks
/// questions through this trait and never caches walkability.
pub trait Graph {
    /// Node identity. Equality and hashing must depend on identity alone.
    type Node: Copy + Eq + Hash + Debug;

    /// Append the traversable neighbors of `node` into `buf`. The caller clears
    /// `buf` before calling. The order must be deterministic.
    fn neighbors(&self, node: Self::Node, buf: &mut Vec<Self::Node>);

    /// Cost of the directed step `from` → `to`: `0.0` when they are the same
    /// node, `f64::INFINITY` when they are not adjacent or either endpoint is
    /// not walkable.
    fn edge_cost(&self, from: Self::Node, to: Self::Node) -> f64;

    /// Lower bound on the true cost between `from` and `to`.
    /// Must be admissible and consistent.
    fn heuristic(&self, from: Self::Node, to: Self::Node) -> f64;

    /// Whether `node` can currently be entered.
    fn is_walkable(&self, node: Self::Node) -> bool;
}

/// Graph whose traversability the caller mutates between replanning calls.
pub trait DynamicGraph: Graph {
    /// Block or unblock `node`.
    fn set_walkable(&mut self, node: Self::Node, walkable: bool);
}
