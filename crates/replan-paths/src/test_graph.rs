//! A small undirected weighted graph for engine unit tests.
//!
//! Nodes sit on a number line; edge weights are never below the distance
//! between their endpoints, so `|x_a - x_b|` is an admissible, consistent
//! heuristic.

use rustc_hash::FxHashSet;

use crate::traits::{DynamicGraph, Graph};

#[derive(Clone, Debug, Default)]
pub(crate) struct LineGraph {
    pos: Vec<f64>,
    // Adjacency in insertion order keeps neighbor enumeration deterministic.
    adj: Vec<Vec<(u32, f64)>>,
    blocked: FxHashSet<u32>,
}

impl LineGraph {
    pub(crate) fn new(positions: &[f64]) -> Self {
        Self {
            pos: positions.to_vec(),
            adj: vec![Vec::new(); positions.len()],
            blocked: FxHashSet::default(),
        }
    }

    /// Chain 0 - 1 - ... - (n-1) with unit spacing and unit weights.
    pub(crate) fn chain(n: usize) -> Self {
        let pos: Vec<f64> = (0..n).map(|i| i as f64).collect();
        let mut g = Self::new(&pos);
        for i in 1..n as u32 {
            g.edge(i - 1, i, 1.0);
        }
        g
    }

    pub(crate) fn edge(&mut self, a: u32, b: u32, w: f64) -> &mut Self {
        self.adj[a as usize].push((b, w));
        self.adj[b as usize].push((a, w));
        self
    }

    fn weight(&self, a: u32, b: u32) -> Option<f64> {
        self.adj[a as usize]
            .iter()
            .find(|(n, _)| *n == b)
            .map(|(_, w)| *w)
    }
}

impl Graph for LineGraph {
    type Node = u32;

    fn neighbors(&self, node: u32, buf: &mut Vec<u32>) {
        buf.extend(
            self.adj[node as usize]
                .iter()
                .map(|(n, _)| *n)
                .filter(|n| self.is_walkable(*n)),
        );
    }

    fn edge_cost(&self, from: u32, to: u32) -> f64 {
        if from == to {
            return 0.0;
        }
        if !self.is_walkable(from) || !self.is_walkable(to) {
            return f64::INFINITY;
        }
        self.weight(from, to).unwrap_or(f64::INFINITY)
    }

    fn heuristic(&self, from: u32, to: u32) -> f64 {
        (self.pos[from as usize] - self.pos[to as usize]).abs()
    }

    fn is_walkable(&self, node: u32) -> bool {
        (node as usize) < self.pos.len() && !self.blocked.contains(&node)
    }
}

impl DynamicGraph for LineGraph {
    fn set_walkable(&mut self, node: u32, walkable: bool) {
        if walkable {
            self.blocked.remove(&node);
        } else {
            self.blocked.insert(node);
        }
    }
}
