use std::fmt::Debug;
use std::hash::Hash;

use log::debug;
use rustc_hash::FxHashSet;

use crate::DStarLite;
use crate::traits::Graph;

/// A candidate next step during path reconstruction.
#[derive(Clone, Copy)]
struct Step<N> {
    node: N,
    cost: f64,
    g: f64,
    queued: bool,
}

impl<N> Step<N> {
    /// Cheaper wins. Among steps within `eps` of each other, a settled node
    /// beats one still in the frontier (whose `g` is provisional), then the
    /// smaller `g` wins; remaining ties keep enumeration order.
    fn beats(&self, other: &Self, eps: f64) -> bool {
        if self.cost < other.cost - eps {
            return true;
        }
        if (self.cost - other.cost).abs() >= eps {
            return false;
        }
        match (self.queued, other.queued) {
            (false, true) => true,
            (true, false) => false,
            _ => self.g < other.g - eps,
        }
    }
}

impl<N: Copy + Eq + Hash + Debug> DStarLite<N> {
    /// Walk the cost field greedily from `start` to `goal`.
    ///
    /// Empty when `g(start)` is infinite. Stops early, returning what it has,
    /// on a dead end or when a node would be visited twice.
    pub(crate) fn build_path<G>(&mut self, graph: &G, start: N, goal: N) -> Vec<N>
    where
        G: Graph<Node = N>,
    {
        let mut path = Vec::new();
        if !self.g_cost(start).is_finite() {
            return path;
        }

        let eps = self.config.epsilon;
        let mut visited = FxHashSet::default();
        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut cur = start;

        loop {
            if !visited.insert(cur) {
                debug!("path reconstruction revisited {cur:?}, giving up");
                break;
            }
            path.push(cur);
            if cur == goal {
                break;
            }

            nbuf.clear();
            graph.neighbors(cur, &mut nbuf);
            let mut best: Option<Step<N>> = None;
            for &nb in nbuf.iter() {
                let g = self.g_cost(nb);
                if !g.is_finite() {
                    continue;
                }
                let cost = g + graph.edge_cost(cur, nb);
                if !cost.is_finite() {
                    continue;
                }
                let step = Step {
                    node: nb,
                    cost,
                    g,
                    queued: self.frontier.contains(nb),
                };
                if best.is_none_or(|b| step.beats(&b, eps)) {
                    best = Some(step);
                }
            }

            match best {
                Some(step) => cur = step.node,
                None => {
                    debug!("path reconstruction hit a dead end at {cur:?}");
                    break;
                }
            }
        }

        self.nbuf = nbuf;
        path
    }
}

/// Total edge cost along `path` (`0.0` for paths shorter than two nodes).
pub fn path_cost<G: Graph>(graph: &G, path: &[G::Node]) -> f64 {
    path.windows(2).map(|w| graph.edge_cost(w[0], w[1])).sum()
}
