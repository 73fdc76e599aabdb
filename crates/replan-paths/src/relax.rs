use std::fmt::Debug;
use std::hash::Hash;

use log::{trace, warn};

use crate::DStarLite;
use crate::error::SearchError;
use crate::traits::Graph;

impl<N: Copy + Eq + Hash + Debug> DStarLite<N> {
    /// Process inconsistent nodes until `g(start)` is settled.
    ///
    /// Stops once `start` is consistent and every queued primary key exceeds
    /// the primary key of `start` by more than the tolerance. Ties within the
    /// tolerance are expanded. Returns `false` when the configured expansion
    /// cap stopped the loop first.
    pub(crate) fn compute_shortest_path<G>(
        &mut self,
        graph: &G,
        start: N,
        goal: N,
    ) -> Result<bool, SearchError>
    where
        G: Graph<Node = N>,
    {
        let eps = self.config.epsilon;
        let mut expansions = 0usize;

        while !self.frontier.is_empty() {
            let top = self.frontier.peek()?;
            // Re-derived every pass: the key of `start` rises while an
            // increase wave runs through it.
            let start_key = self.calculate_key(graph, start, start);
            if top.key.primary > start_key.primary + eps && self.is_consistent(start) {
                break;
            }
            if let Some(limit) = self.config.max_expansions {
                if expansions >= limit {
                    warn!(
                        "search stopped after {expansions} expansions, {} node(s) pending",
                        self.frontier.len()
                    );
                    return Ok(false);
                }
            }
            expansions += 1;

            let node = top.node;
            let fresh = self.calculate_key(graph, start, node);
            let g = self.g_cost(node);
            let rhs = self.rhs_cost(node);
            trace!("expand {node:?} key={:?} g={g} rhs={rhs}", top.key);

            if top.key < fresh {
                // Stale priority: requeue and look again.
                self.frontier.update(node, fresh)?;
            } else if g > rhs {
                self.settle(graph, start, node, rhs)?;
            } else {
                self.invalidate(graph, start, goal, node, g)?;
            }
        }
        Ok(true)
    }

    /// Overconsistent `node`: fix `g = rhs` and offer it to the neighbors.
    fn settle<G>(&mut self, graph: &G, start: N, node: N, rhs: f64) -> Result<(), SearchError>
    where
        G: Graph<Node = N>,
    {
        self.g.insert(node, rhs);
        self.frontier.remove(node)?;

        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        graph.neighbors(node, &mut nbuf);
        for &nb in nbuf.iter() {
            let through = rhs + graph.edge_cost(node, nb);
            if through < self.rhs_cost(nb) {
                self.rhs.insert(nb, through);
            }
            self.update_node(graph, start, nb)?;
        }
        self.nbuf = nbuf;
        Ok(())
    }

    /// Underconsistent `node`: drop its `g` and recompute every neighbor whose
    /// `rhs` was derived through the old value.
    fn invalidate<G>(
        &mut self,
        graph: &G,
        start: N,
        goal: N,
        node: N,
        old_g: f64,
    ) -> Result<(), SearchError>
    where
        G: Graph<Node = N>,
    {
        self.g.insert(node, f64::INFINITY);
        self.frontier.remove(node)?;

        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        graph.neighbors(node, &mut nbuf);
        for &nb in nbuf.iter() {
            if self
                .config
                .approx_eq(self.rhs_cost(nb), old_g + graph.edge_cost(node, nb))
            {
                let rhs = self.compute_rhs(graph, goal, nb);
                self.rhs.insert(nb, rhs);
            }
            self.update_node(graph, start, nb)?;
        }
        self.nbuf = nbuf;

        self.update_node(graph, start, node)?;
        Ok(())
    }

    /// `min(g(s) + c(node, s))` over walkable neighbors `s` with finite `g`;
    /// zero for the goal.
    pub(crate) fn compute_rhs<G>(&mut self, graph: &G, goal: N, node: N) -> f64
    where
        G: Graph<Node = N>,
    {
        if node == goal {
            return 0.0;
        }
        let mut buf = std::mem::take(&mut self.rhs_buf);
        buf.clear();
        graph.neighbors(node, &mut buf);
        let mut best = f64::INFINITY;
        for &nb in buf.iter() {
            let g = self.g_cost(nb);
            if g.is_finite() {
                best = best.min(g + graph.edge_cost(node, nb));
            }
        }
        self.rhs_buf = buf;
        best
    }
}

#[cfg(test)]
mod tests {
    use crate::test_graph::LineGraph;
    use crate::traits::DynamicGraph;
    use crate::{DStarLite, SearchState};

    #[test]
    fn goal_rhs_is_pinned_to_zero() {
        let g = LineGraph::chain(3);
        let mut d = DStarLite::new();
        d.find_path(&g, 0, 2).unwrap();
        assert_eq!(d.compute_rhs(&g, 2, 2), 0.0);
        assert_eq!(d.compute_rhs(&g, 2, 0), 2.0);
    }

    #[test]
    fn rhs_ignores_blocked_neighbors() {
        let mut g = LineGraph::new(&[0.0, 1.0, 1.0, 2.0]);
        g.edge(0, 1, 1.0).edge(0, 2, 2.0).edge(1, 3, 1.0).edge(2, 3, 1.0);
        let mut d = DStarLite::new();
        d.find_path(&g, 0, 3).unwrap();
        assert_eq!(d.compute_rhs(&g, 3, 0), 2.0);
        g.set_walkable(1, false);
        assert_eq!(d.compute_rhs(&g, 3, 0), 3.0);
    }

    #[test]
    fn search_touches_only_what_it_needs() {
        // Goal in the middle of a long chain; start next to it. The far end of
        // the chain is never examined.
        let g = LineGraph::chain(50);
        let mut d = DStarLite::new();
        assert_eq!(d.find_path(&g, 24, 25), Ok(vec![24, 25]));
        assert!(d.g_cost(0).is_infinite());
        assert!(d.rhs_cost(0).is_infinite());
        assert!(matches!(d.state(), SearchState::Ready { goal: 25, .. }));
    }

    #[test]
    fn cost_increase_propagates() {
        // 0 - 1 - 2 - 3 with a long bypass 0 - 4 - 3.
        let mut g = LineGraph::new(&[0.0, 1.0, 2.0, 3.0, 1.5]);
        g.edge(0, 1, 1.0)
            .edge(1, 2, 1.0)
            .edge(2, 3, 1.0)
            .edge(0, 4, 3.0)
            .edge(4, 3, 3.0);
        let mut d = DStarLite::new();
        assert_eq!(d.find_path(&g, 0, 3), Ok(vec![0, 1, 2, 3]));

        g.set_walkable(2, false);
        assert_eq!(d.notify_environment_changes(&g, 1, &[2]), Ok(vec![1, 0, 4, 3]));
        assert_eq!(d.g_cost(1), 7.0);
        assert_eq!(d.g_cost(0), 6.0);
    }
}
