use std::fmt::Debug;
use std::hash::Hash;

use log::debug;
use rustc_hash::FxHashMap;

use crate::config::SearchConfig;
use crate::error::{QueueError, SearchError};
use crate::key::Key;
use crate::queue::IndexedQueue;
use crate::traits::Graph;

/// Where the planner stands between calls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchState<N> {
    /// No fresh search has succeeded its endpoint checks yet; replanning is
    /// refused.
    #[default]
    Uninitialized,
    /// Cost tables describe distances to `goal`. `last` is where the agent
    /// was when keys were last anchored.
    Ready { start: N, goal: N, last: N },
}

/// Incremental shortest-path planner (D* Lite).
///
/// The search runs backwards from the goal. `g` holds each node's best known
/// cost-to-goal, `rhs` the one-step lookahead derived from its neighbors'
/// `g`. Nodes where the two disagree sit in the frontier; nothing else does.
///
/// The graph is borrowed per call, so the caller may mutate it between calls
/// and then report what changed through
/// [`notify_environment_changes`](Self::notify_environment_changes).
#[derive(Clone, Debug)]
pub struct DStarLite<N> {
    pub(crate) config: SearchConfig,
    pub(crate) frontier: IndexedQueue<N>,
    pub(crate) g: FxHashMap<N, f64>,
    pub(crate) rhs: FxHashMap<N, f64>,
    pub(crate) km: f64,
    pub(crate) state: SearchState<N>,
    // scratch buffers for neighbor queries
    pub(crate) nbuf: Vec<N>,
    pub(crate) rhs_buf: Vec<N>,
}

impl<N: Copy + Eq + Hash + Debug> Default for DStarLite<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Copy + Eq + Hash + Debug> DStarLite<N> {
    /// Create a planner with the default configuration.
    pub fn new() -> Self {
        Self::with_config(SearchConfig::default())
    }

    /// Create a planner with an explicit configuration.
    pub fn with_config(config: SearchConfig) -> Self {
        Self {
            config,
            frontier: IndexedQueue::new(),
            g: FxHashMap::default(),
            rhs: FxHashMap::default(),
            km: 0.0,
            state: SearchState::Uninitialized,
            nbuf: Vec::with_capacity(8),
            rhs_buf: Vec::with_capacity(8),
        }
    }

    /// The active configuration.
    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Replace the configuration. Takes effect on the next call; cost tables
    /// are kept.
    pub fn set_config(&mut self, config: SearchConfig) {
        self.config = config;
    }

    /// Whether a goal is set, and where the agent was last reported.
    #[inline]
    pub fn state(&self) -> SearchState<N> {
        self.state
    }

    /// Accumulated heuristic correction for agent movement.
    #[inline]
    pub fn km(&self) -> f64 {
        self.km
    }

    /// Best known cost from `node` to the goal (`INFINITY` if unknown).
    #[inline]
    pub fn g_cost(&self, node: N) -> f64 {
        self.g.get(&node).copied().unwrap_or(f64::INFINITY)
    }

    /// One-step lookahead cost of `node` (`INFINITY` if unknown).
    #[inline]
    pub fn rhs_cost(&self, node: N) -> f64 {
        self.rhs.get(&node).copied().unwrap_or(f64::INFINITY)
    }

    /// Whether `g` and `rhs` of `node` agree within the configured tolerance.
    #[inline]
    pub fn is_consistent(&self, node: N) -> bool {
        self.config.approx_eq(self.g_cost(node), self.rhs_cost(node))
    }

    /// Whether `node` is waiting in the frontier.
    #[inline]
    pub fn is_queued(&self, node: N) -> bool {
        self.frontier.contains(node)
    }

    /// Number of inconsistent nodes awaiting processing.
    #[inline]
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Plan from scratch from `start` to `goal`.
    ///
    /// Returns the path including both endpoints, or an empty path when either
    /// endpoint is blocked (the planner is then left untouched) or the goal is
    /// unreachable.
    pub fn find_path<G>(&mut self, graph: &G, start: N, goal: N) -> Result<Vec<N>, SearchError>
    where
        G: Graph<Node = N>,
    {
        if !graph.is_walkable(start) || !graph.is_walkable(goal) {
            debug!("find_path {start:?} -> {goal:?}: blocked endpoint");
            return Ok(Vec::new());
        }
        debug!("find_path {start:?} -> {goal:?}");

        self.frontier.clear();
        self.g.clear();
        self.rhs.clear();
        self.km = 0.0;
        self.state = SearchState::Ready {
            start,
            goal,
            last: start,
        };

        self.g.insert(goal, f64::INFINITY);
        self.rhs.insert(goal, 0.0);
        let key = self.calculate_key(graph, start, goal);
        self.frontier.insert(goal, key)?;

        self.plan(graph, start, goal)
    }

    /// Repair the plan after the caller changed the walkability of `changed`
    /// and moved the agent to `agent`.
    ///
    /// Only the supplied nodes (and the edges touching them) are re-examined.
    /// Fails with [`SearchError::NotInitialized`] unless a fresh search has
    /// set a goal.
    pub fn notify_environment_changes<G>(
        &mut self,
        graph: &G,
        agent: N,
        changed: &[N],
    ) -> Result<Vec<N>, SearchError>
    where
        G: Graph<Node = N>,
    {
        let SearchState::Ready { goal, last, .. } = self.state else {
            return Err(SearchError::NotInitialized);
        };
        debug!(
            "replan from {agent:?} towards {goal:?}: {} changed node(s)",
            changed.len()
        );

        self.km += graph.heuristic(last, agent);
        self.state = SearchState::Ready {
            start: agent,
            goal,
            last: agent,
        };

        for &node in changed {
            self.patch_node(graph, agent, goal, node)?;
        }

        if !graph.is_walkable(agent) {
            debug!("agent at blocked node {agent:?}, no path");
            return Ok(Vec::new());
        }
        self.plan(graph, agent, goal)
    }

    fn plan<G>(&mut self, graph: &G, start: N, goal: N) -> Result<Vec<N>, SearchError>
    where
        G: Graph<Node = N>,
    {
        if !self.compute_shortest_path(graph, start, goal)? {
            return Ok(Vec::new());
        }
        let path = self.build_path(graph, start, goal);
        debug!(
            "path of {} node(s), cost {}, {} node(s) left queued",
            path.len(),
            self.g_cost(start),
            self.frontier.len()
        );
        Ok(path)
    }

    /// `(min(g, rhs) + h(start, node) + km, min(g, rhs))`.
    pub(crate) fn calculate_key<G>(&self, graph: &G, start: N, node: N) -> Key
    where
        G: Graph<Node = N>,
    {
        let m = self.g_cost(node).min(self.rhs_cost(node));
        Key::new(m + graph.heuristic(start, node) + self.km, m)
    }

    /// Bring frontier membership of `node` in line with its consistency.
    /// The only place membership changes outside of the main loop's pops.
    pub(crate) fn update_node<G>(&mut self, graph: &G, start: N, node: N) -> Result<(), QueueError>
    where
        G: Graph<Node = N>,
    {
        let queued = self.frontier.contains(node);
        if self.is_consistent(node) {
            if queued {
                self.frontier.remove(node)?;
            }
            return Ok(());
        }
        let key = self.calculate_key(graph, start, node);
        if queued {
            self.frontier.update(node, key)
        } else {
            self.frontier.insert(node, key)
        }
    }

    /// Re-derive `rhs` for a node whose walkability changed, and for each of
    /// its neighbors, since every edge touching it changed cost.
    fn patch_node<G>(&mut self, graph: &G, start: N, goal: N, node: N) -> Result<(), QueueError>
    where
        G: Graph<Node = N>,
    {
        let rhs = if graph.is_walkable(node) {
            self.compute_rhs(graph, goal, node)
        } else {
            f64::INFINITY
        };
        self.rhs.insert(node, rhs);
        self.update_node(graph, start, node)?;

        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        graph.neighbors(node, &mut nbuf);
        for &nb in nbuf.iter() {
            let rhs = self.compute_rhs(graph, goal, nb);
            self.rhs.insert(nb, rhs);
            self.update_node(graph, start, nb)?;
        }
        self.nbuf = nbuf;
        Ok(())
    }
}
