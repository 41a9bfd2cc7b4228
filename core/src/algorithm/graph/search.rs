//! Reusable breadth-first search over the implicit residual graph
//!
//! The buffers are sized to the node count once and reused by every
//! search. Only the nodes a search actually touches are reset afterwards,
//! so the reset cost is proportional to the explored region rather than to
//! the whole graph.

use crate::algorithm::traits::{EdgeId, NodeId};
use crate::data_structures::graph::FlowGraph;

/// Result of one residual search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSummary {
    /// Whether the target was discovered
    pub reached: bool,
    /// Number of frontier rounds expanded
    pub rounds: usize,
    /// Number of nodes settled, source included
    pub touched: usize,
}

/// Per-node search buffers owned by the solver
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    visited: Vec<bool>,
    predecessor: Vec<NodeId>,
    predecessor_edge: Vec<EdgeId>,
    frontier: Vec<NodeId>,
    next_frontier: Vec<NodeId>,
    touched: Vec<NodeId>,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes the buffers are currently sized for
    #[inline]
    pub fn node_capacity(&self) -> usize {
        self.visited.len()
    }

    /// Sizes the buffers for `node_count` nodes; a no-op when already sized
    pub fn prepare(&mut self, node_count: usize) {
        if self.visited.len() == node_count {
            return;
        }
        log::debug!("Allocating search buffers for {} nodes", node_count);
        self.visited = vec![false; node_count];
        self.predecessor = vec![NodeId(0); node_count];
        self.predecessor_edge = vec![EdgeId(0); node_count];
        self.frontier = Vec::new();
        self.next_frontier = Vec::new();
        self.touched = Vec::new();
    }

    /// Expands residual moves level by level from `source`.
    ///
    /// Stops as soon as `target` is discovered, or when a round adds no node.
    /// With no target the search settles everything reachable. Visited flags
    /// are cleared before returning; predecessors and the settled set stay
    /// readable until the next search.
    pub fn search(&mut self, graph: &FlowGraph, source: NodeId, target: Option<NodeId>) -> SearchSummary {
        self.prepare(graph.node_count());
        self.frontier.clear();
        self.next_frontier.clear();
        self.touched.clear();

        self.visited[source.as_usize()] = true;
        self.frontier.push(source);
        self.touched.push(source);

        let mut rounds = 0;
        let mut reached = false;

        'rounds: while !self.frontier.is_empty() {
            rounds += 1;
            for &u in &self.frontier {
                let (neighbors, edge_ids) = graph.incidence(u);
                for (&v, &e) in neighbors.iter().zip(edge_ids) {
                    if self.visited[v.as_usize()] {
                        continue;
                    }
                    if graph.edge(e).residual_from(u) == 0 {
                        continue;
                    }
                    self.visited[v.as_usize()] = true;
                    self.predecessor[v.as_usize()] = u;
                    self.predecessor_edge[v.as_usize()] = e;
                    self.touched.push(v);
                    if Some(v) == target {
                        reached = true;
                        break 'rounds;
                    }
                    self.next_frontier.push(v);
                }
            }
            std::mem::swap(&mut self.frontier, &mut self.next_frontier);
            self.next_frontier.clear();
        }

        for &node in &self.touched {
            self.visited[node.as_usize()] = false;
        }

        log::trace!(
            "Residual search: reached={} rounds={} touched={}",
            reached,
            rounds,
            self.touched.len()
        );

        SearchSummary {
            reached,
            rounds,
            touched: self.touched.len(),
        }
    }

    /// Nodes settled by the last search, in discovery order
    #[inline]
    pub fn settled(&self) -> &[NodeId] {
        &self.touched
    }

    /// Predecessor node and edge recorded for `node` by the last search
    #[inline]
    pub fn predecessor(&self, node: NodeId) -> (NodeId, EdgeId) {
        let i = node.as_usize();
        (self.predecessor[i], self.predecessor_edge[i])
    }

    /// Walks the recorded path backwards from `target` to `source`,
    /// yielding `(from, edge)` for each hop, where `from` is the node the
    /// hop leaves. Only meaningful after a search that reached `target`.
    pub fn path_back(&self, source: NodeId, target: NodeId) -> PathBack<'_> {
        PathBack {
            state: self,
            source,
            current: target,
        }
    }

    #[cfg(test)]
    fn all_unvisited(&self) -> bool {
        self.visited.iter().all(|v| !v)
    }
}

/// Iterator over the hops of the last discovered path, target first
#[derive(Debug)]
pub struct PathBack<'a> {
    state: &'a SearchState,
    source: NodeId,
    current: NodeId,
}

impl Iterator for PathBack<'_> {
    type Item = (NodeId, EdgeId);

    fn next(&mut self) -> Option<Self::Item> {
        if self.current == self.source {
            return None;
        }
        let (from, edge) = self.state.predecessor(self.current);
        self.current = from;
        Some((from, edge))
    }
}
