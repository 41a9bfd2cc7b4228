//! Augmenting-path maximum flow
//!
//! This module implements the Ford-Fulkerson method with breadth-first
//! path discovery over the implicit residual graph of a [`FlowGraph`].
//! Every edge is stored once; its forward residual `capacity - flow` and
//! its reverse residual `flow` are derived on the fly from the incidence
//! index, so no separate residual graph is materialised.
//!
//! Each call to [`MaxFlowSolver::augment`] performs one search from the
//! source, pushes the bottleneck along one shortest (hop-count) path and
//! reports the cumulative net flow leaving the source.
//! [`MaxFlowSolver::solve`] repeats this until no path remains.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::time::Instant;
use serde::{Serialize, Deserialize};

use crate::algorithm::config::SolverConfig;
use crate::algorithm::graph::search::{SearchState, SearchSummary};
use crate::algorithm::traits::{AlgorithmError, EdgeId, FlowAlgorithm, NodeId, NodeRole};
use crate::data_structures::graph::{Capacity, FlowGraph, FlowValue};
use crate::execution::history::{AugmentationHistory, AugmentationRecord};
use crate::validation::correctness::check_capacity;

/// Outcome of one successful augmentation step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Augmentation {
    /// Flow pushed along the path
    pub bottleneck: Capacity,
    /// Number of edges on the path
    pub path_length: usize,
    /// Net flow leaving the source after the update
    pub total_flow: FlowValue,
}

/// Flow algorithm performance metrics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowMetrics {
    /// Number of residual searches, including the final unsuccessful one
    pub searches: usize,
    /// Frontier rounds expanded over all searches
    pub rounds: u64,
    /// Nodes settled over all searches
    pub nodes_touched: u64,
    /// Wall-clock time of the run
    pub execution_time_ms: f64,
}

impl FlowMetrics {
    fn record(&mut self, summary: &SearchSummary) {
        self.searches += 1;
        self.rounds += summary.rounds as u64;
        self.nodes_touched += summary.touched as u64;
    }
}

/// Maximum flow result with run statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaxFlowResult {
    /// Net flow leaving the source when the run stopped
    pub max_flow: FlowValue,
    /// Number of augmenting paths applied
    pub augmentations: usize,
    /// False when the run stopped on the augmentation limit
    pub complete: bool,
    /// Per-augmentation records, when enabled
    pub history: Option<AugmentationHistory>,
    /// Algorithm performance metrics
    pub metrics: FlowMetrics,
}

/// Source side of a minimum cut and the edges crossing it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinCut {
    /// Nodes reachable from the source in the residual graph, ascending
    pub source_side: Vec<NodeId>,
    /// Edges from the source side to the rest, in load order
    pub cut_edges: Vec<EdgeId>,
    /// Total capacity of the cut edges
    pub capacity: FlowValue,
}

impl MinCut {
    pub fn contains(&self, node: NodeId) -> bool {
        self.source_side.binary_search(&node).is_ok()
    }
}

/// Breadth-first augmenting-path solver.
///
/// The search buffers are allocated on the first search and reused by
/// every later call, so one solver should be kept for the whole run.
#[derive(Debug, Clone, Default)]
pub struct MaxFlowSolver {
    /// Tunables
    config: SolverConfig,
    /// Per-node search buffers reused across augmentations
    search: SearchState,
    /// Metrics of the current run
    metrics: FlowMetrics,
}

impl MaxFlowSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SolverConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut SolverConfig {
        &mut self.config
    }

    /// Metrics accumulated since the last [`MaxFlowSolver::solve`] started
    pub fn metrics(&self) -> &FlowMetrics {
        &self.metrics
    }

    fn validate_terminals(graph: &FlowGraph, source: NodeId, target: NodeId) -> Result<(), AlgorithmError> {
        graph.validate_terminal(source, NodeRole::Source)?;
        graph.validate_terminal(target, NodeRole::Target)
    }

    /// Finds one shortest augmenting path and pushes its bottleneck.
    ///
    /// Returns `Ok(None)` when the target is unreachable in the residual
    /// graph (the flow is already maximum); flows are then left untouched.
    pub fn augment(
        &mut self,
        graph: &mut FlowGraph,
        source: NodeId,
        target: NodeId,
    ) -> Result<Option<Augmentation>, AlgorithmError> {
        Self::validate_terminals(graph, source, target)?;
        if source == target {
            return Ok(None);
        }

        let summary = self.search.search(graph, source, Some(target));
        self.metrics.record(&summary);
        if !summary.reached {
            return Ok(None);
        }

        let mut bottleneck = Capacity::MAX;
        let mut path_length = 0;
        for (from, edge) in self.search.path_back(source, target) {
            bottleneck = bottleneck.min(graph.edge(edge).residual_from(from));
            path_length += 1;
        }
        debug_assert!(bottleneck > 0, "augmenting path without residual capacity");

        for (from, id) in self.search.path_back(source, target) {
            let edge = graph.edge_mut(id);
            if edge.tail == from {
                edge.flow += bottleneck;
            } else {
                edge.flow -= bottleneck;
            }
            debug_assert!(
                edge.flow <= edge.capacity,
                "capacity invariant violated on {}: flow {} > capacity {}",
                id,
                edge.flow,
                edge.capacity
            );
        }

        if self.config.verify_each_step {
            let checked = check_capacity(graph);
            assert!(checked.is_ok(), "capacity invariant violated: {:?}", checked);
        }

        let balance = graph.balance(source);
        debug_assert!(balance.inflow <= balance.outflow, "flow enters the source");
        let total_flow = balance.outflow.saturating_sub(balance.inflow);

        log::debug!(
            "Augmented {} along {} edges in {} rounds, total flow {}",
            bottleneck,
            path_length,
            summary.rounds,
            total_flow
        );

        Ok(Some(Augmentation {
            bottleneck,
            path_length,
            total_flow,
        }))
    }

    /// Augments until no path remains and reports the maximum flow.
    ///
    /// Starts from the flows already stored in `graph`, so a finished
    /// network is reported as-is without further change.
    pub fn solve(
        &mut self,
        graph: &mut FlowGraph,
        source: NodeId,
        target: NodeId,
    ) -> Result<MaxFlowResult, AlgorithmError> {
        Self::validate_terminals(graph, source, target)?;

        log::info!(
            "Computing maximum flow between nodes s={} and t={}",
            source,
            target
        );

        let start = Instant::now();
        self.metrics = FlowMetrics::default();
        let mut history = self.config.record_history.then(AugmentationHistory::new);
        let mut max_flow = graph.balance(source).net_outflow().unwrap_or(0);
        let mut augmentations = 0;
        let mut complete = true;

        log::info!("flow = {}", max_flow);

        loop {
            if let Some(limit) = self.config.max_augmentations {
                if augmentations >= limit {
                    log::warn!("Stopping after {} augmentations; flow may not be maximum", limit);
                    complete = false;
                    break;
                }
            }

            let Some(step) = self.augment(graph, source, target)? else {
                break;
            };

            augmentations += 1;
            debug_assert!(step.total_flow >= max_flow, "cumulative flow decreased");
            max_flow = step.total_flow;

            if let Some(history) = history.as_mut() {
                history.push(AugmentationRecord {
                    step: augmentations,
                    bottleneck: step.bottleneck,
                    path_length: step.path_length,
                    total_flow: step.total_flow,
                    elapsed: start.elapsed(),
                })?;
            }

            if self.config.reports_step(augmentations) {
                log::info!("flow = {}", max_flow);
            }
        }

        self.metrics.execution_time_ms = start.elapsed().as_secs_f64() * 1000.0;
        log::info!(
            "maximum flow = {} ({} augmentations, {} searches, {:.3} ms)",
            max_flow,
            augmentations,
            self.metrics.searches,
            self.metrics.execution_time_ms
        );

        Ok(MaxFlowResult {
            max_flow,
            augmentations,
            complete,
            history,
            metrics: self.metrics.clone(),
        })
    }

    /// Minimum cut separating `source` from everything it cannot reach in
    /// the residual graph. Its capacity equals the maximum flow once
    /// [`MaxFlowSolver::solve`] has completed.
    pub fn min_cut(&mut self, graph: &FlowGraph, source: NodeId) -> Result<MinCut, AlgorithmError> {
        graph.validate_terminal(source, NodeRole::Source)?;
        self.search.search(graph, source, None);

        let mut inside = vec![false; graph.node_count()];
        let mut source_side = self.search.settled().to_vec();
        for node in &source_side {
            inside[node.as_usize()] = true;
        }
        source_side.sort_unstable();

        let mut cut_edges = Vec::new();
        let mut capacity: FlowValue = 0;
        for (index, edge) in graph.edges().iter().enumerate() {
            if inside[edge.tail.as_usize()] && !inside[edge.head.as_usize()] {
                cut_edges.push(EdgeId(index as u32));
                capacity += FlowValue::from(edge.capacity);
            }
        }

        log::debug!(
            "Minimum cut: {} source-side nodes, {} cut edges, capacity {}",
            source_side.len(),
            cut_edges.len(),
            capacity
        );

        Ok(MinCut {
            source_side,
            cut_edges,
            capacity,
        })
    }
}

impl FlowAlgorithm for MaxFlowSolver {
    fn name(&self) -> &'static str {
        "Breadth-First Augmenting Paths"
    }

    fn description(&self) -> String {
        "Ford-Fulkerson with breadth-first path discovery over an implicit residual graph; \
         one shortest augmenting path per search, O(V * E^2) augmentation bound."
            .to_string()
    }

    fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), AlgorithmError> {
        self.config.set(name, value)
    }

    fn get_parameter(&self, name: &str) -> Option<String> {
        self.config.get(name)
    }

    fn max_flow(
        &mut self,
        graph: &mut FlowGraph,
        source: NodeId,
        target: NodeId,
    ) -> Result<MaxFlowResult, AlgorithmError> {
        self.solve(graph, source, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(edges: &[(u32, u32, Capacity)]) -> FlowGraph {
        FlowGraph::from_edges(edges.iter().copied()).unwrap()
    }

    fn flows(graph: &FlowGraph) -> Vec<Capacity> {
        graph.edges().iter().map(|e| e.flow).collect()
    }

    #[test]
    fn test_max_flow_solver_creation() {
        let solver = MaxFlowSolver::new();
        assert_eq!(solver.name(), "Breadth-First Augmenting Paths");
        assert_eq!(solver.category(), "max_flow");
        assert!(solver.description().contains("breadth-first"));
    }

    #[test]
    fn test_parameter_setting() {
        let mut solver = MaxFlowSolver::new();

        assert!(solver.set_parameter("progress_interval", "50").is_ok());
        assert_eq!(solver.get_parameter("progress_interval").as_deref(), Some("50"));
        assert_eq!(solver.config().progress_interval, 50);

        assert!(solver.set_parameter("invalid_param", "value").is_err());
        assert!(solver.set_parameter("max_augmentations", "invalid").is_err());
    }

    #[test]
    fn test_single_edge() {
        let mut g = graph(&[(0, 1, 5)]);
        let result = MaxFlowSolver::new().solve(&mut g, NodeId(0), NodeId(1)).unwrap();

        assert_eq!(result.max_flow, 5);
        assert_eq!(result.augmentations, 1);
        assert!(result.complete);
        assert_eq!(flows(&g), vec![5]);
    }

    #[test]
    fn test_disconnected_target() {
        let mut g = graph(&[(0, 1, 4), (1, 0, 2), (2, 2, 9)]);
        let result = MaxFlowSolver::new().solve(&mut g, NodeId(0), NodeId(2)).unwrap();

        assert_eq!(result.max_flow, 0);
        assert_eq!(result.augmentations, 0);
        assert_eq!(flows(&g), vec![0, 0, 0]);
    }

    #[test]
    fn test_diamond_with_bottleneck() {
        let mut g = graph(&[(0, 1, 10), (0, 2, 10), (1, 3, 1), (2, 3, 10)]);
        let mut solver = MaxFlowSolver::new();
        let result = solver.solve(&mut g, NodeId(0), NodeId(3)).unwrap();

        assert_eq!(result.max_flow, 11);
        assert_eq!(flows(&g), vec![1, 10, 1, 10]);

        let history = result.history.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history.get(1).unwrap().bottleneck, 1);
        assert_eq!(history.get(2).unwrap().bottleneck, 10);
        assert!(history.is_monotonic());
        assert_eq!(result.metrics.searches, 3);
    }

    #[test]
    fn test_reverse_cancellation_path() {
        // s=0 a=1 b=2 t=3 c=4 d=5; the first shortest path s-a-b-t blocks
        // both remaining routes until a->b is cancelled
        let mut g = graph(&[
            (0, 1, 1),
            (1, 2, 1),
            (2, 3, 1),
            (0, 4, 1),
            (4, 2, 1),
            (1, 5, 1),
            (5, 3, 1),
        ]);
        let mut solver = MaxFlowSolver::new();

        let first = solver.augment(&mut g, NodeId(0), NodeId(3)).unwrap().unwrap();
        assert_eq!(first.path_length, 3);
        assert_eq!(first.total_flow, 1);
        assert_eq!(g.edges()[1].flow, 1);

        let second = solver.augment(&mut g, NodeId(0), NodeId(3)).unwrap().unwrap();
        assert_eq!(second.path_length, 5);
        assert_eq!(second.total_flow, 2);
        assert_eq!(flows(&g), vec![1, 0, 1, 1, 1, 1, 1]);

        assert_eq!(solver.augment(&mut g, NodeId(0), NodeId(3)).unwrap(), None);
    }

    #[test]
    fn test_idempotent_rerun() {
        let mut g = graph(&[(0, 1, 10), (0, 2, 10), (1, 3, 1), (2, 3, 10)]);
        let mut solver = MaxFlowSolver::new();
        solver.solve(&mut g, NodeId(0), NodeId(3)).unwrap();
        let before = flows(&g);

        assert_eq!(solver.augment(&mut g, NodeId(0), NodeId(3)).unwrap(), None);
        assert_eq!(flows(&g), before);

        let again = solver.solve(&mut g, NodeId(0), NodeId(3)).unwrap();
        assert_eq!(again.max_flow, 11);
        assert_eq!(again.augmentations, 0);
        assert_eq!(flows(&g), before);
    }

    #[test]
    fn test_invalid_terminals_are_rejected_before_search() {
        let mut g = graph(&[(0, 1, 5)]);
        let mut solver = MaxFlowSolver::new();

        let err = solver.solve(&mut g, NodeId(2), NodeId(1)).unwrap_err();
        assert!(matches!(
            err,
            AlgorithmError::InvalidNode { role: NodeRole::Source, node: NodeId(2), node_count: 2 }
        ));
        let err = solver.augment(&mut g, NodeId(0), NodeId(7)).unwrap_err();
        assert!(matches!(err, AlgorithmError::InvalidNode { role: NodeRole::Target, .. }));
        assert_eq!(solver.metrics().searches, 0);
    }

    #[test]
    fn test_source_equals_target() {
        let mut g = graph(&[(0, 1, 5), (1, 0, 5)]);
        let result = MaxFlowSolver::new().solve(&mut g, NodeId(1), NodeId(1)).unwrap();
        assert_eq!(result.max_flow, 0);
        assert_eq!(flows(&g), vec![0, 0]);
    }

    #[test]
    fn test_zero_capacity_self_loops_and_parallel_edges() {
        let mut g = graph(&[(0, 0, 7), (0, 1, 0), (0, 1, 3), (0, 1, 4), (1, 1, 2), (1, 2, 6)]);
        let result = MaxFlowSolver::new().solve(&mut g, NodeId(0), NodeId(2)).unwrap();

        assert_eq!(result.max_flow, 6);
        assert_eq!(g.edges()[0].flow, 0);
        assert_eq!(g.edges()[1].flow, 0);
        assert_eq!(g.edges()[4].flow, 0);
        assert_eq!(g.edges()[2].flow + g.edges()[3].flow, 6);
    }

    #[test]
    fn test_augmentation_limit() {
        let mut g = graph(&[(0, 1, 10), (0, 2, 10), (1, 3, 1), (2, 3, 10)]);
        let config = SolverConfig {
            max_augmentations: Some(1),
            ..SolverConfig::default()
        };
        let mut solver = MaxFlowSolver::with_config(config);
        let result = solver.solve(&mut g, NodeId(0), NodeId(3)).unwrap();

        assert!(!result.complete);
        assert_eq!(result.max_flow, 1);

        solver.config_mut().max_augmentations = None;
        let result = solver.solve(&mut g, NodeId(0), NodeId(3)).unwrap();
        assert!(result.complete);
        assert_eq!(result.max_flow, 11);
        assert_eq!(result.augmentations, 1);
    }

    #[test]
    fn test_history_can_be_disabled() {
        let mut g = graph(&[(0, 1, 5)]);
        let config = SolverConfig {
            record_history: false,
            ..SolverConfig::default()
        };
        let result = MaxFlowSolver::with_config(config).solve(&mut g, NodeId(0), NodeId(1)).unwrap();
        assert!(result.history.is_none());
        assert_eq!(result.max_flow, 5);
    }

    #[test]
    fn test_min_cut_matches_max_flow() {
        let mut g = graph(&[(0, 1, 10), (0, 2, 10), (1, 3, 1), (2, 3, 10)]);
        let mut solver = MaxFlowSolver::new();
        let result = solver.solve(&mut g, NodeId(0), NodeId(3)).unwrap();
        let cut = solver.min_cut(&g, NodeId(0)).unwrap();

        assert_eq!(cut.capacity, result.max_flow);
        assert_eq!(cut.source_side, vec![NodeId(0), NodeId(1)]);
        assert_eq!(cut.cut_edges, vec![EdgeId(1), EdgeId(2)]);
        assert!(cut.contains(NodeId(1)));
        assert!(!cut.contains(NodeId(3)));
    }

    #[test]
    fn test_solver_reuses_buffers_across_graphs() {
        let mut solver = MaxFlowSolver::new();
        let mut small = graph(&[(0, 1, 2)]);
        let mut large = graph(&[(0, 1, 2), (1, 2, 3), (2, 3, 4), (0, 3, 1)]);

        assert_eq!(solver.solve(&mut small, NodeId(0), NodeId(1)).unwrap().max_flow, 2);
        assert_eq!(solver.solve(&mut large, NodeId(0), NodeId(3)).unwrap().max_flow, 3);
    }

    #[test]
    fn test_trait_object_dispatch() {
        let mut g = graph(&[(0, 1, 3), (1, 2, 2)]);
        let mut algorithm: Box<dyn FlowAlgorithm> = Box::new(MaxFlowSolver::new());
        let result = algorithm.max_flow(&mut g, NodeId(0), NodeId(2)).unwrap();
        assert_eq!(result.max_flow, 2);
    }
}
