//! Augmenting-path maximum flow over a compact residual graph
//!
//! The crate is split into a graph store ([`data_structures`]) built once
//! from an edge list, and a flow solver ([`algorithm`]) that repeatedly
//! finds a shortest augmenting path and pushes flow along it until the
//! target is unreachable.
//!
//! ```
//! use maxflow_core::{FlowGraph, MaxFlowSolver, NodeId};
//!
//! let mut graph = FlowGraph::from_edges(vec![(0, 1, 10), (0, 2, 10), (1, 3, 1), (2, 3, 10)])?;
//! let result = MaxFlowSolver::new().solve(&mut graph, NodeId(0), NodeId(3))?;
//! assert_eq!(result.max_flow, 11);
//! # Ok::<(), maxflow_core::AlgorithmError>(())
//! ```
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod algorithm;
pub mod data_structures;
pub mod execution;
pub mod validation;

pub use algorithm::config::SolverConfig;
pub use algorithm::graph::max_flow::{Augmentation, FlowMetrics, MaxFlowResult, MaxFlowSolver, MinCut};
pub use algorithm::traits::{AlgorithmError, EdgeId, FlowAlgorithm, NodeId, NodeRole};
pub use data_structures::edge_list::{read_edge_list, write_flows, write_flows_to_path, EdgeRecord};
pub use data_structures::graph::{Capacity, Flow, FlowEdge, FlowGraph, FlowValue};
pub use execution::history::{AugmentationHistory, AugmentationRecord};
pub use validation::correctness::{verify_flow, InvariantViolation};
