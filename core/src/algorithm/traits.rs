//! Core algorithm trait definitions for the max-flow engine
//!
//! This module establishes the identifier newtypes, the error taxonomy and
//! the algorithm seam shared by the graph store, the solver and the
//! command-line front end.
//!
//! # Key Design Principles
//! - Node and edge identifiers are 32-bit to keep the adjacency index compact
//! - Construction and validation errors are fatal and surfaced to the caller
//! - Once validated, an augmentation run cannot fail

use std::fmt;
use serde::{Serialize, Deserialize};

use crate::algorithm::graph::max_flow::MaxFlowResult;
use crate::data_structures::graph::FlowGraph;
use crate::execution::history::HistoryError;

/// Node identifier ensuring type safety and preventing mixing with other numeric types
#[repr(transparent)]
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for NodeId {
    #[inline]
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Edge identifier: position of the edge in load order
#[repr(transparent)]
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct EdgeId(pub u32);

impl EdgeId {
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// Role of a terminal node supplied by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeRole {
    Source,
    Target,
}

impl fmt::Display for NodeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeRole::Source => f.write_str("source"),
            NodeRole::Target => f.write_str("target"),
        }
    }
}

/// Comprehensive error types for graph construction and flow computation
#[derive(Debug, thiserror::Error)]
pub enum AlgorithmError {
    #[error("Malformed input on line {line}: {reason} (record: {record:?})")]
    MalformedInput { line: usize, record: String, reason: String },

    #[error("Invalid {role} node {node}: graph has {node_count} nodes")]
    InvalidNode { role: NodeRole, node: NodeId, node_count: usize },

    #[error("Too many edges: {count} exceeds the 32-bit edge id space")]
    TooManyEdges { count: usize },

    #[error("Node id {id} exceeds the 32-bit node id space")]
    TooManyNodes { id: u32 },

    #[error("Invalid parameter: {name} - {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("History error: {0}")]
    History(#[from] HistoryError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Main algorithm trait for maximum flow computations
///
/// # Invariants
/// - Every edge satisfies `0 <= flow <= capacity` whenever control returns
///   to the caller
/// - The reported value equals the net flow leaving the source
pub trait FlowAlgorithm: fmt::Debug {
    /// Returns the algorithm's descriptive name
    fn name(&self) -> &'static str;

    /// Returns the algorithm's category
    fn category(&self) -> &'static str {
        "max_flow"
    }

    /// Returns the algorithm's description with complexity notes
    fn description(&self) -> String;

    /// Sets algorithm parameter with type validation
    fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), AlgorithmError>;

    /// Gets algorithm parameter value
    fn get_parameter(&self, name: &str) -> Option<String>;

    /// Runs the algorithm to completion, mutating the flows stored in `graph`
    fn max_flow(
        &mut self,
        graph: &mut FlowGraph,
        source: NodeId,
        target: NodeId,
    ) -> Result<MaxFlowResult, AlgorithmError>;
}
