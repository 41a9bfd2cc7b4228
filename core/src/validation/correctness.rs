//! Flow correctness verification
//!
//! Read-only checks over a flow stored in a [`FlowGraph`]: capacity
//! feasibility on every edge, conservation at every inner node, and
//! agreement between what the source emits and what the target absorbs.
//! The passes never mutate the graph, so they run in parallel with rayon.

use rayon::prelude::*;
use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::algorithm::traits::{EdgeId, NodeId};
use crate::data_structures::graph::{Capacity, Flow, FlowGraph, FlowValue};

/// A violated flow invariant
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum InvariantViolation {
    #[error("Edge {edge} carries flow {flow} above its capacity {capacity}")]
    CapacityExceeded { edge: EdgeId, flow: Flow, capacity: Capacity },

    #[error("Node {node} is unbalanced: inflow {inflow}, outflow {outflow}")]
    Unbalanced { node: NodeId, inflow: FlowValue, outflow: FlowValue },

    #[error("Source {source_node} emits {emitted:?} but target {target_node} absorbs {absorbed:?}")]
    TerminalMismatch {
        source_node: NodeId,
        target_node: NodeId,
        emitted: Option<FlowValue>,
        absorbed: Option<FlowValue>,
    },
}

/// Every edge satisfies `flow <= capacity`; the lower bound holds by type
pub fn check_capacity(graph: &FlowGraph) -> Result<(), InvariantViolation> {
    let violation = graph
        .edges()
        .par_iter()
        .enumerate()
        .find_first(|(_, edge)| edge.flow > edge.capacity);

    match violation {
        Some((index, edge)) => Err(InvariantViolation::CapacityExceeded {
            edge: EdgeId(index as u32),
            flow: edge.flow,
            capacity: edge.capacity,
        }),
        None => Ok(()),
    }
}

/// Every node other than `source` and `target` has equal inflow and outflow
pub fn check_conservation(graph: &FlowGraph, source: NodeId, target: NodeId) -> Result<(), InvariantViolation> {
    let violation = (0..graph.node_count() as u32)
        .into_par_iter()
        .map(NodeId)
        .filter(|&node| node != source && node != target)
        .map(|node| (node, graph.balance(node)))
        .find_first(|(_, balance)| !balance.is_balanced());

    match violation {
        Some((node, balance)) => Err(InvariantViolation::Unbalanced {
            node,
            inflow: balance.inflow,
            outflow: balance.outflow,
        }),
        None => Ok(()),
    }
}

/// Full verification of a feasible `source`-`target` flow.
///
/// Returns the flow value on success.
pub fn verify_flow(graph: &FlowGraph, source: NodeId, target: NodeId) -> Result<FlowValue, InvariantViolation> {
    check_capacity(graph)?;
    check_conservation(graph, source, target)?;

    let emitted = graph.balance(source).net_outflow();
    let absorbed = if source == target {
        emitted
    } else {
        graph.balance(target).net_inflow()
    };

    match (emitted, absorbed) {
        (Some(out), Some(into)) if out == into => Ok(out),
        _ => Err(InvariantViolation::TerminalMismatch {
            source_node: source,
            target_node: target,
            emitted,
            absorbed,
        }),
    }
}
