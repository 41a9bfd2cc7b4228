//! Compact flow network with a CSR-style incidence index
//!
//! This module implements the graph store consumed by the augmenting-path
//! solver. Edges live in a single array in load order; every edge is
//! indexed twice, once under its tail and once under its head, so that a
//! node's forward and reverse residual moves are enumerated from one
//! contiguous slice.
//!
//! # Memory Layout
//! For `n` nodes and `m` edges the index holds `n + 1` offsets and two
//! parallel arrays of `2m` entries (neighbor id, owning edge id). Nothing is
//! allocated per node or per edge, which keeps construction linear and lets
//! the store scale to hundreds of millions of edges.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use serde::{Serialize, Deserialize};

use crate::algorithm::traits::{AlgorithmError, EdgeId, NodeId, NodeRole};

/// Per-edge capacity
pub type Capacity = u32;

/// Per-edge flow; bounded by the edge capacity
pub type Flow = u32;

/// Aggregated flow or capacity over many edges
pub type FlowValue = u64;

/// Flow edge representation with residual capacity tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowEdge {
    /// Tail vertex
    pub tail: NodeId,
    /// Head vertex
    pub head: NodeId,
    /// Original edge capacity
    pub capacity: Capacity,
    /// Current flow from tail to head
    pub flow: Flow,
}

impl FlowEdge {
    /// Create new flow edge with zero flow
    pub fn new(tail: NodeId, head: NodeId, capacity: Capacity) -> Self {
        Self {
            tail,
            head,
            capacity,
            flow: 0,
        }
    }

    /// Residual capacity in the stored direction
    #[inline]
    pub fn residual_capacity(&self) -> Capacity {
        self.capacity - self.flow
    }

    /// Residual capacity against the stored direction
    #[inline]
    pub fn reverse_residual_capacity(&self) -> Capacity {
        self.flow
    }

    /// Residual capacity available when leaving `node` through this edge.
    ///
    /// Leaving through the tail uses unused forward capacity, leaving
    /// through the head cancels existing flow.
    #[inline]
    pub fn residual_from(&self, node: NodeId) -> Capacity {
        if self.tail == node {
            self.residual_capacity()
        } else {
            self.reverse_residual_capacity()
        }
    }

    #[inline]
    pub fn is_self_loop(&self) -> bool {
        self.tail == self.head
    }
}

/// One incidence entry of the adjacency index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Adjacency {
    /// Opposite endpoint of the edge
    pub neighbor: NodeId,
    /// Edge that connects the two endpoints
    pub edge: EdgeId,
}

/// Flow entering and leaving a node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowBalance {
    pub outflow: FlowValue,
    pub inflow: FlowValue,
}

impl FlowBalance {
    #[inline]
    pub fn is_balanced(&self) -> bool {
        self.outflow == self.inflow
    }

    /// Net flow leaving the node, `None` if more flow enters than leaves
    #[inline]
    pub fn net_outflow(&self) -> Option<FlowValue> {
        self.outflow.checked_sub(self.inflow)
    }

    /// Net flow entering the node, `None` if more flow leaves than enters
    #[inline]
    pub fn net_inflow(&self) -> Option<FlowValue> {
        self.inflow.checked_sub(self.outflow)
    }
}

/// Flow network with an immutable incidence index and mutable edge flows
#[derive(Debug, Clone)]
pub struct FlowGraph {
    /// Number of vertices: one more than the largest id seen
    node_count: usize,
    /// All edges in load order
    edges: Vec<FlowEdge>,
    /// Node `i` owns index entries `offsets[i]..offsets[i + 1]`
    offsets: Vec<usize>,
    /// Opposite endpoint of each index entry
    neighbors: Vec<NodeId>,
    /// Owning edge of each index entry
    edge_ids: Vec<EdgeId>,
}

impl FlowGraph {
    /// Builds the store from `(tail, head, capacity)` triples.
    ///
    /// Node ids are densified to `[0, max_id]`. Self-loops and parallel
    /// edges are kept as independent edges.
    pub fn from_edges<I>(triples: I) -> Result<Self, AlgorithmError>
    where
        I: IntoIterator<Item = (u32, u32, Capacity)>,
    {
        let triples = triples.into_iter();
        let mut edges = Vec::with_capacity(triples.size_hint().0);
        let mut max_id: Option<u32> = None;

        for (tail, head, capacity) in triples {
            if edges.len() >= u32::MAX as usize {
                return Err(AlgorithmError::TooManyEdges { count: edges.len() + 1 });
            }
            let largest = tail.max(head);
            if largest == u32::MAX {
                return Err(AlgorithmError::TooManyNodes { id: largest });
            }
            max_id = Some(max_id.map_or(largest, |m| m.max(largest)));
            edges.push(FlowEdge::new(NodeId(tail), NodeId(head), capacity));
        }

        let node_count = max_id.map_or(0, |m| m as usize + 1);
        Ok(Self::from_flow_edges(node_count, edges))
    }

    /// Builds the incidence index over already-validated edges
    fn from_flow_edges(node_count: usize, edges: Vec<FlowEdge>) -> Self {
        let mut degree = vec![0usize; node_count];
        for edge in &edges {
            degree[edge.tail.as_usize()] += 1;
            degree[edge.head.as_usize()] += 1;
        }

        let mut offsets = Vec::with_capacity(node_count + 1);
        offsets.push(0);
        for d in &degree {
            let last = offsets[offsets.len() - 1];
            offsets.push(last + d);
        }

        // reuse the degree buffer as the per-node write cursor
        degree.copy_from_slice(&offsets[..node_count]);
        let mut cursor = degree;

        let entries = 2 * edges.len();
        let mut neighbors = vec![NodeId(0); entries];
        let mut edge_ids = vec![EdgeId(0); entries];

        for (index, edge) in edges.iter().enumerate() {
            let id = EdgeId(index as u32);

            let slot = cursor[edge.tail.as_usize()];
            neighbors[slot] = edge.head;
            edge_ids[slot] = id;
            cursor[edge.tail.as_usize()] += 1;

            let slot = cursor[edge.head.as_usize()];
            neighbors[slot] = edge.tail;
            edge_ids[slot] = id;
            cursor[edge.head.as_usize()] += 1;
        }

        log::debug!(
            "Built incidence index: {} nodes, {} edges, {} entries",
            node_count,
            edges.len(),
            entries
        );

        Self {
            node_count,
            edges,
            offsets,
            neighbors,
            edge_ids,
        }
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn contains_node(&self, node: NodeId) -> bool {
        node.as_usize() < self.node_count
    }

    /// Rejects a terminal outside `[0, node_count)`
    pub fn validate_terminal(&self, node: NodeId, role: NodeRole) -> Result<(), AlgorithmError> {
        if self.contains_node(node) {
            Ok(())
        } else {
            Err(AlgorithmError::InvalidNode {
                role,
                node,
                node_count: self.node_count,
            })
        }
    }

    /// All edges in load order
    #[inline]
    pub fn edges(&self) -> &[FlowEdge] {
        &self.edges
    }

    #[inline]
    pub fn edge(&self, id: EdgeId) -> &FlowEdge {
        &self.edges[id.as_usize()]
    }

    /// Mutable access is reserved for the solver
    #[inline]
    pub(crate) fn edge_mut(&mut self, id: EdgeId) -> &mut FlowEdge {
        &mut self.edges[id.as_usize()]
    }

    /// Number of index entries owned by `node`; a self-loop counts twice
    #[inline]
    pub fn degree(&self, node: NodeId) -> usize {
        let i = node.as_usize();
        self.offsets[i + 1] - self.offsets[i]
    }

    /// Parallel neighbor and edge-id slices for `node`, in construction order
    #[inline]
    pub fn incidence(&self, node: NodeId) -> (&[NodeId], &[EdgeId]) {
        let i = node.as_usize();
        let range = self.offsets[i]..self.offsets[i + 1];
        (&self.neighbors[range.clone()], &self.edge_ids[range])
    }

    /// Incidence entries of `node` in construction order
    pub fn adjacency(&self, node: NodeId) -> impl Iterator<Item = Adjacency> + '_ {
        let (neighbors, edge_ids) = self.incidence(node);
        neighbors
            .iter()
            .zip(edge_ids)
            .map(|(&neighbor, &edge)| Adjacency { neighbor, edge })
    }

    /// Flow entering and leaving `node` summed over its incidence entries.
    ///
    /// A self-loop is indexed twice and adds the same amount to both sides.
    pub fn balance(&self, node: NodeId) -> FlowBalance {
        let (_, edge_ids) = self.incidence(node);
        let mut balance = FlowBalance::default();
        for &id in edge_ids {
            let edge = self.edge(id);
            if edge.tail == node {
                balance.outflow += FlowValue::from(edge.flow);
            }
            if edge.head == node {
                balance.inflow += FlowValue::from(edge.flow);
            }
        }
        balance
    }

    /// Sum of all edge capacities
    pub fn total_capacity(&self) -> FlowValue {
        self.edges.iter().map(|e| FlowValue::from(e.capacity)).sum()
    }

    /// Clears every edge flow so the network can be solved again
    pub fn reset_flows(&mut self) {
        for edge in &mut self.edges {
            edge.flow = 0;
        }
    }
}
