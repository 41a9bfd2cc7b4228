//! Graph store and edge-list I/O

pub mod graph;
pub mod edge_list;
