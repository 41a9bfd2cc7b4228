use maxflow_core::validation::{check_capacity, check_conservation, verify_flow};
use maxflow_core::{FlowGraph, FlowValue, MaxFlowSolver, NodeId};
use proptest::prelude::*;

/// Smallest `s`-`t` cut by enumerating every node subset
fn brute_force_min_cut(node_count: usize, edges: &[(u32, u32, u32)], s: usize, t: usize) -> FlowValue {
    let mut best = FlowValue::MAX;
    for mask in 0u32..(1u32 << node_count) {
        if mask & (1u32 << s) == 0 || mask & (1u32 << t) != 0 {
            continue;
        }
        let cut: FlowValue = edges
            .iter()
            .filter(|&&(u, v, _)| mask & (1u32 << u) != 0 && mask & (1u32 << v) == 0)
            .map(|&(_, _, c)| FlowValue::from(c))
            .sum();
        best = best.min(cut);
    }
    best
}

fn network() -> impl Strategy<Value = (usize, Vec<(u32, u32, u32)>)> {
    (2usize..=7).prop_flat_map(|n| {
        let edge = (0..n as u32, 0..n as u32, 0u32..20);
        (Just(n), prop::collection::vec(edge, 0..24)).prop_map(|(n, mut edges)| {
            // pin the node count so the target always exists
            edges.push((n as u32 - 1, n as u32 - 1, 0));
            (n, edges)
        })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn max_flow_equals_min_cut((n, edges) in network()) {
        let mut graph = FlowGraph::from_edges(edges.iter().copied()).unwrap();
        prop_assert_eq!(graph.node_count(), n);

        let (s, t) = (NodeId(0), NodeId(n as u32 - 1));
        let mut solver = MaxFlowSolver::new();
        let result = solver.solve(&mut graph, s, t).unwrap();

        prop_assert!(result.complete);
        prop_assert_eq!(result.max_flow, brute_force_min_cut(n, &edges, 0, n - 1));
        prop_assert_eq!(verify_flow(&graph, s, t), Ok(result.max_flow));

        let cut = solver.min_cut(&graph, s).unwrap();
        prop_assert_eq!(cut.capacity, result.max_flow);
        prop_assert!(cut.contains(s));
        prop_assert!(!cut.contains(t));
    }

    #[test]
    fn every_step_is_feasible_and_monotonic((n, edges) in network()) {
        let mut graph = FlowGraph::from_edges(edges.iter().copied()).unwrap();
        let (s, t) = (NodeId(0), NodeId(n as u32 - 1));
        let mut solver = MaxFlowSolver::new();

        let mut previous = 0;
        while let Some(step) = solver.augment(&mut graph, s, t).unwrap() {
            prop_assert!(step.bottleneck > 0);
            prop_assert!(step.total_flow > previous);
            prop_assert_eq!(step.total_flow - previous, FlowValue::from(step.bottleneck));
            prop_assert!(check_capacity(&graph).is_ok());
            prop_assert!(check_conservation(&graph, s, t).is_ok());
            previous = step.total_flow;
        }
    }

    #[test]
    fn rerun_after_termination_changes_nothing((n, edges) in network()) {
        let mut graph = FlowGraph::from_edges(edges.iter().copied()).unwrap();
        let (s, t) = (NodeId(0), NodeId(n as u32 - 1));
        let mut solver = MaxFlowSolver::new();
        let first = solver.solve(&mut graph, s, t).unwrap();
        let flows: Vec<_> = graph.edges().iter().map(|e| e.flow).collect();

        prop_assert_eq!(solver.augment(&mut graph, s, t).unwrap(), None);
        let second = solver.solve(&mut graph, s, t).unwrap();
        prop_assert_eq!(second.max_flow, first.max_flow);
        prop_assert_eq!(second.augmentations, 0);
        prop_assert_eq!(graph.edges().iter().map(|e| e.flow).collect::<Vec<_>>(), flows);
    }
}
