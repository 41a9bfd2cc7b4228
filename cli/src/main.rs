//! `maxflow` binary: load an edge list, solve, write per-edge flows

mod cli;
mod report;

use clap::Parser;
use log::{debug, info};

use cli::Cli;
use maxflow_core::{
    verify_flow, write_flows_to_path, FlowAlgorithm, FlowGraph, MaxFlowSolver, NodeId,
};
use report::{format_duration, MaxFlowReport, PhaseClock, PhaseTimings};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = cli.solver_config()?;
    let mut clock = PhaseClock::start();

    info!("Reading edgelist from file {}", cli.edgelist.display());
    let mut graph = FlowGraph::from_path(&cli.edgelist)?;
    info!("Number of nodes: {}", graph.node_count());
    info!("Number of edges: {}", graph.edge_count());
    let load = clock.lap();

    let (source, target) = (NodeId(cli.source), NodeId(cli.target));
    let mut solver = MaxFlowSolver::with_config(config);
    for (name, value) in &cli.params {
        solver.set_parameter(name, value)?;
        debug!("{} = {}", name, solver.get_parameter(name).unwrap_or_default());
    }
    info!("Algorithm: {}", solver.name());
    let result = solver.max_flow(&mut graph, source, target)?;

    let cut = if result.complete {
        let cut = solver.min_cut(&graph, source)?;
        info!(
            "Minimum cut: {} edges, capacity {}",
            cut.cut_edges.len(),
            cut.capacity
        );
        Some(cut)
    } else {
        None
    };

    if cli.verify {
        let value = verify_flow(&graph, source, target)?;
        info!("Verified feasible flow of value {}", value);
    }
    let solve = clock.lap();

    info!("Writing the results in file {}", cli.output.display());
    write_flows_to_path(&graph, &cli.output)?;
    let write = clock.lap();

    let total = clock.total();
    info!("- Overall time = {}", format_duration(total));

    if let Some(path) = &cli.summary {
        let mut report = MaxFlowReport::new(&result, cut.as_ref());
        report.edgelist = cli.edgelist.clone();
        report.output = cli.output.clone();
        report.node_count = graph.node_count();
        report.edge_count = graph.edge_count();
        report.source = cli.source;
        report.target = cli.target;
        report.timings = PhaseTimings {
            load_ms: PhaseTimings::millis(load),
            solve_ms: PhaseTimings::millis(solve),
            write_ms: PhaseTimings::millis(write),
            total_ms: PhaseTimings::millis(total),
        };
        report.write_to(path)?;
        info!("Summary written to {}", path.display());
    }

    Ok(())
}
