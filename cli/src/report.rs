//! Phase timing and the JSON run summary

use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use maxflow_core::{AugmentationHistory, FlowMetrics, FlowValue, MaxFlowResult, MinCut};

/// `XhYmZs`, truncated to whole seconds
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!("{}h{}m{}s", secs / 3600, (secs % 3600) / 60, secs % 60)
}

/// Wall clock split into consecutive phases
#[derive(Debug)]
pub struct PhaseClock {
    started: Instant,
    phase: Instant,
}

impl PhaseClock {
    pub fn start() -> Self {
        let now = Instant::now();
        Self {
            started: now,
            phase: now,
        }
    }

    /// Ends the current phase, logs its duration and starts the next one
    pub fn lap(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = now.duration_since(self.phase);
        self.phase = now;
        log::info!("- Time = {}", format_duration(elapsed));
        elapsed
    }

    pub fn total(&self) -> Duration {
        self.started.elapsed()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PhaseTimings {
    pub load_ms: f64,
    pub solve_ms: f64,
    pub write_ms: f64,
    pub total_ms: f64,
}

impl PhaseTimings {
    pub fn millis(duration: Duration) -> f64 {
        duration.as_secs_f64() * 1000.0
    }
}

/// JSON summary of one command-line run
#[derive(Debug, Clone, Serialize)]
pub struct MaxFlowReport {
    pub edgelist: PathBuf,
    pub output: PathBuf,
    pub node_count: usize,
    pub edge_count: usize,
    pub source: u32,
    pub target: u32,
    pub max_flow: FlowValue,
    pub complete: bool,
    pub augmentations: usize,
    pub min_cut_capacity: Option<FlowValue>,
    pub cut_edges: Option<usize>,
    pub metrics: FlowMetrics,
    pub timings: PhaseTimings,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history: Option<AugmentationHistory>,
}

impl MaxFlowReport {
    pub fn new(result: &MaxFlowResult, cut: Option<&MinCut>) -> Self {
        Self {
            edgelist: PathBuf::new(),
            output: PathBuf::new(),
            node_count: 0,
            edge_count: 0,
            source: 0,
            target: 0,
            max_flow: result.max_flow,
            complete: result.complete,
            augmentations: result.augmentations,
            min_cut_capacity: cut.map(|c| c.capacity),
            cut_edges: cut.map(|c| c.cut_edges.len()),
            metrics: result.metrics.clone(),
            timings: PhaseTimings::default(),
            history: result.history.clone(),
        }
    }

    pub fn write_to(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maxflow_core::{FlowGraph, MaxFlowSolver, NodeId};

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(999)), "0h0m0s");
        assert_eq!(format_duration(Duration::from_secs(59)), "0h0m59s");
        assert_eq!(format_duration(Duration::from_secs(3 * 3600 + 7 * 60 + 5)), "3h7m5s");
    }

    #[test]
    fn test_report_serialization() {
        let mut graph = FlowGraph::from_edges(vec![(0, 1, 10), (0, 2, 10), (1, 3, 1), (2, 3, 10)]).unwrap();
        let mut solver = MaxFlowSolver::new();
        let result = solver.solve(&mut graph, NodeId(0), NodeId(3)).unwrap();
        let cut = solver.min_cut(&graph, NodeId(0)).unwrap();

        let report = MaxFlowReport::new(&result, Some(&cut));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["max_flow"], 11);
        assert_eq!(json["min_cut_capacity"], 11);
        assert_eq!(json["cut_edges"], 2);
        assert_eq!(json["complete"], true);
        assert_eq!(json["history"]["records"].as_array().unwrap().len(), 2);
    }
}
