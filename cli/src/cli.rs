//! Command-line arguments and solver configuration loading

use clap::Parser;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use maxflow_core::{AlgorithmError, SolverConfig};

#[derive(Parser, Debug)]
#[command(
    name = "maxflow",
    about = "Maximum flow between two nodes of a capacitated edge list",
    version
)]
pub struct Cli {
    /// Edge list with one `tail head capacity` triple per line
    pub edgelist: PathBuf,

    /// Source node id
    pub source: u32,

    /// Target node id
    pub target: u32,

    /// Result file, one `tail head capacity flow` line per edge
    pub output: PathBuf,

    /// JSON solver configuration; flags below override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log the running flow every N augmentations (0 = never)
    #[arg(long = "progress-interval")]
    pub progress_interval: Option<usize>,

    /// Stop after N augmentations
    #[arg(long = "max-augmentations")]
    pub max_augmentations: Option<usize>,

    /// Check capacities and conservation of the final flow
    #[arg(long)]
    pub verify: bool,

    /// Write a JSON run summary
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Extra solver parameter as NAME=VALUE, applied after everything else
    #[arg(long = "param", value_name = "NAME=VALUE", value_parser = parse_param)]
    pub params: Vec<(String, String)>,
}

fn parse_param(arg: &str) -> Result<(String, String), String> {
    match arg.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("expected NAME=VALUE, got {:?}", arg)),
    }
}

impl Cli {
    /// Solver configuration from the optional file plus command-line overrides
    pub fn solver_config(&self) -> Result<SolverConfig, AlgorithmError> {
        let mut config = match &self.config {
            Some(path) => {
                let file = File::open(path)?;
                serde_json::from_reader(BufReader::new(file))
                    .map_err(|e| AlgorithmError::Config(format!("{}: {}", path.display(), e)))?
            }
            None => SolverConfig::default(),
        };

        if let Some(interval) = self.progress_interval {
            config.set("progress_interval", &interval.to_string())?;
        }
        if let Some(limit) = self.max_augmentations {
            config.set("max_augmentations", &limit.to_string())?;
        }
        Ok(config)
    }
}
