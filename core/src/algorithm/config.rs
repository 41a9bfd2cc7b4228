//! Solver configuration
//!
//! Every option has a default so a zero-configuration run reproduces the
//! plain "augment until no path remains" behavior.

use serde::{Serialize, Deserialize};

use crate::algorithm::traits::AlgorithmError;

/// Tunables for [`MaxFlowSolver`](crate::algorithm::graph::max_flow::MaxFlowSolver)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Log every N-th augmentation; 0 disables per-step progress logging
    pub progress_interval: usize,

    /// Run the full capacity feasibility check after every augmentation
    pub verify_each_step: bool,

    /// Keep a per-augmentation history in the result
    pub record_history: bool,

    /// Stop after this many augmentations even if a path remains
    pub max_augmentations: Option<usize>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            progress_interval: 1,
            verify_each_step: cfg!(debug_assertions),
            record_history: true,
            max_augmentations: None,
        }
    }
}

impl SolverConfig {
    /// Names accepted by [`SolverConfig::set`]
    pub const PARAMETERS: [&'static str; 4] = [
        "progress_interval",
        "verify_each_step",
        "record_history",
        "max_augmentations",
    ];

    /// Sets one option from its string form
    pub fn set(&mut self, name: &str, value: &str) -> Result<(), AlgorithmError> {
        let invalid = |reason: &str| AlgorithmError::InvalidParameter {
            name: name.to_string(),
            reason: reason.to_string(),
        };

        match name {
            "progress_interval" => {
                self.progress_interval = value
                    .parse::<usize>()
                    .map_err(|_| invalid("progress_interval must be a non-negative integer"))?;
            }
            "verify_each_step" => {
                self.verify_each_step = value
                    .parse::<bool>()
                    .map_err(|_| invalid("verify_each_step must be true or false"))?;
            }
            "record_history" => {
                self.record_history = value
                    .parse::<bool>()
                    .map_err(|_| invalid("record_history must be true or false"))?;
            }
            "max_augmentations" => {
                self.max_augmentations = match value {
                    "" | "none" | "unlimited" => None,
                    limit => Some(
                        limit
                            .parse::<usize>()
                            .map_err(|_| invalid("max_augmentations must be an integer or 'none'"))?,
                    ),
                };
            }
            _ => return Err(invalid("unknown parameter")),
        }
        Ok(())
    }

    /// String form of one option
    pub fn get(&self, name: &str) -> Option<String> {
        match name {
            "progress_interval" => Some(self.progress_interval.to_string()),
            "verify_each_step" => Some(self.verify_each_step.to_string()),
            "record_history" => Some(self.record_history.to_string()),
            "max_augmentations" => Some(
                self.max_augmentations
                    .map_or_else(|| "none".to_string(), |n| n.to_string()),
            ),
            _ => None,
        }
    }

    /// Whether augmentation number `step` (1-based) should be logged
    #[inline]
    pub fn reports_step(&self, step: usize) -> bool {
        self.progress_interval != 0 && step % self.progress_interval == 0
    }
}
