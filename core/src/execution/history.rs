//! Augmentation history for flow computations
//!
//! Keeps one compact record per augmentation so that a run can be
//! inspected afterwards: how much each path carried, how long the paths
//! were, and how the cumulative flow evolved.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::time::Duration;
use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::data_structures::graph::{Capacity, FlowValue};

/// One augmentation step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AugmentationRecord {
    /// 1-based augmentation number
    pub step: usize,

    /// Flow pushed along the path
    pub bottleneck: Capacity,

    /// Number of edges on the path
    pub path_length: usize,

    /// Net flow leaving the source after the step
    pub total_flow: FlowValue,

    /// Time since the run started
    #[serde(with = "duration_micros")]
    pub elapsed: Duration,
}

/// Error types for history operations
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("Invalid step index: {0}")]
    InvalidIndex(usize),

    #[error("Out-of-order step: expected {expected}, got {actual}")]
    OutOfOrder { expected: usize, actual: usize },
}

/// Ordered record of the augmentations of one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AugmentationHistory {
    records: Vec<AugmentationRecord>,
}

impl AugmentationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record; steps must be consecutive starting at 1
    pub fn push(&mut self, record: AugmentationRecord) -> Result<(), HistoryError> {
        let expected = self.records.len() + 1;
        if record.step != expected {
            return Err(HistoryError::OutOfOrder {
                expected,
                actual: record.step,
            });
        }
        self.records.push(record);
        Ok(())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[AugmentationRecord] {
        &self.records
    }

    /// Record for a 1-based step
    pub fn get(&self, step: usize) -> Result<&AugmentationRecord, HistoryError> {
        step.checked_sub(1)
            .and_then(|i| self.records.get(i))
            .ok_or(HistoryError::InvalidIndex(step))
    }

    pub fn last(&self) -> Option<&AugmentationRecord> {
        self.records.last()
    }

    /// Whether the cumulative flow never decreased across steps
    pub fn is_monotonic(&self) -> bool {
        self.records
            .windows(2)
            .all(|pair| pair[0].total_flow <= pair[1].total_flow)
    }

    /// Sum of all bottlenecks pushed
    pub fn pushed(&self) -> FlowValue {
        self.records.iter().map(|r| FlowValue::from(r.bottleneck)).sum()
    }

    /// Longest augmenting path seen
    pub fn longest_path(&self) -> usize {
        self.records.iter().map(|r| r.path_length).max().unwrap_or(0)
    }
}

mod duration_micros {
    use std::time::Duration;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_micros() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_micros)
    }
}
