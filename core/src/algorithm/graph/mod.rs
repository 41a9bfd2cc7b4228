//! Residual-graph flow algorithms
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod max_flow;
pub mod search;

pub use self::max_flow::{Augmentation, MaxFlowResult, MaxFlowSolver, MinCut};
pub use self::search::{SearchState, SearchSummary};
