//! Read-only verification of computed flows

pub mod correctness;

pub use self::correctness::{check_capacity, check_conservation, verify_flow, InvariantViolation};
