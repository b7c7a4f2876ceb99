//! Error and warning types surfaced by the routing engine.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Fatal failures that abort an optimization run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptimizationError {
    #[error("expected exactly one depot stop, found {depots}")]
    Configuration { depots: usize },
    #[error("no client stops to route")]
    EmptyInput,
    #[error("total demand {demand} exceeds total fleet capacity {capacity}")]
    CapacityInfeasible { demand: u64, capacity: u64 },
    #[error("distance matrix rejected: {0}")]
    MatrixValidation(#[from] MatrixValidationError),
}

/// A distance matrix that cannot be handed to a tour solver.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatrixValidationError {
    #[error("row {row} has {len} entries, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[error("entry ({row}, {col}) is not finite: {value}")]
    NonFinite { row: usize, col: usize, value: f64 },
}

/// Failures of the primary tour solver. These never leave the sequencer:
/// they are logged and answered with the fallback tour.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SequencerError {
    #[error("iteration budget of {budget} moves exhausted before convergence")]
    BudgetExhausted { budget: u64 },
    #[error("time limit of {limit_ms} ms exceeded before convergence")]
    TimeLimitExceeded { limit_ms: u128 },
    #[error("solver returned a tour that is not a permutation of {nodes} nodes")]
    InvalidPermutation { nodes: usize },
}

/// Non-fatal: some stops did not fit into any vehicle during the single
/// assignment pass and are left out of every route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialAssignmentWarning {
    pub stop_ids: Vec<String>,
}

impl fmt::Display for PartialAssignmentWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} stops could not be assigned ({}); add vehicles or increase capacity",
            self.stop_ids.len(),
            self.stop_ids.join(", ")
        )
    }
}
