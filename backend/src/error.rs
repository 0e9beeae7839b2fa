// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use quantum_sparse_sim::{MatrixError, StateError};
use thiserror::Error;

/// Failures surfaced to the caller of a simulation run. Invalid input is reported here; broken
/// internal invariants still panic.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    #[error("invalid number of iterations: {0}")]
    InvalidShotCount(u64),

    #[error("unknown error model: '{0}'")]
    UnknownErrorModel(String),

    #[error("error model probability must be in [0, 1], got {0}")]
    InvalidProbability(f64),

    #[error("error model '{model}' expects {expected} parameter(s), got {found}")]
    InvalidParameterCount {
        model: String,
        expected: usize,
        found: usize,
    },

    #[error("gate modifiers can only be applied to unitary instructions")]
    NotUnitary,

    #[error(transparent)]
    Matrix(#[from] MatrixError),

    #[error(transparent)]
    State(#[from] StateError),
}
