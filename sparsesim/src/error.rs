// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use thiserror::Error;

/// Failures while building or combining dense unitary matrices.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatrixError {
    #[error("matrix is empty")]
    Empty,

    #[error("matrix is not square")]
    NotSquare,

    #[error("matrix dimension {0} is not a power of two")]
    NotPowerOfTwo(usize),

    #[error("matrix is not unitary")]
    NotUnitary,

    #[error("cannot multiply matrices of size {left} and {right}")]
    DimensionMismatch { left: usize, right: usize },

    #[error("matrix power requires an integer exponent, got {0}")]
    NonIntegerExponent(f64),
}

/// Failures while building a quantum state.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StateError {
    #[error("number of qubits needs to be at least 1")]
    NoQubits,

    #[error("number of qubits exceeds maximum allowed: {requested} > {max}")]
    TooManyQubits { requested: usize, max: usize },

    #[error("number of bits exceeds maximum allowed: {requested} > {max}")]
    TooManyBits { requested: usize, max: usize },

    #[error("quantum state is not normalized")]
    NotNormalized,

    #[error("invalid basis vector '{0}': expected a string of '0' and '1' characters")]
    InvalidBasisVector(String),

    #[error("found value '{value}' for a register of {qubits} qubits")]
    BasisVectorOutOfRange { value: String, qubits: usize },
}
