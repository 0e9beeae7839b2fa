// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Tunables shared by the sparse state engine and the layers built on top of it.

/// Magnitude below which a real or imaginary part is considered zero.
pub const EPSILON: f64 = 0.000_000_000_000_1;

/// Number of decimals used when rendering amplitudes and frequencies as text.
pub const OUTPUT_DECIMALS: usize = 8;

/// How many linear updates of a sparse array happen between two forced cleanups of
/// negligible entries.
pub const ZERO_CYCLE_SIZE: u64 = 100;

/// Maximum number of qubits in a register. A basis vector is stored in a single `u64`.
pub const MAX_QUBIT_NUMBER: usize = 64;

/// Maximum number of classical bits in a register.
pub const MAX_BIT_NUMBER: usize = 1024 * 1024;
