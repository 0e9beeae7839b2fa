// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![deny(clippy::all, clippy::pedantic)]

//! # Sparse State Quantum Simulator
//! This library implements the state engine of a circuit simulator: a quantum state stored as a
//! sparse mapping from basis vector to amplitude, on which arbitrary `k`-qubit unitaries,
//! measurements and resets are applied.

pub mod basis_vector;
pub mod config;
pub mod error;
pub mod gates;
pub mod matrix;
pub mod nearly_zero;
pub mod random;
pub mod sparse_array;

// Additional test infrastructure is available in matrix_testing that allows comparing the transformations
// implemented here with direct matrix application to the dense state vector.
#[cfg(test)]
mod matrix_testing;

pub use crate::{
    basis_vector::BasisVector,
    error::{MatrixError, StateError},
    matrix::DenseUnitaryMatrix,
    random::RandomGenerator,
    sparse_array::SparseArray,
};

use crate::{
    config::{MAX_BIT_NUMBER, MAX_QUBIT_NUMBER},
    nearly_zero::NearlyZero,
};
use bitvec::slice::BitSlice;
use num_complex::Complex64;
use num_traits::One;
use std::fmt;

/// The amplitudes of a register of qubits. Each instance starts in the ground state and is mutated
/// by gate application, measurement and reset.
#[derive(Debug, Clone)]
pub struct QuantumState {
    /// The materialized amplitudes.
    data: SparseArray,

    /// Size of the classical register measurements write into.
    number_of_bits: usize,
}

impl QuantumState {
    /// Creates a state over `number_of_qubits` qubits, all in |0⟩, paired with a classical register
    /// of `number_of_bits` bits.
    /// # Errors
    ///
    /// Returns a [`StateError`] if there are no qubits or either register exceeds its maximum size.
    pub fn new(number_of_qubits: usize, number_of_bits: usize) -> Result<Self, StateError> {
        if number_of_qubits == 0 {
            return Err(StateError::NoQubits);
        }
        if number_of_qubits > MAX_QUBIT_NUMBER {
            return Err(StateError::TooManyQubits {
                requested: number_of_qubits,
                max: MAX_QUBIT_NUMBER,
            });
        }
        if number_of_bits > MAX_BIT_NUMBER {
            return Err(StateError::TooManyBits {
                requested: number_of_bits,
                max: MAX_BIT_NUMBER,
            });
        }

        let mut state = Self {
            data: SparseArray::new(number_of_qubits),
            number_of_bits,
        };
        state.reset();
        Ok(state)
    }

    /// Creates a state from explicit amplitudes, each keyed by a basis vector written most
    /// significant qubit first. Repeated keys keep the last amplitude.
    /// # Errors
    ///
    /// Returns a [`StateError`] if the registers are invalid, a key does not fit the register, or
    /// the amplitudes are not normalized.
    pub fn with_amplitudes<'a, I>(
        number_of_qubits: usize,
        number_of_bits: usize,
        amplitudes: I,
    ) -> Result<Self, StateError>
    where
        I: IntoIterator<Item = (&'a str, Complex64)>,
    {
        let mut state = Self::new(number_of_qubits, number_of_bits)?;
        state.data.clear();
        for (value, amplitude) in amplitudes {
            let index = BasisVector::parse_for_register(value, number_of_qubits)?;
            state.data.set(index, amplitude);
        }
        if !state.is_normalized() {
            return Err(StateError::NotNormalized);
        }
        Ok(state)
    }

    /// Sets how many gate applications happen between two forced cleanups of negligible
    /// amplitudes.
    #[must_use]
    pub fn with_zero_cycle_size(mut self, zero_cycle_size: u64) -> Self {
        self.data = self.data.with_zero_cycle_size(zero_cycle_size);
        self
    }

    #[must_use]
    pub fn number_of_qubits(&self) -> usize {
        self.data.number_of_qubits()
    }

    #[must_use]
    pub fn number_of_bits(&self) -> usize {
        self.number_of_bits
    }

    /// Returns the amplitude of a single basis vector.
    #[must_use]
    pub fn amplitude(&self, index: BasisVector) -> Complex64 {
        self.data.get(index)
    }

    /// Puts the state back into |0...0⟩.
    pub fn reset(&mut self) {
        self.data.clear();
        self.data.set(BasisVector::default(), Complex64::one());
    }

    /// Whether the squared magnitudes of all amplitudes sum to one.
    pub fn is_normalized(&mut self) -> bool {
        (self.data.norm() - 1.0).is_nearly_zero()
    }

    /// Returns the dense amplitude vector, indexed by basis vector value.
    /// # Panics
    ///
    /// This function will panic if the register is too large to be addressed densely.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Complex64> {
        self.data.to_vec()
    }

    /// Visits every non-negligible amplitude in increasing basis vector order.
    pub fn for_each_sorted<F>(&mut self, f: F)
    where
        F: FnMut(BasisVector, Complex64),
    {
        self.data.for_each_sorted(f);
    }

    /// Applies a unitary to the given operands. The first operand corresponds to the most
    /// significant bit of the matrix row and column indices.
    ///
    /// Operand indices must be in range and the matrix must have dimension `2^operands.len()`.
    /// Both are only checked in debug builds.
    pub fn apply(&mut self, matrix: &DenseUnitaryMatrix, operands: &[usize]) -> &mut Self {
        let number_of_qubits = self.number_of_qubits();
        debug_assert!(
            operands.len() <= number_of_qubits,
            "Gate on {} operands applied to a register of {number_of_qubits} qubits.",
            operands.len()
        );
        debug_assert!(
            operands.iter().all(|&operand| operand < number_of_qubits),
            "Operand out of range in {operands:?} for a register of {number_of_qubits} qubits."
        );
        debug_assert_eq!(
            matrix.number_of_qubits(),
            Some(operands.len()),
            "Matrix of size {} does not match {} operands.",
            matrix.size(),
            operands.len()
        );

        let matrix = matrix.as_array();
        self.data.apply_linear(|index, value, result| {
            let reduced_index = operands
                .iter()
                .fold(0_usize, |acc, &operand| (acc << 1) | usize::from(index.test(operand)));

            for (row, entry) in matrix.column(reduced_index).iter().enumerate() {
                let contribution = value * entry;
                if contribution.is_nearly_zero() {
                    continue;
                }
                let target = operands
                    .iter()
                    .rev()
                    .enumerate()
                    .fold(index, |target, (bit, &operand)| {
                        target.with(operand, (row >> bit) & 1 == 1)
                    });
                *result.entry(target).or_default() += contribution;
            }
        });
        self
    }

    /// Probability of finding the given qubit in |1⟩.
    pub fn probability_of_measuring_one(&mut self, qubit: usize) -> f64 {
        debug_assert!(qubit < self.number_of_qubits(), "index out of bounds");
        self.data.accumulate(0.0, |acc, index, value| {
            if index.test(qubit) {
                acc + value.norm_sqr()
            } else {
                acc
            }
        })
    }

    /// Probability of finding the given qubit in |0⟩.
    pub fn probability_of_measuring_zero(&mut self, qubit: usize) -> f64 {
        1.0 - self.probability_of_measuring_one(qubit)
    }

    /// Measures `qubit` in the computational basis using one draw from `random`, collapses the
    /// state onto the outcome and records it at `qubit` in `measurement_register` and at `bit` in
    /// `bit_measurement_register`. Returns the outcome.
    /// # Panics
    ///
    /// This function will panic if the chosen outcome has zero probability, which only happens when
    /// `random` yields a value outside of [0, 1) or the state has lost its normalization.
    pub fn apply_measure<F>(
        &mut self,
        qubit: usize,
        bit: usize,
        random: F,
        measurement_register: &mut BasisVector,
        bit_measurement_register: &mut BitSlice,
    ) -> bool
    where
        F: FnOnce() -> f64,
    {
        debug_assert!(
            bit < self.number_of_bits && bit < bit_measurement_register.len(),
            "index out of bounds"
        );

        let probability_of_one = self.probability_of_measuring_one(qubit);
        let outcome = random() < probability_of_one;
        let probability = if outcome {
            probability_of_one
        } else {
            1.0 - probability_of_one
        };
        assert!(
            probability > 0.0,
            "Cannot collapse qubit {qubit} onto an outcome with probability {probability}."
        );

        self.data.erase_if(|index, _| index.test(qubit) != outcome);
        self.data.scale((1.0 / probability).sqrt());

        measurement_register.set(qubit, outcome);
        bit_measurement_register.set(bit, outcome);
        outcome
    }

    /// Moves the probability mass of every term where `qubit` is |1⟩ onto the matching term where it
    /// is |0⟩. Merged terms get the combined magnitude as a real amplitude; the relative phase of the
    /// two branches is dropped.
    pub fn apply_reset(&mut self, qubit: usize) {
        debug_assert!(qubit < self.number_of_qubits(), "index out of bounds");

        let excited = self.data.accumulate(Vec::new(), |mut acc, index, value| {
            if index.test(qubit) {
                acc.push((index, value));
            }
            acc
        });
        for (index, value) in excited {
            let target = index.with(qubit, false);
            let magnitude = (self.data.get(target).norm_sqr() + value.norm_sqr()).sqrt();
            self.data.set(target, Complex64::new(magnitude, 0.0));
        }
        self.data.erase_if(|index, _| index.test(qubit));
    }

    /// Puts every qubit back into |0⟩.
    pub fn apply_reset_all(&mut self) {
        self.reset();
    }
}

impl fmt::Display for QuantumState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries = self
            .data
            .iter()
            .filter(|(_, value)| !value.is_nearly_zero())
            .collect::<Vec<_>>();
        entries.sort_unstable_by_key(|&(index, _)| index);

        write!(f, "STATE: [ ")?;
        for (index, value) in entries {
            write!(
                f,
                "|{}\u{27e9}: {}, ",
                index.to_substring(self.number_of_qubits()),
                value
            )?;
        }
        write!(f, "]")
    }
}
