// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::{config::MAX_QUBIT_NUMBER, error::StateError};
use std::{fmt, str::FromStr};

/// A bit pattern naming one term of a superposition, where bit `i` holds the value of qubit `i`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BasisVector(u64);

impl BasisVector {
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Returns the value of qubit `index` in this pattern.
    #[must_use]
    pub fn test(self, index: usize) -> bool {
        debug_assert!(index < MAX_QUBIT_NUMBER, "index out of bounds");
        (self.0 >> index) & 1 == 1
    }

    pub fn set(&mut self, index: usize, value: bool) {
        debug_assert!(index < MAX_QUBIT_NUMBER, "index out of bounds");
        if value {
            self.0 |= 1 << index;
        } else {
            self.0 &= !(1 << index);
        }
    }

    /// Returns a copy with qubit `index` set to `value`.
    #[must_use]
    pub fn with(mut self, index: usize, value: bool) -> Self {
        self.set(index, value);
        self
    }

    /// Whether every bit above the first `number_of_qubits` is clear.
    #[must_use]
    pub fn fits(self, number_of_qubits: usize) -> bool {
        number_of_qubits >= MAX_QUBIT_NUMBER || self.0 >> number_of_qubits == 0
    }

    /// Renders the lowest `number_of_qubits` bits, most significant qubit first.
    #[must_use]
    pub fn to_substring(self, number_of_qubits: usize) -> String {
        (0..number_of_qubits)
            .rev()
            .map(|index| if self.test(index) { '1' } else { '0' })
            .collect()
    }

    /// Parses a pattern written most significant qubit first and checks that it has no more
    /// characters than the register has qubits.
    /// # Errors
    ///
    /// Returns [`StateError::InvalidBasisVector`] for anything but a non-empty string of `0` and
    /// `1`, and [`StateError::BasisVectorOutOfRange`] if the string is longer than the register.
    pub fn parse_for_register(value: &str, number_of_qubits: usize) -> Result<Self, StateError> {
        let basis_vector = value.parse::<Self>()?;
        if value.len() > number_of_qubits {
            return Err(StateError::BasisVectorOutOfRange {
                value: value.to_string(),
                qubits: number_of_qubits,
            });
        }
        Ok(basis_vector)
    }
}

impl From<u64> for BasisVector {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl FromStr for BasisVector {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || s.len() > MAX_QUBIT_NUMBER {
            return Err(StateError::InvalidBasisVector(s.to_string()));
        }
        s.chars().try_fold(Self::default(), |acc, c| match c {
            '0' => Ok(Self(acc.0 << 1)),
            '1' => Ok(Self((acc.0 << 1) | 1)),
            _ => Err(StateError::InvalidBasisVector(s.to_string())),
        })
    }
}

impl fmt::Display for BasisVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:b}", self.0)
    }
}
