// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Dense unitary matrices used as gate payloads.
//!
//! A matrix for a `k`-qubit gate has dimension `2^k`. Row and column indices are read with the
//! first operand of the gate as the most significant bit.

use crate::{error::MatrixError, nearly_zero::NearlyZero};
use ndarray::{s, Array2};
use num_complex::Complex64;
use std::ops::Mul;

/// An immutable square complex matrix whose product with its own conjugate transpose is the
/// identity.
#[derive(Debug, Clone)]
pub struct DenseUnitaryMatrix {
    matrix: Array2<Complex64>,
}

impl DenseUnitaryMatrix {
    /// Builds a matrix from its rows, checking that it is square, of a power-of-two dimension and
    /// unitary.
    /// # Errors
    ///
    /// Returns [`MatrixError::Empty`], [`MatrixError::NotSquare`],
    /// [`MatrixError::NotPowerOfTwo`] or [`MatrixError::NotUnitary`] when the rows do not describe
    /// a gate matrix.
    pub fn new(rows: Vec<Vec<Complex64>>) -> Result<Self, MatrixError> {
        let size = rows.len();
        if size == 0 {
            return Err(MatrixError::Empty);
        }
        if rows.iter().any(|row| row.len() != size) {
            return Err(MatrixError::NotSquare);
        }
        let matrix = Array2::from_shape_vec((size, size), rows.into_iter().flatten().collect())
            .map_err(|_| MatrixError::NotSquare)?;
        Self::from_array(matrix)
    }

    /// Wraps an existing array, checking that it is square, of a power-of-two dimension and
    /// unitary.
    /// # Errors
    ///
    /// Returns [`MatrixError::Empty`], [`MatrixError::NotSquare`],
    /// [`MatrixError::NotPowerOfTwo`] or [`MatrixError::NotUnitary`] when the array is not a gate
    /// matrix.
    pub fn from_array(matrix: Array2<Complex64>) -> Result<Self, MatrixError> {
        if matrix.is_empty() {
            return Err(MatrixError::Empty);
        }
        if !matrix.is_square() {
            return Err(MatrixError::NotSquare);
        }
        if !matrix.nrows().is_power_of_two() {
            return Err(MatrixError::NotPowerOfTwo(matrix.nrows()));
        }
        let result = Self { matrix };
        if !result.is_unitary() {
            return Err(MatrixError::NotUnitary);
        }
        Ok(result)
    }

    /// Wraps an array that is known to be unitary.
    pub(crate) fn new_unchecked(matrix: Array2<Complex64>) -> Self {
        debug_assert!(matrix.is_square());
        Self { matrix }
    }

    #[must_use]
    pub fn identity(size: usize) -> Self {
        Self::new_unchecked(Array2::eye(size))
    }

    /// The dimension of the matrix.
    #[must_use]
    pub fn size(&self) -> usize {
        self.matrix.nrows()
    }

    /// The number of operands of a gate with this matrix, if the dimension is a power of two.
    #[must_use]
    pub fn number_of_qubits(&self) -> Option<usize> {
        self.size()
            .is_power_of_two()
            .then(|| self.size().trailing_zeros() as usize)
    }

    #[must_use]
    pub fn at(&self, row: usize, column: usize) -> Complex64 {
        self.matrix[[row, column]]
    }

    #[must_use]
    pub fn as_array(&self) -> &Array2<Complex64> {
        &self.matrix
    }

    /// The conjugate transpose.
    #[must_use]
    pub fn dagger(&self) -> Self {
        Self::new_unchecked(self.matrix.t().map(Complex64::conj))
    }

    #[must_use]
    pub fn inverse(&self) -> Self {
        self.dagger()
    }

    /// Matrix product.
    /// # Errors
    ///
    /// Returns [`MatrixError::DimensionMismatch`] if the matrices differ in size.
    pub fn checked_mul(&self, other: &Self) -> Result<Self, MatrixError> {
        if self.size() != other.size() {
            return Err(MatrixError::DimensionMismatch {
                left: self.size(),
                right: other.size(),
            });
        }
        Ok(Self::new_unchecked(self.matrix.dot(&other.matrix)))
    }

    /// Raises the matrix to an integer power given as a double. Negative exponents raise the
    /// inverse.
    /// # Errors
    ///
    /// Returns [`MatrixError::NonIntegerExponent`] unless the exponent is within [`EPSILON`](crate::config::EPSILON) of
    /// an integer.
    #[allow(clippy::cast_possible_truncation)]
    pub fn power(&self, exponent: f64) -> Result<Self, MatrixError> {
        let rounded = exponent.round();
        if !exponent.is_finite() || !(exponent - rounded).is_nearly_zero() {
            return Err(MatrixError::NonIntegerExponent(exponent));
        }
        let exponent = rounded as i64;

        let mut base = if exponent < 0 {
            self.inverse()
        } else {
            self.clone()
        };
        let mut remaining = exponent.unsigned_abs();
        let mut result = Self::identity(self.size());
        while remaining > 0 {
            if remaining & 1 == 1 {
                result = Self::new_unchecked(result.matrix.dot(&base.matrix));
            }
            remaining >>= 1;
            if remaining > 0 {
                base = Self::new_unchecked(base.matrix.dot(&base.matrix));
            }
        }
        Ok(result)
    }

    /// Returns the matrix of double dimension that applies this one when a new leading operand
    /// is one and acts as the identity otherwise.
    #[must_use]
    pub fn control(&self) -> Self {
        let size = self.size();
        let mut result = Array2::eye(2 * size);
        result.slice_mut(s![size.., size..]).assign(&self.matrix);
        Self::new_unchecked(result)
    }

    fn is_unitary(&self) -> bool {
        let product = self.matrix.dot(&self.dagger().matrix);
        Self::new_unchecked(product) == Self::identity(self.size())
    }
}

impl Mul for &DenseUnitaryMatrix {
    type Output = DenseUnitaryMatrix;

    /// # Panics
    ///
    /// This function will panic if the matrices differ in size.
    fn mul(self, rhs: Self) -> Self::Output {
        self.checked_mul(rhs).unwrap_or_else(|e| panic!("{e}"))
    }
}

/// Equality within [`EPSILON`](crate::config::EPSILON) on each element.
impl PartialEq for DenseUnitaryMatrix {
    fn eq(&self, other: &Self) -> bool {
        self.size() == other.size()
            && self
                .matrix
                .iter()
                .zip(other.matrix.iter())
                .all(|(a, b)| (a - b).is_nearly_zero())
    }
}
