// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The standard gate library. Multi-qubit gates take their control operands first.

use crate::{matrix::DenseUnitaryMatrix, nearly_zero::NearlyZero};
use core::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_2, PI};
use ndarray::array;
use num_complex::Complex64;
use num_traits::{One, Zero};

/// Returns the single-qubit identity.
#[must_use]
pub fn identity() -> DenseUnitaryMatrix {
    DenseUnitaryMatrix::identity(2)
}

/// Returns a unitary matrix representing the `X` operation.
#[must_use]
pub fn x() -> DenseUnitaryMatrix {
    DenseUnitaryMatrix::new_unchecked(array![
        [Complex64::zero(), Complex64::one()],
        [Complex64::one(), Complex64::zero()]
    ])
}

/// Returns a unitary matrix representing the `Y` operation.
#[must_use]
pub fn y() -> DenseUnitaryMatrix {
    DenseUnitaryMatrix::new_unchecked(array![
        [Complex64::zero(), -Complex64::i()],
        [Complex64::i(), Complex64::zero()]
    ])
}

/// Returns a unitary matrix representing the `Z` operation.
#[must_use]
pub fn z() -> DenseUnitaryMatrix {
    DenseUnitaryMatrix::new_unchecked(array![
        [Complex64::one(), Complex64::zero()],
        [Complex64::zero(), -Complex64::one()]
    ])
}

/// Returns a unitary matrix representing the `S` operation.
#[must_use]
pub fn s() -> DenseUnitaryMatrix {
    DenseUnitaryMatrix::new_unchecked(array![
        [Complex64::one(), Complex64::zero()],
        [Complex64::zero(), Complex64::i()]
    ])
}

#[must_use]
pub fn sdag() -> DenseUnitaryMatrix {
    s().dagger()
}

/// Returns a unitary matrix representing the `T` operation.
#[must_use]
pub fn t() -> DenseUnitaryMatrix {
    DenseUnitaryMatrix::new_unchecked(array![
        [Complex64::one(), Complex64::zero()],
        [
            Complex64::zero(),
            Complex64::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2)
        ]
    ])
}

#[must_use]
pub fn tdag() -> DenseUnitaryMatrix {
    t().dagger()
}

/// Returns a unitary matrix representing the single-qubit Hadamard transformation.
#[must_use]
pub fn h() -> DenseUnitaryMatrix {
    DenseUnitaryMatrix::new_unchecked(
        array![
            [Complex64::one(), Complex64::one()],
            [Complex64::one(), -Complex64::one()]
        ] * FRAC_1_SQRT_2,
    )
}

/// Returns a unitary matrix representing the `Rx` operation with the given angle.
#[must_use]
pub fn rx(theta: f64) -> DenseUnitaryMatrix {
    let cos_theta = f64::cos(theta / 2.0);
    let sin_theta = f64::sin(theta / 2.0);
    DenseUnitaryMatrix::new_unchecked(array![
        [
            Complex64::new(cos_theta, 0.0),
            Complex64::new(0.0, -sin_theta)
        ],
        [
            Complex64::new(0.0, -sin_theta),
            Complex64::new(cos_theta, 0.0)
        ]
    ])
}

/// Returns a unitary matrix representing the `Ry` operation with the given angle.
#[must_use]
pub fn ry(theta: f64) -> DenseUnitaryMatrix {
    let cos_theta = f64::cos(theta / 2.0);
    let sin_theta = f64::sin(theta / 2.0);
    DenseUnitaryMatrix::new_unchecked(array![
        [
            Complex64::new(cos_theta, 0.0),
            Complex64::new(-sin_theta, 0.0)
        ],
        [
            Complex64::new(sin_theta, 0.0),
            Complex64::new(cos_theta, 0.0)
        ]
    ])
}

/// Returns a unitary matrix representing the `Rz` operation with the given angle.
#[must_use]
pub fn rz(theta: f64) -> DenseUnitaryMatrix {
    let cos_theta = f64::cos(theta / 2.0);
    let sin_theta = f64::sin(theta / 2.0);
    DenseUnitaryMatrix::new_unchecked(array![
        [Complex64::new(cos_theta, -sin_theta), Complex64::zero()],
        [Complex64::zero(), Complex64::new(cos_theta, sin_theta)]
    ])
}

#[must_use]
pub fn x90() -> DenseUnitaryMatrix {
    rx(FRAC_PI_2)
}

#[must_use]
pub fn y90() -> DenseUnitaryMatrix {
    ry(FRAC_PI_2)
}

#[must_use]
pub fn z90() -> DenseUnitaryMatrix {
    rz(FRAC_PI_2)
}

#[must_use]
pub fn mx90() -> DenseUnitaryMatrix {
    rx(-FRAC_PI_2)
}

#[must_use]
pub fn my90() -> DenseUnitaryMatrix {
    ry(-FRAC_PI_2)
}

#[must_use]
pub fn mz90() -> DenseUnitaryMatrix {
    rz(-FRAC_PI_2)
}

/// Returns a unitary matrix representing the two-qubit controlled `X`, control first.
#[must_use]
pub fn cnot() -> DenseUnitaryMatrix {
    x().control()
}

/// Returns a unitary matrix representing the two-qubit controlled `Z`.
#[must_use]
pub fn cz() -> DenseUnitaryMatrix {
    z().control()
}

/// Returns a unitary matrix exchanging the state of two qubits.
#[must_use]
pub fn swap() -> DenseUnitaryMatrix {
    let (o, l) = (Complex64::zero(), Complex64::one());
    DenseUnitaryMatrix::new_unchecked(array![
        [l, o, o, o],
        [o, o, l, o],
        [o, l, o, o],
        [o, o, o, l]
    ])
}

/// Returns the controlled phase shift by `theta`.
#[must_use]
pub fn cr(theta: f64) -> DenseUnitaryMatrix {
    let (o, l) = (Complex64::zero(), Complex64::one());
    DenseUnitaryMatrix::new_unchecked(array![
        [l, o, o, o],
        [o, l, o, o],
        [o, o, l, o],
        [o, o, o, Complex64::from_polar(1.0, theta)]
    ])
}

/// Returns the controlled phase shift by `pi / 2^(k - 1)`. For `k <= 0` the angle is a whole
/// multiple of `2 pi`, so the gate is the identity.
#[must_use]
pub fn crk(k: i32) -> DenseUnitaryMatrix {
    if k <= 0 {
        return cr(0.0);
    }
    cr(PI / 2.0_f64.powi(k - 1))
}

/// Returns a unitary matrix representing the three-qubit Toffoli gate, controls first.
#[must_use]
pub fn toffoli() -> DenseUnitaryMatrix {
    cnot().control()
}

/// Looks up a gate by its circuit-language name. Parameterized gates (`Rx`, `Ry`, `Rz`, `CR`)
/// expect an angle; `CRk` expects an integer-valued parameter. Returns `None` for an unknown name
/// or a missing, superfluous or non-integer parameter.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn by_name(name: &str, parameter: Option<f64>) -> Option<DenseUnitaryMatrix> {
    match (name, parameter) {
        ("CNOT", None) => Some(cnot()),
        ("CZ", None) => Some(cz()),
        ("H", None) => Some(h()),
        ("I", None) => Some(identity()),
        ("mX90", None) => Some(mx90()),
        ("mY90", None) => Some(my90()),
        ("mZ90", None) => Some(mz90()),
        ("S", None) => Some(s()),
        ("Sdag", None) => Some(sdag()),
        ("SWAP", None) => Some(swap()),
        ("T", None) => Some(t()),
        ("Tdag", None) => Some(tdag()),
        ("TOFFOLI", None) => Some(toffoli()),
        ("X", None) => Some(x()),
        ("X90", None) => Some(x90()),
        ("Y", None) => Some(y()),
        ("Y90", None) => Some(y90()),
        ("Z", None) => Some(z()),
        ("Z90", None) => Some(z90()),
        ("CR", Some(theta)) => Some(cr(theta)),
        ("Rx", Some(theta)) => Some(rx(theta)),
        ("Ry", Some(theta)) => Some(ry(theta)),
        ("Rz", Some(theta)) => Some(rz(theta)),
        ("CRk", Some(k))
            if (k - k.round()).is_nearly_zero()
                && (f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(&k) =>
        {
            Some(crk(k.round() as i32))
        }
        _ => None,
    }
}
