// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::config::EPSILON;
use num_complex::Complex64;

/// Comparison against zero within the engine-wide [`EPSILON`].
pub trait NearlyZero {
    fn is_nearly_zero(&self) -> bool;
}

impl NearlyZero for f64 {
    fn is_nearly_zero(&self) -> bool {
        self.abs() <= EPSILON
    }
}

impl NearlyZero for Complex64 {
    // Both parts are checked independently, so a value is only negligible when neither
    // its real nor its imaginary part exceeds epsilon.
    fn is_nearly_zero(&self) -> bool {
        self.re.is_nearly_zero() && self.im.is_nearly_zero()
    }
}
