// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::{basis_vector::BasisVector, config::ZERO_CYCLE_SIZE, nearly_zero::NearlyZero};
use log::trace;
use num_complex::Complex64;
use rustc_hash::FxHashMap;

/// The materialized entries of a sparse state.
pub type SparseMap = FxHashMap<BasisVector, Complex64>;

/// A mapping from basis vector to amplitude over a register of fixed size, where only
/// non-negligible amplitudes are stored.
///
/// Negligible entries produced by linear updates are purged lazily: once every
/// `zero_cycle_size` calls to [`SparseArray::apply_linear`], and before any read that enumerates
/// the entries.
#[derive(Debug, Clone)]
pub struct SparseArray {
    data: SparseMap,
    number_of_qubits: usize,
    zero_counter: u64,
    zero_cycle_size: u64,
}

impl SparseArray {
    /// Creates an empty array over a register of `number_of_qubits` qubits.
    #[must_use]
    pub fn new(number_of_qubits: usize) -> Self {
        Self {
            data: SparseMap::default(),
            number_of_qubits,
            zero_counter: 0,
            zero_cycle_size: ZERO_CYCLE_SIZE,
        }
    }

    /// Sets how many linear updates happen between two forced cleanups.
    #[must_use]
    pub fn with_zero_cycle_size(mut self, zero_cycle_size: u64) -> Self {
        self.zero_cycle_size = zero_cycle_size;
        self
    }

    #[must_use]
    pub fn number_of_qubits(&self) -> usize {
        self.number_of_qubits
    }

    /// Number of materialized entries, including negligible ones not yet purged.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: BasisVector) -> Complex64 {
        debug_assert!(index.fits(self.number_of_qubits), "index out of bounds");
        self.data.get(&index).copied().unwrap_or_default()
    }

    pub fn set(&mut self, index: BasisVector, value: Complex64) {
        debug_assert!(index.fits(self.number_of_qubits), "index out of bounds");
        self.data.insert(index, value);
    }

    pub fn clear(&mut self) {
        self.data.clear();
        self.zero_counter = 0;
    }

    /// Multiplies every amplitude by a real factor.
    pub fn scale(&mut self, factor: f64) {
        self.data.values_mut().for_each(|value| *value *= factor);
    }

    /// Drops every entry for which `predicate` holds.
    pub fn erase_if<F>(&mut self, mut predicate: F)
    where
        F: FnMut(BasisVector, Complex64) -> bool,
    {
        self.data.retain(|&index, &mut value| !predicate(index, value));
    }

    /// Iterates over the stored entries as they are, without purging negligible ones first.
    pub fn iter(&self) -> impl Iterator<Item = (BasisVector, Complex64)> + '_ {
        self.data.iter().map(|(&index, &value)| (index, value))
    }

    /// Visits every non-negligible entry, in no particular order.
    pub fn for_each<F>(&mut self, mut f: F)
    where
        F: FnMut(BasisVector, Complex64),
    {
        self.clean_up_zeros();
        self.data.iter().for_each(|(&index, &value)| f(index, value));
    }

    /// Visits every non-negligible entry in increasing basis vector order.
    pub fn for_each_sorted<F>(&mut self, mut f: F)
    where
        F: FnMut(BasisVector, Complex64),
    {
        self.sorted()
            .into_iter()
            .for_each(|(index, value)| f(index, value));
    }

    /// Returns the non-negligible entries sorted by basis vector.
    pub fn sorted(&mut self) -> Vec<(BasisVector, Complex64)> {
        self.clean_up_zeros();
        let mut entries = self
            .data
            .iter()
            .map(|(&index, &value)| (index, value))
            .collect::<Vec<_>>();
        entries.sort_unstable_by_key(|&(index, _)| index);
        entries
    }

    /// Folds over every non-negligible entry.
    pub fn accumulate<T, F>(&mut self, init: T, mut f: F) -> T
    where
        F: FnMut(T, BasisVector, Complex64) -> T,
    {
        self.clean_up_zeros();
        self.data
            .iter()
            .fold(init, |acc, (&index, &value)| f(acc, index, value))
    }

    /// Sum of the squared magnitudes of all amplitudes.
    pub fn norm(&mut self) -> f64 {
        self.accumulate(0.0, |acc, _, value| acc + value.norm_sqr())
    }

    /// Replaces the contents with the output of `f`, called once per stored entry with an
    /// initially empty map to write contributions into.
    pub fn apply_linear<F>(&mut self, mut f: F)
    where
        F: FnMut(BasisVector, Complex64, &mut SparseMap),
    {
        if self.zero_counter >= self.zero_cycle_size {
            self.clean_up_zeros();
        }
        self.zero_counter += 1;

        let capacity = self.data.len();
        let result = self.data.drain().fold(
            SparseMap::with_capacity_and_hasher(capacity, Default::default()),
            |mut result, (index, value)| {
                f(index, value, &mut result);
                result
            },
        );
        self.data = result;
    }

    /// Drops every negligible entry and restarts the cleanup cycle.
    pub fn clean_up_zeros(&mut self) {
        let before = self.data.len();
        self.data.retain(|_, value| !value.is_nearly_zero());
        if before != self.data.len() {
            trace!(
                "Purged negligible amplitudes, {before} entries reduced to {}",
                self.data.len()
            );
        }
        self.zero_counter = 0;
    }

    /// Expands the array into a dense vector indexed by basis vector value.
    /// # Panics
    ///
    /// This function will panic if the register is too large to be addressed densely.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Complex64> {
        let size = u32::try_from(self.number_of_qubits)
            .ok()
            .and_then(|qubits| 1_usize.checked_shl(qubits))
            .unwrap_or_else(|| {
                panic!(
                    "Register of {} qubits is too large for a dense vector.",
                    self.number_of_qubits
                )
            });
        let mut result = vec![Complex64::default(); size];
        self.data.iter().for_each(|(index, &value)| {
            result[usize::try_from(index.value()).expect("index should fit in a usize")] = value;
        });
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn bv(value: u64) -> BasisVector {
        BasisVector::new(value)
    }

    #[test]
    fn test_get_and_set() {
        let mut array = SparseArray::new(2);
        assert_eq!(array.get(bv(3)), Complex64::default());
        array.set(bv(3), Complex64::new(0.5, 0.5));
        assert_eq!(array.get(bv(3)), Complex64::new(0.5, 0.5));
        assert_eq!(array.len(), 1);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "index out of bounds")]
    fn test_set_outside_register() {
        let mut array = SparseArray::new(2);
        array.set(bv(4), Complex64::new(1.0, 0.0));
    }

    #[test]
    fn test_scale_and_norm() {
        let mut array = SparseArray::new(2);
        array.set(bv(0), Complex64::new(1.0, 0.0));
        array.set(bv(1), Complex64::new(0.0, 1.0));
        assert_relative_eq!(array.norm(), 2.0);
        array.scale(std::f64::consts::FRAC_1_SQRT_2);
        assert_relative_eq!(array.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(array.get(bv(1)).im, std::f64::consts::FRAC_1_SQRT_2);
    }

    #[test]
    fn test_erase_if() {
        let mut array = SparseArray::new(2);
        (0..4).for_each(|i| array.set(bv(i), Complex64::new(0.5, 0.0)));
        array.erase_if(|index, _| index.test(0));
        assert_eq!(array.sorted().iter().map(|e| e.0).collect::<Vec<_>>(), [bv(0), bv(2)]);
    }

    #[test]
    fn test_reads_skip_negligible_entries() {
        let mut array = SparseArray::new(3);
        array.set(bv(5), Complex64::new(1.0, 0.0));
        array.set(bv(2), Complex64::new(1e-15, -1e-15));
        array.set(bv(1), Complex64::new(0.0, 1.0));
        assert_eq!(array.len(), 3);

        let mut visited = Vec::new();
        array.for_each_sorted(|index, _| visited.push(index));
        assert_eq!(visited, [bv(1), bv(5)]);
        assert_eq!(array.len(), 2);
    }

    #[test]
    fn test_apply_linear_rebuilds_map() {
        let mut array = SparseArray::new(1);
        array.set(bv(0), Complex64::new(1.0, 0.0));
        // Fan out each entry into both basis vectors.
        array.apply_linear(|index, value, result| {
            for target in [bv(0), bv(1)] {
                let sign = if index.test(0) && target.test(0) { -1.0 } else { 1.0 };
                *result.entry(target).or_default() +=
                    value * sign * std::f64::consts::FRAC_1_SQRT_2;
            }
        });
        assert_eq!(array.len(), 2);
        // Applying the same transformation again interferes back to a single entry.
        array.apply_linear(|index, value, result| {
            for target in [bv(0), bv(1)] {
                let sign = if index.test(0) && target.test(0) { -1.0 } else { 1.0 };
                *result.entry(target).or_default() +=
                    value * sign * std::f64::consts::FRAC_1_SQRT_2;
            }
        });
        let entries = array.sorted();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].0, bv(0));
        assert_relative_eq!(entries[0].1.re, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_cleanup_cycle() {
        let mut array = SparseArray::new(2).with_zero_cycle_size(3);
        array.set(bv(0), Complex64::new(1.0, 0.0));
        array.set(bv(1), Complex64::new(1e-15, 0.0));
        let identity = |index, value, result: &mut SparseMap| {
            result.insert(index, value);
        };

        for _ in 0..3 {
            array.apply_linear(identity);
            assert_eq!(array.len(), 2);
        }
        // The fourth update starts by purging.
        array.apply_linear(identity);
        assert_eq!(array.len(), 1);
    }

    #[test]
    fn test_to_vec() {
        let mut array = SparseArray::new(2);
        array.set(bv(2), Complex64::new(0.0, 1.0));
        assert_eq!(
            array.to_vec(),
            vec![
                Complex64::default(),
                Complex64::default(),
                Complex64::new(0.0, 1.0),
                Complex64::default()
            ]
        );
    }

    #[test]
    fn test_clear() {
        let mut array = SparseArray::new(2);
        array.set(bv(2), Complex64::new(0.0, 1.0));
        array.clear();
        assert!(array.is_empty());
    }
}
