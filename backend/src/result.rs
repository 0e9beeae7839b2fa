// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Per-shot execution state and the aggregation of shots into a [`SimulationResult`].

use bitvec::vec::BitVec;
use quantum_sparse_sim::{
    config::{EPSILON, OUTPUT_DECIMALS, ZERO_CYCLE_SIZE},
    BasisVector, QuantumState, StateError,
};
use std::{collections::BTreeMap, fmt};

/// Everything one shot mutates: the quantum state, the last measured outcome of every qubit and
/// the classical bits written by measurements.
#[derive(Debug, Clone)]
pub struct SimulationIterationContext {
    pub state: QuantumState,
    pub measurement_register: BasisVector,
    pub bit_measurement_register: BitVec,
}

impl SimulationIterationContext {
    /// Creates a context in the ground state with cleared registers.
    /// # Errors
    ///
    /// Returns a [`StateError`] if either register size is invalid.
    pub fn new(number_of_qubits: usize, number_of_bits: usize) -> Result<Self, StateError> {
        Self::with_zero_cycle_size(number_of_qubits, number_of_bits, ZERO_CYCLE_SIZE)
    }

    /// Creates a context whose state purges negligible amplitudes every `zero_cycle_size` gates.
    /// # Errors
    ///
    /// Returns a [`StateError`] if either register size is invalid.
    pub fn with_zero_cycle_size(
        number_of_qubits: usize,
        number_of_bits: usize,
        zero_cycle_size: u64,
    ) -> Result<Self, StateError> {
        Ok(Self {
            state: QuantumState::new(number_of_qubits, number_of_bits)?
                .with_zero_cycle_size(zero_cycle_size),
            measurement_register: BasisVector::default(),
            bit_measurement_register: BitVec::repeat(false, number_of_bits),
        })
    }
}

/// Collects finished shots. Only the state of the most recent shot is kept; measurement outcomes of
/// every shot are counted.
#[derive(Debug)]
pub struct SimulationIterationAccumulator {
    number_of_qubits: usize,
    state: Option<QuantumState>,
    measurements: BTreeMap<String, u64>,
    bit_measurements: BTreeMap<String, u64>,
    count: u64,
}

impl SimulationIterationAccumulator {
    #[must_use]
    pub fn new(number_of_qubits: usize) -> Self {
        Self {
            number_of_qubits,
            state: None,
            measurements: BTreeMap::new(),
            bit_measurements: BTreeMap::new(),
            count: 0,
        }
    }

    /// Records a finished shot.
    pub fn add(&mut self, context: SimulationIterationContext) {
        let measured = context
            .measurement_register
            .to_substring(self.number_of_qubits);
        *self.measurements.entry(measured).or_default() += 1;

        let bits = context
            .bit_measurement_register
            .iter()
            .rev()
            .map(|bit| if *bit { '1' } else { '0' })
            .collect::<String>();
        *self.bit_measurements.entry(bits).or_default() += 1;

        self.state = Some(context.state);
        self.count += 1;
    }

    /// Number of shots recorded so far.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Builds the result of the run, with `shots_requested` as the number of shots the caller asked
    /// for.
    pub fn get_simulation_result(&mut self, shots_requested: u64) -> SimulationResult {
        let number_of_qubits = self.number_of_qubits;
        let mut state = Vec::new();
        if let Some(last) = self.state.as_mut() {
            last.for_each_sorted(|index, value| {
                state.push(SuperposedState {
                    value: index.to_substring(number_of_qubits),
                    amplitude: Amplitude {
                        real: value.re,
                        imag: value.im,
                        norm: value.norm_sqr(),
                    },
                });
            });
        }

        let to_measurements = |counts: &BTreeMap<String, u64>| {
            counts
                .iter()
                .map(|(state, &count)| Measurement {
                    state: state.clone(),
                    count,
                })
                .collect::<Vec<_>>()
        };

        SimulationResult {
            shots_requested,
            shots_done: self.count,
            state,
            measurements: to_measurements(&self.measurements),
            bit_measurements: to_measurements(&self.bit_measurements),
        }
    }
}

/// An amplitude together with its probability.
#[derive(Debug, Clone, Copy)]
pub struct Amplitude {
    pub real: f64,
    pub imag: f64,
    pub norm: f64,
}

impl PartialEq for Amplitude {
    fn eq(&self, other: &Self) -> bool {
        (self.real - other.real).abs() < EPSILON
            && (self.imag - other.imag).abs() < EPSILON
            && (self.norm - other.norm).abs() < EPSILON
    }
}

/// One term of the final state, keyed by its basis vector written most significant qubit first.
#[derive(Debug, Clone, PartialEq)]
pub struct SuperposedState {
    pub value: String,
    pub amplitude: Amplitude,
}

/// How often a bitstring was observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Measurement {
    pub state: String,
    pub count: u64,
}

/// The outcome of a run: the state after the last shot, and histograms of the qubit outcomes and
/// the classical bits over all shots. All lists are sorted by bitstring.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    pub shots_requested: u64,
    pub shots_done: u64,
    pub state: Vec<SuperposedState>,
    pub measurements: Vec<Measurement>,
    pub bit_measurements: Vec<Measurement>,
}

impl SimulationResult {
    /// Reads the value of qubit `qubit_index` from a rendered state, where index zero is the
    /// right-most character. Returns `None` if the index is past the end of the string or the
    /// character is not a binary digit.
    #[must_use]
    pub fn qubit_state(state_string: &str, qubit_index: usize) -> Option<bool> {
        Self::read_position(state_string, qubit_index)
    }

    /// Reads the value of bit `bit_index` from a rendered bit measurement, where index zero is the
    /// right-most character.
    #[must_use]
    pub fn bit_measurement(state_string: &str, bit_index: usize) -> Option<bool> {
        Self::read_position(state_string, bit_index)
    }

    fn read_position(state_string: &str, index: usize) -> Option<bool> {
        match *state_string.as_bytes().iter().rev().nth(index)? {
            b'0' => Some(false),
            b'1' => Some(true),
            _ => None,
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn write_measurements(
        &self,
        f: &mut fmt::Formatter<'_>,
        title: &str,
        measurements: &[Measurement],
    ) -> fmt::Result {
        writeln!(f, "{title}:")?;
        for measurement in measurements {
            let ratio = measurement.count as f64 / self.shots_done as f64;
            writeln!(
                f,
                "\t{}  {}/{}  (count/shots % = {:.*})",
                measurement.state, measurement.count, self.shots_done, OUTPUT_DECIMALS, ratio
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "State:")?;
        for superposed_state in &self.state {
            let amplitude = &superposed_state.amplitude;
            writeln!(
                f,
                "\t{}  {:.*} + {:.*}i  (norm = {:.*})",
                superposed_state.value,
                OUTPUT_DECIMALS,
                amplitude.real,
                OUTPUT_DECIMALS,
                amplitude.imag,
                OUTPUT_DECIMALS,
                amplitude.norm
            )?;
        }
        self.write_measurements(f, "Measurements", &self.measurements)?;
        self.write_measurements(f, "Bit measurements", &self.bit_measurements)
    }
}
