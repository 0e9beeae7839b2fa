// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![deny(clippy::all, clippy::pedantic)]

//! # Circuit execution backend for sparse state simulation.
//! This library runs fully resolved circuits on the sparse state engine from `quantum_sparse_sim`,
//! one shot after another, and aggregates the shots into a [`SimulationResult`]: the state after
//! the last shot together with histograms of the measured qubits and classical bits.

pub mod circuit;
pub mod error;
pub mod error_model;
pub mod instruction;
pub mod options;
pub mod result;

pub use crate::{
    circuit::Circuit,
    error::SimulationError,
    error_model::{DepolarizingChannel, ErrorModel},
    instruction::Instruction,
    options::SimulationOptions,
    result::{
        Amplitude, Measurement, SimulationIterationAccumulator, SimulationIterationContext,
        SimulationResult, SuperposedState,
    },
};
pub use quantum_sparse_sim::{
    gates, BasisVector, DenseUnitaryMatrix, MatrixError, QuantumState, RandomGenerator,
    StateError,
};

use log::{debug, trace};

/// Runs `options.shots` shots of `circuit` and returns the aggregated result. All randomness of
/// the run comes from a single generator, so a seeded run is reproducible.
/// # Errors
///
/// Returns a [`SimulationError`] if the options are invalid.
pub fn execute(
    circuit: &Circuit,
    options: &SimulationOptions,
) -> Result<SimulationResult, SimulationError> {
    options.validate()?;

    let mut rng = options
        .seed
        .map_or_else(RandomGenerator::from_entropy, RandomGenerator::from_seed_u64);
    debug!(
        "Running {} shot(s) of {} instruction(s) on {} qubit(s) and {} bit(s), {}",
        options.shots,
        circuit.instructions().len(),
        circuit.number_of_qubits(),
        circuit.number_of_bits(),
        options
            .seed
            .map_or_else(|| "seeded from entropy".to_string(), |seed| format!("seed {seed}"))
    );

    let mut accumulator = SimulationIterationAccumulator::new(circuit.number_of_qubits());
    for shot in 1..=options.shots {
        let context = circuit.execute(&options.error_model, &mut rng, options.zero_cycle_size)?;
        trace!(
            "Finished shot {shot}, measured {}",
            context
                .measurement_register
                .to_substring(circuit.number_of_qubits())
        );
        accumulator.add(context);
    }

    let result = accumulator.get_simulation_result(options.shots);
    debug!(
        "Finished {} shot(s) with {} distinct measurement outcome(s)",
        result.shots_done,
        result.measurements.len()
    );
    Ok(result)
}
