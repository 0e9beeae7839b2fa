// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::{
    error::SimulationError, error_model::ErrorModel, instruction::Instruction,
    result::SimulationIterationContext,
};
use quantum_sparse_sim::{
    config::{MAX_BIT_NUMBER, MAX_QUBIT_NUMBER},
    RandomGenerator, StateError,
};

/// An ordered list of instructions over registers of fixed size.
#[derive(Debug, Clone, PartialEq)]
pub struct Circuit {
    number_of_qubits: usize,
    number_of_bits: usize,
    instructions: Vec<Instruction>,
}

impl Circuit {
    /// Creates an empty circuit.
    /// # Errors
    ///
    /// Returns [`SimulationError::State`] if there are no qubits or either register exceeds its
    /// maximum size.
    pub fn new(number_of_qubits: usize, number_of_bits: usize) -> Result<Self, SimulationError> {
        if number_of_qubits == 0 {
            return Err(StateError::NoQubits.into());
        }
        if number_of_qubits > MAX_QUBIT_NUMBER {
            return Err(StateError::TooManyQubits {
                requested: number_of_qubits,
                max: MAX_QUBIT_NUMBER,
            }
            .into());
        }
        if number_of_bits > MAX_BIT_NUMBER {
            return Err(StateError::TooManyBits {
                requested: number_of_bits,
                max: MAX_BIT_NUMBER,
            }
            .into());
        }
        Ok(Self {
            number_of_qubits,
            number_of_bits,
            instructions: Vec::new(),
        })
    }

    /// Appends an instruction. Operand indices are expected to be in range and are only checked
    /// in debug builds.
    pub fn add_instruction(&mut self, instruction: Instruction) -> &mut Self {
        debug_assert!(
            instruction
                .qubit_indices()
                .iter()
                .all(|&qubit| qubit < self.number_of_qubits),
            "Instruction {instruction:?} uses a qubit outside of a register of {} qubits.",
            self.number_of_qubits
        );
        self.instructions.push(instruction);
        self
    }

    #[must_use]
    pub fn number_of_qubits(&self) -> usize {
        self.number_of_qubits
    }

    #[must_use]
    pub fn number_of_bits(&self) -> usize {
        self.number_of_bits
    }

    #[must_use]
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Runs one shot from the ground state, consulting `error_model` before every instruction.
    /// # Errors
    ///
    /// Returns a [`SimulationError`] if the shot's registers cannot be created.
    pub fn execute(
        &self,
        error_model: &ErrorModel,
        rng: &mut RandomGenerator,
        zero_cycle_size: u64,
    ) -> Result<SimulationIterationContext, SimulationError> {
        let mut context = SimulationIterationContext::with_zero_cycle_size(
            self.number_of_qubits,
            self.number_of_bits,
            zero_cycle_size,
        )?;
        for instruction in &self.instructions {
            error_model.add_error(&mut context.state, rng);
            instruction.execute(&mut context, rng);
        }
        Ok(context)
    }
}
