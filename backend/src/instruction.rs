// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::{error::SimulationError, result::SimulationIterationContext};
use quantum_sparse_sim::{DenseUnitaryMatrix, RandomGenerator};

/// A single step of a circuit, with every operand already resolved to a register index.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    /// Applies `matrix` to `operands`, the first operand being the most significant.
    Unitary {
        matrix: DenseUnitaryMatrix,
        operands: Vec<usize>,
    },

    /// Measures `qubit` and stores the outcome in classical `bit`.
    Measure { qubit: usize, bit: usize },

    /// Resets one qubit, or every qubit when `qubit` is `None`.
    Reset { qubit: Option<usize> },

    /// Runs `instruction` only when the last measured outcome of every qubit in `control_bits` is
    /// one.
    Controlled {
        control_bits: Vec<usize>,
        instruction: Box<Instruction>,
    },
}

impl Instruction {
    #[must_use]
    pub fn unitary(matrix: DenseUnitaryMatrix, operands: Vec<usize>) -> Self {
        Self::Unitary { matrix, operands }
    }

    #[must_use]
    pub fn measure(qubit: usize, bit: usize) -> Self {
        Self::Measure { qubit, bit }
    }

    #[must_use]
    pub fn reset(qubit: usize) -> Self {
        Self::Reset { qubit: Some(qubit) }
    }

    #[must_use]
    pub fn reset_all() -> Self {
        Self::Reset { qubit: None }
    }

    #[must_use]
    pub fn controlled(control_bits: Vec<usize>, instruction: Instruction) -> Self {
        Self::Controlled {
            control_bits,
            instruction: Box::new(instruction),
        }
    }

    /// The qubits this instruction acts on. An unconditional reset of the whole register reports
    /// no qubits.
    #[must_use]
    pub fn qubit_indices(&self) -> Vec<usize> {
        match self {
            Self::Unitary { operands, .. } => operands.clone(),
            Self::Measure { qubit, .. } | Self::Reset { qubit: Some(qubit) } => vec![*qubit],
            Self::Reset { qubit: None } => Vec::new(),
            Self::Controlled { instruction, .. } => instruction.qubit_indices(),
        }
    }

    /// The inverse of a unitary instruction.
    /// # Errors
    ///
    /// Returns [`SimulationError::NotUnitary`] for measurements and resets.
    pub fn inverse(&self) -> Result<Self, SimulationError> {
        self.map_matrix(|matrix, operands| Ok((matrix.inverse(), operands.to_vec())))
    }

    /// A unitary instruction raised to an integer power.
    /// # Errors
    ///
    /// Returns [`SimulationError::NotUnitary`] for measurements and resets, and a matrix error
    /// if the exponent is not integral.
    pub fn power(&self, exponent: f64) -> Result<Self, SimulationError> {
        self.map_matrix(|matrix, operands| Ok((matrix.power(exponent)?, operands.to_vec())))
    }

    /// A unitary instruction with an additional leading control qubit.
    /// # Errors
    ///
    /// Returns [`SimulationError::NotUnitary`] for measurements and resets.
    pub fn control(&self, control_qubit: usize) -> Result<Self, SimulationError> {
        self.map_matrix(|matrix, operands| {
            let mut controlled_operands = Vec::with_capacity(operands.len() + 1);
            controlled_operands.push(control_qubit);
            controlled_operands.extend_from_slice(operands);
            Ok((matrix.control(), controlled_operands))
        })
    }

    fn map_matrix<F>(&self, f: F) -> Result<Self, SimulationError>
    where
        F: FnOnce(
            &DenseUnitaryMatrix,
            &[usize],
        ) -> Result<(DenseUnitaryMatrix, Vec<usize>), SimulationError>,
    {
        match self {
            Self::Unitary { matrix, operands } => {
                let (matrix, operands) = f(matrix, operands)?;
                Ok(Self::Unitary { matrix, operands })
            }
            Self::Controlled {
                control_bits,
                instruction,
            } => Ok(Self::controlled(
                control_bits.clone(),
                instruction.map_matrix(f)?,
            )),
            Self::Measure { .. } | Self::Reset { .. } => Err(SimulationError::NotUnitary),
        }
    }

    /// Runs the instruction against one shot's state and registers.
    pub fn execute(&self, context: &mut SimulationIterationContext, rng: &mut RandomGenerator) {
        match self {
            Self::Unitary { matrix, operands } => {
                context.state.apply(matrix, operands);
            }
            Self::Measure { qubit, bit } => {
                let _ = context.state.apply_measure(
                    *qubit,
                    *bit,
                    || rng.random_zero_one_double(),
                    &mut context.measurement_register,
                    &mut context.bit_measurement_register,
                );
            }
            Self::Reset { qubit: Some(qubit) } => context.state.apply_reset(*qubit),
            Self::Reset { qubit: None } => context.state.apply_reset_all(),
            Self::Controlled {
                control_bits,
                instruction,
            } => {
                if control_bits
                    .iter()
                    .all(|&control| context.measurement_register.test(control))
                {
                    instruction.execute(context, rng);
                }
            }
        }
    }
}
