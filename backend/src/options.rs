// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::{error::SimulationError, error_model::ErrorModel};
use quantum_sparse_sim::config::ZERO_CYCLE_SIZE;

/// Settings of a simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationOptions {
    /// Number of shots to run.
    pub shots: u64,

    /// Seed of the random generator. When absent the generator is seeded from entropy and the run
    /// is not reproducible.
    pub seed: Option<u64>,

    pub error_model: ErrorModel,

    /// Gate applications between two forced purges of negligible amplitudes.
    pub zero_cycle_size: u64,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            shots: 1,
            seed: None,
            error_model: ErrorModel::None,
            zero_cycle_size: ZERO_CYCLE_SIZE,
        }
    }
}

impl SimulationOptions {
    #[must_use]
    pub fn with_shots(mut self, shots: u64) -> Self {
        self.shots = shots;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_error_model(mut self, error_model: ErrorModel) -> Self {
        self.error_model = error_model;
        self
    }

    #[must_use]
    pub fn with_zero_cycle_size(mut self, zero_cycle_size: u64) -> Self {
        self.zero_cycle_size = zero_cycle_size;
        self
    }

    /// Checks the options before a run.
    /// # Errors
    ///
    /// Returns [`SimulationError::InvalidShotCount`] if no shots are requested.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.shots == 0 {
            return Err(SimulationError::InvalidShotCount(self.shots));
        }
        Ok(())
    }
}
