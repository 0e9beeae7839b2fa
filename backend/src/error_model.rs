// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::error::SimulationError;
use log::debug;
use quantum_sparse_sim::{gates, QuantumState, RandomGenerator};

/// Name under which the depolarizing channel is selected.
pub const DEPOLARIZING_CHANNEL: &str = "depolarizing_channel";

/// Noise injected into the state before every instruction of a shot.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ErrorModel {
    #[default]
    None,
    DepolarizingChannel(DepolarizingChannel),
}

impl ErrorModel {
    /// Resolves an error model from its name and numeric parameters. An empty name selects no
    /// error model.
    /// # Errors
    ///
    /// Returns [`SimulationError::UnknownErrorModel`] for an unrecognized name, and a parameter
    /// error if the parameters do not fit the model.
    pub fn from_name(name: &str, parameters: &[f64]) -> Result<Self, SimulationError> {
        match name {
            "" => Ok(Self::None),
            DEPOLARIZING_CHANNEL => {
                let [probability] = parameters else {
                    return Err(SimulationError::InvalidParameterCount {
                        model: name.to_string(),
                        expected: 1,
                        found: parameters.len(),
                    });
                };
                let channel = DepolarizingChannel::new(*probability)?;
                debug!("Using depolarizing channel error model with probability {probability}");
                Ok(Self::DepolarizingChannel(channel))
            }
            _ => Err(SimulationError::UnknownErrorModel(name.to_string())),
        }
    }

    /// Gives the error model a chance to disturb the state.
    pub fn add_error(&self, state: &mut QuantumState, rng: &mut RandomGenerator) {
        match self {
            Self::None => {}
            Self::DepolarizingChannel(channel) => channel.add_error(state, rng),
        }
    }
}

/// With probability `p`, applies one of `X`, `Y` or `Z`, chosen uniformly, to a uniformly chosen
/// qubit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepolarizingChannel {
    probability: f64,
}

impl DepolarizingChannel {
    /// # Errors
    ///
    /// Returns [`SimulationError::InvalidProbability`] unless `probability` is in [0, 1].
    pub fn new(probability: f64) -> Result<Self, SimulationError> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(SimulationError::InvalidProbability(probability));
        }
        Ok(Self { probability })
    }

    #[must_use]
    pub fn probability(self) -> f64 {
        self.probability
    }

    /// Draws once to decide whether and which error happens, and once more to pick the qubit.
    #[allow(clippy::cast_possible_truncation)]
    pub fn add_error(self, state: &mut QuantumState, rng: &mut RandomGenerator) {
        let r = rng.random_zero_one_double();
        if r >= self.probability {
            return;
        }

        let last_qubit = state.number_of_qubits() as u64 - 1;
        let qubit = rng.random_integer(0, last_qubit) as usize;
        let pauli = if r < self.probability / 3.0 {
            gates::x()
        } else if r < 2.0 * self.probability / 3.0 {
            gates::y()
        } else {
            gates::z()
        };
        state.apply(&pauli, &[qubit]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quantum_sparse_sim::BasisVector;

    #[test]
    fn test_from_name() {
        assert_eq!(ErrorModel::from_name("", &[]), Ok(ErrorModel::None));
        assert_eq!(
            ErrorModel::from_name("depolarizing_channel", &[0.25]),
            Ok(ErrorModel::DepolarizingChannel(
                DepolarizingChannel::new(0.25).expect("probability should be valid")
            ))
        );
        assert_eq!(
            ErrorModel::from_name("bit_flip", &[0.25]),
            Err(SimulationError::UnknownErrorModel("bit_flip".to_string()))
        );
        assert_eq!(
            ErrorModel::from_name("depolarizing_channel", &[]),
            Err(SimulationError::InvalidParameterCount {
                model: "depolarizing_channel".to_string(),
                expected: 1,
                found: 0
            })
        );
        assert_eq!(
            ErrorModel::from_name("depolarizing_channel", &[1.5]),
            Err(SimulationError::InvalidProbability(1.5))
        );
    }

    #[test]
    fn test_channel_is_copied_into_calls() {
        let model = ErrorModel::from_name("depolarizing_channel", &[0.25])
            .expect("error model should resolve");
        let ErrorModel::DepolarizingChannel(channel) = model else {
            panic!("expected a depolarizing channel, got {model:?}");
        };
        let mut state = QuantumState::new(2, 0).expect("state should be created");
        let mut rng = RandomGenerator::from_seed_u64(3);
        for _ in 0..50 {
            channel.add_error(&mut state, &mut rng);
            model.add_error(&mut state, &mut rng);
        }
        assert!((channel.probability() - 0.25).abs() < f64::EPSILON);
        assert_eq!(model, ErrorModel::DepolarizingChannel(channel));
        assert!(state.is_normalized());
    }

    #[test]
    fn test_no_error_model_leaves_state() {
        let mut state = QuantumState::new(3, 0).expect("state should be created");
        let mut rng = RandomGenerator::from_seed_u64(5);
        for _ in 0..100 {
            ErrorModel::None.add_error(&mut state, &mut rng);
        }
        assert!((state.amplitude(BasisVector::default()).re - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_probability_never_disturbs() {
        let channel = DepolarizingChannel::new(0.0).expect("probability should be valid");
        let mut state = QuantumState::new(3, 0).expect("state should be created");
        let mut rng = RandomGenerator::from_seed_u64(5);
        for _ in 0..1000 {
            channel.add_error(&mut state, &mut rng);
        }
        assert!((state.amplitude(BasisVector::default()).re - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_full_probability_always_disturbs() {
        let channel = DepolarizingChannel::new(1.0).expect("probability should be valid");
        let mut rng = RandomGenerator::from_seed_u64(5);
        let mut flipped = 0;
        for _ in 0..300 {
            let mut state = QuantumState::new(1, 0).expect("state should be created");
            channel.add_error(&mut state, &mut rng);
            // Z leaves |0⟩ unchanged.
            if state.probability_of_measuring_one(0) > 0.5 {
                flipped += 1;
            }
        }
        // Two out of three Paulis flip the qubit.
        assert!((150..250).contains(&flipped), "flipped {flipped} times");
    }

    #[test]
    fn test_error_stays_in_register() {
        let channel = DepolarizingChannel::new(1.0).expect("probability should be valid");
        let mut rng = RandomGenerator::from_seed_u64(9);
        let mut state = QuantumState::new(2, 0).expect("state should be created");
        for _ in 0..200 {
            channel.add_error(&mut state, &mut rng);
            assert!(state.is_normalized());
        }
    }
}
