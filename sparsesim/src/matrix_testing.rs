// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![allow(clippy::cast_precision_loss)]

use ndarray::{Array1, Array2};
use num_complex::Complex64;
use num_traits::Zero;

use crate::{gates, DenseUnitaryMatrix, QuantumState};

/// Expands a gate acting on `operands` into the full matrix over the whole register, so that it
/// can be applied directly to the dense state vector.
fn expand(
    matrix: &DenseUnitaryMatrix,
    operands: &[usize],
    number_of_qubits: usize,
) -> Array2<Complex64> {
    let size = 1_usize << number_of_qubits;
    let mask = operands.iter().fold(0_usize, |acc, &q| acc | (1 << q));
    let reduce = |index: usize| {
        operands
            .iter()
            .fold(0_usize, |acc, &q| (acc << 1) | ((index >> q) & 1))
    };
    Array2::from_shape_fn((size, size), |(row, column)| {
        if row & !mask == column & !mask {
            matrix.at(reduce(row), reduce(column))
        } else {
            Complex64::zero()
        }
    })
}

fn are_equal_to_precision(actual: &Array1<Complex64>, expected: &Array1<Complex64>) -> bool {
    // If we use assert_eq here, we'll get bitten by finite precision.
    (actual - expected).map(|x| x.norm()).sum() <= 1e-10
}

/// Applies each operation to a sparse state and, through its expanded matrix, to a dense state
/// vector, checking after every step that both agree.
fn assert_matches_dense(number_of_qubits: usize, operations: &[(DenseUnitaryMatrix, Vec<usize>)]) {
    let mut state = QuantumState::new(number_of_qubits, 0).expect("state should be created");
    let mut expected = Array1::from(state.to_vec());
    for (matrix, operands) in operations {
        state.apply(matrix, operands);
        expected = expand(matrix, operands, number_of_qubits).dot(&expected);
        let actual = Array1::from(state.to_vec());
        assert!(
            are_equal_to_precision(&actual, &expected),
            "after {operands:?}: {actual} != {expected}"
        );
    }
    assert!(state.is_normalized());
}

/// Puts every qubit of the register into an unbalanced superposition with distinct phases, so
/// that mistakes in operand order show up in the amplitudes.
fn preparation(number_of_qubits: usize) -> Vec<(DenseUnitaryMatrix, Vec<usize>)> {
    (0..number_of_qubits)
        .flat_map(|q| {
            [
                (gates::ry(0.4 + 0.3 * q as f64), vec![q]),
                (gates::rz(0.2 + 0.5 * q as f64), vec![q]),
            ]
        })
        .collect()
}

fn assert_gate_on_all_operands(gate: &DenseUnitaryMatrix, number_of_qubits: usize) {
    let arity = gate.number_of_qubits().expect("gate should have a power of two size");
    let mut operand_lists = vec![vec![]];
    for _ in 0..arity {
        operand_lists = operand_lists
            .into_iter()
            .flat_map(|operands: Vec<usize>| {
                (0..number_of_qubits)
                    .filter(|q| !operands.contains(q))
                    .map(|q| {
                        let mut next = operands.clone();
                        next.push(q);
                        next
                    })
                    .collect::<Vec<_>>()
            })
            .collect();
    }

    for operands in operand_lists {
        let mut operations = preparation(number_of_qubits);
        operations.push((gate.clone(), operands));
        assert_matches_dense(number_of_qubits, &operations);
    }
}

#[test]
fn expand_places_control_first() {
    let expanded = expand(&gates::cnot(), &[1, 0], 2);
    // Control on qubit 1 flips qubit 0: |10⟩ <-> |11⟩.
    assert_eq!(expanded[[3, 2]], Complex64::new(1.0, 0.0));
    assert_eq!(expanded[[2, 3]], Complex64::new(1.0, 0.0));
    assert_eq!(expanded[[1, 1]], Complex64::new(1.0, 0.0));
    assert_eq!(expanded[[2, 2]], Complex64::zero());
}

#[test]
fn single_qubit_gates_match_dense() {
    for gate in [
        gates::x(),
        gates::y(),
        gates::z(),
        gates::h(),
        gates::s(),
        gates::tdag(),
        gates::rx(1.1),
        gates::ry(-0.7),
        gates::x90(),
        gates::my90(),
    ] {
        assert_gate_on_all_operands(&gate, 3);
    }
}

#[test]
fn two_qubit_gates_match_dense() {
    for gate in [gates::cnot(), gates::cz(), gates::swap(), gates::cr(0.9), gates::crk(3)] {
        assert_gate_on_all_operands(&gate, 3);
    }
}

#[test]
fn three_qubit_gates_match_dense() {
    assert_gate_on_all_operands(&gates::toffoli(), 4);
    assert_gate_on_all_operands(&gates::h().control().control(), 3);
}

#[test]
fn circuits_match_dense() {
    let mut operations = preparation(4);
    operations.extend([
        (gates::h(), vec![2]),
        (gates::cnot(), vec![2, 0]),
        (gates::toffoli(), vec![0, 2, 3]),
        (gates::swap(), vec![3, 1]),
        (gates::t(), vec![1]),
        (gates::cr(0.3).inverse(), vec![1, 2]),
        (gates::ry(0.8).power(3.0).expect("power should succeed"), vec![0]),
        (gates::crk(2).control(), vec![3, 0, 1]),
    ]);
    assert_matches_dense(4, &operations);
}
