// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use criterion::{criterion_group, criterion_main, Criterion};
use quantum_circuit_backend::*;

/// Number of qubits in the benchmarked register. Every qubit starts in superposition, so each
/// gate touches every one of the `2^QUBITS` amplitudes.
const QUBITS: usize = 10;

fn superposition() -> QuantumState {
    let mut state = QuantumState::new(QUBITS, 0).expect("state should be created");
    let h = gates::h();
    for qubit in 0..QUBITS {
        state.apply(&h, &[qubit]);
    }
    state
}

macro_rules! bench_gate {
    ($c:ident, $gate:expr, $arity:expr, $desc:expr) => {
        $c.bench_function($desc, |b| {
            let gate = $gate;
            let mut state = superposition();
            b.iter(|| {
                for qubit in 0..QUBITS - $arity + 1 {
                    let operands = (qubit..qubit + $arity).collect::<Vec<_>>();
                    state.apply(&gate, &operands);
                }
            })
        });
    };
}

pub fn x_gate(c: &mut Criterion) {
    bench_gate!(c, gates::x(), 1, "X Gate");
}

pub fn y_gate(c: &mut Criterion) {
    bench_gate!(c, gates::y(), 1, "Y Gate");
}

pub fn z_gate(c: &mut Criterion) {
    bench_gate!(c, gates::z(), 1, "Z Gate");
}

pub fn h_gate(c: &mut Criterion) {
    bench_gate!(c, gates::h(), 1, "H Gate");
}

pub fn s_gate(c: &mut Criterion) {
    bench_gate!(c, gates::s(), 1, "S Gate");
}

pub fn sdag_gate(c: &mut Criterion) {
    bench_gate!(c, gates::sdag(), 1, "S Adj Gate");
}

pub fn t_gate(c: &mut Criterion) {
    bench_gate!(c, gates::t(), 1, "T Gate");
}

pub fn rx_gate(c: &mut Criterion) {
    bench_gate!(c, gates::rx(std::f64::consts::PI / 7.0), 1, "Rx Gate");
}

pub fn ry_gate(c: &mut Criterion) {
    bench_gate!(c, gates::ry(std::f64::consts::PI / 7.0), 1, "Ry Gate");
}

pub fn rz_gate(c: &mut Criterion) {
    bench_gate!(c, gates::rz(std::f64::consts::PI / 7.0), 1, "Rz Gate");
}

pub fn cnot_gate(c: &mut Criterion) {
    bench_gate!(c, gates::cnot(), 2, "CNOT Gate");
}

pub fn toffoli_gate(c: &mut Criterion) {
    bench_gate!(c, gates::toffoli(), 3, "Toffoli Gate");
}

criterion_group!(
    benches,
    x_gate,
    y_gate,
    z_gate,
    h_gate,
    s_gate,
    sdag_gate,
    t_gate,
    rx_gate,
    ry_gate,
    rz_gate,
    cnot_gate,
    toffoli_gate
);
criterion_main!(benches);
