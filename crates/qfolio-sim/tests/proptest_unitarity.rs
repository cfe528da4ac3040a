//! Property-based tests for the statevector engine.
//!
//! Random gate sequences must preserve the norm, and every Z-string
//! expectation must stay inside [−1, 1].

use proptest::prelude::*;
use qfolio_ising::ZString;
use qfolio_sim::{Gate, GateSequence, StatevectorSimulator, distribution, expectation};

fn arb_gate(num_qubits: u32) -> impl Strategy<Value = Gate> {
    let angle = -10.0_f64..10.0;
    let single = 0..num_qubits;
    let pair = (0..num_qubits, 0..num_qubits).prop_filter("distinct qubits", |(c, t)| c != t);

    prop_oneof![
        (single.clone(), angle.clone()).prop_map(|(qubit, theta)| Gate::Rx { qubit, theta }),
        (single.clone(), angle.clone()).prop_map(|(qubit, theta)| Gate::Ry { qubit, theta }),
        (single.clone(), angle).prop_map(|(qubit, theta)| Gate::Rz { qubit, theta }),
        single.clone().prop_map(|qubit| Gate::X { qubit }),
        single.prop_map(|qubit| Gate::H { qubit }),
        pair.clone().prop_map(|(control, target)| Gate::Cx { control, target }),
        pair.prop_map(|(control, target)| Gate::Cz { control, target }),
    ]
}

/// Sequences over 2-6 qubits with up to 40 gates.
fn arb_sequence() -> impl Strategy<Value = GateSequence> {
    (2_u32..=6).prop_flat_map(|n| {
        prop::collection::vec(arb_gate(n), 0..=40).prop_map(move |gates| {
            let mut seq = GateSequence::new(n);
            for gate in gates {
                seq.push(gate);
            }
            seq
        })
    })
}

fn arb_sequence_with_term() -> impl Strategy<Value = (GateSequence, ZString)> {
    arb_sequence().prop_flat_map(|seq| {
        let n = seq.num_qubits();
        let term = prop::collection::vec(0..n, 0..=n as usize).prop_map(ZString::new);
        (Just(seq), term)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn norm_is_preserved(seq in arb_sequence()) {
        let sim = StatevectorSimulator::new(seq.num_qubits()).unwrap();
        let state = sim.run(&seq).unwrap();
        prop_assert!((state.norm_sqr() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn expectation_is_bounded((seq, term) in arb_sequence_with_term()) {
        let sim = StatevectorSimulator::new(seq.num_qubits()).unwrap();
        let state = sim.run(&seq).unwrap();
        let value = expectation(&state, &term).unwrap();
        prop_assert!((-1.0 - 1e-12..=1.0 + 1e-12).contains(&value));
    }

    #[test]
    fn distribution_is_normalised(seq in arb_sequence()) {
        let sim = StatevectorSimulator::new(seq.num_qubits()).unwrap();
        let state = sim.run(&seq).unwrap();
        let dist = distribution(&state);
        prop_assert_eq!(dist.len(), 1usize << seq.num_qubits());
        prop_assert!((dist.values().sum::<f64>() - 1.0).abs() < 1e-9);
    }
}
