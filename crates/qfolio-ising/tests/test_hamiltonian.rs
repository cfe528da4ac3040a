//! Tests for the QUBO → Ising pipeline on concrete portfolios.

use approx::assert_abs_diff_eq;
use ndarray::{Array2, array};
use qfolio_ising::{PortfolioReport, ProblemSpec, ZString, build_qubo, to_ising};

fn equal_assets() -> ProblemSpec {
    ProblemSpec::new(3, vec![0.1; 3], Array2::eye(3) * 0.01, 0.5, 2, 3.0)
}

fn mixed_assets() -> ProblemSpec {
    ProblemSpec::new(
        4,
        vec![0.12, 0.07, 0.15, 0.03],
        array![
            [0.050, 0.010, 0.020, -0.004],
            [0.010, 0.030, 0.006, 0.002],
            [0.020, 0.006, 0.080, 0.010],
            [-0.004, 0.002, 0.010, 0.015],
        ],
        0.7,
        2,
        1.5,
    )
}

fn bits(index: usize, n: usize) -> Vec<bool> {
    (0..n).map(|i| (index >> i) & 1 == 1).collect()
}

// ---------------------------------------------------------------------------
// Term structure
// ---------------------------------------------------------------------------

#[test]
fn equal_assets_have_six_penalty_dominated_terms() {
    let h = to_ising(&build_qubo(&equal_assets()).unwrap());

    assert_eq!(h.num_qubits(), 3);
    assert_eq!(h.num_terms(), 6);

    let singles = h.terms().filter(|(p, _)| p.weight() == 1).count();
    let doubles = h.terms().filter(|(p, _)| p.weight() == 2).count();
    assert_eq!((singles, doubles), (3, 3));

    for (pauli, coeff) in h.terms() {
        assert!(coeff > 0.0, "{pauli} has non-positive weight {coeff}");
        assert!(
            (coeff - 1.5).abs() <= 0.05 * 1.5,
            "{pauli} weight {coeff} is not within 5% of 1.5"
        );
    }
}

#[test]
fn equal_assets_exact_coefficients() {
    let h = to_ising(&build_qubo(&equal_assets()).unwrap());
    for i in 0..3 {
        // h_i = 9.095/2 − (3 + 3)/2
        assert_abs_diff_eq!(h.coefficient(&ZString::z(i)).unwrap(), 1.5475, epsilon = 1e-12);
    }
    for (i, j) in [(0, 1), (0, 2), (1, 2)] {
        assert_abs_diff_eq!(h.coefficient(&ZString::zz(i, j)).unwrap(), 1.5, epsilon = 1e-12);
    }
    assert_abs_diff_eq!(h.offset(), 2.8575, epsilon = 1e-12);
}

#[test]
fn only_z_and_zz_terms_appear() {
    let h = to_ising(&build_qubo(&mixed_assets()).unwrap());
    assert!(h.terms().all(|(p, _)| matches!(p.weight(), 1 | 2)));
    assert!(h.terms().all(|(p, _)| p.max_qubit().unwrap() < 4));
}

// ---------------------------------------------------------------------------
// Round trip and sign bookkeeping
// ---------------------------------------------------------------------------

#[test]
fn ising_energy_reproduces_qubo_exhaustively() {
    for spec in [equal_assets(), mixed_assets()] {
        let qubo = build_qubo(&spec).unwrap();
        let h = to_ising(&qubo);
        let n = spec.n();

        for index in 0..(1usize << n) {
            let x = bits(index, n);
            let spins: Vec<i8> = x.iter().map(|&b| if b { -1 } else { 1 }).collect();
            let expected = qubo.evaluate(&x).unwrap();
            assert_abs_diff_eq!(h.energy(&spins), expected, epsilon = 1e-10);
            assert_abs_diff_eq!(h.energy_of_index(index), expected, epsilon = 1e-10);
        }
    }
}

#[test]
fn all_up_spins_give_empty_portfolio_value() {
    let qubo = build_qubo(&mixed_assets()).unwrap();
    let h = to_ising(&qubo);
    assert_abs_diff_eq!(h.energy(&[1, 1, 1, 1]), qubo.offset(), epsilon = 1e-12);
}

#[test]
fn minimising_qubo_maximises_financial_objective() {
    let spec = mixed_assets();
    let qubo = build_qubo(&spec).unwrap();

    for index in 0..16usize {
        let x = bits(index, 4);
        let report = PortfolioReport::evaluate(&spec, &x).unwrap();
        let violation = report.budget_violation as f64;
        let expected = -report.objective + spec.penalty() * violation * violation;
        assert_abs_diff_eq!(qubo.evaluate(&x).unwrap(), expected, epsilon = 1e-12);
    }
}

#[test]
fn ground_state_is_best_feasible_portfolio() {
    let spec = mixed_assets();
    let h = to_ising(&build_qubo(&spec).unwrap());

    let ground = (0..16usize)
        .min_by(|&a, &b| h.energy_of_index(a).total_cmp(&h.energy_of_index(b)))
        .unwrap();

    let best_feasible = (0..16usize)
        .filter(|i| i.count_ones() == 2)
        .max_by(|&a, &b| {
            let ra = PortfolioReport::evaluate(&spec, &bits(a, 4)).unwrap();
            let rb = PortfolioReport::evaluate(&spec, &bits(b, 4)).unwrap();
            ra.objective.total_cmp(&rb.objective)
        })
        .unwrap();

    assert_eq!(ground, best_feasible);
}
