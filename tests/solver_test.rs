use phasesat::{
    generator::seeded_3sat,
    parsing::read_formula,
    solver::{Solver, SolverExitCode, SolverOptions, solve},
};

use crate::common::{brute_force_sat, check_model, formula};

mod common;

#[test]
fn test_single_clause_is_sat() {
    let f = formula(3, &[&[1, 2, 3]]);
    let outcome = solve(&f, true);
    assert_eq!(outcome.exit_code, SolverExitCode::Sat);
    let model = outcome.model.expect("model");
    assert!((1..=3).any(|var| model.value(var).is_true()));
    check_model(&f, &model);
}

#[test]
fn test_opposite_units_are_unsat() {
    let f = formula(1, &[&[1, 1, 1], &[-1, -1, -1]]);
    for use_unit_propagation in [true, false] {
        let outcome = solve(&f, use_unit_propagation);
        assert_eq!(outcome.exit_code, SolverExitCode::Unsat);
        assert_eq!(outcome.model, None);
    }
}

#[test]
fn test_no_clauses_is_sat() {
    let f = formula(4, &[]);
    let outcome = solve(&f, false);
    assert_eq!(outcome.exit_code, SolverExitCode::Sat);
    assert_eq!(outcome.statistics.num_calls, 1);
    check_model(&f, &outcome.model.unwrap());
}

#[test]
fn test_all_sign_combinations_explore_every_branch() {
    let f = read_formula("res/success/all_signs_unsat.cnf").unwrap();
    let plain = solve(&f, false);
    let propagated = solve(&f, true);
    assert_eq!(plain.exit_code, SolverExitCode::Unsat);
    assert_eq!(propagated.exit_code, SolverExitCode::Unsat);
    // full binary tree over 3 variables
    assert_eq!(plain.statistics.num_calls, 15);
    assert!(plain.statistics.num_calls < 1 << (f.num_variables() + 1));
    // the last level is cut off by the two opposite units
    assert_eq!(propagated.statistics.num_calls, 7);
}

#[test]
fn test_propagation_saves_calls_with_units() {
    let f = formula(
        4,
        &[&[-1, 2], &[-2, 3], &[-3, 4], &[-4, -1], &[1, 2, 3], &[-2, -3, 4]],
    );
    let plain = solve(&f, false);
    let propagated = solve(&f, true);
    assert_eq!(plain.exit_code, propagated.exit_code);
    assert!(propagated.statistics.num_calls <= plain.statistics.num_calls);
    assert!(propagated.statistics.num_propagations > 0);
}

#[test]
fn test_solve_small_sat_instance() {
    let f = read_formula("res/success/small_sat.cnf").unwrap();
    let mut solver = Solver::new(SolverOptions::default());
    assert_eq!(solver.solve(&f), SolverExitCode::Sat);
    check_model(&f, solver.model());
    assert!(solver.statistics().num_calls >= 1);
}

#[test]
fn test_tautologies_and_duplicates() {
    let f = formula(3, &[&[1, -1, 2], &[1, -1, 2], &[-2, 3, 2], &[-3, -3, -3]]);
    let outcome = solve(&f, true);
    assert_eq!(outcome.exit_code, SolverExitCode::Sat);
    check_model(&f, &outcome.model.unwrap());
}

#[test]
fn test_random_formulas_match_brute_force() {
    for seed in 0..60 {
        let num_clauses = 20 + (seed as usize % 40);
        let f = seeded_3sat(10, num_clauses, seed).unwrap();
        let expected = brute_force_sat(&f);
        for use_unit_propagation in [true, false] {
            let outcome = solve(&f, use_unit_propagation);
            assert_eq!(outcome.exit_code.is_sat(), expected, "seed {seed}");
            if let Some(model) = &outcome.model {
                check_model(&f, model);
            }
        }
    }
}

#[test]
fn test_random_formulas_near_threshold() {
    for seed in 100..110 {
        let f = seeded_3sat(16, 68, seed).unwrap();
        let plain = solve(&f, false);
        let propagated = solve(&f, true);
        assert_eq!(plain.exit_code, propagated.exit_code, "seed {seed}");
        for model in [&plain.model, &propagated.model].into_iter().flatten() {
            check_model(&f, model);
        }
    }
}

#[test]
fn test_solve_is_deterministic() {
    let f = seeded_3sat(25, 100, 9).unwrap();
    let first = solve(&f, true);
    let second = solve(&f, true);
    assert_eq!(first.exit_code, second.exit_code);
    assert_eq!(first.model, second.model);
    assert_eq!(first.statistics.num_calls, second.statistics.num_calls);
}
