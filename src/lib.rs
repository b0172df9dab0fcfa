use std::{path::Path, time::Instant};

use crate::{
    helper::{duration_in_seconds, u64_to_f64},
    parsing::read_formula,
    solver::{Solver, SolverExitCode, SolverOptions, VerbosityLevel, formula::Formula},
};

pub mod error;
pub mod experiment;
pub mod generator;
mod helper;
pub mod minisat;
pub mod parsing;
pub mod solver;

pub use error::{Error, Result};

/// Print stats on the loaded CNF instance
fn print_stats(formula: &Formula, options: SolverOptions, parse_time: f64) {
    print!(
        "
============================[ Problem Statistics ]=============================
|                                                                             |
|  Number of variables:  {:>12}                                         |
|  Number of clauses:    {:>12}                                         |
|  Clause/var ratio:     {:>12.3}                                         |
|  Unit propagation:     {:>12}                                         |
|  Parse time:           {:>12.6}                                         |
|                                                                             |
",
        formula.num_variables(),
        formula.num_clauses(),
        helper::ratio(formula.num_clauses(), formula.num_variables()),
        if options.use_unit_propagation { "on" } else { "off" },
        parse_time
    );
}

/// Print stats after finished with solving
fn print_post_solve_stats(solver: &Solver) {
    let stats = solver.statistics();
    let total_time = duration_in_seconds(stats.elapsed);
    let calls_per_s = u64_to_f64(stats.num_calls) / total_time.max(f64::EPSILON);
    print!(
        "============================[      Summary      ]==============================
|                                                                             |
|  #Calls:               {:>12} ({:>12.3}/sec)                      |
|  #Decisions:           {:>12}                                         |
|  #Propagations:        {:>12}                                         |
|  Max depth:            {:>12}                                         |
|  Search time:          {:>12.6}                                         |
|                                                                             |
===============================================================================
",
        stats.num_calls,
        calls_per_s,
        stats.num_decisions,
        stats.num_propagations,
        stats.max_depth,
        total_time
    );
}

/// Print result
fn print_result(solver: &Solver, exit_code: SolverExitCode) {
    println!();
    match exit_code {
        // Unknown
        SolverExitCode::Unknown => {
            println!("UNKNOWN");
        }
        // SAT; variables left free by the search are reported as false
        SolverExitCode::Sat => {
            print!("SAT");
            let model = solver.model();
            for var in 1..=model.num_variables() {
                if model.value(var).is_true() {
                    print!(" {var}");
                } else {
                    print!(" -{var}");
                }
            }
            println!();
        }
        // UNSAT
        SolverExitCode::Unsat => {
            println!("UNSAT");
        }
    }
}

/// Solves a CNF instance in a `.cnf`, `.cnf.xz`, or `.cnf.gz` file
///
/// # Errors
///
/// Fails if the file cannot be read or is not valid DIMACS.
pub fn solve_cnf_instance(
    filename: impl AsRef<Path>,
    options: SolverOptions,
    logging_level: VerbosityLevel,
) -> Result<SolverExitCode> {
    // Parse clauses
    let start_time = Instant::now();
    let formula = read_formula(filename)?;
    if logging_level == VerbosityLevel::All {
        print_stats(&formula, options, duration_in_seconds(start_time.elapsed()));
    }

    // Solve
    let mut solver = Solver::new(options);
    let exit_code = solver.solve(&formula);

    if logging_level == VerbosityLevel::All {
        print_post_solve_stats(&solver);
    }

    // Print model
    print_result(&solver, exit_code);

    // Return unknown (0), sat (10), or unsat (20)
    Ok(exit_code)
}
