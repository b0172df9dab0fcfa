use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::solver::{formula::Formula, search::Search, variable::Assignment};

pub mod clause;
pub mod formula;
pub mod literal;
pub mod options;
pub mod propagate;
mod search;
pub mod simplify;
pub mod variable;

pub use options::SolverOptions;

/// Verbosity level enum
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum VerbosityLevel {
    OnlyResult = 0,
    All = 1,
}

/// Enum representing the solver status exit codes
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum SolverExitCode {
    /// Only reported by the external solver when it gives up
    Unknown = 0,
    Sat = 10,
    Unsat = 20,
}

impl SolverExitCode {
    /// Whether the verdict is SAT
    #[must_use]
    pub const fn is_sat(self) -> bool {
        matches!(self, SolverExitCode::Sat)
    }
}

/// Solver statistics
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct SolverStatistics {
    /// Number of variables
    pub num_variables: usize,
    /// Number of clauses
    pub num_clauses: usize,
    /// Number of search calls, terminal ones included
    pub num_calls: u64,
    /// Number of branches tried
    pub num_decisions: u64,
    /// Number of literals forced by unit propagation
    pub num_propagations: u64,
    /// Deepest recursion level reached
    pub max_depth: usize,
    /// Wall-clock time spent in search
    pub elapsed: Duration,
}

/// Verdict, witness and effort of one solve
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SolveOutcome {
    pub exit_code: SolverExitCode,
    /// Satisfying partial assignment if SAT; unassigned variables are free
    pub model: Option<Assignment>,
    pub statistics: SolverStatistics,
}

/// Solver class
pub struct Solver {
    /// Search options
    options: SolverOptions,
    /// Model of the last satisfiable solve
    model: Assignment,
    /// Solver statistics of the last solve
    stats: SolverStatistics,
}

impl Solver {
    /// Create a new solver
    #[must_use]
    pub fn new(options: SolverOptions) -> Self {
        Self {
            options,
            model: Assignment::default(),
            stats: SolverStatistics::default(),
        }
    }

    /// Solver statistics
    #[must_use]
    pub const fn statistics(&self) -> &SolverStatistics {
        &self.stats
    }

    /// Contains the model if SAT
    #[must_use]
    pub const fn model(&self) -> &Assignment {
        &self.model
    }

    /// Solves `formula`; the input is only read, never modified
    pub fn solve(&mut self, formula: &Formula) -> SolverExitCode {
        self.stats = SolverStatistics {
            num_variables: formula.num_variables(),
            num_clauses: formula.num_clauses(),
            ..SolverStatistics::default()
        };
        self.model = Assignment::new(formula.num_variables());

        let start_time = Instant::now();
        let result = Search::new(self.options, &mut self.stats).run(formula.clone());
        self.stats.elapsed = start_time.elapsed();

        let exit_code = match result {
            Some(trail) => {
                self.model = Assignment::from_literals(formula.num_variables(), &trail);
                SolverExitCode::Sat
            }
            None => SolverExitCode::Unsat,
        };
        debug!(
            ?exit_code,
            calls = self.stats.num_calls,
            decisions = self.stats.num_decisions,
            propagations = self.stats.num_propagations,
            elapsed = ?self.stats.elapsed,
            "solve finished"
        );
        exit_code
    }
}

/// Solve `formula` once and report verdict, witness and effort
#[must_use]
pub fn solve(formula: &Formula, use_unit_propagation: bool) -> SolveOutcome {
    let mut solver = Solver::new(SolverOptions {
        use_unit_propagation,
    });
    let exit_code = solver.solve(formula);
    SolveOutcome {
        exit_code,
        model: exit_code.is_sat().then(|| solver.model().clone()),
        statistics: *solver.statistics(),
    }
}
