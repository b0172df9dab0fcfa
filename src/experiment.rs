//! Phase-transition experiments: many random formulas per clause/variable
//! ratio, solved independently and aggregated per ratio.

use std::{fs::File, io::BufWriter, path::Path, time::Instant};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    error::{Error, Result},
    generator::{CLAUSE_WIDTH, clauses_for_ratio, seeded_3sat},
    helper::{duration_in_seconds, ratio, u64_to_f64, usize_to_f64},
    minisat::{MinisatConfig, solve_with_minisat},
    solver::{SolverExitCode, solve},
};

/// Which solver an experiment runs
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SolverKind {
    /// Plain backtracking
    Backtracking,
    /// Backtracking with unit propagation at every node
    UnitPropagation,
    /// External MiniSAT binary
    Minisat,
}

impl SolverKind {
    /// Label used in logs and tables
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            SolverKind::Backtracking => "SAT",
            SolverKind::UnitPropagation => "SAT+UP",
            SolverKind::Minisat => "MiniSAT",
        }
    }
}

/// Experiment configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExperimentConfig {
    /// Variables per formula
    pub num_variables: usize,
    /// Smallest clause/variable ratio
    pub min_ratio: f64,
    /// Largest clause/variable ratio (inclusive)
    pub max_ratio: f64,
    /// Ratio increment
    pub ratio_step: f64,
    /// Formulas per ratio
    pub runs_per_ratio: usize,
    pub solver: SolverKind,
    /// Base seed; run `i` uses `seed + i`
    pub seed: u64,
    /// Worker threads; 0 lets rayon decide
    pub workers: usize,
    pub minisat: MinisatConfig,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            num_variables: 20,
            min_ratio: 2.0,
            max_ratio: 7.0,
            ratio_step: 0.25,
            runs_per_ratio: 50,
            solver: SolverKind::UnitPropagation,
            seed: 42,
            workers: 0,
            minisat: MinisatConfig::default(),
        }
    }
}

/// Upper bound on the number of ratios one scan may visit
pub const MAX_RATIO_POINTS: usize = 100_000;

impl ExperimentConfig {
    /// Check that the configuration describes a finite, non-empty scan
    ///
    /// # Errors
    ///
    /// Reports the first unusable setting.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: &str| -> Result<()> { Err(Error::InvalidConfig(msg.to_string())) };
        if self.num_variables < CLAUSE_WIDTH {
            return invalid("need at least 3 variables");
        }
        if !(self.min_ratio.is_finite() && self.max_ratio.is_finite() && self.ratio_step.is_finite()) {
            return invalid("ratios must be finite");
        }
        if self.min_ratio < 0.0 || self.min_ratio > self.max_ratio {
            return invalid("need 0 <= min ratio <= max ratio");
        }
        if self.ratio_step <= 0.0 {
            return invalid("ratio step must be positive");
        }
        if (self.max_ratio - self.min_ratio) / self.ratio_step >= usize_to_f64(MAX_RATIO_POINTS) {
            return invalid("ratio step too small for the scanned range");
        }
        if self.runs_per_ratio == 0 {
            return invalid("need at least one run per ratio");
        }
        Ok(())
    }

    /// Clause counts `round(ratio * N)` for every scanned ratio, ascending
    /// and without duplicates
    #[must_use]
    pub fn clause_counts(&self) -> Vec<usize> {
        let mut counts = Vec::new();
        let mut step = 0;
        loop {
            let r = self.min_ratio + usize_to_f64(step) * self.ratio_step;
            // tolerate accumulated rounding at the upper end
            if r > self.max_ratio + 1e-9 {
                break;
            }
            counts.push(clauses_for_ratio(r, self.num_variables));
            step += 1;
        }
        counts.dedup();
        counts
    }
}

/// Outcome of one formula
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub num_variables: usize,
    pub num_clauses: usize,
    pub ratio: f64,
    pub exit_code: SolverExitCode,
    /// Search calls; `None` for the external solver
    pub num_calls: Option<u64>,
    pub elapsed_seconds: f64,
}

/// Aggregate over all runs with the same clause count
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RatioSummary {
    pub num_clauses: usize,
    pub ratio: f64,
    pub runs: usize,
    pub num_sat: usize,
    /// Runs the external solver gave up on
    pub num_unknown: usize,
    pub sat_percentage: f64,
    pub mean_elapsed_seconds: f64,
    pub mean_calls: Option<f64>,
}

/// Configuration and results, as written to disk
#[derive(Clone, Debug, Serialize)]
pub struct ExperimentReport<T> {
    pub config: ExperimentConfig,
    pub results: Vec<T>,
}

/// Generate and solve one random formula
///
/// # Errors
///
/// Fails if the formula cannot be generated or the external solver fails.
pub fn run_single(
    num_variables: usize,
    num_clauses: usize,
    solver: SolverKind,
    seed: u64,
    minisat: &MinisatConfig,
) -> Result<RunRecord> {
    let formula = seeded_3sat(num_variables, num_clauses, seed)?;
    let (exit_code, num_calls, elapsed) = match solver {
        SolverKind::Backtracking | SolverKind::UnitPropagation => {
            let start = Instant::now();
            let outcome = solve(&formula, solver == SolverKind::UnitPropagation);
            (outcome.exit_code, Some(outcome.statistics.num_calls), start.elapsed())
        }
        SolverKind::Minisat => {
            let outcome = solve_with_minisat(&formula, minisat)?;
            (outcome.exit_code, None, outcome.elapsed)
        }
    };
    Ok(RunRecord {
        num_variables,
        num_clauses,
        ratio: ratio(num_clauses, num_variables),
        exit_code,
        num_calls,
        elapsed_seconds: duration_in_seconds(elapsed),
    })
}

/// Every individual run of the scan, ordered by clause count then run index
///
/// # Errors
///
/// Fails on an invalid configuration or the first failing run.
pub fn distribution(config: &ExperimentConfig) -> Result<Vec<RunRecord>> {
    config.validate()?;
    let counts = config.clause_counts();
    let runs = config.runs_per_ratio;
    info!(
        solver = config.solver.label(),
        num_variables = config.num_variables,
        points = counts.len(),
        runs,
        "starting experiment"
    );

    let job = || {
        (0..counts.len() * runs)
            .into_par_iter()
            .map(|idx| {
                let num_clauses = counts[idx / runs];
                let seed = config.seed.wrapping_add(idx as u64);
                run_single(config.num_variables, num_clauses, config.solver, seed, &config.minisat)
            })
            .collect::<Result<Vec<_>>>()
    };

    if config.workers == 0 {
        job()
    } else {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.workers)
            .build()
            .map_err(|e| Error::InvalidConfig(format!("thread pool: {e}")))?;
        pool.install(job)
    }
}

/// Per-ratio satisfiability percentage, mean time and mean effort
///
/// # Errors
///
/// See [`distribution`].
pub fn probability_scan(config: &ExperimentConfig) -> Result<Vec<RatioSummary>> {
    let records = distribution(config)?;
    let summaries = summarize(&records);
    for summary in &summaries {
        info!(
            "[{}] N: {}, Ratio: {:.2}, SAT: {:.1}%, Avg Time: {:.6}s",
            config.solver.label(),
            config.num_variables,
            summary.ratio,
            summary.sat_percentage,
            summary.mean_elapsed_seconds
        );
    }
    Ok(summaries)
}

/// Aggregate consecutive records with equal clause count
#[must_use]
pub fn summarize(records: &[RunRecord]) -> Vec<RatioSummary> {
    records
        .chunk_by(|a, b| a.num_clauses == b.num_clauses)
        .map(|group| {
            let runs = group.len();
            let num_sat = group.iter().filter(|r| r.exit_code.is_sat()).count();
            let num_unknown = group
                .iter()
                .filter(|r| r.exit_code == SolverExitCode::Unknown)
                .count();
            let total_time: f64 = group.iter().map(|r| r.elapsed_seconds).sum();
            let mean_calls = group
                .iter()
                .map(|r| r.num_calls)
                .sum::<Option<u64>>()
                .map(|calls| u64_to_f64(calls) / usize_to_f64(runs));
            let summary = RatioSummary {
                num_clauses: group[0].num_clauses,
                ratio: group[0].ratio,
                runs,
                num_sat,
                num_unknown,
                sat_percentage: usize_to_f64(num_sat) / usize_to_f64(runs) * 100.0,
                mean_elapsed_seconds: total_time / usize_to_f64(runs),
                mean_calls,
            };
            debug!(?summary, "ratio point");
            summary
        })
        .collect()
}

/// Write `report` as pretty JSON
///
/// # Errors
///
/// Fails if the file cannot be created or written.
pub fn write_report<T: Serialize>(path: impl AsRef<Path>, report: &ExperimentReport<T>) -> Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), report)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config(solver: SolverKind) -> ExperimentConfig {
        ExperimentConfig {
            num_variables: 8,
            min_ratio: 1.0,
            max_ratio: 8.0,
            ratio_step: 3.5,
            runs_per_ratio: 4,
            solver,
            seed: 11,
            workers: 2,
            minisat: MinisatConfig::default(),
        }
    }

    #[test]
    fn clause_counts_cover_inclusive_range() {
        let config = ExperimentConfig {
            num_variables: 10,
            min_ratio: 1.0,
            max_ratio: 2.0,
            ratio_step: 0.1,
            ..ExperimentConfig::default()
        };
        let counts = config.clause_counts();
        assert_eq!(counts.first(), Some(&10));
        assert_eq!(counts.last(), Some(&20));
        assert_eq!(counts.len(), 11);
    }

    #[test]
    fn clause_counts_deduplicate() {
        let config = ExperimentConfig {
            num_variables: 4,
            min_ratio: 1.0,
            max_ratio: 1.2,
            ratio_step: 0.05,
            ..ExperimentConfig::default()
        };
        assert_eq!(config.clause_counts(), vec![4, 5]);
    }

    #[test]
    fn validation() {
        assert!(ExperimentConfig::default().validate().is_ok());
        let bad = [
            ExperimentConfig { num_variables: 2, ..ExperimentConfig::default() },
            ExperimentConfig { ratio_step: 0.0, ..ExperimentConfig::default() },
            ExperimentConfig { min_ratio: 5.0, max_ratio: 4.0, ..ExperimentConfig::default() },
            ExperimentConfig { runs_per_ratio: 0, ..ExperimentConfig::default() },
            ExperimentConfig { max_ratio: f64::NAN, ..ExperimentConfig::default() },
            ExperimentConfig { ratio_step: 1e-20, ..ExperimentConfig::default() },
        ];
        for config in bad {
            assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
        }
    }

    #[test]
    fn distribution_is_reproducible_and_ordered() {
        let config = small_config(SolverKind::UnitPropagation);
        let first = distribution(&config).unwrap();
        assert_eq!(first.len(), 3 * 4);
        assert!(first.windows(2).all(|w| w[0].num_clauses <= w[1].num_clauses));
        let second = distribution(&config).unwrap();
        let verdicts = |records: &[RunRecord]| {
            records
                .iter()
                .map(|r| (r.num_clauses, r.exit_code, r.num_calls))
                .collect::<Vec<_>>()
        };
        assert_eq!(verdicts(&first), verdicts(&second));
    }

    #[test]
    fn solvers_agree_on_verdicts() {
        let plain = distribution(&small_config(SolverKind::Backtracking)).unwrap();
        let heuristic = distribution(&small_config(SolverKind::UnitPropagation)).unwrap();
        for (a, b) in plain.iter().zip(&heuristic) {
            assert_eq!(a.exit_code, b.exit_code);
        }
    }

    #[test]
    fn scan_summarizes_every_ratio() {
        let summaries = probability_scan(&small_config(SolverKind::UnitPropagation)).unwrap();
        let counts: Vec<_> = summaries.iter().map(|s| s.num_clauses).collect();
        assert_eq!(counts, vec![8, 36, 64]);
        for summary in &summaries {
            assert_eq!(summary.runs, 4);
            assert_eq!(summary.num_unknown, 0);
            assert!((0.0..=100.0).contains(&summary.sat_percentage));
            assert!(summary.mean_calls.is_some_and(|calls| calls >= 1.0));
        }
    }

    #[test]
    fn summary_percentages() {
        let record = |num_clauses, exit_code, num_calls| RunRecord {
            num_variables: 10,
            num_clauses,
            ratio: ratio(num_clauses, 10),
            exit_code,
            num_calls,
            elapsed_seconds: 1.0,
        };
        let records = vec![
            record(30, SolverExitCode::Sat, Some(3)),
            record(30, SolverExitCode::Unsat, Some(5)),
            record(50, SolverExitCode::Unknown, None),
            record(50, SolverExitCode::Sat, None),
        ];
        let summaries = summarize(&records);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].sat_percentage, 50.0);
        assert_eq!(summaries[0].mean_calls, Some(4.0));
        assert_eq!(summaries[1].num_unknown, 1);
        assert_eq!(summaries[1].mean_calls, None);
        assert_eq!(summaries[1].ratio, 5.0);
    }

    #[test]
    fn report_is_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.json");
        let report = ExperimentReport {
            config: ExperimentConfig::default(),
            results: summarize(&[]),
        };
        write_report(&path, &report).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["config"]["solver"], "unit-propagation");
        assert!(value["results"].as_array().unwrap().is_empty());
    }
}
