use std::{path::PathBuf, process::ExitCode, time::Duration};

use clap::Args;
use phasesat::{
    experiment::{
        ExperimentConfig, ExperimentReport, SolverKind, distribution, probability_scan,
        write_report,
    },
    minisat::MinisatConfig,
    solver::options::PHASE_TRANSITION_RATIO,
};

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Variables per formula
    #[arg(short = 'n', long, default_value_t = 20)]
    pub variables: usize,

    /// Smallest clause/variable ratio
    #[arg(long, default_value_t = 2.0)]
    pub min_ratio: f64,

    /// Largest clause/variable ratio
    #[arg(long, default_value_t = 7.0)]
    pub max_ratio: f64,

    /// Ratio increment
    #[arg(long, default_value_t = 0.25)]
    pub step: f64,

    /// Formulas per ratio
    #[arg(short, long, default_value_t = 50)]
    pub runs: usize,

    /// Solver to run
    #[arg(long, value_enum, default_value_t = SolverKind::UnitPropagation)]
    pub solver: SolverKind,

    /// Base random seed
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Worker threads (0 = auto)
    #[arg(long, default_value_t = 0)]
    pub workers: usize,

    /// MiniSAT executable
    #[arg(long, default_value = "minisat")]
    pub minisat_path: PathBuf,

    /// MiniSAT timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Write a JSON report here
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl From<ScanArgs> for ExperimentConfig {
    fn from(args: ScanArgs) -> Self {
        Self {
            num_variables: args.variables,
            min_ratio: args.min_ratio,
            max_ratio: args.max_ratio,
            ratio_step: args.step,
            runs_per_ratio: args.runs,
            solver: args.solver,
            seed: args.seed,
            workers: args.workers,
            minisat: MinisatConfig {
                executable: args.minisat_path,
                timeout: Duration::from_secs(args.timeout),
            },
        }
    }
}

/// Print one row per ratio
pub fn run_scan(args: ScanArgs) -> anyhow::Result<ExitCode> {
    let output = args.output.clone();
    let config = ExperimentConfig::from(args);
    let summaries = probability_scan(&config)?;

    println!(
        "
============================[ Phase Transition ]===============================
| Solver: {:<8}  Variables: {:>5}  Runs/ratio: {:>5}  Threshold: {:>5.2}   |
===============================================================================
|  Ratio | Clauses |   SAT % | Unknown |   Mean time (s) |   Mean calls      |
===============================================================================",
        config.solver.label(),
        config.num_variables,
        config.runs_per_ratio,
        PHASE_TRANSITION_RATIO
    );
    for s in &summaries {
        let calls = s
            .mean_calls
            .map_or_else(|| "-".to_string(), |c| format!("{c:.1}"));
        println!(
            "| {:>6.2} | {:>7} | {:>7.1} | {:>7} | {:>15.6} | {:>17} |",
            s.ratio, s.num_clauses, s.sat_percentage, s.num_unknown, s.mean_elapsed_seconds, calls
        );
    }
    println!("===============================================================================");

    if let Some(path) = output {
        write_report(&path, &ExperimentReport { config, results: summaries })?;
        tracing::info!(path = %path.display(), "report written");
    }
    Ok(ExitCode::SUCCESS)
}

/// Print one line per formula
pub fn run_distribution(args: ScanArgs) -> anyhow::Result<ExitCode> {
    let output = args.output.clone();
    let config = ExperimentConfig::from(args);
    let records = distribution(&config)?;

    println!("ratio,clauses,verdict,calls,seconds");
    for r in &records {
        let calls = r.num_calls.map_or_else(String::new, |c| c.to_string());
        println!(
            "{:.4},{},{:?},{},{:.6}",
            r.ratio, r.num_clauses, r.exit_code, calls, r.elapsed_seconds
        );
    }

    if let Some(path) = output {
        write_report(&path, &ExperimentReport { config, results: records })?;
        tracing::info!(path = %path.display(), "report written");
    }
    Ok(ExitCode::SUCCESS)
}
