use std::{path::PathBuf, process::ExitCode, time::Duration};

use anyhow::Context;
use clap::Args;
use phasesat::{
    minisat::{MinisatConfig, solve_with_minisat},
    parsing::read_formula,
    solve_cnf_instance,
    solver::{SolverExitCode, SolverOptions, VerbosityLevel},
};

#[derive(Args, Debug)]
pub struct SolveArgs {
    /// Input file
    pub file: PathBuf,

    /// Plain backtracking without unit propagation
    #[arg(long)]
    pub no_unit_propagation: bool,

    /// Hand the formula to MiniSAT instead
    #[arg(long)]
    pub minisat: bool,

    /// MiniSAT executable
    #[arg(long, default_value = "minisat")]
    pub minisat_path: PathBuf,

    /// MiniSAT timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Only print the result line
    #[arg(short, long)]
    pub quiet: bool,
}

pub fn run(args: SolveArgs) -> anyhow::Result<ExitCode> {
    let exit_code = if args.minisat {
        let formula = read_formula(&args.file)
            .with_context(|| format!("failed to read {}", args.file.display()))?;
        let config = MinisatConfig {
            executable: args.minisat_path,
            timeout: Duration::from_secs(args.timeout),
        };
        let outcome = solve_with_minisat(&formula, &config)?;
        match (outcome.exit_code, &outcome.model) {
            (SolverExitCode::Sat, Some(model)) => {
                let literals: Vec<String> = model
                    .iter()
                    .map(|(var, value)| if value { format!("{var}") } else { format!("-{var}") })
                    .collect();
                println!("SAT {}", literals.join(" "));
            }
            (SolverExitCode::Sat, None) => println!("SAT"),
            (SolverExitCode::Unsat, _) => println!("UNSAT"),
            (SolverExitCode::Unknown, _) => println!("UNKNOWN"),
        }
        outcome.exit_code
    } else {
        let options = SolverOptions {
            use_unit_propagation: !args.no_unit_propagation,
        };
        let logging_level = if args.quiet {
            VerbosityLevel::OnlyResult
        } else {
            VerbosityLevel::All
        };
        solve_cnf_instance(&args.file, options, logging_level)
            .with_context(|| format!("failed to solve {}", args.file.display()))?
    };
    Ok(ExitCode::from(exit_code as u8))
}
