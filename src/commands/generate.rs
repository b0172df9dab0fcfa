use std::{fs::File, io, path::PathBuf, process::ExitCode};

use clap::Args;
use phasesat::{generator::seeded_3sat, parsing::write_dimacs};

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Number of variables
    #[arg(short = 'n', long)]
    pub variables: usize,

    /// Number of clauses
    #[arg(short = 'm', long)]
    pub clauses: usize,

    /// Random seed
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Output file; stdout if omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: GenerateArgs) -> anyhow::Result<ExitCode> {
    let formula = seeded_3sat(args.variables, args.clauses, args.seed)?;
    match &args.output {
        Some(path) => write_dimacs(&formula, File::create(path)?)?,
        None => write_dimacs(&formula, io::stdout().lock())?,
    }
    tracing::info!(
        variables = args.variables,
        clauses = args.clauses,
        seed = args.seed,
        "formula written"
    );
    Ok(ExitCode::SUCCESS)
}
