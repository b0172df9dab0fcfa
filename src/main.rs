use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "phasesat")]
#[command(version, about = "Random 3-SAT phase-transition experiments", long_about = None)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a `.cnf`, `.cnf.gz`, or `.cnf.xz` file
    Solve(commands::solve::SolveArgs),
    /// Write a random 3-SAT formula in DIMACS format
    Generate(commands::generate::GenerateArgs),
    /// Satisfiable percentage and mean effort per clause/variable ratio
    Scan(commands::scan::ScanArgs),
    /// Time and verdict of every single formula of a scan
    Distribution(commands::scan::ScanArgs),
}

/// Main
fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Solve(args) => commands::solve::run(args),
        Commands::Generate(args) => commands::generate::run(args),
        Commands::Scan(args) => commands::scan::run_scan(args),
        Commands::Distribution(args) => commands::scan::run_distribution(args),
    }
}
