//! Runs an external MiniSAT binary on a formula for reference verdicts.

use std::{
    fs,
    io::{ErrorKind, Write},
    path::PathBuf,
    process::{Command, Stdio},
    time::{Duration, Instant},
};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use wait_timeout::ChildExt;

use crate::{
    error::{Error, Result},
    parsing::write_dimacs,
    solver::{SolverExitCode, formula::Formula, literal::Literal, variable::Assignment},
};

/// Where to find MiniSAT and how long to wait for it
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinisatConfig {
    /// Executable name or path
    pub executable: PathBuf,
    /// Wall-clock budget per formula
    pub timeout: Duration,
}

impl Default for MinisatConfig {
    fn default() -> Self {
        Self {
            executable: PathBuf::from("minisat"),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Verdict reported by MiniSAT
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MinisatOutcome {
    /// `Unknown` if MiniSAT timed out or gave up
    pub exit_code: SolverExitCode,
    pub model: Option<Assignment>,
    pub elapsed: Duration,
}

/// Solve `formula` with MiniSAT
///
/// The formula is written to a temporary DIMACS file and MiniSAT writes its
/// answer to a second temporary file; both are removed afterwards.
///
/// # Errors
///
/// Fails if the executable cannot be started or its result file cannot be
/// read or understood.
pub fn solve_with_minisat(formula: &Formula, config: &MinisatConfig) -> Result<MinisatOutcome> {
    let mut input = tempfile::Builder::new().suffix(".cnf").tempfile()?;
    write_dimacs(formula, input.as_file_mut())?;
    input.as_file_mut().flush()?;
    let output = tempfile::Builder::new().suffix(".out").tempfile()?;

    let start = Instant::now();
    let mut child = Command::new(&config.executable)
        .arg(input.path())
        .arg(output.path())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| match e.kind() {
            ErrorKind::NotFound => {
                Error::SolverNotFound(config.executable.display().to_string())
            }
            _ => Error::Io(e),
        })?;

    if child.wait_timeout(config.timeout)?.is_none() {
        let _ = child.kill();
        let _ = child.wait();
        warn!(timeout = ?config.timeout, "MiniSAT timed out");
        return Ok(MinisatOutcome {
            exit_code: SolverExitCode::Unknown,
            model: None,
            elapsed: start.elapsed(),
        });
    }
    let elapsed = start.elapsed();

    let text = fs::read_to_string(output.path())?;
    let (exit_code, model) = parse_result(&text, formula.num_variables())?;
    debug!(?exit_code, ?elapsed, "MiniSAT finished");
    Ok(MinisatOutcome {
        exit_code,
        model,
        elapsed,
    })
}

/// Interpret a MiniSAT result file
///
/// # Errors
///
/// Fails on a status line other than `SAT`, `UNSAT` or `INDET`, or on a
/// malformed model line.
pub fn parse_result(text: &str, num_variables: usize) -> Result<(SolverExitCode, Option<Assignment>)> {
    let mut lines = text.lines().map(str::trim);
    match lines.next().unwrap_or_default() {
        "SAT" => {
            let mut model = Assignment::new(num_variables);
            for token in lines.next().unwrap_or_default().split_whitespace() {
                let value: i64 = token
                    .parse()
                    .map_err(|_| Error::ExternalSolver(format!("bad model literal {token:?}")))?;
                if let Some(literal) = Literal::from_dimacs(value) {
                    model.assign(literal);
                }
            }
            Ok((SolverExitCode::Sat, Some(model)))
        }
        "UNSAT" => Ok((SolverExitCode::Unsat, None)),
        "INDET" | "" => Ok((SolverExitCode::Unknown, None)),
        other => Err(Error::ExternalSolver(format!("unexpected status {other:?}"))),
    }
}
