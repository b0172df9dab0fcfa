//! Error types shared by the formula model, the DIMACS reader and the
//! experiment driver.

use thiserror::Error;

/// Errors reported by `phasesat`
///
/// An unsatisfiable formula is a regular solver verdict, never an error.
#[derive(Debug, Error)]
pub enum Error {
    /// A clause contained the literal `0`
    #[error("Literal 0 is not a valid literal")]
    ZeroLiteral,

    /// A literal refers to a variable outside of `1..=num_variables`
    #[error("Literal {literal} is out of range for {num_variables} variables")]
    VariableOutOfRange { literal: i64, num_variables: usize },

    /// A 3-SAT clause needs three distinct variables
    #[error("Cannot build 3-literal clauses over {0} variables")]
    TooFewVariables(usize),

    /// Malformed DIMACS input
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// DIMACS header does not match the file contents
    #[error("Header declares {expected} {what}, found {found}")]
    HeaderMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    /// External solver binary could not be started
    #[error("External solver not found: {0}")]
    SolverNotFound(String),

    /// External solver produced something we could not interpret
    #[error("External solver error: {0}")]
    ExternalSolver(String),

    /// Experiment or solver configuration is unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Report serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, Error>;
