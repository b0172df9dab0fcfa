use serde::{Deserialize, Serialize};

/// Clause/variable ratio around which random 3-SAT switches from mostly
/// satisfiable to mostly unsatisfiable
pub const PHASE_TRANSITION_RATIO: f64 = 4.26;

/// Per-solve options
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct SolverOptions {
    /// Run unit propagation at every search node
    pub use_unit_propagation: bool,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            use_unit_propagation: true,
        }
    }
}
