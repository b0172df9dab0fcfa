//! Uniform random 3-SAT instances.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    error::{Error, Result},
    helper::{f64_to_usize_round, usize_to_f64},
    solver::{clause::Clause, formula::Formula, literal::Literal},
};

/// Number of literals per generated clause
pub const CLAUSE_WIDTH: usize = 3;

/// Clause count `round(ratio * num_variables)`
#[must_use]
pub fn clauses_for_ratio(ratio: f64, num_variables: usize) -> usize {
    f64_to_usize_round(ratio.max(0.0) * usize_to_f64(num_variables))
}

/// Sample `num_clauses` clauses over `num_variables` variables
///
/// Each clause draws three distinct variables uniformly from
/// `1..=num_variables` and negates each with probability 1/2.
///
/// # Errors
///
/// Fails if clauses are requested over fewer than three variables.
pub fn random_3sat(num_variables: usize, num_clauses: usize, rng: &mut impl Rng) -> Result<Formula> {
    if num_clauses > 0 && num_variables < CLAUSE_WIDTH {
        return Err(Error::TooFewVariables(num_variables));
    }
    let clauses = (0..num_clauses)
        .map(|_| {
            let mut literals = Vec::with_capacity(CLAUSE_WIDTH);
            while literals.len() < CLAUSE_WIDTH {
                let var = rng.random_range(1..=num_variables);
                if literals.iter().all(|l: &Literal| l.var() != var) {
                    literals.push(Literal::from_var_with_polarity(var, rng.random_bool(0.5)));
                }
            }
            Clause::from_distinct(literals)
        })
        .collect();
    Ok(Formula::from_clauses(num_variables, clauses))
}

/// [`random_3sat`] with a fresh generator seeded by `seed`
///
/// # Errors
///
/// See [`random_3sat`].
pub fn seeded_3sat(num_variables: usize, num_clauses: usize, seed: u64) -> Result<Formula> {
    let mut rng = StdRng::seed_from_u64(seed);
    random_3sat(num_variables, num_clauses, &mut rng)
}
