use crate::solver::{clause::Clause, formula::Formula, literal::Literal};

/// Derive the formula that remains once `literal` is made true
///
/// Clauses containing `literal` are satisfied and dropped; `!literal` is
/// removed from the remaining clauses. A clause that loses its last literal
/// stays in the result as an empty clause so the caller sees the conflict.
/// The input is left untouched and the work is linear in its literal count.
#[must_use]
pub fn reduce(formula: &Formula, literal: Literal) -> Formula {
    let negated = !literal;
    let clauses = formula
        .clauses()
        .iter()
        .filter(|clause| !clause.contains(literal))
        .map(|clause| {
            Clause::from_distinct(
                clause
                    .literals()
                    .iter()
                    .copied()
                    .filter(|&l| l != negated)
                    .collect(),
            )
        })
        .collect();
    Formula::from_clauses(formula.num_variables(), clauses)
}
