use tracing::trace;

use crate::solver::{formula::Formula, literal::Literal, simplify::reduce};

/// Result of unit propagation
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Propagation {
    /// No unit clause remains; `forced` lists the literals made true on the
    /// way, in the order they were forced (empty if nothing changed)
    Fixpoint {
        formula: Formula,
        forced: Vec<Literal>,
    },
    /// An empty clause appeared; the partial reduction is discarded
    Contradiction,
}

impl Propagation {
    /// Whether propagation ran into an empty clause
    #[must_use]
    pub const fn is_contradiction(&self) -> bool {
        matches!(self, Propagation::Contradiction)
    }
}

/// Repeatedly make the first unit clause true until none is left
///
/// Every round removes at least the unit clause it picked, so the loop ends
/// after at most `formula.num_clauses()` rounds.
#[must_use]
pub fn propagate(formula: Formula) -> Propagation {
    let mut formula = formula;
    let mut forced = Vec::new();
    loop {
        if formula.has_empty_clause() {
            trace!(forced = forced.len(), "propagation hit an empty clause");
            return Propagation::Contradiction;
        }
        let Some(literal) = formula.first_unit_literal() else {
            return Propagation::Fixpoint { formula, forced };
        };
        trace!(%literal, "unit");
        formula = reduce(&formula, literal);
        forced.push(literal);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(value: i64) -> Literal {
        Literal::from_dimacs(value).unwrap()
    }

    #[test]
    fn no_unit_is_noop() {
        let formula = Formula::new(3, [[1i64, 2, 3], [-1, -2, 3]]).unwrap();
        assert_eq!(
            propagate(formula.clone()),
            Propagation::Fixpoint {
                formula,
                forced: Vec::new()
            }
        );
    }

    #[test]
    fn chains_units_in_stored_order() {
        let formula = Formula::new(3, vec![vec![-1i64, 2], vec![1], vec![-2, 3], vec![3, 1]]).unwrap();
        match propagate(formula) {
            Propagation::Fixpoint { formula, forced } => {
                assert!(formula.is_empty());
                assert_eq!(forced, vec![lit(1), lit(2), lit(3)]);
            }
            Propagation::Contradiction => panic!("unexpected contradiction"),
        }
    }

    #[test]
    fn opposite_units_contradict() {
        let formula = Formula::new(1, [[1i64, 1, 1], [-1, -1, -1]]).unwrap();
        assert!(propagate(formula).is_contradiction());
    }

    #[test]
    fn existing_empty_clause_contradicts() {
        let formula = Formula::new(2, vec![vec![1i64, 2], vec![]]).unwrap();
        assert!(propagate(formula).is_contradiction());
    }

    #[test]
    fn fixpoint_is_idempotent() {
        let formula =
            Formula::new(4, vec![vec![1i64], vec![-1, 2, 3], vec![-2, 4], vec![-3, -4, 1]]).unwrap();
        let Propagation::Fixpoint { formula: once, .. } = propagate(formula) else {
            panic!("unexpected contradiction");
        };
        assert_eq!(
            propagate(once.clone()),
            Propagation::Fixpoint {
                formula: once,
                forced: Vec::new()
            }
        );
    }
}
