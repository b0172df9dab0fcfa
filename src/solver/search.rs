use tracing::trace;

use crate::solver::{
    SolverStatistics,
    formula::Formula,
    literal::Literal,
    options::SolverOptions,
    propagate::{Propagation, propagate},
    simplify::reduce,
};

/// Recursive backtracking search over derived formulas
///
/// Every call owns the formula it works on, so sibling branches never share
/// state. The literals made true along the current path live on `trail`;
/// a failing branch truncates the trail back to its decision point.
pub struct Search<'a> {
    options: SolverOptions,
    trail: Vec<Literal>,
    stats: &'a mut SolverStatistics,
}

impl<'a> Search<'a> {
    /// New search accumulating effort into `stats`
    pub fn new(options: SolverOptions, stats: &'a mut SolverStatistics) -> Self {
        Self {
            options,
            trail: Vec::new(),
            stats,
        }
    }

    /// Search for a model; returns the literals made true on the successful
    /// path, or `None` if the formula is unsatisfiable
    pub fn run(mut self, formula: Formula) -> Option<Vec<Literal>> {
        if self.search(formula, 0) {
            Some(self.trail)
        } else {
            None
        }
    }

    /// One search node; `true` if `formula` is satisfiable
    fn search(&mut self, formula: Formula, depth: usize) -> bool {
        self.stats.num_calls += 1;
        self.stats.max_depth = self.stats.max_depth.max(depth);

        if formula.is_empty() {
            return true;
        }
        if formula.has_empty_clause() {
            return false;
        }

        let formula = if self.options.use_unit_propagation {
            match propagate(formula) {
                Propagation::Contradiction => return false,
                Propagation::Fixpoint { formula, forced } => {
                    self.stats.num_propagations += forced.len() as u64;
                    self.trail.extend(forced);
                    if formula.is_empty() {
                        return true;
                    }
                    formula
                }
            }
        } else {
            formula
        };

        // First literal of the first clause; clauses are non-empty here
        let var = formula.clauses()[0][0].var();
        let decision_point = self.trail.len();
        for polarity in [true, false] {
            let literal = Literal::from_var_with_polarity(var, polarity);
            trace!(depth, %literal, "decide");
            self.stats.num_decisions += 1;
            self.trail.push(literal);
            if self.search(reduce(&formula, literal), depth + 1) {
                return true;
            }
            self.trail.truncate(decision_point);
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(formula: &Formula, use_unit_propagation: bool) -> (Option<Vec<Literal>>, SolverStatistics) {
        let mut stats = SolverStatistics::default();
        let model = Search::new(SolverOptions { use_unit_propagation }, &mut stats).run(formula.clone());
        (model, stats)
    }

    #[test]
    fn terminal_calls_are_counted() {
        let formula = Formula::new(1, Vec::<Vec<i64>>::new()).unwrap();
        let (model, stats) = run(&formula, false);
        assert_eq!(model, Some(Vec::new()));
        assert_eq!(stats.num_calls, 1);
        assert_eq!(stats.num_decisions, 0);
    }

    #[test]
    fn positive_branch_first() {
        let formula = Formula::new(3, [[1i64, 2, 3]]).unwrap();
        let (model, stats) = run(&formula, false);
        assert_eq!(model, Some(vec![Literal::from_dimacs(1).unwrap()]));
        assert_eq!(stats.num_calls, 2);
        assert_eq!(stats.max_depth, 1);
    }

    #[test]
    fn failed_branch_is_undone() {
        // x1 = true leads to (-2) ∧ (2) further down
        let formula = Formula::new(2, [[-1i64, 2], [-1, -2]]).unwrap();
        let (model, _) = run(&formula, false);
        assert_eq!(model, Some(vec![Literal::from_dimacs(-1).unwrap()]));
    }

    #[test]
    fn forced_literals_join_the_trail() {
        let formula = Formula::new(3, vec![vec![2i64], vec![-2, 3], vec![1, -3, 2]]).unwrap();
        let (model, stats) = run(&formula, true);
        assert_eq!(
            model,
            Some(vec![Literal::from_dimacs(2).unwrap(), Literal::from_dimacs(3).unwrap()])
        );
        assert_eq!(stats.num_propagations, 2);
        assert_eq!(stats.num_calls, 1);
    }
}
