#![allow(dead_code)]

use phasesat::{
    Result,
    parsing::ClauseReceiver,
    solver::{formula::Formula, literal::Literal, variable::Assignment},
};

/// Mock receiver recording what the parser hands over
#[derive(Clone, Debug, Default)]
pub struct ReceiverMock {
    pub num_variables: usize,
    pub num_clauses: usize,
    pub clauses: Vec<Vec<Literal>>,
}

impl ClauseReceiver for ReceiverMock {
    fn create_variables(&mut self, num_variables: usize) {
        self.num_variables = num_variables;
    }

    fn add_clause(&mut self, literals: &[Literal]) -> Result<()> {
        self.num_clauses += 1;
        self.clauses.push(Vec::from(literals));
        Ok(())
    }
}

/// Formula from signed literals; panics on invalid input
pub fn formula(num_variables: usize, clauses: &[&[i64]]) -> Formula {
    Formula::new(num_variables, clauses).expect("valid formula")
}

/// Every clause has a literal made true by `model`
pub fn check_model(formula: &Formula, model: &Assignment) {
    for clause in formula.clauses() {
        assert!(
            clause.is_satisfied_by(model),
            "clause {clause:?} not satisfied by {model:?}"
        );
    }
}

/// Exhaustive satisfiability check for small formulas
pub fn brute_force_sat(formula: &Formula) -> bool {
    let n = formula.num_variables();
    assert!(n <= 16, "too many variables for brute force");
    (0u32..1 << n).any(|bits| {
        let mut assignment = Assignment::new(n);
        for var in 1..=n {
            assignment.set(var, bits & (1 << (var - 1)) != 0);
        }
        formula.is_satisfied_by(&assignment)
    })
}
