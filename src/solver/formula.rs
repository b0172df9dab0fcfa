use std::fmt;

use crate::{
    error::{Error, Result},
    parsing::ClauseReceiver,
    solver::{clause::Clause, literal::Literal, variable::Assignment},
};

/// CNF formula over variables `1..=num_variables`
///
/// Once built, a formula is never mutated; simplification derives new
/// formulas from it.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Formula {
    num_variables: usize,
    clauses: Vec<Clause>,
}

impl Formula {
    /// Build a formula from signed DIMACS literals
    ///
    /// # Errors
    ///
    /// Fails on the literal `0` or on a literal whose variable is not in
    /// `1..=num_variables`.
    pub fn new<I, C>(num_variables: usize, clauses: I) -> Result<Self>
    where
        I: IntoIterator<Item = C>,
        C: AsRef<[i64]>,
    {
        let mut builder = FormulaBuilder::new(num_variables);
        for clause in clauses {
            let literals = clause
                .as_ref()
                .iter()
                .map(|&value| match Literal::from_dimacs(value) {
                    Some(literal) => Ok(literal),
                    None if value == 0 => Err(Error::ZeroLiteral),
                    None => Err(Error::VariableOutOfRange {
                        literal: value,
                        num_variables,
                    }),
                })
                .collect::<Result<Vec<_>>>()?;
            builder.add_clause(&literals)?;
        }
        Ok(builder.build())
    }

    /// Wrap clauses derived from a validated formula
    pub(crate) fn from_clauses(num_variables: usize, clauses: Vec<Clause>) -> Self {
        Self {
            num_variables,
            clauses,
        }
    }

    /// Number of variables
    #[must_use]
    pub const fn num_variables(&self) -> usize {
        self.num_variables
    }

    /// Number of clauses
    #[must_use]
    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    /// Total number of literals over all clauses
    #[must_use]
    pub fn num_literals(&self) -> usize {
        self.clauses.iter().map(Clause::len).sum()
    }

    /// Clauses in stored order
    #[must_use]
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Literal `literal_idx` of clause `clause_idx`
    #[must_use]
    pub fn literal(&self, clause_idx: usize, literal_idx: usize) -> Option<Literal> {
        self.clauses
            .get(clause_idx)?
            .literals()
            .get(literal_idx)
            .copied()
    }

    /// No clause left; the formula is satisfied
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Some clause lost all of its literals; the formula is unsatisfiable
    #[must_use]
    pub fn has_empty_clause(&self) -> bool {
        self.clauses.iter().any(Clause::is_empty)
    }

    /// Literal of the first unit clause in stored order
    #[must_use]
    pub fn first_unit_literal(&self) -> Option<Literal> {
        self.clauses.iter().find_map(Clause::unit_literal)
    }

    /// Whether every clause has a literal that is true under `assignment`
    #[must_use]
    pub fn is_satisfied_by(&self, assignment: &Assignment) -> bool {
        self.clauses
            .iter()
            .all(|clause| clause.is_satisfied_by(assignment))
    }
}

impl fmt::Debug for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.clauses.is_empty() {
            return write!(f, "⊤");
        }
        for (idx, clause) in self.clauses.iter().enumerate() {
            if idx > 0 {
                write!(f, " ∧ ")?;
            }
            write!(f, "{clause:?}")?;
        }
        Ok(())
    }
}

/// Collects validated clauses, e.g. from the DIMACS reader
#[derive(Clone, Debug, Default)]
pub struct FormulaBuilder {
    num_variables: usize,
    clauses: Vec<Clause>,
}

impl FormulaBuilder {
    /// Builder for a formula over `num_variables` variables
    #[must_use]
    pub fn new(num_variables: usize) -> Self {
        Self {
            num_variables,
            clauses: Vec::new(),
        }
    }

    /// Number of clauses added so far
    #[must_use]
    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    /// Finish the formula
    #[must_use]
    pub fn build(self) -> Formula {
        Formula::from_clauses(self.num_variables, self.clauses)
    }
}

impl ClauseReceiver for FormulaBuilder {
    fn create_variables(&mut self, num_variables: usize) {
        self.num_variables = num_variables;
    }

    fn add_clause(&mut self, literals: &[Literal]) -> Result<()> {
        if let Some(literal) = literals
            .iter()
            .find(|literal| literal.var() > self.num_variables)
        {
            return Err(Error::VariableOutOfRange {
                literal: literal.to_dimacs(),
                num_variables: self.num_variables,
            });
        }
        self.clauses.push(Clause::new(literals.iter().copied()));
        Ok(())
    }
}
