use std::fmt;

use crate::solver::{literal::Literal, variable::Assignment};

/// Disjunction of distinct literals
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Clause {
    literals: Vec<Literal>,
}

impl Clause {
    /// New clause; repeated literals are collapsed, first occurrence wins
    #[must_use]
    pub fn new(literals: impl IntoIterator<Item = Literal>) -> Self {
        let mut clause = Self::default();
        for literal in literals {
            if !clause.literals.contains(&literal) {
                clause.literals.push(literal);
            }
        }
        clause
    }

    /// Wrap literals that are already known to be distinct
    pub(crate) fn from_distinct(literals: Vec<Literal>) -> Self {
        Self { literals }
    }

    /// Number of literals
    #[must_use]
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// Whether no literal remains; such a clause can never be satisfied
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// The literal of a unit clause
    #[must_use]
    pub fn unit_literal(&self) -> Option<Literal> {
        match self.literals.as_slice() {
            [literal] => Some(*literal),
            _ => None,
        }
    }

    /// Whether `literal` occurs in the clause
    #[must_use]
    pub fn contains(&self, literal: Literal) -> bool {
        self.literals.contains(&literal)
    }

    /// Literals in stored order
    #[must_use]
    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }

    /// Whether at least one literal is true under `assignment`
    #[must_use]
    pub fn is_satisfied_by(&self, assignment: &Assignment) -> bool {
        self.literals
            .iter()
            .any(|literal| literal.is_true(assignment))
    }
}

/// Literal at given position
impl std::ops::Index<usize> for Clause {
    type Output = Literal;

    fn index(&self, index: usize) -> &Self::Output {
        &self.literals[index]
    }
}

impl fmt::Debug for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.literals.is_empty() {
            return write!(f, "()");
        }
        let body = self
            .literals
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ∨ ");
        write!(f, "({body})")
    }
}
