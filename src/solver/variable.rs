use std::fmt;

use crate::solver::literal::Literal;

/// Variable type; variables are numbered `1..=num_variables`
pub type Variable = usize;

/// Variable value type
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum VariableValue {
    False = 0,
    True = 1,
    #[default]
    Unset = 2,
}

impl VariableValue {
    /// Variable from bool
    #[must_use]
    pub const fn from_bool(value: bool) -> Self {
        if value { Self::True } else { Self::False }
    }

    /// Whether is false
    #[must_use]
    pub fn is_false(self) -> bool {
        self == VariableValue::False
    }
    /// Whether is true
    #[must_use]
    pub fn is_true(self) -> bool {
        self == VariableValue::True
    }
    /// Whether is unset
    #[must_use]
    pub fn is_unset(self) -> bool {
        self == VariableValue::Unset
    }
    /// Value as bool, `None` if unset
    #[must_use]
    pub const fn as_bool(self) -> Option<bool> {
        match self {
            Self::False => Some(false),
            Self::True => Some(true),
            Self::Unset => None,
        }
    }
}

impl PartialEq<bool> for VariableValue {
    fn eq(&self, other: &bool) -> bool {
        *self == VariableValue::from_bool(*other)
    }
}

/// Partial mapping from variables to truth values
///
/// Unassigned variables hold [`VariableValue::Unset`].
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Assignment {
    /// `values[var - 1]` is the value of `var`
    values: Vec<VariableValue>,
}

impl Assignment {
    /// All `num_variables` variables unset
    #[must_use]
    pub fn new(num_variables: usize) -> Self {
        Self {
            values: vec![VariableValue::Unset; num_variables],
        }
    }

    /// Build from a list of literals that are true
    #[must_use]
    pub fn from_literals(num_variables: usize, literals: &[Literal]) -> Self {
        let mut assignment = Self::new(num_variables);
        for &literal in literals {
            assignment.assign(literal);
        }
        assignment
    }

    /// Number of variables covered (assigned or not)
    #[must_use]
    pub fn num_variables(&self) -> usize {
        self.values.len()
    }

    /// Number of assigned variables
    #[must_use]
    pub fn num_assigned(&self) -> usize {
        self.values.iter().filter(|v| !v.is_unset()).count()
    }

    /// Value of `var`; variables beyond the covered range are unset
    #[must_use]
    pub fn value(&self, var: Variable) -> VariableValue {
        var.checked_sub(1)
            .and_then(|idx| self.values.get(idx))
            .copied()
            .unwrap_or_default()
    }

    /// Set `var` to `value`, growing the mapping if needed
    pub fn set(&mut self, var: Variable, value: bool) {
        debug_assert!(var >= 1);
        if var > self.values.len() {
            self.values.resize(var, VariableValue::Unset);
        }
        self.values[var - 1] = VariableValue::from_bool(value);
    }

    /// Make `literal` true
    pub fn assign(&mut self, literal: Literal) {
        self.set(literal.var(), literal.polarity());
    }

    /// Iterate over `(variable, value)` pairs of assigned variables
    pub fn iter(&self) -> impl Iterator<Item = (Variable, bool)> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(idx, value)| value.as_bool().map(|b| (idx + 1, b)))
    }
}

impl fmt::Debug for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
