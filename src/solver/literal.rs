use std::{fmt, ops::Not};

use crate::solver::variable::{Assignment, Variable};

/// Literal type
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Literal {
    /// Literal representation; positive and negative literals are consecutive;
    /// `[    2, 3,     4, 5,     6, 7, ...]`
    /// `[not 1, 1, not 2, 2, not 3, 3, ...]`
    repr: usize,
}

impl Literal {
    /// Constructs a literal from a variable (1..=n)
    /// with polarity (+ : true, - : false)
    #[must_use]
    pub const fn from_var_with_polarity(variable: Variable, polarity: bool) -> Self {
        debug_assert!(variable >= 1);
        Literal {
            repr: 2 * variable + polarity as usize,
        }
    }

    /// Constructs a literal from its signed DIMACS form; `None` for `0`
    #[must_use]
    pub fn from_dimacs(value: i64) -> Option<Self> {
        if value == 0 {
            return None;
        }
        let var = usize::try_from(value.unsigned_abs()).ok()?;
        let repr = var.checked_mul(2)?.checked_add(usize::from(value > 0))?;
        Some(Literal { repr })
    }

    /// Signed DIMACS form
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn to_dimacs(self) -> i64 {
        let var = self.var() as i64;
        if self.polarity() { var } else { -var }
    }

    /// The variable used in the literal
    #[must_use]
    pub const fn var(&self) -> Variable {
        self.repr >> 1
    }
    /// The polarity of the literal (+ : true, - : false)
    #[must_use]
    pub const fn polarity(&self) -> bool {
        (self.repr & 1) != 0
    }
    /// Whether literal evaluates to true
    #[must_use]
    pub fn is_true(&self, assignment: &Assignment) -> bool {
        assignment.value(self.var()) == self.polarity()
    }
}

/// Implement negation for literals
impl Not for Literal {
    type Output = Self;

    fn not(self) -> Self::Output {
        Literal {
            repr: self.repr ^ 1,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_dimacs())
    }
}

impl fmt::Debug for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_dimacs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimacs_conversion() {
        let lit = Literal::from_dimacs(-7).unwrap();
        assert_eq!(lit.var(), 7);
        assert!(!lit.polarity());
        assert_eq!(lit.to_dimacs(), -7);
        assert_eq!(Literal::from_dimacs(0), None);
    }

    #[test]
    fn negation_flips_polarity_only() {
        let lit = Literal::from_var_with_polarity(3, true);
        assert_eq!(!lit, Literal::from_var_with_polarity(3, false));
        assert_eq!(!!lit, lit);
        assert_eq!((!lit).var(), 3);
    }

    #[test]
    fn evaluation() {
        let mut assignment = Assignment::new(2);
        let lit = Literal::from_dimacs(-2).unwrap();
        assert!(!lit.is_true(&assignment));
        assert!(!(!lit).is_true(&assignment));
        assignment.set(2, false);
        assert!(lit.is_true(&assignment));
        assert!(!(!lit).is_true(&assignment));
    }
}
