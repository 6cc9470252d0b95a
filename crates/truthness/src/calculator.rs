//! The truthness calculator seam.

use crate::truthness::Truthness;
use std::fmt;

/// A scalar operand handed to a comparison. Borrowed so callers never clone
/// row values just to score them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar<'a> {
    Null,
    Boolean(bool),
    Number(f64),
    Text(&'a str),
}

impl Scalar<'_> {
    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }
}

/// Relational and equality operators that can be scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparison {
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Equal => "=",
            Self::NotEqual => "!=",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
        })
    }
}

/// Scores comparisons and folds truthness values together.
///
/// Implementations own their partial-credit constant, so independent
/// evaluation sessions may use different values.
pub trait TruthnessCalculator {
    /// The partial credit constant `C`.
    fn partial_credit(&self) -> f64;

    /// Scores `lhs <op> rhs`. A NULL operand never satisfies a comparison.
    fn compare(&self, op: Comparison, lhs: Scalar<'_>, rhs: Scalar<'_>) -> Truthness;

    /// Conjunction: the mean of both `of_true` values, certainly false if
    /// either side is.
    fn and(&self, lhs: Truthness, rhs: Truthness) -> Truthness {
        let of_true = (lhs.of_true() + rhs.of_true()) / 2.0;
        let of_false = if lhs.is_false() || rhs.is_false() {
            1.0
        } else {
            (lhs.of_false() + rhs.of_false()) / 2.0
        };
        Truthness::new(of_true, of_false)
    }

    /// Disjunction: certainly true if either side is, otherwise the mean.
    fn or(&self, lhs: Truthness, rhs: Truthness) -> Truthness {
        let of_true = if lhs.is_true() || rhs.is_true() {
            1.0
        } else {
            (lhs.of_true() + rhs.of_true()) / 2.0
        };
        let of_false = (lhs.of_false() + rhs.of_false()) / 2.0;
        Truthness::new(of_true, of_false)
    }

    /// Folds a sequence with [`TruthnessCalculator::and`]. Empty input is true.
    fn and_all(&self, items: impl IntoIterator<Item = Truthness>) -> Truthness
    where
        Self: Sized,
    {
        items
            .into_iter()
            .reduce(|acc, t| self.and(acc, t))
            .unwrap_or(Truthness::TRUE)
    }

    /// Folds a sequence with [`TruthnessCalculator::or`]. Empty input is false.
    fn or_all(&self, items: impl IntoIterator<Item = Truthness>) -> Truthness
    where
        Self: Sized,
    {
        items
            .into_iter()
            .reduce(|acc, t| self.or(acc, t))
            .unwrap_or(Truthness::FALSE)
    }

    /// `(C, 1)`: reachable, but not satisfied.
    fn partial(&self) -> Truthness {
        Truthness::new(self.partial_credit(), 1.0)
    }

    /// `TRUE` when `reached`, partial credit otherwise.
    fn reachability(&self, reached: bool) -> Truthness {
        if reached {
            Truthness::TRUE
        } else {
            self.partial()
        }
    }

    /// Lifts `of_true` into `[C, 1]` so an unsatisfied but scored condition
    /// always keeps a non-zero gradient. A true value stays true.
    fn scale_partial(&self, truthness: Truthness) -> Truthness {
        if truthness.is_true() {
            return truthness;
        }
        let c = self.partial_credit();
        Truthness::new(c + (1.0 - c) * truthness.of_true(), truthness.of_false())
    }
}
