//! Branch-distance scoring for scalar comparisons.

use crate::calculator::{Comparison, Scalar, TruthnessCalculator};
use crate::config::TruthnessConfig;
use crate::truthness::Truthness;

/// Penalty per character of length difference in string distance.
const CHAR_LENGTH_PENALTY: f64 = u16::MAX as f64;

/// Offset keeping unsatisfied ordering scores strictly below 1.
const ORDERING_BASE: f64 = 1.1;

/// Default calculator: numeric distance for numbers, left-aligned character
/// distance for strings, exact results for booleans.
#[derive(Debug, Clone, Default)]
pub struct DistanceCalculator {
    config: TruthnessConfig,
}

impl DistanceCalculator {
    pub fn new(config: TruthnessConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TruthnessConfig {
        &self.config
    }

    fn compare_numbers(&self, op: Comparison, a: f64, b: f64) -> Truthness {
        if a.is_nan() || b.is_nan() {
            return Truthness::FALSE;
        }
        let distance = (a - b).abs();
        match op {
            Comparison::Equal => equality(distance, a == b),
            Comparison::NotEqual => equality(distance, a == b).invert(),
            Comparison::LessThan => less_than(distance, a < b),
            Comparison::GreaterThan => less_than(distance, b < a),
            Comparison::LessThanOrEqual => less_than(distance, b < a).invert(),
            Comparison::GreaterThanOrEqual => less_than(distance, a < b).invert(),
        }
    }

    fn compare_text(&self, op: Comparison, a: &str, b: &str) -> Truthness {
        let distance = left_alignment_distance(a, b);
        match op {
            Comparison::Equal => equality(distance, a == b),
            Comparison::NotEqual => equality(distance, a == b).invert(),
            Comparison::LessThan => less_than(distance, a < b),
            Comparison::GreaterThan => less_than(distance, b < a),
            Comparison::LessThanOrEqual => less_than(distance, b < a).invert(),
            Comparison::GreaterThanOrEqual => less_than(distance, a < b).invert(),
        }
    }
}

impl TruthnessCalculator for DistanceCalculator {
    fn partial_credit(&self) -> f64 {
        self.config.partial_credit
    }

    fn compare(&self, op: Comparison, lhs: Scalar<'_>, rhs: Scalar<'_>) -> Truthness {
        use Scalar::*;
        let truthness = match (lhs, rhs) {
            (Null, _) | (_, Null) => Truthness::FALSE,
            (Number(a), Number(b)) => self.compare_numbers(op, a, b),
            (Text(a), Text(b)) => self.compare_text(op, a, b),
            (Boolean(a), Boolean(b)) => self.compare_numbers(op, a.into(), b.into()),
            (Boolean(a), Number(b)) => self.compare_numbers(op, a.into(), b),
            (Number(a), Boolean(b)) => self.compare_numbers(op, a, b.into()),
            // Text that reads as a number is compared numerically; anything
            // else falls back to comparing the textual forms.
            (Number(a), Text(b)) => match b.trim().parse::<f64>() {
                Ok(b) => self.compare_numbers(op, a, b),
                Err(_) => self.compare_text(op, &a.to_string(), b),
            },
            (Text(a), Number(b)) => match a.trim().parse::<f64>() {
                Ok(a) => self.compare_numbers(op, a, b),
                Err(_) => self.compare_text(op, a, &b.to_string()),
            },
            (Boolean(a), Text(b)) => self.compare_text(op, &a.to_string(), &b.to_lowercase()),
            (Text(a), Boolean(b)) => self.compare_text(op, &a.to_lowercase(), &b.to_string()),
        };
        tracing::trace!("{:?} {} {:?} => {}", lhs, op, rhs, truthness);
        truthness
    }
}

/// Maps a non-negative distance into `[0, 1)`.
fn normalize(distance: f64) -> f64 {
    if distance.is_infinite() {
        1.0
    } else {
        distance / (distance + 1.0)
    }
}

fn equality(distance: f64, equal: bool) -> Truthness {
    Truthness::new(1.0 - normalize(distance), if equal { 0.0 } else { 1.0 })
}

fn less_than(distance: f64, holds: bool) -> Truthness {
    let graded = 1.0 / (ORDERING_BASE + distance);
    if holds {
        Truthness::new(1.0, graded)
    } else {
        Truthness::new(graded, 1.0)
    }
}

/// Character distance between two strings aligned on their first character,
/// plus a fixed penalty per character of length difference.
pub fn left_alignment_distance(a: &str, b: &str) -> f64 {
    let (a, b): (Vec<char>, Vec<char>) = (a.chars().collect(), b.chars().collect());
    let length_diff = a.len().abs_diff(b.len()) as f64;
    let char_diff: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| (*x as u32).abs_diff(*y as u32) as f64)
        .sum();
    length_diff * CHAR_LENGTH_PENALTY + char_diff
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calculator() -> DistanceCalculator {
        DistanceCalculator::default()
    }

    #[test]
    fn test_numeric_equality() {
        let calc = calculator();
        assert!(calc.compare(Comparison::Equal, Scalar::Number(3.0), Scalar::Number(3.0)).is_true());

        let t = calc.compare(Comparison::Equal, Scalar::Number(3.0), Scalar::Number(4.0));
        assert_eq!(t.of_true(), 0.5);
        assert!(t.is_false());

        let far = calc.compare(Comparison::Equal, Scalar::Number(3.0), Scalar::Number(100.0));
        assert!(far.of_true() < t.of_true());
    }

    #[test]
    fn test_not_equal_is_inverted_equality() {
        let calc = calculator();
        let eq = calc.compare(Comparison::Equal, Scalar::Number(1.0), Scalar::Number(5.0));
        let ne = calc.compare(Comparison::NotEqual, Scalar::Number(1.0), Scalar::Number(5.0));
        assert_eq!(ne, eq.invert());
        assert!(ne.is_true());
    }

    #[test]
    fn test_orderings() {
        let calc = calculator();
        let (one, two) = (Scalar::Number(1.0), Scalar::Number(2.0));

        assert!(calc.compare(Comparison::LessThan, one, two).is_true());
        assert!(!calc.compare(Comparison::LessThan, two, one).is_true());
        assert!(!calc.compare(Comparison::LessThan, one, one).is_true());
        assert!(calc.compare(Comparison::LessThanOrEqual, one, one).is_true());
        assert!(calc.compare(Comparison::GreaterThan, two, one).is_true());
        assert!(calc.compare(Comparison::GreaterThanOrEqual, two, two).is_true());
        assert!(!calc.compare(Comparison::GreaterThanOrEqual, one, two).is_true());

        // Closer operands score higher when unsatisfied.
        let near = calc.compare(Comparison::GreaterThan, Scalar::Number(9.0), Scalar::Number(10.0));
        let far = calc.compare(Comparison::GreaterThan, Scalar::Number(1.0), Scalar::Number(10.0));
        assert!(near.of_true() > far.of_true());
    }

    #[test]
    fn test_null_never_satisfies() {
        let calc = calculator();
        for op in [Comparison::Equal, Comparison::NotEqual, Comparison::LessThan] {
            assert_eq!(calc.compare(op, Scalar::Null, Scalar::Number(1.0)), Truthness::FALSE);
            assert_eq!(calc.compare(op, Scalar::Text("a"), Scalar::Null), Truthness::FALSE);
        }
    }

    #[test]
    fn test_string_equality() {
        let calc = calculator();
        assert!(calc.compare(Comparison::Equal, Scalar::Text("abc"), Scalar::Text("abc")).is_true());

        let close = calc.compare(Comparison::Equal, Scalar::Text("abc"), Scalar::Text("abd"));
        let far = calc.compare(Comparison::Equal, Scalar::Text("abc"), Scalar::Text("abcdef"));
        assert!(!close.is_true());
        assert!(close.of_true() > far.of_true());
    }

    #[test]
    fn test_mixed_number_and_text() {
        let calc = calculator();
        assert!(calc.compare(Comparison::Equal, Scalar::Number(42.0), Scalar::Text("42")).is_true());
        assert!(!calc.compare(Comparison::Equal, Scalar::Number(42.0), Scalar::Text("x")).is_true());
    }

    #[test]
    fn test_left_alignment_distance() {
        assert_eq!(left_alignment_distance("abc", "abc"), 0.0);
        assert_eq!(left_alignment_distance("abc", "abd"), 1.0);
        assert_eq!(left_alignment_distance("a", "ab"), 65535.0);
    }

    #[test]
    fn test_and_or_aggregation() {
        let calc = calculator();
        let partial = calc.partial();

        let and = calc.and(Truthness::TRUE, partial);
        assert!((and.of_true() - 0.55).abs() < 1e-12);
        assert!(and.is_false());

        let or = calc.or(Truthness::TRUE, partial);
        assert!(or.is_true());
        assert_eq!(calc.or(partial, partial).of_true(), 0.1);
    }

    #[test]
    fn test_scale_partial() {
        let calc = calculator();
        assert_eq!(calc.scale_partial(Truthness::FALSE), calc.partial());
        assert_eq!(calc.scale_partial(Truthness::TRUE), Truthness::TRUE);
        let scaled = calc.scale_partial(Truthness::new(0.5, 1.0));
        assert!((scaled.of_true() - 0.55).abs() < 1e-12);
    }

    #[test]
    fn test_custom_partial_credit() {
        let config = TruthnessConfig::with_partial_credit(0.25).unwrap();
        let calc = DistanceCalculator::new(config);
        assert_eq!(calc.partial(), Truthness::new(0.25, 1.0));
        assert_eq!(calc.reachability(false).of_true(), 0.25);
        assert!(calc.reachability(true).is_true());
    }
}
