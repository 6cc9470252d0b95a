//! Tests for the calculator trait's provided methods with a custom scorer

use sqlfit_truthness::{Comparison, Scalar, Truthness, TruthnessCalculator};

/// A scorer with no gradient: every comparison is exactly true or false.
struct ExactCalculator;

impl TruthnessCalculator for ExactCalculator {
    fn partial_credit(&self) -> f64 {
        0.2
    }

    fn compare(&self, op: Comparison, lhs: Scalar<'_>, rhs: Scalar<'_>) -> Truthness {
        let (Scalar::Number(a), Scalar::Number(b)) = (lhs, rhs) else {
            return Truthness::FALSE;
        };
        let holds = match op {
            Comparison::Equal => a == b,
            Comparison::NotEqual => a != b,
            Comparison::LessThan => a < b,
            Comparison::LessThanOrEqual => a <= b,
            Comparison::GreaterThan => a > b,
            Comparison::GreaterThanOrEqual => a >= b,
        };
        Truthness::from_bool(holds)
    }
}

#[test]
fn test_provided_partial_uses_own_constant() {
    let calc = ExactCalculator;
    assert_eq!(calc.partial(), Truthness::new(0.2, 1.0));
    assert_eq!(calc.scale_partial(Truthness::FALSE).of_true(), 0.2);
}

#[test]
fn test_and_all_and_or_all() {
    let calc = ExactCalculator;
    let one = Scalar::Number(1.0);
    let two = Scalar::Number(2.0);

    let all_true = calc.and_all([
        calc.compare(Comparison::LessThan, one, two),
        calc.compare(Comparison::NotEqual, one, two),
    ]);
    assert!(all_true.is_true());

    let mixed = calc.and_all([
        calc.compare(Comparison::LessThan, one, two),
        calc.compare(Comparison::Equal, one, two),
    ]);
    assert!(mixed.is_false());
    assert_eq!(mixed.of_true(), 0.5);

    let any = calc.or_all([
        calc.compare(Comparison::Equal, one, two),
        calc.compare(Comparison::GreaterThan, two, one),
    ]);
    assert!(any.is_true());

    assert!(calc.and_all(Vec::<Truthness>::new()).is_true());
    assert!(calc.or_all(Vec::<Truthness>::new()).is_false());
}
