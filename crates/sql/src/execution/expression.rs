//! Expression evaluation and predicate scoring
//!
//! Values are computed as usual. Predicates are scored as truthness instead
//! of booleans, so a failed comparison still says how far it was from
//! holding.

use super::StatementEvaluator;
use crate::error::{Error, Result};
use crate::parsing::ast::{Expression, Literal, Operator};
use crate::types::{Row, Value};
use sqlfit_truthness::{Comparison, Truthness, TruthnessCalculator};

impl<T: TruthnessCalculator> StatementEvaluator<'_, T> {
    /// Evaluates an expression to a value against a row.
    pub(super) fn value(&self, expr: &Expression, row: Row<'_>) -> Result<Value> {
        self.evaluate_value(expr, row, true)
    }

    /// Scores an expression as a predicate against a row.
    pub(super) fn truthness(&self, expr: &Expression, row: Row<'_>) -> Result<Truthness> {
        self.evaluate_truthness(expr, row, true)
    }

    /// Looks up a column mention. Unqualified mentions that no FROM item
    /// exposes fall back to the select-list alias of that name, but an
    /// aliased expression never falls back again.
    fn column(
        &self,
        table: Option<&str>,
        column: &str,
        row: Row<'_>,
        aliases: bool,
    ) -> Result<Value> {
        match self.resolver.resolve(table, column) {
            Ok(reference) => Ok(reference.value(&row)?.clone()),
            Err(Error::ColumnNotFound(name)) => match (table, aliases) {
                (None, true) => match self.resolver.select_alias(column) {
                    Some(expr) => self.evaluate_value(expr, row, false),
                    None => Err(Error::ColumnNotFound(name)),
                },
                _ => Err(Error::ColumnNotFound(name)),
            },
            Err(err) => Err(err),
        }
    }

    fn evaluate_value(&self, expr: &Expression, row: Row<'_>, aliases: bool) -> Result<Value> {
        use Operator::*;

        Ok(match expr {
            Expression::Literal(literal) => literal_value(literal),
            Expression::Column(table, column) => {
                return self.column(table.as_deref(), column, row, aliases);
            }
            Expression::All | Expression::QualifiedAll(_) => {
                return Err(Error::InvalidValue(format!(
                    "{} is not allowed in an expression",
                    expr
                )));
            }

            Expression::Operator(op) => match op {
                Add(lhs, rhs) | Subtract(lhs, rhs) | Multiply(lhs, rhs) | Divide(lhs, rhs)
                | Remainder(lhs, rhs) => arithmetic(
                    op,
                    self.evaluate_value(lhs, row, aliases)?,
                    self.evaluate_value(rhs, row, aliases)?,
                )?,
                Identity(expr) => match self.evaluate_value(expr, row, aliases)? {
                    value @ (Value::Null | Value::I64(_) | Value::F64(_)) => value,
                    value => return Err(not_numeric("+", &value)),
                },
                Negate(expr) => match self.evaluate_value(expr, row, aliases)? {
                    Value::Null => Value::Null,
                    Value::I64(i) => i.checked_neg().map_or(Value::F64(-(i as f64)), Value::I64),
                    Value::F64(f) => Value::F64(-f),
                    value => return Err(not_numeric("-", &value)),
                },

                // Predicates used as values are boolean, or NULL when unknown.
                And(..) | Or(..) | Not(_) | Equal(..) | NotEqual(..) | GreaterThan(..)
                | GreaterThanOrEqual(..) | LessThan(..) | LessThanOrEqual(..) | IsNull(_)
                | InList { .. } | Between { .. } => {
                    self.logic(expr, row, aliases)?.map_or(Value::Null, Value::Bool)
                }
            },
        })
    }

    fn evaluate_truthness(&self, expr: &Expression, row: Row<'_>, aliases: bool) -> Result<Truthness> {
        use Operator::*;

        let Expression::Operator(op) = expr else {
            let value = self.evaluate_value(expr, row, aliases)?;
            return Ok(Truthness::from_bool(value.to_bool()?));
        };

        let truthness = match op {
            And(lhs, rhs) => {
                return Ok(self.calculator.and(
                    self.evaluate_truthness(lhs, row, aliases)?,
                    self.evaluate_truthness(rhs, row, aliases)?,
                ));
            }
            Or(lhs, rhs) => {
                return Ok(self.calculator.or(
                    self.evaluate_truthness(lhs, row, aliases)?,
                    self.evaluate_truthness(rhs, row, aliases)?,
                ));
            }
            // NOT UNKNOWN is still UNKNOWN, so it never holds.
            Not(expr) => {
                if self.logic(expr, row, aliases)?.is_none() {
                    return Ok(Truthness::FALSE);
                }
                return Ok(self.evaluate_truthness(expr, row, aliases)?.invert());
            }

            Equal(lhs, rhs) => self.compare(Comparison::Equal, lhs, rhs, row, aliases)?,
            NotEqual(lhs, rhs) => self.compare(Comparison::NotEqual, lhs, rhs, row, aliases)?,
            GreaterThan(lhs, rhs) => self.compare(Comparison::GreaterThan, lhs, rhs, row, aliases)?,
            GreaterThanOrEqual(lhs, rhs) => {
                self.compare(Comparison::GreaterThanOrEqual, lhs, rhs, row, aliases)?
            }
            LessThan(lhs, rhs) => self.compare(Comparison::LessThan, lhs, rhs, row, aliases)?,
            LessThanOrEqual(lhs, rhs) => {
                self.compare(Comparison::LessThanOrEqual, lhs, rhs, row, aliases)?
            }

            IsNull(expr) => Truthness::from_bool(self.evaluate_value(expr, row, aliases)?.is_null()),

            InList {
                expr,
                list,
                negated,
            } => {
                let value = self.evaluate_value(expr, row, aliases)?;
                let mut scores = Vec::with_capacity(list.len());
                for item in list {
                    let item = self.evaluate_value(item, row, aliases)?;
                    let op = if *negated {
                        Comparison::NotEqual
                    } else {
                        Comparison::Equal
                    };
                    scores.push(self.calculator.compare(op, value.as_scalar(), item.as_scalar()));
                }
                if *negated {
                    self.calculator.and_all(scores)
                } else {
                    self.calculator.or_all(scores)
                }
            }

            Between {
                expr,
                low,
                high,
                negated,
            } => {
                let value = self.evaluate_value(expr, row, aliases)?;
                let low = self.evaluate_value(low, row, aliases)?;
                let high = self.evaluate_value(high, row, aliases)?;
                let (value, low, high) = (value.as_scalar(), low.as_scalar(), high.as_scalar());
                if *negated {
                    self.calculator.or(
                        self.calculator.compare(Comparison::LessThan, value, low),
                        self.calculator.compare(Comparison::GreaterThan, value, high),
                    )
                } else {
                    self.calculator.and(
                        self.calculator.compare(Comparison::GreaterThanOrEqual, value, low),
                        self.calculator.compare(Comparison::LessThanOrEqual, value, high),
                    )
                }
            }

            Add(..) | Subtract(..) | Multiply(..) | Divide(..) | Remainder(..) | Identity(_)
            | Negate(_) => {
                let value = self.evaluate_value(expr, row, aliases)?;
                return Ok(Truthness::from_bool(value.to_bool()?));
            }
        };

        // Data-independent conditions hold or fail outright, without a
        // gradient.
        if expr.references_columns() {
            Ok(truthness)
        } else {
            Ok(Truthness::from_bool(truthness.is_true()))
        }
    }

    /// Evaluates a predicate under three-valued logic, where None is
    /// UNKNOWN. Any comparison with a NULL operand is UNKNOWN. Outside of
    /// UNKNOWN this agrees with whether the truthness holds.
    fn logic(&self, expr: &Expression, row: Row<'_>, aliases: bool) -> Result<Option<bool>> {
        use Operator::*;

        let Expression::Operator(op) = expr else {
            return self.value_logic(expr, row, aliases);
        };
        Ok(match op {
            And(lhs, rhs) => and3(
                self.logic(lhs, row, aliases)?,
                self.logic(rhs, row, aliases)?,
            ),
            Or(lhs, rhs) => or3(
                self.logic(lhs, row, aliases)?,
                self.logic(rhs, row, aliases)?,
            ),
            Not(expr) => self.logic(expr, row, aliases)?.map(|b| !b),

            Equal(lhs, rhs) => self.compare_logic(Comparison::Equal, lhs, rhs, row, aliases)?,
            NotEqual(lhs, rhs) => self.compare_logic(Comparison::NotEqual, lhs, rhs, row, aliases)?,
            GreaterThan(lhs, rhs) => {
                self.compare_logic(Comparison::GreaterThan, lhs, rhs, row, aliases)?
            }
            GreaterThanOrEqual(lhs, rhs) => {
                self.compare_logic(Comparison::GreaterThanOrEqual, lhs, rhs, row, aliases)?
            }
            LessThan(lhs, rhs) => self.compare_logic(Comparison::LessThan, lhs, rhs, row, aliases)?,
            LessThanOrEqual(lhs, rhs) => {
                self.compare_logic(Comparison::LessThanOrEqual, lhs, rhs, row, aliases)?
            }

            IsNull(expr) => Some(self.evaluate_value(expr, row, aliases)?.is_null()),

            InList {
                expr,
                list,
                negated,
            } => {
                let value = self.evaluate_value(expr, row, aliases)?;
                let mut found = Some(false);
                for item in list {
                    let item = self.evaluate_value(item, row, aliases)?;
                    match self.holds(Comparison::Equal, &value, &item) {
                        Some(true) => {
                            found = Some(true);
                            break;
                        }
                        Some(false) => {}
                        None => found = None,
                    }
                }
                found.map(|found| found != *negated)
            }

            Between {
                expr,
                low,
                high,
                negated,
            } => {
                let value = self.evaluate_value(expr, row, aliases)?;
                let low = self.evaluate_value(low, row, aliases)?;
                let high = self.evaluate_value(high, row, aliases)?;
                let within = and3(
                    self.holds(Comparison::GreaterThanOrEqual, &value, &low),
                    self.holds(Comparison::LessThanOrEqual, &value, &high),
                );
                within.map(|within| within != *negated)
            }

            Add(..) | Subtract(..) | Multiply(..) | Divide(..) | Remainder(..) | Identity(_)
            | Negate(_) => return self.value_logic(expr, row, aliases),
        })
    }

    /// A plain value used as a condition. NULL is UNKNOWN.
    fn value_logic(&self, expr: &Expression, row: Row<'_>, aliases: bool) -> Result<Option<bool>> {
        match self.evaluate_value(expr, row, aliases)? {
            Value::Null => Ok(None),
            value => Ok(Some(value.to_bool()?)),
        }
    }

    fn compare_logic(
        &self,
        op: Comparison,
        lhs: &Expression,
        rhs: &Expression,
        row: Row<'_>,
        aliases: bool,
    ) -> Result<Option<bool>> {
        let lhs = self.evaluate_value(lhs, row, aliases)?;
        let rhs = self.evaluate_value(rhs, row, aliases)?;
        Ok(self.holds(op, &lhs, &rhs))
    }

    fn holds(&self, op: Comparison, lhs: &Value, rhs: &Value) -> Option<bool> {
        if lhs.is_null() || rhs.is_null() {
            return None;
        }
        Some(self.calculator.compare(op, lhs.as_scalar(), rhs.as_scalar()).is_true())
    }

    fn compare(
        &self,
        op: Comparison,
        lhs: &Expression,
        rhs: &Expression,
        row: Row<'_>,
        aliases: bool,
    ) -> Result<Truthness> {
        let lhs = self.evaluate_value(lhs, row, aliases)?;
        let rhs = self.evaluate_value(rhs, row, aliases)?;
        Ok(self.calculator.compare(op, lhs.as_scalar(), rhs.as_scalar()))
    }
}

/// Kleene conjunction: FALSE wins over UNKNOWN.
fn and3(lhs: Option<bool>, rhs: Option<bool>) -> Option<bool> {
    match (lhs, rhs) {
        (Some(false), _) | (_, Some(false)) => Some(false),
        (Some(true), Some(true)) => Some(true),
        _ => None,
    }
}

/// Kleene disjunction: TRUE wins over UNKNOWN.
fn or3(lhs: Option<bool>, rhs: Option<bool>) -> Option<bool> {
    match (lhs, rhs) {
        (Some(true), _) | (_, Some(true)) => Some(true),
        (Some(false), Some(false)) => Some(false),
        _ => None,
    }
}

fn literal_value(literal: &Literal) -> Value {
    match literal {
        Literal::Null => Value::Null,
        Literal::Boolean(b) => Value::Bool(*b),
        Literal::Integer(i) => Value::I64(*i),
        Literal::Float(f) => Value::F64(*f),
        Literal::String(s) => Value::Str(s.clone()),
    }
}

fn not_numeric(op: &str, value: &Value) -> Error {
    Error::InvalidValue(format!("can't apply {} to {}", op, value.type_name()))
}

/// Binary arithmetic. NULL propagates, integer overflow widens to float, and
/// division by zero yields NULL.
fn arithmetic(op: &Operator, lhs: Value, rhs: Value) -> Result<Value> {
    use Operator::*;

    let symbol = match op {
        Add(..) => "+",
        Subtract(..) => "-",
        Multiply(..) => "*",
        Divide(..) => "/",
        Remainder(..) => "%",
        _ => return Err(Error::InvalidValue(format!("{:?} is not arithmetic", op))),
    };
    if lhs.is_null() || rhs.is_null() {
        return Ok(Value::Null);
    }

    if let (Value::I64(a), Value::I64(b)) = (&lhs, &rhs) {
        let (a, b) = (*a, *b);
        if b == 0 && matches!(op, Divide(..) | Remainder(..)) {
            return Ok(Value::Null);
        }
        let checked = match op {
            Add(..) => a.checked_add(b),
            Subtract(..) => a.checked_sub(b),
            Multiply(..) => a.checked_mul(b),
            Divide(..) => a.checked_div(b),
            _ => a.checked_rem(b),
        };
        if let Some(result) = checked {
            return Ok(Value::I64(result));
        }
    }

    let a = lhs.to_f64().ok_or_else(|| not_numeric(symbol, &lhs))?;
    let b = rhs.to_f64().ok_or_else(|| not_numeric(symbol, &rhs))?;
    if b == 0.0 && matches!(op, Divide(..) | Remainder(..)) {
        return Ok(Value::Null);
    }
    Ok(Value::F64(match op {
        Add(..) => a + b,
        Subtract(..) => a - b,
        Multiply(..) => a * b,
        Divide(..) => a / b,
        _ => a % b,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boxed(value: i64) -> Box<Expression> {
        Box::new(Literal::Integer(value).into())
    }

    #[test]
    fn test_three_valued_connectives() {
        assert_eq!(and3(None, Some(false)), Some(false));
        assert_eq!(and3(Some(true), None), None);
        assert_eq!(and3(Some(true), Some(true)), Some(true));
        assert_eq!(or3(None, Some(true)), Some(true));
        assert_eq!(or3(Some(false), None), None);
        assert_eq!(or3(Some(false), Some(false)), Some(false));
    }

    #[test]
    fn test_integer_arithmetic() {
        let add = Operator::Add(boxed(0), boxed(0));
        assert_eq!(arithmetic(&add, 2.into(), 3.into()), Ok(Value::I64(5)));
        assert_eq!(
            arithmetic(&add, i64::MAX.into(), 1.into()),
            Ok(Value::F64(i64::MAX as f64 + 1.0))
        );
        assert_eq!(arithmetic(&add, Value::Null, 1.into()), Ok(Value::Null));
        let divide = Operator::Divide(boxed(0), boxed(0));
        assert_eq!(arithmetic(&divide, 7.into(), 2.into()), Ok(Value::I64(3)));
        assert_eq!(arithmetic(&divide, 7.into(), 0.into()), Ok(Value::Null));
    }

    #[test]
    fn test_mixed_and_invalid_arithmetic() {
        let multiply = Operator::Multiply(boxed(0), boxed(0));
        assert_eq!(arithmetic(&multiply, 2.into(), 1.5.into()), Ok(Value::F64(3.0)));
        assert!(matches!(
            arithmetic(&multiply, "abc".into(), 2.into()),
            Err(Error::InvalidValue(_))
        ));
    }
}
