//! SQL expressions and operators

use std::fmt;
use std::hash::{Hash, Hasher};

/// SQL expressions, e.g. `a + 7 > b`. Can be nested.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Expression {
    /// All columns, i.e. *.
    All,
    /// All columns of one table or alias, i.e. t.*.
    QualifiedAll(String),
    /// A column reference, optionally qualified with a table name.
    Column(Option<String>, String),
    /// A literal value.
    Literal(Literal),
    /// An operator.
    Operator(Operator),
}

/// Expression literal values.
#[derive(Clone, Debug)]
pub enum Literal {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

/// Expression operators.
///
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Operator {
    And(Box<Expression>, Box<Expression>), // a AND b
    Not(Box<Expression>),                  // NOT a
    Or(Box<Expression>, Box<Expression>),  // a OR b

    Equal(Box<Expression>, Box<Expression>),       // a = b
    GreaterThan(Box<Expression>, Box<Expression>), // a > b
    GreaterThanOrEqual(Box<Expression>, Box<Expression>), // a >= b
    IsNull(Box<Expression>),                       // a IS NULL
    LessThan(Box<Expression>, Box<Expression>),    // a < b
    LessThanOrEqual(Box<Expression>, Box<Expression>), // a <= b
    NotEqual(Box<Expression>, Box<Expression>),    // a != b

    Add(Box<Expression>, Box<Expression>),       // a + b
    Divide(Box<Expression>, Box<Expression>),    // a / b
    Identity(Box<Expression>),                   // +a
    Multiply(Box<Expression>, Box<Expression>),  // a * b
    Negate(Box<Expression>),                     // -a
    Remainder(Box<Expression>, Box<Expression>), // a % b
    Subtract(Box<Expression>, Box<Expression>),  // a - b

    InList {
        expr: Box<Expression>,
        list: Vec<Expression>,
        negated: bool,
    }, // a IN (b, c, d) or a NOT IN (b, c, d)
    Between {
        expr: Box<Expression>,
        low: Box<Expression>,
        high: Box<Expression>,
        negated: bool,
    }, // a BETWEEN b AND c or a NOT BETWEEN b AND c
}

/// Structural equality: NULL equals NULL and floats compare by bits. SQL
/// comparison semantics live in the evaluator, not here.
impl PartialEq for Literal {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Boolean(l), Self::Boolean(r)) => l == r,
            (Self::Integer(l), Self::Integer(r)) => l == r,
            (Self::Float(l), Self::Float(r)) => l.to_bits() == r.to_bits(),
            (Self::String(l), Self::String(r)) => l == r,
            (_, _) => false,
        }
    }
}

impl Eq for Literal {}

impl Hash for Literal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        core::mem::discriminant(self).hash(state);
        match self {
            Self::Null => {}
            Self::Boolean(v) => v.hash(state),
            Self::Integer(v) => v.hash(state),
            Self::Float(v) => v.to_bits().hash(state),
            Self::String(v) => v.hash(state),
        }
    }
}

impl From<Literal> for Expression {
    fn from(literal: Literal) -> Self {
        Expression::Literal(literal)
    }
}

impl From<Operator> for Expression {
    fn from(operator: Operator) -> Self {
        Expression::Operator(operator)
    }
}

impl Expression {
    /// An unqualified column reference.
    pub fn column(name: &str) -> Self {
        Expression::Column(None, name.to_string())
    }

    /// A column reference qualified by a table name or alias.
    pub fn qualified(table: &str, name: &str) -> Self {
        Expression::Column(Some(table.to_string()), name.to_string())
    }

    /// Visits every node depth-first until the visitor returns false, which
    /// is then returned.
    pub fn walk(&self, visitor: &mut impl FnMut(&Expression) -> bool) -> bool {
        use Operator::*;

        if !visitor(self) {
            return false;
        }

        match self {
            Self::Operator(op) => match op {
                Add(lhs, rhs)
                | And(lhs, rhs)
                | Divide(lhs, rhs)
                | Equal(lhs, rhs)
                | GreaterThan(lhs, rhs)
                | GreaterThanOrEqual(lhs, rhs)
                | LessThan(lhs, rhs)
                | LessThanOrEqual(lhs, rhs)
                | Multiply(lhs, rhs)
                | NotEqual(lhs, rhs)
                | Or(lhs, rhs)
                | Remainder(lhs, rhs)
                | Subtract(lhs, rhs) => lhs.walk(visitor) && rhs.walk(visitor),

                Identity(expr) | IsNull(expr) | Negate(expr) | Not(expr) => expr.walk(visitor),

                InList { expr, list, .. } => {
                    expr.walk(visitor) && list.iter().all(|e| e.walk(visitor))
                }

                Between {
                    expr, low, high, ..
                } => expr.walk(visitor) && low.walk(visitor) && high.walk(visitor),
            },

            Self::All | Self::QualifiedAll(_) | Self::Column(_, _) | Self::Literal(_) => true,
        }
    }

    /// Whether the expression mentions any column. An expression without
    /// column mentions has the same value for every row.
    pub fn references_columns(&self) -> bool {
        !self.walk(&mut |expr| !matches!(expr, Self::Column(_, _)))
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "NULL"),
            Self::Boolean(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            Self::Integer(i) => write!(f, "{}", i),
            Self::Float(v) => write!(f, "{}", v),
            Self::String(s) => write!(f, "'{}'", s.replace('\'', "''")),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Operator::*;
        match self {
            Self::All => write!(f, "*"),
            Self::QualifiedAll(table) => write!(f, "{}.*", table),
            Self::Column(Some(table), column) => write!(f, "{}.{}", table, column),
            Self::Column(None, column) => write!(f, "{}", column),
            Self::Literal(literal) => write!(f, "{}", literal),
            Self::Operator(op) => match op {
                And(l, r) => write!(f, "({} AND {})", l, r),
                Or(l, r) => write!(f, "({} OR {})", l, r),
                Not(e) => write!(f, "NOT {}", e),
                Equal(l, r) => write!(f, "{} = {}", l, r),
                NotEqual(l, r) => write!(f, "{} != {}", l, r),
                GreaterThan(l, r) => write!(f, "{} > {}", l, r),
                GreaterThanOrEqual(l, r) => write!(f, "{} >= {}", l, r),
                LessThan(l, r) => write!(f, "{} < {}", l, r),
                LessThanOrEqual(l, r) => write!(f, "{} <= {}", l, r),
                IsNull(e) => write!(f, "{} IS NULL", e),
                Add(l, r) => write!(f, "({} + {})", l, r),
                Subtract(l, r) => write!(f, "({} - {})", l, r),
                Multiply(l, r) => write!(f, "({} * {})", l, r),
                Divide(l, r) => write!(f, "({} / {})", l, r),
                Remainder(l, r) => write!(f, "({} % {})", l, r),
                Identity(e) => write!(f, "+{}", e),
                Negate(e) => write!(f, "-{}", e),
                InList {
                    expr,
                    list,
                    negated,
                } => {
                    let items: Vec<String> = list.iter().map(ToString::to_string).collect();
                    let not = if *negated { "NOT " } else { "" };
                    write!(f, "{} {}IN ({})", expr, not, items.join(", "))
                }
                Between {
                    expr,
                    low,
                    high,
                    negated,
                } => {
                    let not = if *negated { "NOT " } else { "" };
                    write!(f, "{} {}BETWEEN {} AND {}", expr, not, low, high)
                }
            },
        }
    }
}
