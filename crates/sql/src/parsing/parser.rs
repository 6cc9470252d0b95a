use std::collections::BTreeMap;
use std::iter::Peekable;
use std::ops::Add;

use super::{Keyword, Lexer, Token, ast};
use crate::error::{Error, Result};

/// Recursive descent parser over lexer tokens, producing a statement AST.
///
/// Only syntax is checked here. Whether tables and columns exist is decided
/// by the resolver during evaluation.
pub struct Parser<'a> {
    pub lexer: Peekable<Lexer<'a>>,
}

impl Parser<'_> {
    /// Parses exactly one statement, optionally terminated by a semicolon.
    pub fn parse(statement: &str) -> Result<ast::Statement> {
        let mut parser = Self::new(statement);
        let statement = parser.parse_statement()?;
        parser.skip(Token::Semicolon);
        if let Some(token) = parser.lexer.next().transpose()? {
            return Err(Error::ParseError(format!("unexpected token {}", token)));
        }
        Ok(statement)
    }

    /// Parses exactly one expression.
    pub fn parse_expr(expr: &str) -> Result<ast::Expression> {
        let mut parser = Self::new(expr);
        let expression = parser.parse_expression()?;
        if let Some(token) = parser.lexer.next().transpose()? {
            return Err(Error::ParseError(format!("unexpected token {}", token)));
        }
        Ok(expression)
    }

    fn new(input: &str) -> Parser<'_> {
        Parser {
            lexer: Lexer::new(input).peekable(),
        }
    }

    /// The next token. Running out of input is an error.
    fn next(&mut self) -> Result<Token> {
        self.lexer
            .next()
            .transpose()?
            .ok_or_else(|| Error::ParseError("unexpected end of input".into()))
    }

    /// The next token, which must be an identifier.
    fn next_ident(&mut self) -> Result<String> {
        match self.next()? {
            Token::Ident(ident) => Ok(ident),
            token => Err(Error::ParseError(format!(
                "expected identifier, found {}",
                token
            ))),
        }
    }

    /// Takes the next token when the predicate accepts it.
    fn next_if(&mut self, predicate: impl Fn(&Token) -> bool) -> Option<Token> {
        self.peek().ok()?.filter(|&t| predicate(t))?;
        self.next().ok()
    }

    /// Maps the next token through `f`, taking it only when `f` yields a value.
    fn next_if_map<T>(&mut self, f: impl Fn(&Token) -> Option<T>) -> Option<T> {
        let value = f(self.peek().ok()??)?;
        self.next().ok()?;
        Some(value)
    }

    /// Takes the next token if it equals `token`.
    fn next_is(&mut self, token: Token) -> bool {
        self.next_if(|t| t == &token).is_some()
    }

    /// Takes the next token, failing unless it equals `expect`.
    fn expect(&mut self, expect: Token) -> Result<()> {
        let token = self.next()?;
        if token != expect {
            return Err(Error::ParseError(format!(
                "expected {}, found {}",
                expect, token
            )));
        }
        Ok(())
    }

    /// Takes an optional token.
    fn skip(&mut self, token: Token) {
        self.next_is(token);
    }

    /// Peeks the next lexer token if any, but transforms it from
    /// Option<Result<Token>> to Result<Option<Token>> which is more convenient.
    fn peek(&mut self) -> Result<Option<&Token>> {
        self.lexer
            .peek()
            .map(|r| r.as_ref().map_err(|err| err.clone()))
            .transpose()
    }

    /// Parses an optional alias: `AS name` or a bare identifier.
    fn parse_alias(&mut self) -> Result<Option<String>> {
        if self.next_is(Keyword::As.into()) || matches!(self.peek()?, Some(Token::Ident(_))) {
            return Ok(Some(self.next_ident()?));
        }
        Ok(None)
    }

    fn parse_statement(&mut self) -> Result<ast::Statement> {
        let Some(token) = self.peek()? else {
            return Err(Error::ParseError("unexpected end of input".into()));
        };
        match token {
            Token::Keyword(Keyword::Create) => self.parse_create_table(),
            Token::Keyword(Keyword::Drop) => self.parse_drop_table(),

            Token::Keyword(Keyword::Delete) => self.parse_delete(),
            Token::Keyword(Keyword::Insert) => self.parse_insert(),
            Token::Keyword(Keyword::Select) => Ok(ast::Statement::select(self.parse_select()?)),
            Token::Keyword(Keyword::Update) => self.parse_update(),

            token => Err(Error::ParseError(format!("unexpected token {}", token))),
        }
    }

    /// Parses a CREATE TABLE statement. Column types and constraints are kept
    /// as written, since nothing interprets them.
    fn parse_create_table(&mut self) -> Result<ast::Statement> {
        self.expect(Keyword::Create.into())?;
        self.expect(Keyword::Table.into())?;
        let if_not_exists = self.next_is(Keyword::If.into());
        if if_not_exists {
            self.expect(Keyword::Not.into())?;
            self.expect(Keyword::Exists.into())?;
        }
        let name = self.next_ident()?;
        self.expect(Token::OpenParen)?;
        let mut columns = Vec::new();
        loop {
            let column = self.next_ident()?;
            let mut definition = Vec::new();
            let mut depth = 0usize;
            loop {
                match self.peek()? {
                    Some(Token::Comma | Token::CloseParen) if depth == 0 => break,
                    Some(_) => {}
                    None => return Err(Error::ParseError("unexpected end of input".into())),
                }
                let token = self.next()?;
                match token {
                    Token::OpenParen => depth += 1,
                    Token::CloseParen => depth -= 1,
                    _ => {}
                }
                definition.push(token.to_string());
            }
            columns.push(ast::Column {
                name: column,
                definition: definition.join(" "),
            });
            if !self.next_is(Token::Comma) {
                break;
            }
        }
        self.expect(Token::CloseParen)?;
        Ok(ast::Statement::Ddl(ast::DdlStatement::CreateTable {
            name,
            columns,
            if_not_exists,
        }))
    }

    /// Parses a DROP TABLE statement.
    fn parse_drop_table(&mut self) -> Result<ast::Statement> {
        self.expect(Keyword::Drop.into())?;
        self.expect(Keyword::Table.into())?;
        let if_exists = self.next_is(Keyword::If.into());
        if if_exists {
            self.expect(Keyword::Exists.into())?;
        }
        let mut names = Vec::new();
        loop {
            names.push(self.next_ident()?);
            if !self.next_is(Token::Comma) {
                break;
            }
        }
        Ok(ast::Statement::Ddl(ast::DdlStatement::DropTable {
            names,
            if_exists,
        }))
    }

    fn parse_delete(&mut self) -> Result<ast::Statement> {
        self.expect(Keyword::Delete.into())?;
        self.expect(Keyword::From.into())?;
        let table = self.next_ident()?;
        Ok(ast::Statement::delete(table, self.parse_where_clause()?))
    }

    fn parse_insert(&mut self) -> Result<ast::Statement> {
        self.expect(Keyword::Insert.into())?;
        self.expect(Keyword::Into.into())?;
        let table = self.next_ident()?;

        let mut columns = None;
        if self.next_is(Token::OpenParen) {
            let columns = columns.insert(Vec::new());
            loop {
                columns.push(self.next_ident()?);
                if !self.next_is(Token::Comma) {
                    break;
                }
            }
            self.expect(Token::CloseParen)?;
        }

        let source = if self.next_is(Keyword::Values.into()) {
            let mut values = Vec::new();
            loop {
                let mut row = Vec::new();
                self.expect(Token::OpenParen)?;
                loop {
                    row.push(self.parse_expression()?);
                    if !self.next_is(Token::Comma) {
                        break;
                    }
                }
                self.expect(Token::CloseParen)?;
                values.push(row);
                if !self.next_is(Token::Comma) {
                    break;
                }
            }
            ast::InsertSource::Values(values)
        } else if matches!(self.peek()?, Some(Token::Keyword(Keyword::Select))) {
            ast::InsertSource::Select(Box::new(self.parse_select()?))
        } else {
            return Err(Error::ParseError(
                "expected token VALUES or SELECT after INSERT INTO".to_string(),
            ));
        };

        Ok(ast::Statement::insert(table, columns, source))
    }

    /// UPDATE with unique SET columns.
    fn parse_update(&mut self) -> Result<ast::Statement> {
        self.expect(Keyword::Update.into())?;
        let table = self.next_ident()?;
        self.expect(Keyword::Set.into())?;
        let mut set = BTreeMap::new();
        loop {
            let column = self.next_ident()?;
            self.expect(Token::Equal)?;
            let expr = self.parse_expression()?;
            if set.contains_key(&column) {
                return Err(Error::ParseError(format!(
                    "column {} set multiple times",
                    column
                )));
            }
            set.insert(column, expr);
            if !self.next_is(Token::Comma) {
                break;
            }
        }
        Ok(ast::Statement::update(table, set, self.parse_where_clause()?))
    }

    /// Parses a SELECT statement, including any trailing set operations.
    /// Set operators associate to the left, and INTERSECT binds tighter than
    /// UNION and EXCEPT.
    fn parse_select(&mut self) -> Result<ast::SelectStatement> {
        let mut select = self.parse_select_core()?;
        while let Some((op, all)) = self.parse_set_operator() {
            let right = match op {
                ast::SetOperator::Intersect => self.parse_select_core()?,
                ast::SetOperator::Union | ast::SetOperator::Except => {
                    self.parse_intersect_chain()?
                }
            };
            select.set_operations.push(ast::SetOperation {
                op,
                all,
                right: Box::new(right),
            });
        }
        Ok(select)
    }

    /// Parses a SELECT followed by any INTERSECT branches.
    fn parse_intersect_chain(&mut self) -> Result<ast::SelectStatement> {
        let mut select = self.parse_select_core()?;
        while self.next_is(Keyword::Intersect.into()) {
            let all = self.parse_set_quantifier();
            select.set_operations.push(ast::SetOperation {
                op: ast::SetOperator::Intersect,
                all,
                right: Box::new(self.parse_select_core()?),
            });
        }
        Ok(select)
    }

    /// Parses a single SELECT without set operations.
    fn parse_select_core(&mut self) -> Result<ast::SelectStatement> {
        self.expect(Keyword::Select.into())?;
        let distinct = self.next_is(Keyword::Distinct.into());
        if !distinct {
            self.skip(Keyword::All.into());
        }
        Ok(ast::SelectStatement {
            distinct,
            select: self.parse_select_clause()?,
            from: self.parse_from_clause()?,
            r#where: self.parse_where_clause()?,
            set_operations: Vec::new(),
        })
    }

    /// Parses a set operator and its quantifier, if present.
    fn parse_set_operator(&mut self) -> Option<(ast::SetOperator, bool)> {
        let op = self.next_if_map(|token| match token {
            Token::Keyword(Keyword::Union) => Some(ast::SetOperator::Union),
            Token::Keyword(Keyword::Intersect) => Some(ast::SetOperator::Intersect),
            Token::Keyword(Keyword::Except) => Some(ast::SetOperator::Except),
            _ => None,
        })?;
        Some((op, self.parse_set_quantifier()))
    }

    /// ALL keeps duplicates. DISTINCT is the default.
    fn parse_set_quantifier(&mut self) -> bool {
        let all = self.next_is(Keyword::All.into());
        if !all {
            self.skip(Keyword::Distinct.into());
        }
        all
    }

    /// Parses the projection list of a SELECT clause.
    fn parse_select_clause(&mut self) -> Result<Vec<(ast::Expression, Option<String>)>> {
        let mut select = Vec::new();
        loop {
            let expr = self.parse_expression()?;
            let alias = self.parse_alias()?;
            if alias.is_some()
                && matches!(expr, ast::Expression::All | ast::Expression::QualifiedAll(_))
            {
                return Err(Error::ParseError("can't alias *".into()));
            }
            select.push((expr, alias));
            if !self.next_is(Token::Comma) {
                break;
            }
        }
        Ok(select)
    }

    /// FROM items, each a table or subquery followed by any chain of joins.
    /// An empty list means there was no FROM.
    fn parse_from_clause(&mut self) -> Result<Vec<ast::FromClause>> {
        if !self.next_is(Keyword::From.into()) {
            return Ok(Vec::new());
        }
        let mut from = Vec::new();
        loop {
            let mut from_item = self.parse_from_table()?;
            while let Some(r#type) = self.parse_from_join()? {
                let left = Box::new(from_item);
                let right = Box::new(self.parse_from_table()?);
                let mut predicate = None;
                if r#type != ast::JoinType::Cross && self.next_is(Keyword::On.into()) {
                    predicate = Some(self.parse_expression()?)
                }
                from_item = ast::FromClause::Join {
                    left,
                    right,
                    r#type,
                    predicate,
                };
            }
            from.push(from_item);
            if !self.next_is(Token::Comma) {
                break;
            }
        }
        Ok(from)
    }

    // Parses a FROM table or parenthesized subquery.
    fn parse_from_table(&mut self) -> Result<ast::FromClause> {
        if self.next_is(Token::OpenParen) {
            let query = Box::new(self.parse_select()?);
            self.expect(Token::CloseParen)?;
            let alias = self.parse_alias()?;
            return Ok(ast::FromClause::Subquery { query, alias });
        }
        let name = self.next_ident()?;
        if matches!(self.peek()?, Some(Token::Period)) {
            return Err(Error::ParseError(format!(
                "qualified table names are not supported: {}",
                name
            )));
        }
        let alias = self.parse_alias()?;
        Ok(ast::FromClause::Table { name, alias })
    }

    /// The join keywords before the next FROM item, if any.
    fn parse_from_join(&mut self) -> Result<Option<ast::JoinType>> {
        if self.next_is(Keyword::Join.into()) {
            return Ok(Some(ast::JoinType::Inner));
        }
        if self.next_is(Keyword::Cross.into()) {
            self.expect(Keyword::Join.into())?;
            return Ok(Some(ast::JoinType::Cross));
        }
        if self.next_is(Keyword::Inner.into()) {
            self.expect(Keyword::Join.into())?;
            return Ok(Some(ast::JoinType::Inner));
        }
        if self.next_is(Keyword::Left.into()) {
            self.skip(Keyword::Outer.into());
            self.expect(Keyword::Join.into())?;
            return Ok(Some(ast::JoinType::Left));
        }
        if self.next_is(Keyword::Right.into()) {
            self.skip(Keyword::Outer.into());
            self.expect(Keyword::Join.into())?;
            return Ok(Some(ast::JoinType::Right));
        }
        if self.next_is(Keyword::Full.into()) {
            self.skip(Keyword::Outer.into());
            self.expect(Keyword::Join.into())?;
            return Ok(Some(ast::JoinType::Full));
        }
        Ok(None)
    }

    fn parse_where_clause(&mut self) -> Result<Option<ast::Expression>> {
        if !self.next_is(Keyword::Where.into()) {
            return Ok(None);
        }
        Ok(Some(self.parse_expression()?))
    }

    /// Parses an expression consisting of at least one atom operated on by any
    /// number of operators, using the precedence climbing algorithm.
    ///
    /// The key idea is that each recursive call only consumes operators at or
    /// above the given minimum precedence, so e.g. `a = 1 AND b + 2 > 3` nests
    /// as `(a = 1) AND ((b + 2) > 3)`.
    fn parse_expression(&mut self) -> Result<ast::Expression> {
        self.parse_expression_at(0)
    }

    /// Precedence climbing: only operators binding at least as tightly as
    /// `min_precedence` are consumed at this level.
    fn parse_expression_at(&mut self, min_precedence: Precedence) -> Result<ast::Expression> {
        let mut lhs = if let Some(prefix) = self.parse_prefix_operator_at(min_precedence) {
            let next_precedence = prefix.precedence() + prefix.associativity();
            let rhs = self.parse_expression_at(next_precedence)?;
            prefix.into_expression(rhs)
        } else {
            self.parse_expression_atom()?
        };

        while let Some(postfix) = self.parse_postfix_operator_at(min_precedence)? {
            lhs = postfix.into_expression(lhs)
        }

        while let Some(infix) = self.parse_infix_operator_at(min_precedence) {
            let next_precedence = infix.precedence() + infix.associativity();
            let rhs = self.parse_expression_at(next_precedence)?;
            lhs = infix.into_expression(lhs, rhs);
        }

        // A postfix operator may also follow a binary one: 1 + NULL IS NULL.
        while let Some(postfix) = self.parse_postfix_operator_at(min_precedence)? {
            lhs = postfix.into_expression(lhs)
        }

        Ok(lhs)
    }

    /// A literal, a possibly qualified column or wildcard, or a parenthesized
    /// expression.
    fn parse_expression_atom(&mut self) -> Result<ast::Expression> {
        Ok(match self.next()? {
            Token::Asterisk => ast::Expression::All,

            // Literal value. Integers too large for i64 become floats.
            Token::Number(n) if n.chars().all(|c| c.is_ascii_digit()) => match n.parse::<i64>() {
                Ok(val) => ast::Literal::Integer(val).into(),
                Err(_) => ast::Literal::Float(
                    n.parse()
                        .map_err(|e| Error::ParseError(format!("invalid number: {}", e)))?,
                )
                .into(),
            },
            Token::Number(n) => ast::Literal::Float(
                n.parse()
                    .map_err(|e| Error::ParseError(format!("invalid float: {}", e)))?,
            )
            .into(),
            Token::String(s) => ast::Literal::String(s).into(),
            Token::Keyword(Keyword::True) => ast::Literal::Boolean(true).into(),
            Token::Keyword(Keyword::False) => ast::Literal::Boolean(false).into(),
            Token::Keyword(Keyword::Null) => ast::Literal::Null.into(),

            Token::Ident(table) if self.next_is(Token::Period) => {
                if self.next_is(Token::Asterisk) {
                    ast::Expression::QualifiedAll(table)
                } else {
                    ast::Expression::Column(Some(table), self.next_ident()?)
                }
            }
            Token::Ident(column) => ast::Expression::Column(None, column),

            Token::OpenParen => {
                let expr = self.parse_expression()?;
                self.expect(Token::CloseParen)?;
                expr
            }

            token => {
                return Err(Error::ParseError(format!(
                    "expected expression atom, found {}",
                    token
                )));
            }
        })
    }

    /// A prefix operator binding at least as tightly as `min_precedence`.
    fn parse_prefix_operator_at(&mut self, min_precedence: Precedence) -> Option<PrefixOperator> {
        self.next_if_map(|token| {
            let operator = match token {
                Token::Keyword(Keyword::Not) => PrefixOperator::Not,
                Token::Minus => PrefixOperator::Minus,
                Token::Plus => PrefixOperator::Plus,
                _ => return None,
            };
            Some(operator).filter(|op| op.precedence() >= min_precedence)
        })
    }

    /// An infix operator binding at least as tightly as `min_precedence`.
    fn parse_infix_operator_at(&mut self, min_precedence: Precedence) -> Option<InfixOperator> {
        self.next_if_map(|token| {
            let operator = match token {
                Token::Asterisk => InfixOperator::Multiply,
                Token::Equal => InfixOperator::Equal,
                Token::GreaterThan => InfixOperator::GreaterThan,
                Token::GreaterThanOrEqual => InfixOperator::GreaterThanOrEqual,
                Token::Keyword(Keyword::And) => InfixOperator::And,
                Token::Keyword(Keyword::Or) => InfixOperator::Or,
                Token::LessOrGreaterThan => InfixOperator::NotEqual,
                Token::LessThan => InfixOperator::LessThan,
                Token::LessThanOrEqual => InfixOperator::LessThanOrEqual,
                Token::Minus => InfixOperator::Subtract,
                Token::NotEqual => InfixOperator::NotEqual,
                Token::Percent => InfixOperator::Remainder,
                Token::Plus => InfixOperator::Add,
                Token::Slash => InfixOperator::Divide,
                _ => return None,
            };
            Some(operator).filter(|op| op.precedence() >= min_precedence)
        })
    }

    /// IS [NOT] NULL, [NOT] IN or [NOT] BETWEEN. They span several tokens and
    /// share the precedence of =, so the check happens before consuming any.
    fn parse_postfix_operator_at(
        &mut self,
        min_precedence: Precedence,
    ) -> Result<Option<PostfixOperator>> {
        if POSTFIX_PRECEDENCE < min_precedence {
            return Ok(None);
        }
        let negated = match self.peek()? {
            Some(Token::Keyword(Keyword::Is)) => {
                self.next()?;
                let not = self.next_is(Keyword::Not.into());
                self.expect(Keyword::Null.into())?;
                return Ok(Some(match not {
                    false => PostfixOperator::IsNull,
                    true => PostfixOperator::IsNotNull,
                }));
            }
            // After a complete operand, NOT can only introduce NOT IN or
            // NOT BETWEEN.
            Some(Token::Keyword(Keyword::Not)) => {
                self.next()?;
                true
            }
            Some(Token::Keyword(Keyword::In | Keyword::Between)) => false,
            _ => return Ok(None),
        };
        match self.next()? {
            Token::Keyword(Keyword::In) => {
                self.expect(Token::OpenParen)?;
                let mut list = Vec::new();
                loop {
                    list.push(self.parse_expression()?);
                    if !self.next_is(Token::Comma) {
                        break;
                    }
                }
                self.expect(Token::CloseParen)?;
                Ok(Some(PostfixOperator::InList { list, negated }))
            }
            Token::Keyword(Keyword::Between) => {
                // The bounds bind tighter than the AND separating them.
                let low = self.parse_expression_at(POSTFIX_PRECEDENCE + 1)?;
                self.expect(Keyword::And.into())?;
                let high = self.parse_expression_at(POSTFIX_PRECEDENCE + 1)?;
                Ok(Some(PostfixOperator::Between { low, high, negated }))
            }
            token => Err(Error::ParseError(format!(
                "expected IN or BETWEEN after NOT, found {}",
                token
            ))),
        }
    }
}

type Precedence = u8;

/// Precedence shared by IS NULL, IN and BETWEEN, the same as =.
const POSTFIX_PRECEDENCE: Precedence = 4;

enum Associativity {
    Left,
    Right,
}

impl Add<Associativity> for Precedence {
    type Output = Self;

    fn add(self, rhs: Associativity) -> Self {
        // Bumping the right operand's minimum makes equal operators group left.
        self + match rhs {
            Associativity::Left => 1,
            Associativity::Right => 0,
        }
    }
}

/// Prefix operators.
enum PrefixOperator {
    Minus, // -a
    Not,   // NOT a
    Plus,  // +a
}

impl PrefixOperator {
    fn precedence(&self) -> Precedence {
        match self {
            Self::Not => 3,
            Self::Minus | Self::Plus => 10,
        }
    }

    // Always right: a prefix operator applies to everything it climbs over.
    fn associativity(&self) -> Associativity {
        Associativity::Right
    }

    /// Builds an AST expression for the operator.
    fn into_expression(self, rhs: ast::Expression) -> ast::Expression {
        let rhs = Box::new(rhs);
        match self {
            Self::Plus => ast::Operator::Identity(rhs).into(),
            Self::Minus => ast::Operator::Negate(rhs).into(),
            Self::Not => ast::Operator::Not(rhs).into(),
        }
    }
}

/// Infix operators.
enum InfixOperator {
    Add,                // a + b
    And,                // a AND b
    Divide,             // a / b
    Equal,              // a = b
    GreaterThan,        // a > b
    GreaterThanOrEqual, // a >= b
    LessThan,           // a < b
    LessThanOrEqual,    // a <= b
    Multiply,           // a * b
    NotEqual,           // a != b
    Or,                 // a OR b
    Remainder,          // a % b
    Subtract,           // a - b
}

impl InfixOperator {
    /// The operator precedence.
    ///
    /// Mostly follows Postgres, except IS, IN and BETWEEN having the same
    /// precedence as =. This is similar to SQLite and MySQL.
    fn precedence(&self) -> Precedence {
        match self {
            Self::Or => 1,
            Self::And => 2,
            Self::Equal | Self::NotEqual => POSTFIX_PRECEDENCE,
            Self::GreaterThan
            | Self::GreaterThanOrEqual
            | Self::LessThan
            | Self::LessThanOrEqual => 5,
            Self::Add | Self::Subtract => 6,
            Self::Multiply | Self::Divide | Self::Remainder => 7,
        }
    }

    /// The operator associativity.
    fn associativity(&self) -> Associativity {
        Associativity::Left
    }

    /// Builds an AST expression for the infix operator.
    fn into_expression(self, lhs: ast::Expression, rhs: ast::Expression) -> ast::Expression {
        let (lhs, rhs) = (Box::new(lhs), Box::new(rhs));
        match self {
            Self::Add => ast::Operator::Add(lhs, rhs).into(),
            Self::And => ast::Operator::And(lhs, rhs).into(),
            Self::Divide => ast::Operator::Divide(lhs, rhs).into(),
            Self::Equal => ast::Operator::Equal(lhs, rhs).into(),
            Self::GreaterThan => ast::Operator::GreaterThan(lhs, rhs).into(),
            Self::GreaterThanOrEqual => ast::Operator::GreaterThanOrEqual(lhs, rhs).into(),
            Self::LessThan => ast::Operator::LessThan(lhs, rhs).into(),
            Self::LessThanOrEqual => ast::Operator::LessThanOrEqual(lhs, rhs).into(),
            Self::Multiply => ast::Operator::Multiply(lhs, rhs).into(),
            Self::NotEqual => ast::Operator::NotEqual(lhs, rhs).into(),
            Self::Or => ast::Operator::Or(lhs, rhs).into(),
            Self::Remainder => ast::Operator::Remainder(lhs, rhs).into(),
            Self::Subtract => ast::Operator::Subtract(lhs, rhs).into(),
        }
    }
}

/// Postfix operators.
enum PostfixOperator {
    IsNull,    // a IS NULL
    IsNotNull, // a IS NOT NULL
    InList {
        list: Vec<ast::Expression>,
        negated: bool,
    }, // a [NOT] IN (b, c)
    Between {
        low: ast::Expression,
        high: ast::Expression,
        negated: bool,
    }, // a [NOT] BETWEEN b AND c
}

impl PostfixOperator {
    /// Builds an AST expression for the operator.
    fn into_expression(self, lhs: ast::Expression) -> ast::Expression {
        let lhs = Box::new(lhs);
        match self {
            Self::IsNull => ast::Operator::IsNull(lhs).into(),
            Self::IsNotNull => ast::Operator::Not(Box::new(ast::Operator::IsNull(lhs).into())).into(),
            Self::InList { list, negated } => ast::Operator::InList {
                expr: lhs,
                list,
                negated,
            }
            .into(),
            Self::Between { low, high, negated } => ast::Operator::Between {
                expr: lhs,
                low: Box::new(low),
                high: Box::new(high),
                negated,
            }
            .into(),
        }
    }
}
