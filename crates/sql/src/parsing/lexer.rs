use std::fmt::Display;
use std::iter::Peekable;
use std::str::Chars;

use crate::error::{Error, Result};

/// The lexer turns raw SQL into tokens for the parser: keywords, identifiers,
/// numbers, strings and symbols. Whitespace and quotes are stripped, and
/// keywords are matched regardless of case.
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
}

/// A lexical token.
///
/// Identifiers keep the spelling they were written with; name matching is
/// case-insensitive later on.
#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    /// A numeric string, with digits, decimal points, and/or exponents.
    Number(String),
    /// A Unicode string, with quotes stripped and escapes resolved.
    String(String),
    /// An identifier, with any quotes stripped.
    Ident(String),
    /// A SQL keyword.
    Keyword(Keyword),

    Period,             // .
    Equal,              // =
    NotEqual,           // !=
    LessOrGreaterThan,  // <>
    GreaterThan,        // >
    GreaterThanOrEqual, // >=
    LessThan,           // <
    LessThanOrEqual,    // <=
    Plus,               // +
    Minus,              // -
    Asterisk,           // *
    Slash,              // /
    Percent,            // %
    OpenParen,          // (
    CloseParen,         // )
    Comma,              // ,
    Semicolon,          // ;
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Number(n) => n,
            Self::String(s) => return write!(f, "'{}'", s.replace('\'', "''")),
            Self::Ident(s) => s,
            Self::Keyword(k) => return k.fmt(f),
            Self::Period => ".",
            Self::Equal => "=",
            Self::NotEqual => "!=",
            Self::LessOrGreaterThan => "<>",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Asterisk => "*",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::OpenParen => "(",
            Self::CloseParen => ")",
            Self::Comma => ",",
            Self::Semicolon => ";",
        })
    }
}

impl From<Keyword> for Token {
    fn from(keyword: Keyword) -> Self {
        Self::Keyword(keyword)
    }
}

/// Reserved SQL keywords.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Keyword {
    All,
    And,
    As,
    Between,
    Create,
    Cross,
    Delete,
    Distinct,
    Drop,
    Except,
    Exists,
    False,
    From,
    Full,
    If,
    In,
    Inner,
    Insert,
    Intersect,
    Into,
    Is,
    Join,
    Left,
    Not,
    Null,
    On,
    Or,
    Outer,
    Right,
    Select,
    Set,
    Table,
    True,
    Union,
    Update,
    Values,
    Where,
}

impl TryFrom<&str> for Keyword {
    // Use a cheap static error string. This just indicates it's not a keyword.
    type Error = &'static str;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        // Only compare lowercase, which is enforced by the lexer. This avoids
        // allocating a string to change the case.
        debug_assert!(value.chars().all(|c| !c.is_uppercase()), "keyword must be lowercase");
        Ok(match value {
            "all" => Self::All,
            "and" => Self::And,
            "as" => Self::As,
            "between" => Self::Between,
            "create" => Self::Create,
            "cross" => Self::Cross,
            "delete" => Self::Delete,
            "distinct" => Self::Distinct,
            "drop" => Self::Drop,
            "except" => Self::Except,
            "exists" => Self::Exists,
            "false" => Self::False,
            "from" => Self::From,
            "full" => Self::Full,
            "if" => Self::If,
            "in" => Self::In,
            "inner" => Self::Inner,
            "insert" => Self::Insert,
            "intersect" => Self::Intersect,
            "into" => Self::Into,
            "is" => Self::Is,
            "join" => Self::Join,
            "left" => Self::Left,
            "not" => Self::Not,
            "null" => Self::Null,
            "on" => Self::On,
            "or" => Self::Or,
            "outer" => Self::Outer,
            "right" => Self::Right,
            "select" => Self::Select,
            "set" => Self::Set,
            "table" => Self::Table,
            "true" => Self::True,
            "union" => Self::Union,
            "update" => Self::Update,
            "values" => Self::Values,
            "where" => Self::Where,
            _ => return Err("not a keyword"),
        })
    }
}

impl Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Display keywords as uppercase.
        f.write_str(match self {
            Self::All => "ALL",
            Self::And => "AND",
            Self::As => "AS",
            Self::Between => "BETWEEN",
            Self::Create => "CREATE",
            Self::Cross => "CROSS",
            Self::Delete => "DELETE",
            Self::Distinct => "DISTINCT",
            Self::Drop => "DROP",
            Self::Except => "EXCEPT",
            Self::Exists => "EXISTS",
            Self::False => "FALSE",
            Self::From => "FROM",
            Self::Full => "FULL",
            Self::If => "IF",
            Self::In => "IN",
            Self::Inner => "INNER",
            Self::Insert => "INSERT",
            Self::Intersect => "INTERSECT",
            Self::Into => "INTO",
            Self::Is => "IS",
            Self::Join => "JOIN",
            Self::Left => "LEFT",
            Self::Not => "NOT",
            Self::Null => "NULL",
            Self::On => "ON",
            Self::Or => "OR",
            Self::Outer => "OUTER",
            Self::Right => "RIGHT",
            Self::Select => "SELECT",
            Self::Set => "SET",
            Self::Table => "TABLE",
            Self::True => "TRUE",
            Self::Union => "UNION",
            Self::Update => "UPDATE",
            Self::Values => "VALUES",
            Self::Where => "WHERE",
        })
    }
}

/// The lexer is used as a token iterator.
impl Iterator for Lexer<'_> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Result<Token>> {
        match self.scan() {
            Ok(Some(token)) => Some(Ok(token)),
            // If there's any remaining chars, the lexer didn't recognize them.
            // Otherwise, we're done lexing.
            Ok(None) => self
                .chars
                .peek()
                .map(|c| Err(Error::ParseError(format!("unexpected character {}", c)))),
            Err(err) => Some(Err(err)),
        }
    }
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given string.
    pub fn new(input: &'a str) -> Lexer<'a> {
        Lexer {
            chars: input.chars().peekable(),
        }
    }

    /// Returns the next character if it satisfies the predicate.
    fn next_if(&mut self, predicate: impl Fn(char) -> bool) -> Option<char> {
        self.chars.peek().filter(|&&c| predicate(c))?;
        self.chars.next()
    }

    /// Applies a function to the next character, returning its result and
    /// consuming the next character if it's Some.
    fn next_if_map<T>(&mut self, map: impl Fn(char) -> Option<T>) -> Option<T> {
        let value = self.chars.peek().and_then(|&c| map(c))?;
        self.chars.next();
        Some(value)
    }

    /// Returns true if the next character is the given character, consuming it.
    fn next_is(&mut self, c: char) -> bool {
        self.next_if(|n| n == c).is_some()
    }

    /// Scans the next token, if any.
    fn scan(&mut self) -> Result<Option<Token>> {
        self.skip_whitespace_and_comments();
        match self.chars.peek() {
            Some('\'') => self.scan_string(),
            Some('"') => self.scan_ident_quoted(),
            Some(c) if c.is_ascii_digit() => Ok(self.scan_number()),
            Some(c) if c.is_alphabetic() || *c == '_' => Ok(self.scan_ident_or_keyword()),
            Some(_) => Ok(self.scan_symbol()),
            None => Ok(None),
        }
    }

    /// Scans the next identifier or keyword, if any. Keywords are matched
    /// case-insensitively; identifiers keep their spelling.
    fn scan_ident_or_keyword(&mut self) -> Option<Token> {
        let mut name = self.next_if(|c| c.is_alphabetic() || c == '_')?.to_string();
        while let Some(c) = self.next_if(|c| c.is_alphanumeric() || c == '_') {
            name.push(c)
        }
        match Keyword::try_from(name.to_lowercase().as_str()) {
            Ok(keyword) => Some(Token::Keyword(keyword)),
            Err(_) => Some(Token::Ident(name)),
        }
    }

    /// Scans the next quoted identifier, if any.
    fn scan_ident_quoted(&mut self) -> Result<Option<Token>> {
        if !self.next_is('"') {
            return Ok(None);
        }
        let mut ident = String::new();
        loop {
            match self.chars.next() {
                // "" is the escape sequence for ".
                Some('"') if self.next_is('"') => ident.push('"'),
                Some('"') => break,
                Some(c) => ident.push(c),
                None => return Err(Error::ParseError("unexpected end of quoted identifier".into())),
            }
        }
        Ok(Some(Token::Ident(ident)))
    }

    /// Scans the next number, if any.
    fn scan_number(&mut self) -> Option<Token> {
        let mut number = self.next_if(|c| c.is_ascii_digit())?.to_string();
        while let Some(c) = self.next_if(|c| c.is_ascii_digit()) {
            number.push(c)
        }
        if self.next_is('.') {
            number.push('.');
            while let Some(dec) = self.next_if(|c| c.is_ascii_digit()) {
                number.push(dec)
            }
        }
        if let Some(exp) = self.next_if(|c| c == 'e' || c == 'E') {
            number.push(exp);
            if let Some(sign) = self.next_if(|c| c == '+' || c == '-') {
                number.push(sign)
            }
            while let Some(c) = self.next_if(|c| c.is_ascii_digit()) {
                number.push(c)
            }
        }
        Some(Token::Number(number))
    }

    /// Scans the next quoted string literal, if any.
    fn scan_string(&mut self) -> Result<Option<Token>> {
        if !self.next_is('\'') {
            return Ok(None);
        }
        let mut string = String::new();
        loop {
            match self.chars.next() {
                // '' is the escape sequence for '.
                Some('\'') if self.next_is('\'') => string.push('\''),
                Some('\'') => break,
                Some(c) => string.push(c),
                None => return Err(Error::ParseError("unexpected end of string literal".into())),
            }
        }
        Ok(Some(Token::String(string)))
    }

    /// Scans the next symbol token, if any.
    fn scan_symbol(&mut self) -> Option<Token> {
        // ! only appears as part of !=.
        if self.chars.peek() == Some(&'!') {
            let mut lookahead = self.chars.clone();
            lookahead.next();
            if lookahead.peek() != Some(&'=') {
                return None;
            }
            self.chars.next();
            self.chars.next();
            return Some(Token::NotEqual);
        }
        let token = self.next_if_map(|c| {
            Some(match c {
                '.' => Token::Period,
                '=' => Token::Equal,
                '>' => Token::GreaterThan,
                '<' => Token::LessThan,
                '+' => Token::Plus,
                '-' => Token::Minus,
                '*' => Token::Asterisk,
                '/' => Token::Slash,
                '%' => Token::Percent,
                '(' => Token::OpenParen,
                ')' => Token::CloseParen,
                ',' => Token::Comma,
                ';' => Token::Semicolon,
                _ => return None,
            })
        })?;
        // Handle two-character tokens, e.g. >=.
        Some(match token {
            Token::GreaterThan if self.next_is('=') => Token::GreaterThanOrEqual,
            Token::LessThan if self.next_is('>') => Token::LessOrGreaterThan,
            Token::LessThan if self.next_is('=') => Token::LessThanOrEqual,
            token => token,
        })
    }

    /// Skips any whitespace and `--` line comments.
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            while self.next_if(|c| c.is_whitespace()).is_some() {}
            if self.chars.peek() != Some(&'-') {
                return;
            }
            let mut lookahead = self.chars.clone();
            lookahead.next();
            if lookahead.peek() != Some(&'-') {
                return;
            }
            while self.next_if(|c| c != '\n').is_some() {}
        }
    }
}
