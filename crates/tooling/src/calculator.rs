//! Arithmetic calculator over a closed grammar.
//!
//! Input is tokenized and parsed by recursive descent; nothing outside the
//! grammar below is ever evaluated.
//!
//! ```text
//! expr   := term (("+" | "-") term)*
//! term   := unary (("*" | "/") unary)*
//! unary  := ("+" | "-") unary | atom
//! atom   := number | "(" expr ")"
//! ```
//!
//! Integer literals stay exact under `+ - *` (checked `i128`). A decimal
//! literal or a division switches that subexpression to `f64`.

use crate::tool::{Tool, ToolError, ToolKind, ToolName};
use std::fmt;
use thiserror::Error;

const MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalculationError {
    #[error("empty expression")]
    Empty,
    #[error("unexpected character '{0}' at position {1}")]
    UnexpectedCharacter(char, usize),
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
    #[error("unexpected '{0}'")]
    UnexpectedToken(String),
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    #[error("division by zero")]
    DivisionByZero,
    #[error("integer overflow")]
    Overflow,
    #[error("result is not a finite number")]
    NonFinite,
    #[error("expression nested deeper than {0} levels")]
    TooDeep(usize),
}

/// A calculation result: exact integer or floating point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Integer(i128),
    Decimal(f64),
}

impl Number {
    fn as_f64(self) -> f64 {
        match self {
            Number::Integer(value) => value as f64,
            Number::Decimal(value) => value,
        }
    }

    fn is_zero(self) -> bool {
        match self {
            Number::Integer(value) => value == 0,
            Number::Decimal(value) => value == 0.0,
        }
    }

    fn integer_op(
        self,
        rhs: Number,
        exact: fn(i128, i128) -> Option<i128>,
        approx: fn(f64, f64) -> f64,
    ) -> Result<Number, CalculationError> {
        match (self, rhs) {
            (Number::Integer(a), Number::Integer(b)) => exact(a, b)
                .map(Number::Integer)
                .ok_or(CalculationError::Overflow),
            _ => Ok(Number::Decimal(approx(self.as_f64(), rhs.as_f64()))),
        }
    }

    fn add(self, rhs: Number) -> Result<Number, CalculationError> {
        self.integer_op(rhs, i128::checked_add, |a, b| a + b)
    }

    fn sub(self, rhs: Number) -> Result<Number, CalculationError> {
        self.integer_op(rhs, i128::checked_sub, |a, b| a - b)
    }

    fn mul(self, rhs: Number) -> Result<Number, CalculationError> {
        self.integer_op(rhs, i128::checked_mul, |a, b| a * b)
    }

    /// Always true division.
    fn div(self, rhs: Number) -> Result<Number, CalculationError> {
        if rhs.is_zero() {
            return Err(CalculationError::DivisionByZero);
        }
        Ok(Number::Decimal(self.as_f64() / rhs.as_f64()))
    }

    fn neg(self) -> Result<Number, CalculationError> {
        match self {
            Number::Integer(value) => value
                .checked_neg()
                .map(Number::Integer)
                .ok_or(CalculationError::Overflow),
            Number::Decimal(value) => Ok(Number::Decimal(-value)),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(value) => write!(f, "{}", value),
            // Debug keeps the trailing ".0" on whole floats.
            Number::Decimal(value) => write!(f, "{:?}", value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number(Number),
    Plus,
    Minus,
    Star,
    Slash,
    LeftParen,
    RightParen,
}

impl Token {
    fn symbol(&self) -> String {
        match self {
            Token::Number(value) => value.to_string(),
            Token::Plus => "+".to_string(),
            Token::Minus => "-".to_string(),
            Token::Star => "*".to_string(),
            Token::Slash => "/".to_string(),
            Token::LeftParen => "(".to_string(),
            Token::RightParen => ")".to_string(),
        }
    }
}

fn parse_literal(literal: &str) -> Result<Number, CalculationError> {
    if literal.contains('.') {
        return literal
            .parse::<f64>()
            .map(Number::Decimal)
            .map_err(|_| CalculationError::InvalidNumber(literal.to_string()));
    }
    // Only digits reach here, so a failed parse means the literal is too large.
    literal
        .parse::<i128>()
        .map(Number::Integer)
        .map_err(|_| CalculationError::Overflow)
}

fn tokenize(input: &str) -> Result<Vec<Token>, CalculationError> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(position, c)) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '0'..='9' | '.' => {
                let mut literal = String::new();
                while let Some(&(_, d)) = chars.peek() {
                    if d.is_ascii_digit() || d == '.' {
                        literal.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Number(parse_literal(&literal)?));
            }
            _ => {
                let token = match c {
                    '+' => Token::Plus,
                    '-' => Token::Minus,
                    '*' => Token::Star,
                    '/' => Token::Slash,
                    '(' => Token::LeftParen,
                    ')' => Token::RightParen,
                    other => return Err(CalculationError::UnexpectedCharacter(other, position)),
                };
                tokens.push(token);
                chars.next();
            }
        }
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    position: usize,
    depth: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
            depth: 0,
        }
    }

    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.position).copied()
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.peek();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    fn descend(&mut self) -> Result<(), CalculationError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(CalculationError::TooDeep(MAX_DEPTH));
        }
        Ok(())
    }

    fn parse(mut self) -> Result<Number, CalculationError> {
        if self.tokens.is_empty() {
            return Err(CalculationError::Empty);
        }
        let value = self.expr()?;
        match self.peek() {
            None => Ok(value),
            Some(token) => Err(CalculationError::UnexpectedToken(token.symbol())),
        }
    }

    fn expr(&mut self) -> Result<Number, CalculationError> {
        let mut value = self.term()?;
        while let Some(token @ (Token::Plus | Token::Minus)) = self.peek() {
            self.advance();
            let rhs = self.term()?;
            value = if token == Token::Plus {
                value.add(rhs)?
            } else {
                value.sub(rhs)?
            };
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<Number, CalculationError> {
        let mut value = self.unary()?;
        while let Some(token @ (Token::Star | Token::Slash)) = self.peek() {
            self.advance();
            let rhs = self.unary()?;
            value = if token == Token::Star {
                value.mul(rhs)?
            } else {
                value.div(rhs)?
            };
        }
        Ok(value)
    }

    fn unary(&mut self) -> Result<Number, CalculationError> {
        match self.peek() {
            Some(Token::Plus) => {
                self.advance();
                self.descend()?;
                let value = self.unary();
                self.depth -= 1;
                value
            }
            Some(Token::Minus) => {
                self.advance();
                self.descend()?;
                let value = self.unary().and_then(Number::neg);
                self.depth -= 1;
                value
            }
            _ => self.atom(),
        }
    }

    fn atom(&mut self) -> Result<Number, CalculationError> {
        match self.advance() {
            Some(Token::Number(value)) => Ok(value),
            Some(Token::LeftParen) => {
                self.descend()?;
                let value = self.expr()?;
                self.depth -= 1;
                match self.advance() {
                    Some(Token::RightParen) => Ok(value),
                    Some(token) => Err(CalculationError::UnexpectedToken(token.symbol())),
                    None => Err(CalculationError::UnexpectedEnd),
                }
            }
            Some(token) => Err(CalculationError::UnexpectedToken(token.symbol())),
            None => Err(CalculationError::UnexpectedEnd),
        }
    }
}

/// Evaluates an arithmetic expression.
pub fn evaluate(expression: &str) -> Result<Number, CalculationError> {
    let tokens = tokenize(expression)?;
    match Parser::new(tokens).parse()? {
        Number::Decimal(value) if !value.is_finite() => Err(CalculationError::NonFinite),
        // Avoid printing "-0.0".
        Number::Decimal(value) if value == 0.0 => Ok(Number::Decimal(0.0)),
        number => Ok(number),
    }
}

pub struct CalculatorTool {
    name: ToolName,
}

impl Default for CalculatorTool {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorTool {
    pub fn new() -> Self {
        Self {
            name: ToolKind::Calculator.name(),
        }
    }

    /// Result text for `expression`; failures are reported in the text itself.
    pub fn evaluate(&self, expression: &str) -> String {
        match evaluate(expression) {
            Ok(value) => format!("The result of {} is {}", expression, value),
            Err(e) => format!("Error calculating {}: {}", expression, e),
        }
    }
}

impl Tool for CalculatorTool {
    fn name(&self) -> &ToolName {
        &self.name
    }

    fn description(&self) -> &str {
        ToolKind::Calculator.description()
    }

    fn run(&self, parameter: &str) -> Result<String, ToolError> {
        let expression = self.require_parameter(parameter)?;
        Ok(self.evaluate(expression))
    }
}
