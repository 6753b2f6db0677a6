//! Expression parsing implementation
//!
//! This module handles parsing of conditions and arithmetic expressions
//! using one recursive descent method per precedence level.
//!
//! # Precedence
//!
//! From loosest to tightest binding:
//!
//! | Level        | Operators                    | Associativity     |
//! |--------------|------------------------------|-------------------|
//! | logical or   | `or`                         | left              |
//! | logical and  | `and`                        | left              |
//! | not          | `not` (prefix)               | operand runs to the end of the condition |
//! | relational   | `< <= > >= == !=`            | non-associative   |
//! | additive     | `+ -`                        | left              |
//! | term         | `* /`                        | left              |
//! | unary        | `+ -` (prefix)               | right             |
//! | primary      | literals, names, calls, `[]`, `( )` |            |
//!
//! `if`/`while` conditions enter at the `or` level; every other expression
//! position (right-hand sides, `write`, `return`, arguments, indices, array
//! sizes) enters at the additive level. Parentheses re-enter at the `or`
//! level.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::{LexError, Token, TokenKind};
use crate::parser::parse::{ParseError, Parser, SyntaxError};

fn relational_op(kind: TokenKind) -> Option<RelOp> {
    match kind {
        TokenKind::Lt => Some(RelOp::Lt),
        TokenKind::Le => Some(RelOp::Le),
        TokenKind::Gt => Some(RelOp::Gt),
        TokenKind::Ge => Some(RelOp::Ge),
        TokenKind::EqEq => Some(RelOp::Eq),
        TokenKind::NotEq => Some(RelOp::Ne),
        _ => None,
    }
}

impl<I> Parser<I>
where
    I: Iterator<Item = Result<Token, LexError>>,
{
    /// Parse a condition (top-level entry point for `if` and `while`)
    pub(crate) fn parse_condition(&mut self) -> Result<Expression, ParseError> {
        self.parse_logical_or()
    }

    /// Parse logical OR
    fn parse_logical_or(&mut self) -> Result<Expression, ParseError> {
        let mut left = self.parse_logical_and()?;

        while self.match_token(TokenKind::Or)? {
            let right = self.parse_logical_and()?;
            left = Expression::logical(left, LogicalOp::Or, right);
        }

        Ok(left)
    }

    /// Parse logical AND
    fn parse_logical_and(&mut self) -> Result<Expression, ParseError> {
        let mut left = self.parse_not()?;

        while self.match_token(TokenKind::And)? {
            let right = self.parse_not()?;
            left = Expression::logical(left, LogicalOp::And, right);
        }

        Ok(left)
    }

    /// Parse `not`. Its operand is everything up to the end of the
    /// condition, so `not a and b` negates the whole conjunction.
    fn parse_not(&mut self) -> Result<Expression, ParseError> {
        if self.match_token(TokenKind::Not)? {
            let operand = self.nested(Self::parse_logical_or)?;
            return Ok(Expression::not(operand));
        }

        self.parse_relational()
    }

    /// Parse relational (< <= > >= == !=), at most one operator
    fn parse_relational(&mut self) -> Result<Expression, ParseError> {
        let left = self.parse_expression()?;

        let op = match relational_op(self.current.kind) {
            Some(op) => op,
            None => return Ok(left),
        };
        self.advance()?;

        let right = self.parse_expression()?;

        if relational_op(self.current.kind).is_some() {
            return Err(self.error(
                "end of comparison (comparison operators do not chain; use 'and' or parentheses)",
            ));
        }

        Ok(Expression::relational(left, op, right))
    }

    /// Parse arithmetic expression (additive level)
    pub(crate) fn parse_expression(&mut self) -> Result<Expression, ParseError> {
        let mut left = self.parse_term()?;

        loop {
            let op = match self.current.kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => break,
            };
            self.advance()?;

            let right = self.parse_term()?;
            left = Expression::binary(left, op, right);
        }

        Ok(left)
    }

    /// Parse multiplicative (* /)
    fn parse_term(&mut self) -> Result<Expression, ParseError> {
        let mut left = self.parse_unary()?;

        loop {
            let op = match self.current.kind {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                _ => break,
            };
            self.advance()?;

            let right = self.parse_unary()?;
            left = Expression::binary(left, op, right);
        }

        Ok(left)
    }

    /// Parse unary sign (+ -)
    fn parse_unary(&mut self) -> Result<Expression, ParseError> {
        let op = match self.current.kind {
            TokenKind::Plus => UnaryOp::Plus,
            TokenKind::Minus => UnaryOp::Minus,
            _ => return self.parse_primary(),
        };
        self.advance()?;

        let operand = self.nested(Self::parse_unary)?;
        Ok(Expression::unary(op, operand))
    }

    /// Parse primary (literals, names, calls, array access, parentheses).
    /// Each primary is one nesting level, so `((x))`, `v[v[i]]` and
    /// `f(f(x))` all count toward the depth limit.
    fn parse_primary(&mut self) -> Result<Expression, ParseError> {
        self.nested(Self::parse_primary_inner)
    }

    fn parse_primary_inner(&mut self) -> Result<Expression, ParseError> {
        match self.current.kind {
            TokenKind::IntLiteral => {
                let token = self.advance()?;
                let value = token
                    .text
                    .parse::<i64>()
                    .map_err(|_| SyntaxError::unexpected(&token, "a valid integer literal"))?;
                Ok(Expression::int(value))
            }
            TokenKind::FloatLiteral => {
                let token = self.advance()?;
                let value = token
                    .text
                    .parse::<f64>()
                    .map_err(|_| SyntaxError::unexpected(&token, "a valid float literal"))?;
                Ok(Expression::float(value))
            }
            TokenKind::Ident => {
                let name = self.advance()?.text;

                if self.match_token(TokenKind::LParen)? {
                    let arguments = self.parse_argument_list()?;
                    self.expect_token(TokenKind::RParen, "after function arguments")?;
                    return Ok(Expression::call(name, arguments));
                }

                if self.match_token(TokenKind::LBracket)? {
                    let index = self.parse_expression()?;
                    self.expect_token(TokenKind::RBracket, "after array index")?;
                    return Ok(Expression::array_access(name, index));
                }

                Ok(Expression::variable(name))
            }
            TokenKind::LParen => {
                self.advance()?;
                let expr = self.parse_condition()?;
                self.expect_token(TokenKind::RParen, "after expression")?;
                Ok(expr)
            }
            _ => Err(self.error("expression")),
        }
    }

    /// Parse call arguments (without the parentheses); may be empty
    fn parse_argument_list(&mut self) -> Result<Vec<Expression>, ParseError> {
        let mut args = Vec::new();

        if self.check(TokenKind::RParen) {
            return Ok(args);
        }

        loop {
            args.push(self.parse_expression()?);

            if !self.match_token(TokenKind::Comma)? {
                break;
            }
        }

        Ok(args)
    }
}
