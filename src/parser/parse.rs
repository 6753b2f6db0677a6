//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, helper methods, and the main parse entry points.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, helper methods, and coordination
//! - `declarations`: function definitions, parameters, variable declarations, types
//! - `statements`: statements (if, while, assignments, I/O, blocks)
//! - `expressions`: conditions and arithmetic with one method per precedence level
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.
//!
//! The parser pulls tokens one at a time from any iterator of
//! `Result<Token, LexError>`, keeping a single token of lookahead. A lexical
//! error in the stream aborts the parse exactly like a syntax error does.

use crate::parser::ast::*;
use crate::parser::lexer::{LexError, Lexer, Token, TokenKind};
use std::fmt;
use thiserror::Error;

/// What the parser found where it expected something else.
#[derive(Debug, Clone, PartialEq)]
pub enum Found {
    Token(Token),
    EndOfInput,
}

impl fmt::Display for Found {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Found::Token(token) => write!(f, "{}", token),
            Found::EndOfInput => write!(f, "end of input"),
        }
    }
}

/// Unexpected token or premature end of input
#[derive(Debug, Clone, PartialEq, Error)]
#[error("syntax error at line {}: unexpected {found}, expected {expected}", .location.line)]
pub struct SyntaxError {
    pub found: Found,
    pub expected: String,
    pub location: SourceLocation,
}

impl SyntaxError {
    pub fn unexpected(token: &Token, expected: impl Into<String>) -> Self {
        let found = if token.kind == TokenKind::Eof {
            Found::EndOfInput
        } else {
            Found::Token(token.clone())
        };
        SyntaxError {
            found,
            expected: expected.into(),
            location: token.location,
        }
    }

    pub fn is_end_of_input(&self) -> bool {
        self.found == Found::EndOfInput
    }
}

/// Parser error type
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

impl ParseError {
    pub fn line(&self) -> usize {
        match self {
            ParseError::Lex(err) => err.line(),
            ParseError::Syntax(err) => err.location.line,
        }
    }
}

/// Parse a token stream into a [`Program`].
pub fn parse<T>(tokens: T) -> Result<Program, ParseError>
where
    T: IntoIterator<Item = Result<Token, LexError>>,
{
    Parser::new(tokens)?.parse_program()
}

/// Tokenize and parse `source` in one go.
pub fn parse_source(source: &str) -> Result<Program, ParseError> {
    Parser::from_source(source)?.parse_program()
}

/// Deepest nesting of parentheses, prefix operators and statements accepted
/// before the parser gives up with a [`SyntaxError`].
pub const MAX_NESTING_DEPTH: usize = 64;

/// Recursive descent parser for pl0 programs
pub struct Parser<I> {
    tokens: I,
    pub(crate) current: Token,
    depth: usize,
}

impl Parser<Lexer> {
    pub fn from_source(source: &str) -> Result<Self, ParseError> {
        Parser::new(Lexer::new(source))
    }
}

impl<I> Parser<I>
where
    I: Iterator<Item = Result<Token, LexError>>,
{
    pub fn new<T>(tokens: T) -> Result<Self, ParseError>
    where
        T: IntoIterator<Item = Result<Token, LexError>, IntoIter = I>,
    {
        let mut tokens = tokens.into_iter();
        let current = match tokens.next() {
            Some(token) => token?,
            None => Token::new(TokenKind::Eof, "", SourceLocation::new(1, 1)),
        };
        Ok(Self {
            tokens,
            current,
            depth: 0,
        })
    }

    /// Parse the entire program: one or more function definitions.
    ///
    /// Consumes the parser; after a failure there is nothing left to resume.
    pub fn parse_program(mut self) -> Result<Program, ParseError> {
        let mut program = Program::default();

        loop {
            program.functions.push(self.parse_function()?);
            if self.is_at_end() {
                break;
            }
        }

        Ok(program)
    }

    // ===== Helper methods =====

    pub(crate) fn is_at_end(&self) -> bool {
        self.current.kind == TokenKind::Eof
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    /// Consume the current token and return it. At end of input the EOF
    /// token is returned again without consuming anything.
    pub(crate) fn advance(&mut self) -> Result<Token, ParseError> {
        if self.is_at_end() {
            return Ok(self.current.clone());
        }

        let next = match self.tokens.next() {
            Some(token) => token?,
            // Streams without an explicit EOF token end where the last one did
            None => Token::new(TokenKind::Eof, "", self.current.location),
        };
        Ok(std::mem::replace(&mut self.current, next))
    }

    pub(crate) fn match_token(&mut self, kind: TokenKind) -> Result<bool, ParseError> {
        if self.check(kind) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Error for the current token, `expected` describing what would have fit.
    pub(crate) fn error(&self, expected: impl Into<String>) -> ParseError {
        SyntaxError::unexpected(&self.current, expected).into()
    }

    pub(crate) fn expect_token(&mut self, kind: TokenKind, ctx: &str) -> Result<Token, ParseError> {
        if self.check(kind) {
            self.advance()
        } else {
            Err(self.error(format!("{} {}", kind, ctx)))
        }
    }

    pub(crate) fn expect_identifier(&mut self, ctx: &str) -> Result<String, ParseError> {
        Ok(self.expect_token(TokenKind::Ident, ctx)?.text)
    }

    /// Run `parse` one nesting level deeper, failing at the current token
    /// once [`MAX_NESTING_DEPTH`] is reached.
    pub(crate) fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(self.error(format!("at most {} levels of nesting", MAX_NESTING_DEPTH)));
        }

        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }
}
