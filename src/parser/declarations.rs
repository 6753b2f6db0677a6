//! Declaration parsing implementation
//!
//! This module handles parsing of function definitions and everything that
//! hangs off their header:
//!
//! - Function definitions: `fun name(params) decls begin body end`
//! - Parameters: `name: type`, comma separated
//! - Local variable declarations: `name: type`, semicolon separated, with an
//!   optional trailing semicolon
//! - Types: `int`, `float`, or either with an array size `[expr]`
//!
//! # Grammar
//!
//! ```text
//! function ::= "fun" ident "(" params? ")" decls? "begin" stmt (";" stmt)* "end"
//! params   ::= param ("," param)*
//! param    ::= ident ":" type
//! decls    ::= vardecl (";" vardecl)* ";"?
//! type     ::= ("int" | "float") ("[" expr "]")?
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::{LexError, Token, TokenKind};
use crate::parser::parse::{ParseError, Parser};

impl<I> Parser<I>
where
    I: Iterator<Item = Result<Token, LexError>>,
{
    /// Parse function definition
    pub(crate) fn parse_function(&mut self) -> Result<Function, ParseError> {
        self.expect_token(TokenKind::Fun, "to start a function definition")?;
        let name = self.expect_identifier("after 'fun'")?;

        self.expect_token(TokenKind::LParen, "after function name")?;
        let parameters = self.parse_parameter_list()?;
        self.expect_token(TokenKind::RParen, "after parameters")?;

        let declarations = self.parse_declarations()?;

        self.expect_token(TokenKind::Begin, "before function body")?;
        let body = self.parse_statement_sequence()?;
        if !self.match_token(TokenKind::End)? {
            return Err(self.error("';' or 'end' after statement in function body"));
        }

        Ok(Function {
            name,
            parameters,
            declarations,
            body,
        })
    }

    /// Parse parameter list (without the parentheses); may be empty
    pub(crate) fn parse_parameter_list(&mut self) -> Result<Vec<Parameter>, ParseError> {
        let mut params = Vec::new();

        if self.check(TokenKind::RParen) {
            return Ok(params);
        }

        loop {
            let name = self.expect_identifier("for parameter name")?;
            self.expect_token(TokenKind::Colon, "after parameter name")?;
            let ty = self.parse_type()?;
            params.push(Parameter { name, ty });

            if !self.match_token(TokenKind::Comma)? {
                break;
            }
        }

        Ok(params)
    }

    /// Parse local variable declarations between the parameter list and
    /// `begin`; may be empty
    pub(crate) fn parse_declarations(&mut self) -> Result<Vec<VarDeclaration>, ParseError> {
        let mut decls = Vec::new();

        while self.check(TokenKind::Ident) {
            let name = self.expect_identifier("for variable name")?;
            self.expect_token(TokenKind::Colon, "after variable name")?;
            let ty = self.parse_type()?;
            decls.push(VarDeclaration { name, ty });

            // Separator, or the optional trailing semicolon before `begin`
            if !self.match_token(TokenKind::Semicolon)? {
                break;
            }
        }

        Ok(decls)
    }

    /// Parse type: `int`, `float`, `int[expr]`, `float[expr]`
    pub(crate) fn parse_type(&mut self) -> Result<TypeName, ParseError> {
        let base = if self.match_token(TokenKind::Int)? {
            BaseType::Int
        } else if self.match_token(TokenKind::Float)? {
            BaseType::Float
        } else {
            return Err(self.error("type name 'int' or 'float'"));
        };

        if self.match_token(TokenKind::LBracket)? {
            // Size stays an expression; it is checked by later passes
            let size = self.parse_expression()?;
            self.expect_token(TokenKind::RBracket, "after array size")?;
            return Ok(TypeName::array(base, size));
        }

        Ok(TypeName::scalar(base))
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::parse::{parse_source, ParseError};

    fn single_function(source: &str) -> Function {
        let mut program = parse_source(source).unwrap();
        assert_eq!(program.functions.len(), 1);
        program.functions.remove(0)
    }

    #[test]
    fn test_parameters_in_order() {
        let f = single_function("fun f(a: int, b: float, c: int[10]) begin skip end");

        let names: Vec<&str> = f.parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(f.parameters[0].ty, TypeName::scalar(BaseType::Int));
        assert_eq!(f.parameters[1].ty, TypeName::scalar(BaseType::Float));
        assert_eq!(
            f.parameters[2].ty,
            TypeName::array(BaseType::Int, Expression::int(10))
        );
    }

    #[test]
    fn test_declarations_with_and_without_trailing_semicolon() {
        let with = single_function("fun f() x: int; y: float; begin skip end");
        let without = single_function("fun f() x: int; y: float begin skip end");

        assert_eq!(with.declarations, without.declarations);
        assert_eq!(with.declarations.len(), 2);
        assert_eq!(with.declarations[0].name, "x");
        assert_eq!(with.declarations[1].name, "y");
    }

    #[test]
    fn test_array_size_stays_unevaluated() {
        let f = single_function("fun f(n: int) v: float[n * 2] begin skip end");

        let expected = TypeName::array(
            BaseType::Float,
            Expression::binary(Expression::variable("n"), BinaryOp::Mul, Expression::int(2)),
        );
        assert_eq!(f.declarations[0].ty, expected);
    }

    #[test]
    fn test_missing_type() {
        let err = parse_source("fun f(a) begin skip end").unwrap_err();
        match err {
            ParseError::Syntax(err) => {
                assert_eq!(err.expected, "':' after parameter name");
                assert_eq!(err.location.line, 1);
            }
            other => panic!("Expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_trailing_comma_in_parameters() {
        assert!(parse_source("fun f(a: int,) begin skip end").is_err());
    }

    #[test]
    fn test_missing_separator_between_declarations() {
        let err = parse_source("fun f() x: int y: int begin skip end").unwrap_err();
        assert!(err.to_string().contains("expected 'begin' before function body"));
    }
}
