//! Statement parsing implementation
//!
//! This module handles parsing of all statement types:
//!
//! - Output: `print("text")`, `write(expr)`
//! - Input: `read(location)`
//! - Assignments: `location = expr`, `location += expr`, `location -= expr`
//! - Control flow: `if`/`then`/`else`, `while`/`do`
//! - Jumps: `return expr`, `break`, `skip`
//! - Blocks: `begin stmt; stmt end`
//!
//! # Grammar
//!
//! ```text
//! statement ::= print_stmt | if_stmt | while_stmt | assignment
//!             | read_stmt | write_stmt | return_stmt
//!             | "break" | "skip" | "begin" stmt (";" stmt)* "end"
//! location  ::= ident ("[" expr "]")?
//! ```
//!
//! A statement is picked by its first token. A leading identifier can only
//! start an assignment; the operator after the location picks plain or
//! compound. `else` always attaches to the innermost open `if`.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::{LexError, Token, TokenKind};
use crate::parser::parse::{ParseError, Parser};

impl<I> Parser<I>
where
    I: Iterator<Item = Result<Token, LexError>>,
{
    /// Parse `stmt (";" stmt)*`. The closing `end` is left to the caller.
    pub(crate) fn parse_statement_sequence(&mut self) -> Result<Vec<Statement>, ParseError> {
        let mut statements = vec![self.parse_statement()?];

        while self.match_token(TokenKind::Semicolon)? {
            statements.push(self.parse_statement()?);
        }

        Ok(statements)
    }

    /// Parse a statement. Nested statements count toward the depth limit.
    pub(crate) fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        self.nested(Self::parse_statement_inner)
    }

    fn parse_statement_inner(&mut self) -> Result<Statement, ParseError> {
        match self.current.kind {
            TokenKind::Print => self.parse_print_statement(),
            TokenKind::If => self.parse_if_statement(),
            TokenKind::While => self.parse_while_statement(),
            TokenKind::Read => self.parse_read_statement(),
            TokenKind::Write => self.parse_write_statement(),
            TokenKind::Return => {
                self.advance()?;
                let expr = self.parse_expression()?;
                Ok(Statement::Return(Return { expr }))
            }
            TokenKind::Break => {
                self.advance()?;
                Ok(Statement::Break(Break))
            }
            TokenKind::Skip => {
                self.advance()?;
                Ok(Statement::Skip(Skip))
            }
            TokenKind::Begin => self.parse_block(),
            TokenKind::Ident => self.parse_assignment(),
            _ => Err(self.error("statement")),
        }
    }

    /// Parse print statement: `print("text")`
    fn parse_print_statement(&mut self) -> Result<Statement, ParseError> {
        self.advance()?;
        self.expect_token(TokenKind::LParen, "after 'print'")?;
        let text = self
            .expect_token(TokenKind::StringLiteral, "inside 'print'")?
            .text;
        self.expect_token(TokenKind::RParen, "after print string")?;

        Ok(Statement::Print(Print { text }))
    }

    /// Parse if statement
    fn parse_if_statement(&mut self) -> Result<Statement, ParseError> {
        self.advance()?;
        let condition = self.parse_condition()?;
        self.expect_token(TokenKind::Then, "after if condition")?;

        let then_stmt = Box::new(self.parse_statement()?);

        // Checked right after the innermost `then` branch, so a dangling
        // `else` binds to the nearest `if`
        let else_stmt = if self.match_token(TokenKind::Else)? {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };

        Ok(Statement::If(If {
            condition,
            then_stmt,
            else_stmt,
        }))
    }

    /// Parse while statement
    fn parse_while_statement(&mut self) -> Result<Statement, ParseError> {
        self.advance()?;
        let condition = self.parse_condition()?;
        self.expect_token(TokenKind::Do, "after while condition")?;

        let body = Box::new(self.parse_statement()?);

        Ok(Statement::While(While { condition, body }))
    }

    /// Parse read statement: `read(location)`
    fn parse_read_statement(&mut self) -> Result<Statement, ParseError> {
        self.advance()?;
        self.expect_token(TokenKind::LParen, "after 'read'")?;
        let location = self.parse_location()?;
        self.expect_token(TokenKind::RParen, "after read target")?;

        Ok(Statement::Read(Read { location }))
    }

    /// Parse write statement: `write(expr)`
    fn parse_write_statement(&mut self) -> Result<Statement, ParseError> {
        self.advance()?;
        self.expect_token(TokenKind::LParen, "after 'write'")?;
        let expr = self.parse_expression()?;
        self.expect_token(TokenKind::RParen, "after write expression")?;

        Ok(Statement::Write(Write { expr }))
    }

    /// Parse nested block: `begin stmt (; stmt)* end`
    fn parse_block(&mut self) -> Result<Statement, ParseError> {
        self.advance()?;
        let statements = self.parse_statement_sequence()?;
        if !self.match_token(TokenKind::End)? {
            return Err(self.error("';' or 'end' after statement in block"));
        }

        Ok(Statement::Block(Block { statements }))
    }

    /// Parse plain or compound assignment
    fn parse_assignment(&mut self) -> Result<Statement, ParseError> {
        let location = self.parse_location()?;

        let compound = match self.current.kind {
            TokenKind::Assign => None,
            TokenKind::PlusAssign => Some(CompoundOp::AddAssign),
            TokenKind::MinusAssign => Some(CompoundOp::SubAssign),
            _ => return Err(self.error("'=', '+=' or '-=' after assignment target")),
        };
        self.advance()?;

        let expr = self.parse_expression()?;

        Ok(match compound {
            None => Statement::Assignment(Assignment { location, expr }),
            Some(op) => Statement::CompoundAssignment(CompoundAssignment { location, op, expr }),
        })
    }

    /// Parse an assignment or read target: `name` or `name[expr]`
    pub(crate) fn parse_location(&mut self) -> Result<Expression, ParseError> {
        let name = self.expect_identifier("as assignment target")?;

        if self.match_token(TokenKind::LBracket)? {
            let index = self.parse_expression()?;
            self.expect_token(TokenKind::RBracket, "after array index")?;
            return Ok(Expression::array_access(name, index));
        }

        Ok(Expression::variable(name))
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::parse::{parse_source, ParseError};

    fn body(statements: &str) -> Vec<Statement> {
        let source = format!("fun main() begin {} end", statements);
        let mut program = parse_source(&source).unwrap();
        program.functions.remove(0).body
    }

    fn syntax_error(source: &str) -> crate::parser::parse::SyntaxError {
        match parse_source(source) {
            Err(ParseError::Syntax(err)) => err,
            other => panic!("Expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_dangling_else_binds_inner_if() {
        let stmts = body("if a then if b then print(\"s1\") else print(\"s2\")");

        let expected = Statement::If(If {
            condition: Expression::variable("a"),
            then_stmt: Box::new(Statement::If(If {
                condition: Expression::variable("b"),
                then_stmt: Box::new(Statement::Print(Print {
                    text: "s1".to_string(),
                })),
                else_stmt: Some(Box::new(Statement::Print(Print {
                    text: "s2".to_string(),
                }))),
            })),
            else_stmt: None,
        });
        assert_eq!(stmts, vec![expected]);
    }

    #[test]
    fn test_else_for_outer_if_needs_block() {
        let stmts = body("if a then begin if b then skip end else break");

        match &stmts[0] {
            Statement::If(outer) => {
                assert_eq!(outer.else_stmt.as_deref(), Some(&Statement::Break(Break)));
                assert!(matches!(*outer.then_stmt, Statement::Block(_)));
            }
            other => panic!("Expected if statement, got {:?}", other),
        }
    }

    #[test]
    fn test_assignments() {
        let stmts = body("x = 1; a[i + 1] = x; x += 2; a[0] -= 3");

        assert_eq!(
            stmts[0],
            Statement::Assignment(Assignment {
                location: Expression::variable("x"),
                expr: Expression::int(1),
            })
        );
        assert_eq!(
            stmts[1],
            Statement::Assignment(Assignment {
                location: Expression::array_access(
                    "a",
                    Expression::binary(
                        Expression::variable("i"),
                        BinaryOp::Add,
                        Expression::int(1),
                    ),
                ),
                expr: Expression::variable("x"),
            })
        );
        assert_eq!(
            stmts[2],
            Statement::CompoundAssignment(CompoundAssignment {
                location: Expression::variable("x"),
                op: CompoundOp::AddAssign,
                expr: Expression::int(2),
            })
        );
        match &stmts[3] {
            Statement::CompoundAssignment(c) => {
                assert_eq!(c.op.symbol(), "-=");
                assert!(c.location.is_location());
            }
            other => panic!("Expected compound assignment, got {:?}", other),
        }
    }

    #[test]
    fn test_io_and_jumps() {
        let stmts = body("read(v[2]); write(x * 2); print(\"done\"); return 0; break; skip");

        assert_eq!(
            stmts[0],
            Statement::Read(Read {
                location: Expression::array_access("v", Expression::int(2)),
            })
        );
        assert!(matches!(stmts[1], Statement::Write(_)));
        assert_eq!(
            stmts[2],
            Statement::Print(Print {
                text: "done".to_string(),
            })
        );
        assert_eq!(
            stmts[3],
            Statement::Return(Return {
                expr: Expression::int(0),
            })
        );
        assert_eq!(stmts[4], Statement::Break(Break));
        assert_eq!(stmts[5], Statement::Skip(Skip));
    }

    #[test]
    fn test_while_and_nested_block() {
        let stmts = body("while i < 10 do begin write(i); i += 1 end");

        match &stmts[0] {
            Statement::While(w) => {
                assert_eq!(
                    w.condition,
                    Expression::relational(
                        Expression::variable("i"),
                        RelOp::Lt,
                        Expression::int(10),
                    )
                );
                match w.body.as_ref() {
                    Statement::Block(block) => assert_eq!(block.statements.len(), 2),
                    other => panic!("Expected block, got {:?}", other),
                }
            }
            other => panic!("Expected while statement, got {:?}", other),
        }
    }

    #[test]
    fn test_statement_order_preserved() {
        let stmts = body("print(\"1\"); print(\"2\"); print(\"3\")");
        let texts: Vec<&str> = stmts
            .iter()
            .map(|s| match s {
                Statement::Print(p) => p.text.as_str(),
                _ => "",
            })
            .collect();
        assert_eq!(texts, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_print_requires_string() {
        let err = syntax_error("fun main() begin print(x) end");
        assert_eq!(err.expected, "string literal inside 'print'");
    }

    #[test]
    fn test_identifier_without_assignment_operator() {
        let err = syntax_error("fun main() begin\n  x + 1\nend");
        assert_eq!(err.location.line, 2);
        assert_eq!(err.expected, "'=', '+=' or '-=' after assignment target");
    }

    #[test]
    fn test_missing_separator() {
        let err = syntax_error("fun main() begin skip skip end");
        assert_eq!(err.expected, "';' or 'end' after statement in function body");
    }

    #[test]
    fn test_premature_end_of_input() {
        let err = syntax_error("fun main() begin if a then");
        assert!(err.is_end_of_input());
        assert_eq!(err.expected, "statement");
    }

    #[test]
    fn test_deeply_nested_blocks_rejected() {
        let source = format!("fun main() {}skip end", "begin ".repeat(100_000));
        let err = syntax_error(&source);
        assert!(err.expected.starts_with("at most"), "got {:?}", err.expected);

        let source = format!("fun main() begin {}skip end", "while x do ".repeat(30));
        assert!(parse_source(&source).is_ok());
    }
}
