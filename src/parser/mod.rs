//! pl0 source code parser
//!
//! This module transforms source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parsing (tokens → AST), with the grammar split across
//!   `declarations`, `statements` and `expressions`
//! - [`ast`]: AST node definitions
//! - [`visit`]: Visitor dispatch over the AST
//!
//! # Language
//!
//! - Functions: `fun name(a: int, v: float[10]) x: int; begin ... end`
//! - Types: `int`, `float`, and arrays of either
//! - Statements: assignment (`=`, `+=`, `-=`), `if`/`then`/`else`,
//!   `while`/`do`, `print`, `read`, `write`, `return`, `break`, `skip`,
//!   nested `begin ... end`
//! - Expressions: arithmetic, comparisons, `and`/`or`/`not`, calls, array
//!   indexing
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with one method per precedence level.
//! No external parser generator dependencies.

pub mod ast;
mod declarations;
mod expressions;
pub mod lexer;
pub mod parse;
mod statements;
pub mod visit;

pub use parse::{parse, parse_source, ParseError, Parser, SyntaxError};
