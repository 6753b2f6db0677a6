//! # Introduction
//!
//! pl0dot is the front end of a compiler for a small procedural language.
//! It tokenizes and parses source text into a typed abstract syntax tree and
//! renders that tree as a Graphviz graph or an indented outline.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Parser → AST → Visitor → DOT / outline
//! ```
//!
//! 1. [`parser::lexer`] turns source text into a lazy stream of tokens.
//! 2. [`parser`] builds a [`parser::ast::Program`] by recursive descent.
//! 3. [`parser::visit`] dispatches operations over the AST, falling back
//!    from concrete node kinds to their category and then to a generic
//!    handler.
//! 4. [`render`] emits the tree as a DOT `digraph` or a text outline.
//!
//! ## Example
//!
//! ```
//! let program = pl0dot::parser::parse_source("fun main() begin write(1 + 2 * 3) end").unwrap();
//! let dot = pl0dot::render::render(&program).unwrap();
//! assert!(dot.starts_with("digraph \"AST\" {"));
//! ```
//!
//! ## Language
//!
//! Types: `int`, `float`, fixed-size arrays of either.
//! Control flow: `if/then/else`, `while/do`, `break`, `skip`, `return`.
//! I/O: `print("text")`, `read(location)`, `write(expr)`.

pub mod parser;
pub mod render;
