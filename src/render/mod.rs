//! AST output formats
//!
//! Both renderers are [`Visitor`](crate::parser::visit::Visitor)s and take
//! the program by reference, so one tree can be rendered any number of times:
//! - [`dot`]: Graphviz `digraph` description (one node per AST node)
//! - [`tree`]: Indented text outline for terminals

pub mod dot;
pub mod tree;

pub use dot::{render, render_with, RenderOptions};
pub use tree::print_tree;
