//! Indented text outline of an AST
//!
//! ```text
//! Program
//!   [0] Function(main)
//!     parameters: (none)
//!     declarations: (none)
//!     body:
//!       [0] Write
//!         expr: 1 + (2 * 3)
//! ```
//!
//! Expressions are printed inline in source-like infix form, with every
//! compound operand parenthesized.

use crate::parser::ast::*;
use crate::parser::visit::{UnsupportedNodeError, VisitResult, Visitor};

const INDENT: &str = "  ";

/// Render `program` as an indented outline
pub fn print_tree(program: &Program) -> Result<String, UnsupportedNodeError> {
    let mut printer = TreePrinter::default();
    program.accept(&mut printer)?;
    Ok(printer.out)
}

#[derive(Debug, Default)]
pub struct TreePrinter {
    out: String,
    depth: usize,
    role: Option<String>,
}

impl TreePrinter {
    fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
        if let Some(role) = self.role.take() {
            if role.starts_with('[') {
                self.out.push_str(&role);
                self.out.push(' ');
            } else {
                self.out.push_str(&role);
                self.out.push_str(": ");
            }
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    /// Visit `node` one level deeper, prefixed with `role`
    fn child(&mut self, role: String, node: Node<'_>) -> VisitResult<()> {
        self.depth += 1;
        self.role = Some(role);
        let result = node.accept(self);
        self.depth -= 1;
        result
    }

    fn section<'a>(
        &mut self,
        title: &str,
        items: impl ExactSizeIterator<Item = Node<'a>>,
    ) -> VisitResult<()> {
        self.depth += 1;
        if items.len() == 0 {
            self.line(&format!("{}: (none)", title));
        } else {
            self.line(&format!("{}:", title));
            for (i, item) in items.enumerate() {
                self.child(format!("[{}]", i), item)?;
            }
        }
        self.depth -= 1;
        Ok(())
    }
}

impl Visitor for TreePrinter {
    type Output = ();

    fn name(&self) -> &'static str {
        "TreePrinter"
    }

    fn visit_program(&mut self, program: &Program) -> VisitResult<()> {
        self.line("Program");
        for (i, function) in program.functions.iter().enumerate() {
            self.child(format!("[{}]", i), Node::Function(function))?;
        }
        Ok(())
    }

    fn visit_function(&mut self, function: &Function) -> VisitResult<()> {
        self.line(&Node::Function(function).label());
        self.section("parameters", function.parameters.iter().map(Node::Parameter))?;
        self.section("declarations", function.declarations.iter().map(Node::VarDeclaration))?;
        self.section("body", function.body.iter().map(Node::Statement))
    }

    fn visit_expression(&mut self, expr: &Expression) -> VisitResult<()> {
        self.line(&infix(expr));
        Ok(())
    }

    // Statements, parameters, declarations and types
    fn visit_node(&mut self, node: Node<'_>) -> VisitResult<()> {
        self.line(&node.label());
        for (role, child) in node.children() {
            self.child(role, child)?;
        }
        Ok(())
    }
}

/// Source-like rendering of an expression
pub fn infix(expr: &Expression) -> String {
    fn operand(expr: &Expression) -> String {
        match expr {
            Expression::Binary(_)
            | Expression::Relational(_)
            | Expression::Logical(_)
            | Expression::Not(_) => format!("({})", infix(expr)),
            _ => infix(expr),
        }
    }

    match expr {
        Expression::Binary(b) => {
            format!("{} {} {}", operand(&b.left), b.op.symbol(), operand(&b.right))
        }
        Expression::Relational(r) => {
            format!("{} {} {}", operand(&r.left), r.op.symbol(), operand(&r.right))
        }
        Expression::Logical(l) => format!(
            "{} {} {}",
            operand(&l.left),
            l.op.symbol().to_lowercase(),
            operand(&l.right)
        ),
        Expression::Unary(u) => format!("{}{}", u.op.symbol(), operand(&u.operand)),
        Expression::Not(n) => format!("not {}", operand(&n.operand)),
        Expression::NumberLiteral(n) => n.value.to_string(),
        Expression::Variable(v) => v.name.clone(),
        Expression::ArrayAccess(a) => format!("{}[{}]", a.name, infix(&a.index)),
        Expression::FunctionCall(c) => {
            let args: Vec<String> = c.arguments.iter().map(infix).collect();
            format!("{}({})", c.name, args.join(", "))
        }
    }
}
