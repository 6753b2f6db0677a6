//! Visitor dispatch over the AST
//!
//! Every node type has an `accept` method that forwards to the matching
//! `visit_*` operation of a [`Visitor`]. Visitors override only the
//! operations they care about; everything else falls back along a fixed
//! chain:
//!
//! ```text
//! visit_if ─► visit_statement ─► visit_node ─► UnsupportedNodeError
//! visit_binary ─► visit_expression ─► visit_node ─► UnsupportedNodeError
//! visit_function ─► visit_node ─► UnsupportedNodeError
//! ```
//!
//! A visitor that handles nothing fails on the first node it is given, so
//! a forgotten node kind shows up as an error instead of being skipped.

use crate::parser::ast::*;
use thiserror::Error;

/// A visitor reached a node kind it has no operation for.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{visitor} does not support {node} nodes")]
pub struct UnsupportedNodeError {
    pub visitor: &'static str,
    pub node: &'static str,
}

pub type VisitResult<T> = Result<T, UnsupportedNodeError>;

pub trait Visitor {
    type Output;

    /// Name used in [`UnsupportedNodeError`] messages
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Last stop of every fallback chain.
    fn visit_node(&mut self, node: Node<'_>) -> VisitResult<Self::Output> {
        Err(UnsupportedNodeError {
            visitor: self.name(),
            node: node.kind(),
        })
    }

    fn visit_statement(&mut self, stmt: &Statement) -> VisitResult<Self::Output> {
        self.visit_node(Node::Statement(stmt))
    }

    fn visit_expression(&mut self, expr: &Expression) -> VisitResult<Self::Output> {
        self.visit_node(Node::Expression(expr))
    }

    fn visit_program(&mut self, program: &Program) -> VisitResult<Self::Output> {
        self.visit_node(Node::Program(program))
    }

    fn visit_function(&mut self, function: &Function) -> VisitResult<Self::Output> {
        self.visit_node(Node::Function(function))
    }

    fn visit_parameter(&mut self, parameter: &Parameter) -> VisitResult<Self::Output> {
        self.visit_node(Node::Parameter(parameter))
    }

    fn visit_var_declaration(&mut self, decl: &VarDeclaration) -> VisitResult<Self::Output> {
        self.visit_node(Node::VarDeclaration(decl))
    }

    fn visit_type_name(&mut self, ty: &TypeName) -> VisitResult<Self::Output> {
        self.visit_node(Node::TypeName(ty))
    }

    // Statement kinds. `stmt` is the enclosing statement, passed along so the
    // default can fall back to `visit_statement`.

    fn visit_print(&mut self, _node: &Print, stmt: &Statement) -> VisitResult<Self::Output> {
        self.visit_statement(stmt)
    }

    fn visit_assignment(
        &mut self,
        _node: &Assignment,
        stmt: &Statement,
    ) -> VisitResult<Self::Output> {
        self.visit_statement(stmt)
    }

    fn visit_compound_assignment(
        &mut self,
        _node: &CompoundAssignment,
        stmt: &Statement,
    ) -> VisitResult<Self::Output> {
        self.visit_statement(stmt)
    }

    fn visit_if(&mut self, _node: &If, stmt: &Statement) -> VisitResult<Self::Output> {
        self.visit_statement(stmt)
    }

    fn visit_while(&mut self, _node: &While, stmt: &Statement) -> VisitResult<Self::Output> {
        self.visit_statement(stmt)
    }

    fn visit_read(&mut self, _node: &Read, stmt: &Statement) -> VisitResult<Self::Output> {
        self.visit_statement(stmt)
    }

    fn visit_write(&mut self, _node: &Write, stmt: &Statement) -> VisitResult<Self::Output> {
        self.visit_statement(stmt)
    }

    fn visit_return(&mut self, _node: &Return, stmt: &Statement) -> VisitResult<Self::Output> {
        self.visit_statement(stmt)
    }

    fn visit_break(&mut self, _node: &Break, stmt: &Statement) -> VisitResult<Self::Output> {
        self.visit_statement(stmt)
    }

    fn visit_skip(&mut self, _node: &Skip, stmt: &Statement) -> VisitResult<Self::Output> {
        self.visit_statement(stmt)
    }

    fn visit_block(&mut self, _node: &Block, stmt: &Statement) -> VisitResult<Self::Output> {
        self.visit_statement(stmt)
    }

    // Expression kinds

    fn visit_binary(&mut self, _node: &Binary, expr: &Expression) -> VisitResult<Self::Output> {
        self.visit_expression(expr)
    }

    fn visit_unary(&mut self, _node: &Unary, expr: &Expression) -> VisitResult<Self::Output> {
        self.visit_expression(expr)
    }

    fn visit_number_literal(
        &mut self,
        _node: &NumberLiteral,
        expr: &Expression,
    ) -> VisitResult<Self::Output> {
        self.visit_expression(expr)
    }

    fn visit_variable(&mut self, _node: &Variable, expr: &Expression) -> VisitResult<Self::Output> {
        self.visit_expression(expr)
    }

    fn visit_array_access(
        &mut self,
        _node: &ArrayAccess,
        expr: &Expression,
    ) -> VisitResult<Self::Output> {
        self.visit_expression(expr)
    }

    fn visit_function_call(
        &mut self,
        _node: &FunctionCall,
        expr: &Expression,
    ) -> VisitResult<Self::Output> {
        self.visit_expression(expr)
    }

    fn visit_relational(
        &mut self,
        _node: &Relational,
        expr: &Expression,
    ) -> VisitResult<Self::Output> {
        self.visit_expression(expr)
    }

    fn visit_logical(&mut self, _node: &Logical, expr: &Expression) -> VisitResult<Self::Output> {
        self.visit_expression(expr)
    }

    fn visit_not(&mut self, _node: &Not, expr: &Expression) -> VisitResult<Self::Output> {
        self.visit_expression(expr)
    }
}

impl Program {
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Output> {
        visitor.visit_program(self)
    }
}

impl Function {
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Output> {
        visitor.visit_function(self)
    }
}

impl Parameter {
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Output> {
        visitor.visit_parameter(self)
    }
}

impl VarDeclaration {
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Output> {
        visitor.visit_var_declaration(self)
    }
}

impl TypeName {
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Output> {
        visitor.visit_type_name(self)
    }
}

impl Statement {
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Output> {
        match self {
            Statement::Print(node) => visitor.visit_print(node, self),
            Statement::Assignment(node) => visitor.visit_assignment(node, self),
            Statement::CompoundAssignment(node) => visitor.visit_compound_assignment(node, self),
            Statement::If(node) => visitor.visit_if(node, self),
            Statement::While(node) => visitor.visit_while(node, self),
            Statement::Read(node) => visitor.visit_read(node, self),
            Statement::Write(node) => visitor.visit_write(node, self),
            Statement::Return(node) => visitor.visit_return(node, self),
            Statement::Break(node) => visitor.visit_break(node, self),
            Statement::Skip(node) => visitor.visit_skip(node, self),
            Statement::Block(node) => visitor.visit_block(node, self),
        }
    }
}

impl Expression {
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Output> {
        match self {
            Expression::Binary(node) => visitor.visit_binary(node, self),
            Expression::Unary(node) => visitor.visit_unary(node, self),
            Expression::NumberLiteral(node) => visitor.visit_number_literal(node, self),
            Expression::Variable(node) => visitor.visit_variable(node, self),
            Expression::ArrayAccess(node) => visitor.visit_array_access(node, self),
            Expression::FunctionCall(node) => visitor.visit_function_call(node, self),
            Expression::Relational(node) => visitor.visit_relational(node, self),
            Expression::Logical(node) => visitor.visit_logical(node, self),
            Expression::Not(node) => visitor.visit_not(node, self),
        }
    }
}

impl<'a> Node<'a> {
    /// Dispatch to the operation for the viewed node's concrete kind.
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Output> {
        match *self {
            Node::Program(p) => p.accept(visitor),
            Node::Function(f) => f.accept(visitor),
            Node::Parameter(p) => p.accept(visitor),
            Node::VarDeclaration(d) => d.accept(visitor),
            Node::TypeName(t) => t.accept(visitor),
            Node::Statement(s) => s.accept(visitor),
            Node::Expression(e) => e.accept(visitor),
        }
    }
}
