// AST (Abstract Syntax Tree) definitions for the pl0 front end

use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Scalar base types of the language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseType {
    Int,
    Float,
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BaseType::Int => write!(f, "INT"),
            BaseType::Float => write!(f, "FLOAT"),
        }
    }
}

/// Arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

/// Prefix sign operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Plus,  // +x
    Minus, // -x
}

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelOp {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
}

/// Compound assignment operators, kept with their trailing `=`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompoundOp {
    AddAssign, // +=
    SubAssign, // -=
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
        }
    }
}

impl UnaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Plus => "+",
            UnaryOp::Minus => "-",
        }
    }
}

impl RelOp {
    pub fn symbol(self) -> &'static str {
        match self {
            RelOp::Lt => "<",
            RelOp::Le => "<=",
            RelOp::Gt => ">",
            RelOp::Ge => ">=",
            RelOp::Eq => "==",
            RelOp::Ne => "!=",
        }
    }
}

impl LogicalOp {
    pub fn symbol(self) -> &'static str {
        match self {
            LogicalOp::And => "AND",
            LogicalOp::Or => "OR",
        }
    }
}

impl CompoundOp {
    pub fn symbol(self) -> &'static str {
        match self {
            CompoundOp::AddAssign => "+=",
            CompoundOp::SubAssign => "-=",
        }
    }
}

/// Numeric literal value, tagged int or float
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn is_float(&self) -> bool {
        matches!(self, Number::Float(_))
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(n) => write!(f, "{}", n),
            Number::Float(x) => write!(f, "{:?}", x),
        }
    }
}

/// Top-level program structure
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub functions: Vec<Function>,
}

/// Function definition: `fun name(params) decls begin body end`
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub declarations: Vec<VarDeclaration>,
    pub body: Vec<Statement>,
}

/// Function parameter
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub ty: TypeName,
}

/// Local variable declaration, same shape as [`Parameter`]
#[derive(Debug, Clone, PartialEq)]
pub struct VarDeclaration {
    pub name: String,
    pub ty: TypeName,
}

/// Declared type. `array_size` is kept unevaluated; it is `Some` iff the
/// type is an array.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeName {
    pub base: BaseType,
    pub array_size: Option<Box<Expression>>,
}

impl TypeName {
    pub fn scalar(base: BaseType) -> Self {
        TypeName {
            base,
            array_size: None,
        }
    }

    pub fn array(base: BaseType, size: Expression) -> Self {
        TypeName {
            base,
            array_size: Some(Box::new(size)),
        }
    }

    pub fn is_array(&self) -> bool {
        self.array_size.is_some()
    }
}

// ===== Statements =====

#[derive(Debug, Clone, PartialEq)]
pub struct Print {
    pub text: String,
}

/// `location = expr`. The location is a `Variable` or `ArrayAccess`.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub location: Expression,
    pub expr: Expression,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompoundAssignment {
    pub location: Expression,
    pub op: CompoundOp,
    pub expr: Expression,
}

#[derive(Debug, Clone, PartialEq)]
pub struct If {
    pub condition: Expression,
    pub then_stmt: Box<Statement>,
    pub else_stmt: Option<Box<Statement>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct While {
    pub condition: Expression,
    pub body: Box<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Read {
    pub location: Expression,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Write {
    pub expr: Expression,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Return {
    pub expr: Expression,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Break;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Skip;

/// Nested `begin ... end`
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Print(Print),
    Assignment(Assignment),
    CompoundAssignment(CompoundAssignment),
    If(If),
    While(While),
    Read(Read),
    Write(Write),
    Return(Return),
    Break(Break),
    Skip(Skip),
    Block(Block),
}

// ===== Expressions =====

#[derive(Debug, Clone, PartialEq)]
pub struct Binary {
    pub left: Box<Expression>,
    pub op: BinaryOp,
    pub right: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Unary {
    pub op: UnaryOp,
    pub operand: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumberLiteral {
    pub value: Number,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayAccess {
    pub name: String,
    pub index: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub name: String,
    pub arguments: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Relational {
    pub left: Box<Expression>,
    pub op: RelOp,
    pub right: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Logical {
    pub left: Box<Expression>,
    pub op: LogicalOp,
    pub right: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Not {
    pub operand: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Binary(Binary),
    Unary(Unary),
    NumberLiteral(NumberLiteral),
    Variable(Variable),
    ArrayAccess(ArrayAccess),
    FunctionCall(FunctionCall),
    Relational(Relational),
    Logical(Logical),
    Not(Not),
}

impl Expression {
    pub fn binary(left: Expression, op: BinaryOp, right: Expression) -> Self {
        Expression::Binary(Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        })
    }

    pub fn unary(op: UnaryOp, operand: Expression) -> Self {
        Expression::Unary(Unary {
            op,
            operand: Box::new(operand),
        })
    }

    pub fn int(value: i64) -> Self {
        Expression::NumberLiteral(NumberLiteral {
            value: Number::Int(value),
        })
    }

    pub fn float(value: f64) -> Self {
        Expression::NumberLiteral(NumberLiteral {
            value: Number::Float(value),
        })
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Expression::Variable(Variable { name: name.into() })
    }

    pub fn array_access(name: impl Into<String>, index: Expression) -> Self {
        Expression::ArrayAccess(ArrayAccess {
            name: name.into(),
            index: Box::new(index),
        })
    }

    pub fn call(name: impl Into<String>, arguments: Vec<Expression>) -> Self {
        Expression::FunctionCall(FunctionCall {
            name: name.into(),
            arguments,
        })
    }

    pub fn relational(left: Expression, op: RelOp, right: Expression) -> Self {
        Expression::Relational(Relational {
            left: Box::new(left),
            op,
            right: Box::new(right),
        })
    }

    pub fn logical(left: Expression, op: LogicalOp, right: Expression) -> Self {
        Expression::Logical(Logical {
            left: Box::new(left),
            op,
            right: Box::new(right),
        })
    }

    pub fn not(operand: Expression) -> Self {
        Expression::Not(Not {
            operand: Box::new(operand),
        })
    }

    /// True for the two shapes that may appear as an assignment or read target.
    pub fn is_location(&self) -> bool {
        matches!(self, Expression::Variable(_) | Expression::ArrayAccess(_))
    }
}

// ===== Borrowed node view =====

/// Super-category a node kind belongs to, used for visitor fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeCategory {
    Statement,
    Expression,
    Other,
}

/// A borrowed view of any AST node.
///
/// Generic consumers (the graph renderer, the fallback paths of
/// [`Visitor`](super::visit::Visitor)) work on this instead of matching every
/// node type themselves.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Program(&'a Program),
    Function(&'a Function),
    Parameter(&'a Parameter),
    VarDeclaration(&'a VarDeclaration),
    TypeName(&'a TypeName),
    Statement(&'a Statement),
    Expression(&'a Expression),
}

impl<'a> Node<'a> {
    /// Name of the concrete node kind
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Program(_) => "Program",
            Node::Function(_) => "Function",
            Node::Parameter(_) => "Parameter",
            Node::VarDeclaration(_) => "VarDeclaration",
            Node::TypeName(_) => "TypeName",
            Node::Statement(stmt) => match stmt {
                Statement::Print(_) => "Print",
                Statement::Assignment(_) => "Assignment",
                Statement::CompoundAssignment(_) => "CompoundAssignment",
                Statement::If(_) => "If",
                Statement::While(_) => "While",
                Statement::Read(_) => "Read",
                Statement::Write(_) => "Write",
                Statement::Return(_) => "Return",
                Statement::Break(_) => "Break",
                Statement::Skip(_) => "Skip",
                Statement::Block(_) => "Block",
            },
            Node::Expression(expr) => match expr {
                Expression::Binary(_) => "Binary",
                Expression::Unary(_) => "Unary",
                Expression::NumberLiteral(_) => "NumberLiteral",
                Expression::Variable(_) => "Variable",
                Expression::ArrayAccess(_) => "ArrayAccess",
                Expression::FunctionCall(_) => "FunctionCall",
                Expression::Relational(_) => "Relational",
                Expression::Logical(_) => "Logical",
                Expression::Not(_) => "Not",
            },
        }
    }

    pub fn category(&self) -> NodeCategory {
        match self {
            Node::Statement(_) => NodeCategory::Statement,
            Node::Expression(_) => NodeCategory::Expression,
            _ => NodeCategory::Other,
        }
    }

    /// Scalar field values of the node, rendered as text.
    ///
    /// `None` for nodes whose fields are all children.
    pub fn detail(&self) -> Option<String> {
        match self {
            Node::Program(_) => None,
            Node::Function(f) => Some(f.name.clone()),
            Node::Parameter(p) => Some(p.name.clone()),
            Node::VarDeclaration(d) => Some(d.name.clone()),
            Node::TypeName(t) => Some(if t.is_array() {
                format!("{}[]", t.base)
            } else {
                t.base.to_string()
            }),
            Node::Statement(stmt) => match stmt {
                Statement::Print(p) => Some(format!("{:?}", p.text)),
                Statement::CompoundAssignment(c) => Some(c.op.symbol().to_string()),
                _ => None,
            },
            Node::Expression(expr) => match expr {
                Expression::Binary(b) => Some(b.op.symbol().to_string()),
                Expression::Unary(u) => Some(u.op.symbol().to_string()),
                Expression::NumberLiteral(n) => Some(n.value.to_string()),
                Expression::Variable(v) => Some(v.name.clone()),
                Expression::ArrayAccess(a) => Some(a.name.clone()),
                Expression::FunctionCall(c) => Some(c.name.clone()),
                Expression::Relational(r) => Some(r.op.symbol().to_string()),
                Expression::Logical(l) => Some(l.op.symbol().to_string()),
                Expression::Not(_) => None,
            },
        }
    }

    /// `Kind(detail)`, or just `Kind` when there is no scalar field.
    pub fn label(&self) -> String {
        match self.detail() {
            Some(detail) => format!("{}({})", self.kind(), detail),
            None => self.kind().to_string(),
        }
    }

    /// Direct children in declaration order, each paired with its role.
    /// Absent optional fields produce no entry.
    pub fn children(&self) -> Vec<(String, Node<'a>)> {
        fn list<'a, T>(
            role: &str,
            items: &'a [T],
            wrap: fn(&'a T) -> Node<'a>,
        ) -> impl Iterator<Item = (String, Node<'a>)> + 'a {
            let role = role.to_string();
            items
                .iter()
                .enumerate()
                .map(move |(i, item)| (format!("{}[{}]", role, i), wrap(item)))
        }

        let mut children = Vec::new();
        match *self {
            Node::Program(p) => children.extend(list("functions", &p.functions, Node::Function)),
            Node::Function(f) => {
                children.extend(list("parameters", &f.parameters, Node::Parameter));
                children.extend(list("declarations", &f.declarations, Node::VarDeclaration));
                children.extend(list("body", &f.body, Node::Statement));
            }
            Node::Parameter(p) => children.push(("type".to_string(), Node::TypeName(&p.ty))),
            Node::VarDeclaration(d) => children.push(("type".to_string(), Node::TypeName(&d.ty))),
            Node::TypeName(t) => {
                if let Some(size) = &t.array_size {
                    children.push(("size".to_string(), Node::Expression(size)));
                }
            }
            Node::Statement(stmt) => match stmt {
                Statement::Print(_) | Statement::Break(_) | Statement::Skip(_) => {}
                Statement::Assignment(a) => {
                    children.push(("location".to_string(), Node::Expression(&a.location)));
                    children.push(("expr".to_string(), Node::Expression(&a.expr)));
                }
                Statement::CompoundAssignment(c) => {
                    children.push(("location".to_string(), Node::Expression(&c.location)));
                    children.push(("expr".to_string(), Node::Expression(&c.expr)));
                }
                Statement::If(i) => {
                    children.push(("condition".to_string(), Node::Expression(&i.condition)));
                    children.push(("then".to_string(), Node::Statement(&i.then_stmt)));
                    if let Some(else_stmt) = &i.else_stmt {
                        children.push(("else".to_string(), Node::Statement(else_stmt)));
                    }
                }
                Statement::While(w) => {
                    children.push(("condition".to_string(), Node::Expression(&w.condition)));
                    children.push(("body".to_string(), Node::Statement(&w.body)));
                }
                Statement::Read(r) => {
                    children.push(("location".to_string(), Node::Expression(&r.location)))
                }
                Statement::Write(w) => {
                    children.push(("expr".to_string(), Node::Expression(&w.expr)))
                }
                Statement::Return(r) => {
                    children.push(("expr".to_string(), Node::Expression(&r.expr)))
                }
                Statement::Block(b) => {
                    children.extend(list("statements", &b.statements, Node::Statement))
                }
            },
            Node::Expression(expr) => match expr {
                Expression::Binary(b) => {
                    children.push(("left".to_string(), Node::Expression(&b.left)));
                    children.push(("right".to_string(), Node::Expression(&b.right)));
                }
                Expression::Relational(r) => {
                    children.push(("left".to_string(), Node::Expression(&r.left)));
                    children.push(("right".to_string(), Node::Expression(&r.right)));
                }
                Expression::Logical(l) => {
                    children.push(("left".to_string(), Node::Expression(&l.left)));
                    children.push(("right".to_string(), Node::Expression(&l.right)));
                }
                Expression::Unary(u) => {
                    children.push(("operand".to_string(), Node::Expression(&u.operand)))
                }
                Expression::Not(n) => {
                    children.push(("operand".to_string(), Node::Expression(&n.operand)))
                }
                Expression::ArrayAccess(a) => {
                    children.push(("index".to_string(), Node::Expression(&a.index)))
                }
                Expression::FunctionCall(c) => {
                    children.extend(list("arguments", &c.arguments, Node::Expression))
                }
                Expression::NumberLiteral(_) | Expression::Variable(_) => {}
            },
        }
        children
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        let expr = Expression::binary(Expression::int(1), BinaryOp::Add, Expression::float(2.5));
        let node = Node::Expression(&expr);
        assert_eq!(node.label(), "Binary(+)");

        let children = node.children();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].0, "left");
        assert_eq!(children[0].1.label(), "NumberLiteral(1)");
        assert_eq!(children[1].1.label(), "NumberLiteral(2.5)");
    }

    #[test]
    fn test_absent_else_has_no_child() {
        let stmt = Statement::If(If {
            condition: Expression::variable("a"),
            then_stmt: Box::new(Statement::Skip(Skip)),
            else_stmt: None,
        });
        let roles: Vec<String> = Node::Statement(&stmt)
            .children()
            .into_iter()
            .map(|(role, _)| role)
            .collect();
        assert_eq!(roles, vec!["condition", "then"]);
    }

    #[test]
    fn test_function_children_order() {
        let function = Function {
            name: "f".to_string(),
            parameters: vec![Parameter {
                name: "a".to_string(),
                ty: TypeName::scalar(BaseType::Int),
            }],
            declarations: vec![VarDeclaration {
                name: "v".to_string(),
                ty: TypeName::array(BaseType::Float, Expression::int(3)),
            }],
            body: vec![Statement::Break(Break), Statement::Skip(Skip)],
        };
        let roles: Vec<String> = Node::Function(&function)
            .children()
            .into_iter()
            .map(|(role, _)| role)
            .collect();
        assert_eq!(
            roles,
            vec!["parameters[0]", "declarations[0]", "body[0]", "body[1]"]
        );
        assert_eq!(Node::TypeName(&function.declarations[0].ty).label(), "TypeName(FLOAT[])");
    }

    #[test]
    fn test_location_shapes() {
        assert!(Expression::variable("x").is_location());
        assert!(Expression::array_access("x", Expression::int(0)).is_location());
        assert!(!Expression::int(0).is_location());
    }
}
