// End-to-end tests: source text through the parser and both renderers

use pl0dot::parser::ast::*;
use pl0dot::parser::lexer::tokenize;
use pl0dot::parser::visit::{UnsupportedNodeError, VisitResult, Visitor};
use pl0dot::parser::{parse, parse_source, ParseError};
use pl0dot::render::dot::build_graph;
use pl0dot::render::{print_tree, render, render_with, RenderOptions};
use rustc_hash::FxHashSet;
use std::fs;
use std::path::Path;

fn read_demo(name: &str) -> String {
    let path = Path::new("demos").join(name);
    fs::read_to_string(path).expect("Failed to read demo file")
}

fn function_names(program: &Program) -> Vec<&str> {
    program.functions.iter().map(|f| f.name.as_str()).collect()
}

/// Collects the names of every called function, in pre-order
#[derive(Default)]
struct CallCollector {
    calls: Vec<String>,
}

impl Visitor for CallCollector {
    type Output = ();

    fn visit_function_call(&mut self, node: &FunctionCall, _expr: &Expression) -> VisitResult<()> {
        self.calls.push(node.name.clone());
        for arg in &node.arguments {
            arg.accept(self)?;
        }
        Ok(())
    }

    fn visit_node(&mut self, node: Node<'_>) -> VisitResult<()> {
        for (_, child) in node.children() {
            child.accept(self)?;
        }
        Ok(())
    }
}

#[test]
fn test_write_expression_end_to_end() {
    let program = parse(tokenize("fun main() begin write(1+2*3) end")).expect("Parsing failed");

    assert_eq!(program.functions.len(), 1);
    let main = &program.functions[0];
    assert_eq!(main.name, "main");
    assert!(main.parameters.is_empty());
    assert!(main.declarations.is_empty());
    assert_eq!(
        main.body,
        vec![Statement::Write(Write {
            expr: Expression::binary(
                Expression::int(1),
                BinaryOp::Add,
                Expression::binary(Expression::int(2), BinaryOp::Mul, Expression::int(3)),
            ),
        })]
    );

    let graph = build_graph(&program).expect("Rendering failed");
    assert_eq!(graph.nodes.len(), 8);
    assert_eq!(graph.edges.len(), 7);

    let labels: Vec<&str> = graph.nodes.iter().map(|n| n.label.as_str()).collect();
    assert_eq!(
        labels,
        vec![
            "Program",
            "Function(main)",
            "Write",
            "Binary(+)",
            "NumberLiteral(1)",
            "Binary(*)",
            "NumberLiteral(2)",
            "NumberLiteral(3)",
        ]
    );

    let dot = render(&program).expect("Rendering failed");
    assert_eq!(dot.matches(" -> ").count(), 7);
    assert!(dot.contains("\"n3\" -> \"n4\" [label=\"left\"];"));
    assert!(dot.contains("\"n3\" -> \"n5\" [label=\"right\"];"));
}

#[test]
fn test_function_order_preserved() {
    let program = parse_source(&read_demo("factorial.pl0")).expect("Parsing failed");
    assert_eq!(function_names(&program), vec!["fact", "rfact", "main"]);

    let fact = &program.functions[0];
    assert_eq!(fact.parameters.len(), 1);
    assert_eq!(fact.declarations.len(), 1);
    assert_eq!(fact.body.len(), 3);
}

#[test]
fn test_uppercase_keywords_and_arrays() {
    let program = parse_source(&read_demo("arrays.pl0")).expect("Parsing failed");
    assert_eq!(function_names(&program), vec!["sum", "main"]);

    let sum = &program.functions[0];
    assert_eq!(sum.parameters[0].ty, TypeName::array(BaseType::Float, Expression::variable("n")));
    assert_eq!(sum.parameters[1].ty, TypeName::scalar(BaseType::Int));

    // The array size is kept as an unevaluated expression
    let main = &program.functions[1];
    let size = main.declarations[1]
        .ty
        .array_size
        .as_deref()
        .expect("Expected array size");
    assert!(matches!(size, Expression::Binary(_)));
}

#[test]
fn test_empty_parameter_and_argument_lists() {
    let source = "fun f() begin return f() end \
                  fun g(a: int, b: int, c: int) begin return g(1, 2, 3) end";
    let program = parse_source(source).expect("Parsing failed");

    assert!(program.functions[0].parameters.is_empty());
    assert_eq!(
        program.functions[0].body,
        vec![Statement::Return(Return {
            expr: Expression::call("f", vec![]),
        })]
    );
    assert_eq!(program.functions[1].parameters.len(), 3);
    assert_eq!(
        program.functions[1].body,
        vec![Statement::Return(Return {
            expr: Expression::call(
                "g",
                vec![Expression::int(1), Expression::int(2), Expression::int(3)],
            ),
        })]
    );
}

#[test]
fn test_array_type_size_not_evaluated() {
    let program = parse_source("FUN f(n: INT) v: INT[n] BEGIN SKIP END").expect("Parsing failed");
    let decl = &program.functions[0].declarations[0];

    assert_eq!(decl.name, "v");
    assert_eq!(decl.ty.base, BaseType::Int);
    assert_eq!(decl.ty.array_size.as_deref(), Some(&Expression::variable("n")));
}

#[test]
fn test_unterminated_string_reports_line() {
    let err = parse_source(&read_demo("bad_string.pl0")).unwrap_err();

    assert!(matches!(err, ParseError::Lex(_)), "Expected lex error, got {:?}", err);
    assert_eq!(err.line(), 4);
    assert!(err.to_string().contains("line 4"), "Message was: {}", err);
}

#[test]
fn test_stray_token_after_functions() {
    let err = parse_source("fun main() begin skip end\n\nx").unwrap_err();

    assert_eq!(err.line(), 3);
    assert_eq!(
        err.to_string(),
        "syntax error at line 3: unexpected identifier 'x', \
         expected 'fun' to start a function definition"
    );
}

#[test]
fn test_visitor_without_handlers_fails() {
    struct Nothing;
    impl Visitor for Nothing {
        type Output = ();
        fn name(&self) -> &'static str {
            "Nothing"
        }
    }

    let program = parse_source("fun main() begin skip end").expect("Parsing failed");
    assert_eq!(
        program.accept(&mut Nothing),
        Err(UnsupportedNodeError {
            visitor: "Nothing",
            node: "Program",
        })
    );
    assert_eq!(
        Statement::Skip(Skip).accept(&mut Nothing).unwrap_err().to_string(),
        "Nothing does not support Skip nodes"
    );
}

#[test]
fn test_generic_visitor_reaches_every_call() {
    let program = parse_source(&read_demo("factorial.pl0")).expect("Parsing failed");

    let mut collector = CallCollector::default();
    program.accept(&mut collector).expect("Visit failed");
    assert_eq!(collector.calls, vec!["rfact", "fact", "rfact"]);
}

#[test]
fn test_renderers_are_deterministic() {
    let program = parse_source(&read_demo("arrays.pl0")).expect("Parsing failed");

    assert_eq!(render(&program).unwrap(), render(&program).unwrap());
    assert_eq!(print_tree(&program).unwrap(), print_tree(&program).unwrap());

    let graph = build_graph(&program).unwrap();
    let ids: FxHashSet<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids.len(), graph.nodes.len());
    // Every edge joins two declared nodes
    assert!(graph
        .edges
        .iter()
        .all(|e| ids.contains(e.from.as_str()) && ids.contains(e.to.as_str())));
    // A tree: every node except the root has exactly one incoming edge
    assert_eq!(graph.edges.len(), graph.nodes.len() - 1);
}

#[test]
fn test_render_options() {
    let source = "fun main() begin print(\"say \\\"hi\\\"\") end";
    let program = parse_source(source).expect("Parsing failed");
    let dot = render_with(
        &program,
        &RenderOptions {
            graph_name: "demo".to_string(),
            edge_labels: false,
        },
    )
    .unwrap();

    assert!(dot.starts_with("digraph \"demo\" {\n"));
    assert!(dot.contains(r#"[label="Print(\"say \\\"hi\\\"\")"];"#));
    assert!(!dot.contains("body[0]"));
}

#[test]
fn test_tree_outline() {
    let program = parse_source(&read_demo("factorial.pl0")).expect("Parsing failed");
    let outline = print_tree(&program).unwrap();

    assert!(outline.starts_with("Program\n  [0] Function(fact)\n"));
    assert!(outline.contains("        else: Return\n          expr: n * rfact(n - 1)\n"));
    assert_eq!(outline.lines().filter(|l| l.contains("Function(")).count(), 3);
}

#[test]
fn test_lex_error_message_is_one_line() {
    let err = parse_source("fun main() begin\n print(\"a\\nb\nend").unwrap_err();
    let message = err.to_string();

    assert!(matches!(err, ParseError::Lex(_)));
    assert_eq!(message.lines().count(), 1, "Message was: {:?}", message);
    assert!(message.contains("\"a\\nb\""), "Message was: {}", message);
}

#[test]
fn test_deep_parentheses_fail_cleanly() {
    let source = format!(
        "fun main() begin write({}1{}) end",
        "(".repeat(100_000),
        ")".repeat(100_000)
    );

    match parse_source(&source) {
        Err(ParseError::Syntax(err)) => {
            assert_eq!(err.location.line, 1);
            assert!(err.expected.contains("levels of nesting"));
        }
        other => panic!("Expected syntax error, got {:?}", other.map(|p| p.functions.len())),
    }
}
