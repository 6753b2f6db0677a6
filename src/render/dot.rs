//! Graphviz DOT rendering of an AST
//!
//! Every AST node becomes one graph node labeled `Kind(detail)`, every
//! parent→child link one edge labeled with the child's role. Ids are
//! `n0`, `n1`, ... in pre-order and only mean something within one render.

use crate::parser::ast::{Node, Program};
use crate::parser::visit::{UnsupportedNodeError, VisitResult, Visitor};
use std::fmt::Write as _;

/// Rendering settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Name of the emitted `digraph`
    pub graph_name: String,
    /// Label edges with the child's role (`left`, `body[0]`, ...)
    pub edge_labels: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            graph_name: "AST".to_string(),
            edge_labels: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
    pub label: String,
}

/// Structured form of the rendered graph, in emission order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl Graph {
    /// Serialize as a DOT document
    pub fn to_dot(&self, options: &RenderOptions) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "digraph \"{}\" {{", escape(&options.graph_name));
        let _ = writeln!(out, "    node [shape=box];");
        for node in &self.nodes {
            let _ = writeln!(out, "    \"{}\" [label=\"{}\"];", node.id, escape(&node.label));
        }
        for edge in &self.edges {
            if options.edge_labels {
                let _ = writeln!(
                    out,
                    "    \"{}\" -> \"{}\" [label=\"{}\"];",
                    edge.from,
                    edge.to,
                    escape(&edge.label)
                );
            } else {
                let _ = writeln!(out, "    \"{}\" -> \"{}\";", edge.from, edge.to);
            }
        }
        out.push_str("}\n");
        out
    }
}

/// Escape text for a double-quoted DOT string
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Visitor that collects a [`Graph`]. It only implements the generic
/// `visit_node` fallback, which every node kind reaches.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: Graph,
    next_id: usize,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(self) -> Graph {
        self.graph
    }

    fn allocate_id(&mut self) -> String {
        let id = format!("n{}", self.next_id);
        self.next_id += 1;
        id
    }
}

impl Visitor for GraphBuilder {
    /// Id of the graph node created for the visited AST node
    type Output = String;

    fn name(&self) -> &'static str {
        "GraphBuilder"
    }

    fn visit_node(&mut self, node: Node<'_>) -> VisitResult<String> {
        let id = self.allocate_id();
        self.graph.nodes.push(GraphNode {
            id: id.clone(),
            label: node.label(),
        });

        for (role, child) in node.children() {
            let child_id = child.accept(self)?;
            self.graph.edges.push(GraphEdge {
                from: id.clone(),
                to: child_id,
                label: role,
            });
        }

        Ok(id)
    }
}

/// Build the graph for `program`
pub fn build_graph(program: &Program) -> Result<Graph, UnsupportedNodeError> {
    let mut builder = GraphBuilder::new();
    program.accept(&mut builder)?;
    Ok(builder.finish())
}

/// Render `program` as DOT with default options
pub fn render(program: &Program) -> Result<String, UnsupportedNodeError> {
    render_with(program, &RenderOptions::default())
}

pub fn render_with(
    program: &Program,
    options: &RenderOptions,
) -> Result<String, UnsupportedNodeError> {
    Ok(build_graph(program)?.to_dot(options))
}
