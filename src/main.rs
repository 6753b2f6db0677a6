// pl0dot: parse a source file and print its AST as an outline and a DOT graph

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser as _;
use crossterm::style::Stylize;

use pl0dot::parser::{lexer::tokenize, parse};
use pl0dot::render::{dot::build_graph, print_tree, RenderOptions};

/// Parse a source file and render its syntax tree
#[derive(Debug, clap::Parser)]
#[command(name = "pl0dot", version, about)]
struct Cli {
    /// Source file; reads standard input when omitted or "-"
    file: Option<PathBuf>,

    /// Also write the graph description to PATH
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Do not print the AST outline
    #[arg(long)]
    no_ast: bool,

    /// Do not print the graph description
    #[arg(long)]
    no_graph: bool,

    /// Name of the emitted digraph
    #[arg(long, value_name = "N", default_value = "AST")]
    graph_name: String,

    /// Omit role labels on edges
    #[arg(long)]
    no_edge_labels: bool,

    /// Progress messages on standard error
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn render_options(&self) -> RenderOptions {
        RenderOptions {
            graph_name: self.graph_name.clone(),
            edge_labels: !self.no_edge_labels,
        }
    }

    fn log(&self, message: &str) {
        if self.verbose {
            eprintln!("{}", message);
        }
    }
}

fn read_source(file: Option<&PathBuf>) -> anyhow::Result<(String, String)> {
    match file {
        Some(path) if path.as_os_str() != "-" => {
            let source = fs::read_to_string(path)
                .with_context(|| format!("failed to read '{}'", path.display()))?;
            Ok((path.display().to_string(), source))
        }
        _ => {
            let mut source = String::new();
            io::stdin()
                .read_to_string(&mut source)
                .context("failed to read standard input")?;
            Ok(("<stdin>".to_string(), source))
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let (name, source) = read_source(cli.file.as_ref())?;

    cli.log(&format!("Parsing {}...", name));
    let program = parse(tokenize(&source)).with_context(|| format!("failed to parse {}", name))?;
    cli.log(&format!(
        "Parsed successfully. Found {} function definitions.",
        program.functions.len()
    ));

    // Headers only when both sections share stdout, so either one alone can be piped
    let headers = !cli.no_ast && !cli.no_graph;

    if !cli.no_ast {
        let outline = print_tree(&program)?;
        if headers {
            println!("{}", "AST".dim());
        }
        print!("{}", outline);
    }

    if cli.no_graph && cli.output.is_none() {
        return Ok(());
    }

    let graph = build_graph(&program)?;
    cli.log(&format!(
        "Rendered graph with {} nodes and {} edges.",
        graph.nodes.len(),
        graph.edges.len()
    ));
    let dot = graph.to_dot(&cli.render_options());

    if !cli.no_graph {
        if headers {
            println!();
            println!("{}", "Graph".dim());
        }
        print!("{}", dot);
    }

    if let Some(path) = &cli.output {
        fs::write(path, &dot).with_context(|| format!("failed to write '{}'", path.display()))?;
        cli.log(&format!("Wrote {}", path.display()));
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
