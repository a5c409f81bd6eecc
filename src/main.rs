//! slangvop CLI: compile a JSON VOP graph to Slang source

use clap::Parser;
use log::info;
use slangvop::nodes::BUILTIN_ADAPTERS;
use slangvop::{compile_to_slang, CodegenResult, CompilerConfig, VopGraph};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "slangvop")]
#[command(version)]
#[command(about = "Compile a VOP node graph into Slang shader source", long_about = None)]
struct Args {
    /// Graph description (JSON)
    graph: Option<PathBuf>,

    /// Compiler configuration (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output file, stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// List the registered node adapters and exit
    #[arg(long)]
    list_adapters: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if args.list_adapters {
        list_adapters();
        return ExitCode::SUCCESS;
    }

    let Some(graph_path) = args.graph.as_ref() else {
        eprintln!("error: a graph file is required unless --list-adapters is given");
        return ExitCode::from(2);
    };

    match run(graph_path, &args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(graph_path: &Path, args: &Args) -> CodegenResult<()> {
    let config = match &args.config {
        Some(path) => CompilerConfig::from_file(path)?,
        None => CompilerConfig::default(),
    };

    let graph = VopGraph::from_file(graph_path)?;
    info!("Loaded {} nodes from {}", graph.nodes.len(), graph_path.display());

    let source = compile_to_slang(&graph, &config)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, source)?;
            info!("Wrote {}", path.display());
        }
        None => print!("{}", source),
    }
    Ok(())
}

fn list_adapters() {
    for metadata in BUILTIN_ADAPTERS.list_adapters() {
        println!(
            "{:<10} {:<10} [{}] -> {}  {}",
            metadata.node_type,
            metadata.display_name,
            metadata.category.display_string(),
            metadata.output_socket,
            metadata.description
        );
    }
}
