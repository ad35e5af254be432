//! Find command: search an architecture for the specified target paths

use anyhow::Context;
use clap::Args;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::output::{self, OutputFormat, ResultDocument};
use crate::Cli;
use causeway_core::limits::{DEFAULT_MAX_NODE_DEPTH, DEFAULT_TIMEOUT_SECS};
use causeway_core::{ArchDescription, CommGraph, NamedPath, TargetPathFile};
use causeway_search::{PathEngine, SearchOptions, TargetOutcome};

#[derive(Args)]
pub struct FindArgs {
    /// Architecture description file (JSON)
    pub architecture: PathBuf,

    /// Target path specification file (JSON)
    pub target_paths: PathBuf,

    /// Search depth ceiling (hops)
    #[arg(long, default_value_t = DEFAULT_MAX_NODE_DEPTH)]
    pub max_node_depth: u32,

    /// Wall-clock budget per block search (seconds)
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Write the found paths to a JSON file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Treat any target without a match as fatal
    #[arg(long)]
    pub strict: bool,
}

pub fn load_graph(path: &Path) -> anyhow::Result<CommGraph> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Unable to read {}", path.display()))?;
    let desc: ArchDescription = serde_json::from_str(&json)
        .with_context(|| format!("Invalid architecture description in {}", path.display()))?;
    let graph = CommGraph::from_description(desc)?;
    tracing::debug!(
        nodes = graph.node_count(),
        comms = graph.comm_count(),
        "architecture loaded"
    );
    Ok(graph)
}

pub async fn run(args: &FindArgs, cli: &Cli) -> anyhow::Result<()> {
    let graph = load_graph(&args.architecture)?;

    let spec_json = std::fs::read_to_string(&args.target_paths)
        .with_context(|| format!("Unable to read {}", args.target_paths.display()))?;
    let file = TargetPathFile::from_json(&spec_json)
        .with_context(|| format!("Invalid target path file {}", args.target_paths.display()))?;

    let options = SearchOptions::new()
        .with_max_node_depth(args.max_node_depth)
        .with_timeout(Duration::from_secs(args.timeout));

    let engine = PathEngine::new(graph);
    let results = engine.find_target_paths(&file, &options).await?;

    let mut found: Vec<NamedPath> = Vec::new();
    let mut failures: Vec<String> = Vec::new();
    for result in &results {
        match &result.outcome {
            TargetOutcome::Found(paths) => found.extend(paths.iter().cloned()),
            TargetOutcome::Timeout => {
                failures.push(format!("{} (timeout, narrow the path or raise --timeout)", result.name));
            }
            TargetOutcome::NotFound => failures.push(format!("{} (not found)", result.name)),
        }
    }

    match OutputFormat::from(cli.format.as_str()) {
        OutputFormat::Json => {
            println!("{}", output::to_json(&ResultDocument::new(found.clone()))?);
        }
        OutputFormat::Table => {
            output::print_paths(&found);
            for failure in &failures {
                println!("failed: {}", failure);
            }
        }
    }

    if let Some(path) = &args.output {
        let document = ResultDocument::new(found.clone());
        std::fs::write(path, output::to_json(&document)?)
            .with_context(|| format!("Unable to write {}", path.display()))?;
        tracing::info!("wrote {} path(s) to {}", found.len(), path.display());
    }

    if failures.is_empty() {
        tracing::info!("<<< OK. All target paths are found >>>");
    } else if args.strict {
        anyhow::bail!("{} target path(s) not found", failures.len());
    } else if found.is_empty() && !results.is_empty() {
        anyhow::bail!("no target path was found");
    }

    Ok(())
}
