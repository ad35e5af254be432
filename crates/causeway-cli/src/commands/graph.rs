//! Graph inspection command

use clap::Args;
use std::path::PathBuf;

use crate::commands::find::load_graph;
use crate::output::{self, OutputFormat};
use crate::Cli;

#[derive(Args)]
pub struct GraphArgs {
    /// Architecture description file (JSON)
    pub architecture: PathBuf,

    /// List node names
    #[arg(long)]
    pub nodes: bool,

    /// List topic names
    #[arg(long)]
    pub topics: bool,

    /// List communications
    #[arg(long)]
    pub comms: bool,
}

pub fn run(args: &GraphArgs, cli: &Cli) -> anyhow::Result<()> {
    let graph = load_graph(&args.architecture)?;
    let json = OutputFormat::from(cli.format.as_str()) == OutputFormat::Json;

    if args.nodes {
        if json {
            println!("{}", output::to_json(&graph.nodes())?);
        } else {
            for node in graph.nodes() {
                println!("{}", node);
            }
        }
    } else if args.topics {
        if json {
            println!("{}", output::to_json(&graph.topic_names())?);
        } else {
            for topic in graph.topic_names() {
                println!("{}", topic);
            }
        }
    } else if args.comms {
        if json {
            println!("{}", output::to_json(&graph.communications())?);
        } else {
            for comm in graph.communications() {
                println!("{}", comm);
            }
        }
    } else {
        println!(
            "{} node(s), {} communication(s), {} topic(s)",
            graph.node_count(),
            graph.comm_count(),
            graph.topic_names().len()
        );
    }

    Ok(())
}
