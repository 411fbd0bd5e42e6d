use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use analytics::{aggregate, EntityGraph, GraphExport};

/// Build the graph and bar-chart JSON artifacts from parsed report records.
#[derive(Parser)]
#[command(name = "build_artifacts")]
struct Args {
    /// Path to the record JSON produced by parse_reports
    input: PathBuf,

    #[arg(long, default_value = "graph.json")]
    graph_out: PathBuf,

    #[arg(long, default_value = "bars.json")]
    bars_out: PathBuf,

    /// Entries to keep per bar category
    #[arg(long, default_value_t = 20)]
    top_k: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let reports = analytics::load_reports(&args.input)?;
    tracing::info!(records = reports.len(), "loaded report records");

    let graph = EntityGraph::build(&reports);
    tracing::info!(
        nodes = graph.nodes().len(),
        edges = graph.edges().len(),
        "built entity co-occurrence graph"
    );
    analytics::export::write_json(&GraphExport::from_graph(&graph), &args.graph_out)?;

    let bars = aggregate(&reports, args.top_k);
    analytics::export::write_json(&bars, &args.bars_out)?;

    println!(
        "Wrote {} and {}",
        args.graph_out.display(),
        args.bars_out.display()
    );
    Ok(())
}
