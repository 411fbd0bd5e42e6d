use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

/// Convert delimited REPORT text into the record JSON consumed by the
/// analytics stage and the ask service.
#[derive(Parser)]
#[command(name = "parse_reports")]
struct Args {
    /// Input .txt file, or a directory of .txt files
    input: PathBuf,

    /// Output path for the record JSON; prints to stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let records = if args.input.is_dir() {
        ingest::ingest_directory(&args.input).await?
    } else {
        ingest::ingest_file(&args.input).await?
    };

    let json = serde_json::to_string_pretty(&records)?;

    match args.output {
        Some(path) => {
            tokio::fs::write(&path, json)
                .await
                .context(format!("Failed to write records to {:?}", path))?;
            println!("Wrote {} records to {}", records.len(), path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}
