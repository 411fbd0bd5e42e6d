pub mod parser;
pub mod reader;
pub mod record;

pub use parser::ReportParser;
pub use reader::FileReader;
pub use record::Report;

use anyhow::Result;
use std::path::Path;

/// Parse one dataset file into report records.
pub async fn ingest_file(path: &Path) -> Result<Vec<Report>> {
    let text = FileReader::read_file(path).await?;
    Ok(ReportParser::new().parse(&text))
}

/// Parse every .txt file in a directory, records concatenated in path order.
pub async fn ingest_directory(dir: &Path) -> Result<Vec<Report>> {
    let files = FileReader::read_directory(dir).await?;
    let parser = ReportParser::new();

    let mut all_records = Vec::new();

    for (path, text) in files {
        let records = parser.parse(&text);
        tracing::debug!(file = %path, records = records.len(), "parsed dataset file");
        all_records.extend(records);
    }

    Ok(all_records)
}
