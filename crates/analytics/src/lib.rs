pub mod export;
pub mod frequency;
pub mod graph;

pub use export::{GraphExport, GraphLink, GraphNode};
pub use frequency::{aggregate, BarData, BarEntry};
pub use graph::{CooccurrenceEdge, EntityGraph, EntityKind, EntityNode};

use anyhow::{Context, Result};
use ingest::Report;
use std::path::Path;

/// Load the record JSON produced by the ingest stage.
pub fn load_reports(path: &Path) -> Result<Vec<Report>> {
    let text = std::fs::read_to_string(path)
        .context(format!("Failed to read records: {:?}", path))?;
    let reports = serde_json::from_str(&text).context("Failed to parse record JSON")?;
    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ingest::ReportParser;

    // the full chain: text -> records -> graph + bars
    #[test]
    fn test_end_to_end_scenario() {
        let text = "\
REPORT
ID: R1
PERSONS: Alice;Bob
PLACES: Town/County
REPORT
ID: R2
PERSONS: Bob;Carol
";
        let records = ReportParser::new().parse(text);
        assert_eq!(records.len(), 2);

        let graph = EntityGraph::build(&records);
        let keys: Vec<_> = graph.nodes().iter().map(|n| n.key()).collect();
        assert_eq!(
            keys,
            vec![
                "person:Alice",
                "person:Bob",
                "place:Town, County",
                "person:Carol"
            ]
        );

        let edges: Vec<_> = graph
            .edges()
            .iter()
            .map(|e| {
                (
                    graph.nodes()[e.source].key(),
                    graph.nodes()[e.target].key(),
                    e.docs.clone(),
                )
            })
            .collect();
        assert_eq!(
            edges,
            vec![
                (
                    "person:Alice".to_string(),
                    "person:Bob".to_string(),
                    vec!["R1".to_string()]
                ),
                (
                    "person:Alice".to_string(),
                    "place:Town, County".to_string(),
                    vec!["R1".to_string()]
                ),
                (
                    "person:Bob".to_string(),
                    "place:Town, County".to_string(),
                    vec!["R1".to_string()]
                ),
                (
                    "person:Bob".to_string(),
                    "person:Carol".to_string(),
                    vec!["R2".to_string()]
                ),
            ]
        );

        let bars = aggregate(&records, 20);
        let people: Vec<_> = bars
            .people
            .iter()
            .map(|e| (e.name.as_str(), e.count))
            .collect();
        assert_eq!(people, vec![("Bob", 2), ("Alice", 1), ("Carol", 1)]);
    }
}
