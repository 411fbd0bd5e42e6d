use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

use crate::graph::EntityGraph;

/// D3 node shape: `{"id": "person:Alice", "type": "person", "label": "Alice"}`.
#[derive(Debug, Clone, Serialize)]
pub struct GraphNode {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GraphLink {
    pub source: String,
    pub target: String,
    pub docs: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GraphExport {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}

impl GraphExport {
    /// Flatten the adjacency structure into the wire shape. Node and link
    /// order follow the graph's first-encounter order.
    pub fn from_graph(graph: &EntityGraph) -> Self {
        let nodes = graph
            .nodes()
            .iter()
            .map(|node| GraphNode {
                id: node.key(),
                kind: node.kind.as_str().to_string(),
                label: node.name.clone(),
            })
            .collect();

        let links = graph
            .edges()
            .iter()
            .map(|edge| GraphLink {
                source: graph.nodes()[edge.source].key(),
                target: graph.nodes()[edge.target].key(),
                docs: edge.docs.clone(),
            })
            .collect();

        Self { nodes, links }
    }
}

/// Write an artifact as pretty JSON through a temp sibling plus rename, so a
/// failed run leaves any previous artifact untouched.
pub fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize artifact")?;

    let tmp = path.with_extension("tmp");
    std::fs::write(&tmp, json).context(format!("Failed to write {:?}", tmp))?;
    std::fs::rename(&tmp, path)
        .context(format!("Failed to move artifact into place: {:?}", path))?;

    Ok(())
}
