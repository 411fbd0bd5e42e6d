use std::collections::HashMap;

use ingest::Report;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Person,
    Place,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Person => "person",
            EntityKind::Place => "place",
        }
    }
}

/// A graph vertex: one uniquely named person or place.
#[derive(Debug, Clone)]
pub struct EntityNode {
    pub kind: EntityKind,
    pub name: String,
}

impl EntityNode {
    /// Composite key, also the exported node id (`person:Alice`).
    pub fn key(&self) -> String {
        format!("{}:{}", self.kind.as_str(), self.name)
    }
}

/// An undirected co-occurrence edge between two node indices. `docs` holds
/// the IDs of the reports that mentioned both endpoints, in first-observed
/// order, each at most once; it is empty when only ID-less reports did.
#[derive(Debug, Clone)]
pub struct CooccurrenceEdge {
    pub source: usize,
    pub target: usize,
    pub docs: Vec<String>,
}

/// Entity co-occurrence graph as an explicit adjacency structure: nodes and
/// edges live in vecs keyed by lookup maps, so first-encounter order survives
/// into the export and the aggregation logic needs no graph library.
#[derive(Debug, Default)]
pub struct EntityGraph {
    nodes: Vec<EntityNode>,
    node_index: HashMap<(EntityKind, String), usize>,
    edges: Vec<CooccurrenceEdge>,
    edge_index: HashMap<(usize, usize), usize>,
}

impl EntityGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the co-occurrence graph for a record set.
    pub fn build(reports: &[Report]) -> Self {
        let mut graph = Self::new();
        for report in reports {
            graph.add_report(report);
        }
        graph
    }

    /// Fold one report into the graph: register its entities, then connect
    /// every pair of distinct entities it mentions.
    ///
    /// Entity order is persons first, then places, source order preserved.
    /// Duplicate names are kept in the list; they collapse at the node key,
    /// so a duplicated name pairs against the others twice (same unordered
    /// pair, same report ID, no effect on the doc list) and never against
    /// itself.
    pub fn add_report(&mut self, report: &Report) {
        let doc_id = report.doc_id();

        let mut entity_ids = Vec::new();
        for person in non_empty(&report.persons) {
            entity_ids.push(self.add_node(EntityKind::Person, person));
        }
        for place in non_empty(&report.places) {
            entity_ids.push(self.add_node(EntityKind::Place, place));
        }

        for i in 0..entity_ids.len() {
            for j in (i + 1)..entity_ids.len() {
                let (u, v) = (entity_ids[i], entity_ids[j]);
                if u != v {
                    self.record_cooccurrence(u, v, doc_id);
                }
            }
        }
    }

    pub fn nodes(&self) -> &[EntityNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[CooccurrenceEdge] {
        &self.edges
    }

    /// Register a node, idempotently. Returns its index.
    fn add_node(&mut self, kind: EntityKind, name: &str) -> usize {
        let key = (kind, name.to_string());
        if let Some(&idx) = self.node_index.get(&key) {
            return idx;
        }

        let idx = self.nodes.len();
        self.nodes.push(EntityNode {
            kind,
            name: name.to_string(),
        });
        self.node_index.insert(key, idx);
        idx
    }

    /// Union a report into the unordered pair's edge, creating the edge on
    /// first co-occurrence. A report without an ID still creates the edge
    /// but leaves no doc reference.
    fn record_cooccurrence(&mut self, u: usize, v: usize, doc_id: Option<&str>) {
        let pair = (u.min(v), u.max(v));

        match self.edge_index.get(&pair) {
            Some(&idx) => {
                if let Some(id) = doc_id {
                    let docs = &mut self.edges[idx].docs;
                    if !docs.iter().any(|d| d == id) {
                        docs.push(id.to_string());
                    }
                }
            }
            None => {
                let idx = self.edges.len();
                self.edges.push(CooccurrenceEdge {
                    source: pair.0,
                    target: pair.1,
                    docs: doc_id.map(|id| vec![id.to_string()]).unwrap_or_default(),
                });
                self.edge_index.insert(pair, idx);
            }
        }
    }
}

fn non_empty<'a>(field: &'a Option<Vec<String>>) -> impl Iterator<Item = &'a str> {
    field
        .iter()
        .flatten()
        .map(String::as_str)
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(id: Option<&str>, persons: &[&str], places: &[&str]) -> Report {
        Report {
            id: id.map(String::from),
            persons: Some(persons.iter().map(|s| s.to_string()).collect()),
            places: Some(places.iter().map(|s| s.to_string()).collect()),
            ..Report::default()
        }
    }

    fn edge_docs<'a>(graph: &'a EntityGraph, a: &str, b: &str) -> Option<&'a [String]> {
        graph.edges().iter().find_map(|edge| {
            let u = graph.nodes()[edge.source].key();
            let v = graph.nodes()[edge.target].key();
            if (u == a && v == b) || (u == b && v == a) {
                Some(edge.docs.as_slice())
            } else {
                None
            }
        })
    }

    #[test]
    fn test_symmetry_no_transitive_edges() {
        let reports = vec![
            report(Some("R1"), &["A", "B"], &[]),
            report(Some("R2"), &["B", "C"], &[]),
        ];
        let graph = EntityGraph::build(&reports);

        assert_eq!(graph.edges().len(), 2);
        assert_eq!(edge_docs(&graph, "person:A", "person:B"), Some(&["R1".to_string()][..]));
        assert_eq!(edge_docs(&graph, "person:B", "person:C"), Some(&["R2".to_string()][..]));
        assert_eq!(edge_docs(&graph, "person:A", "person:C"), None);
    }

    #[test]
    fn test_duplicate_name_in_record_dedupes_doc_id() {
        let reports = vec![report(Some("R1"), &["Alice", "Bob", "Alice"], &[])];
        let graph = EntityGraph::build(&reports);

        // Alice appears twice: both (Alice, Bob) combinations land on the
        // same edge, and the Alice-Alice self pair is skipped.
        assert_eq!(graph.nodes().len(), 2);
        assert_eq!(graph.edges().len(), 1);
        assert_eq!(
            edge_docs(&graph, "person:Alice", "person:Bob"),
            Some(&["R1".to_string()][..])
        );
    }

    #[test]
    fn test_missing_id_unions_edge_without_doc() {
        let reports = vec![
            report(None, &["A", "B"], &[]),
            report(Some(""), &["A", "B"], &[]),
        ];
        let graph = EntityGraph::build(&reports);

        assert_eq!(graph.edges().len(), 1);
        let docs = edge_docs(&graph, "person:A", "person:B").unwrap();
        assert!(docs.is_empty());
    }

    #[test]
    fn test_doc_appended_once_per_report() {
        let reports = vec![
            report(None, &["A", "B"], &[]),
            report(Some("R5"), &["A", "B"], &[]),
            report(Some("R5"), &["A", "B"], &[]),
        ];
        let graph = EntityGraph::build(&reports);

        assert_eq!(
            edge_docs(&graph, "person:A", "person:B"),
            Some(&["R5".to_string()][..])
        );
    }

    #[test]
    fn test_isolated_nodes_kept() {
        let reports = vec![report(Some("R1"), &["Loner"], &[])];
        let graph = EntityGraph::build(&reports);

        assert_eq!(graph.nodes().len(), 1);
        assert_eq!(graph.nodes()[0].key(), "person:Loner");
        assert!(graph.edges().is_empty());
    }

    #[test]
    fn test_person_and_place_with_same_name_are_distinct() {
        let reports = vec![report(Some("R1"), &["Georgia"], &["Georgia"])];
        let graph = EntityGraph::build(&reports);

        assert_eq!(graph.nodes().len(), 2);
        assert_eq!(
            edge_docs(&graph, "person:Georgia", "place:Georgia"),
            Some(&["R1".to_string()][..])
        );
    }

    #[test]
    fn test_empty_entries_excluded() {
        let reports = vec![report(Some("R1"), &["A", ""], &[""])];
        let graph = EntityGraph::build(&reports);

        assert_eq!(graph.nodes().len(), 1);
        assert!(graph.edges().is_empty());
    }
}
