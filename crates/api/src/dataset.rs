use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::warn;

use ingest::Report;

const PER_DOC_CHAR_LIMIT: usize = 1500;
const MAX_TOTAL_CHARS: usize = 3500;

/// One immutable view of the record file, keyed by report ID. Records
/// without a usable ID cannot be addressed by the front end and are skipped.
#[derive(Debug, Default)]
pub struct Dataset {
    docs_by_id: HashMap<String, Report>,
}

impl Dataset {
    pub fn from_reports(reports: Vec<Report>) -> Self {
        let mut docs_by_id = HashMap::new();
        for report in reports {
            if let Some(id) = report.doc_id() {
                docs_by_id.insert(id.to_string(), report);
            }
        }
        Self { docs_by_id }
    }

    pub fn len(&self) -> usize {
        self.docs_by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs_by_id.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Report> {
        self.docs_by_id.get(id)
    }

    /// Concatenated context for the selected docs: a small header plus the
    /// report description (the serialized record when there is none),
    /// bounded per doc and in total. Unknown IDs are skipped; adding stops
    /// once the next section would blow the total budget.
    pub fn build_context(&self, doc_ids: &[String]) -> String {
        let mut parts = Vec::new();
        let mut total = 0;

        for doc_id in doc_ids {
            let Some(doc) = self.get(doc_id) else {
                continue;
            };

            let text = match &doc.description {
                Some(description) if !description.is_empty() => description.clone(),
                _ => serde_json::to_string(doc).unwrap_or_default(),
            };
            let truncated: String = text.chars().take(PER_DOC_CHAR_LIMIT).collect();

            let part = format!(
                "DOC ID: {}\nREPORTDATE: {}\nSOURCE: {}\n{}",
                doc_id,
                doc.report_date.as_deref().unwrap_or(""),
                doc.report_source.as_deref().unwrap_or(""),
                truncated,
            );

            if total + part.len() > MAX_TOTAL_CHARS {
                break;
            }
            total += part.len();
            parts.push(part);
        }

        parts.join("\n\n---\n\n")
    }
}

/// Swappable holder for the active snapshot. A reload builds a complete
/// replacement and swaps the pointer, so in-flight readers keep the old
/// `Arc` and never observe a half-built map.
pub struct DatasetStore {
    active: RwLock<Arc<Dataset>>,
}

impl DatasetStore {
    pub fn empty() -> Self {
        Self {
            active: RwLock::new(Arc::new(Dataset::default())),
        }
    }

    /// Read the record file into a fresh snapshot. Any read or parse failure
    /// degrades to an empty dataset so the service keeps serving.
    pub async fn load_snapshot(path: &Path) -> Arc<Dataset> {
        match Self::read_reports(path).await {
            Ok(reports) => Arc::new(Dataset::from_reports(reports)),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "falling back to empty dataset");
                Arc::new(Dataset::default())
            }
        }
    }

    pub async fn reload(&self, path: &Path) -> usize {
        let next = Self::load_snapshot(path).await;
        let count = next.len();
        *self.active.write().await = next;
        count
    }

    pub async fn snapshot(&self) -> Arc<Dataset> {
        self.active.read().await.clone()
    }

    async fn read_reports(path: &Path) -> Result<Vec<Report>> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .context(format!("Failed to read dataset: {:?}", path))?;
        let reports: Vec<Report> =
            serde_json::from_str(&raw).context("Failed to parse dataset JSON")?;
        Ok(reports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: Option<&str>, description: Option<&str>) -> Report {
        Report {
            id: id.map(String::from),
            description: description.map(String::from),
            ..Report::default()
        }
    }

    #[test]
    fn test_records_without_id_are_skipped() {
        let dataset = Dataset::from_reports(vec![
            doc(Some("R1"), None),
            doc(None, Some("unindexable")),
            doc(Some(""), Some("also unindexable")),
        ]);

        assert_eq!(dataset.len(), 1);
        assert!(dataset.get("R1").is_some());
    }

    #[test]
    fn test_context_prefers_description() {
        let dataset = Dataset::from_reports(vec![doc(Some("R1"), Some("what happened"))]);

        let context = dataset.build_context(&["R1".to_string()]);
        assert!(context.starts_with("DOC ID: R1\n"));
        assert!(context.ends_with("what happened"));
    }

    #[test]
    fn test_context_skips_unknown_ids() {
        let dataset = Dataset::from_reports(vec![doc(Some("R1"), Some("text"))]);

        let context = dataset.build_context(&["nope".to_string(), "R1".to_string()]);
        assert_eq!(context.matches("DOC ID:").count(), 1);
    }

    #[test]
    fn test_context_respects_total_budget() {
        let long = "x".repeat(PER_DOC_CHAR_LIMIT * 2);
        let dataset = Dataset::from_reports(vec![
            doc(Some("R1"), Some(long.as_str())),
            doc(Some("R2"), Some(long.as_str())),
            doc(Some("R3"), Some(long.as_str())),
        ]);

        let ids: Vec<String> = ["R1", "R2", "R3"].iter().map(|s| s.to_string()).collect();
        let context = dataset.build_context(&ids);

        // each section is ~1500 chars once truncated, so only two fit
        assert!(context.len() <= MAX_TOTAL_CHARS + "\n\n---\n\n".len() * 2);
        assert_eq!(context.matches("DOC ID:").count(), 2);
    }

    #[tokio::test]
    async fn test_malformed_dataset_loads_empty() {
        let path = std::env::temp_dir().join(format!("casegraph_bad_{}.json", std::process::id()));
        tokio::fs::write(&path, "{ not json").await.unwrap();

        let snapshot = DatasetStore::load_snapshot(&path).await;
        assert!(snapshot.is_empty());

        tokio::fs::remove_file(&path).await.ok();
    }

    #[tokio::test]
    async fn test_reload_swaps_snapshot() {
        let path = std::env::temp_dir().join(format!("casegraph_ds_{}.json", std::process::id()));
        tokio::fs::write(&path, r#"[{"ID": "R1"}, {"ID": "R2"}]"#)
            .await
            .unwrap();

        let store = DatasetStore::empty();
        assert_eq!(store.snapshot().await.len(), 0);

        let count = store.reload(&path).await;
        assert_eq!(count, 2);
        assert_eq!(store.snapshot().await.len(), 2);

        tokio::fs::remove_file(&path).await.ok();
    }
}
