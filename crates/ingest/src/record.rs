use serde::{Deserialize, Serialize};

/// One parsed investigative report. Field names mirror the wire format the
/// visualization and the ask service consume; fields the source text never
/// set stay absent keys rather than nulls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    #[serde(rename = "ID", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "REPORTDATE", skip_serializing_if = "Option::is_none")]
    pub report_date: Option<String>,

    #[serde(rename = "REFERENCEID", skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<String>,

    #[serde(rename = "REPORTSOURCE", skip_serializing_if = "Option::is_none")]
    pub report_source: Option<String>,

    #[serde(rename = "REPORTDESCRIPTION", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "PERSONS", skip_serializing_if = "Option::is_none")]
    pub persons: Option<Vec<String>>,

    #[serde(rename = "DATES", skip_serializing_if = "Option::is_none")]
    pub dates: Option<Vec<String>>,

    #[serde(rename = "PLACES", skip_serializing_if = "Option::is_none")]
    pub places: Option<Vec<String>>,

    #[serde(rename = "ORGANIZATIONS", skip_serializing_if = "Option::is_none")]
    pub organizations: Option<Vec<String>>,
}

impl Report {
    /// Report ID usable for attribution. An empty string counts as absent.
    pub fn doc_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }
}
