use std::collections::HashMap;

use ingest::Report;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarEntry {
    pub name: String,
    pub count: usize,
}

/// Top-K frequency tables for the bar chart front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarData {
    pub people: Vec<BarEntry>,
    pub places: Vec<BarEntry>,
}

/// Count every non-empty name occurrence across the record set and keep the
/// `top_k` heaviest per category. Duplicates within one record's list count
/// multiple times. Ties resolve to whichever name was seen first in the
/// input stream.
pub fn aggregate(reports: &[Report], top_k: usize) -> BarData {
    BarData {
        people: top_counts(reports.iter().flat_map(|r| names(&r.persons)), top_k),
        places: top_counts(reports.iter().flat_map(|r| names(&r.places)), top_k),
    }
}

fn names<'a>(field: &'a Option<Vec<String>>) -> impl Iterator<Item = &'a str> {
    field
        .iter()
        .flatten()
        .map(String::as_str)
        .filter(|name| !name.is_empty())
}

fn top_counts<'a>(names: impl Iterator<Item = &'a str>, top_k: usize) -> Vec<BarEntry> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut first_seen: Vec<&str> = Vec::new();

    for name in names {
        let count = counts.entry(name).or_insert(0);
        if *count == 0 {
            first_seen.push(name);
        }
        *count += 1;
    }

    // stable sort over first-seen order makes tie-breaking deterministic
    let mut entries: Vec<BarEntry> = first_seen
        .into_iter()
        .map(|name| BarEntry {
            name: name.to_string(),
            count: counts[name],
        })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries.truncate(top_k);
    entries
}
