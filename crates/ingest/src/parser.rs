use regex::Regex;

use crate::record::Report;

/// A line whose trimmed content is exactly this token starts a new record.
const SENTINEL: &str = "REPORT";

/// Recognized header lines. Anchored against the raw line, so indented text
/// that happens to look like a header stays description continuation.
const HEADER_PATTERN: &str = r"^(ID|REPORTDATE|REFERENCEID|REPORTSOURCE|REPORTDESCRIPTION|PERSONS|DATES|PLACES|ORGANIZATIONS):\s*(.*)$";

/// Parser state. Description collection is a distinct state, not a check on
/// buffer contents: a bare `REPORTDESCRIPTION:` header leaves an active empty
/// buffer, and a continuation line after it becomes the whole description.
enum State {
    Fields,
    Description(Vec<String>),
}

pub struct ReportParser {
    header_re: Regex,
}

impl ReportParser {
    pub fn new() -> Self {
        Self {
            header_re: Regex::new(HEADER_PATTERN).unwrap(),
        }
    }

    /// Parse a whole dataset text into records, in source order.
    ///
    /// Blank lines are skipped everywhere. Lines before the first `REPORT`
    /// sentinel have no record to attach to and are dropped; so is any
    /// unrecognized line outside description collection.
    pub fn parse(&self, text: &str) -> Vec<Report> {
        let mut reports = Vec::new();
        let mut current: Option<Report> = None;
        let mut state = State::Fields;

        for line in text.lines() {
            if line.trim().is_empty() {
                continue;
            }

            if line.trim() == SENTINEL {
                if let Some(mut report) = current.take() {
                    flush_description(&mut report, &mut state);
                    reports.push(report);
                }
                state = State::Fields;
                current = Some(Report::default());
                continue;
            }

            let Some(report) = current.as_mut() else {
                continue;
            };

            if let Some(caps) = self.header_re.captures(line) {
                let key = caps.get(1).map_or("", |m| m.as_str());
                let value = caps.get(2).map_or("", |m| m.as_str());

                // a new header always commits the pending description before
                // its own logic runs; a repeated REPORTDESCRIPTION instead
                // replaces the uncommitted buffer
                if key != "REPORTDESCRIPTION" {
                    flush_description(report, &mut state);
                }

                match key {
                    "REPORTDESCRIPTION" => {
                        let mut buffer = Vec::new();
                        if !value.is_empty() {
                            buffer.push(value.to_string());
                        }
                        state = State::Description(buffer);
                    }
                    "PERSONS" => report.persons = Some(split_list(value)),
                    "DATES" => report.dates = Some(split_list(value)),
                    "ORGANIZATIONS" => report.organizations = Some(split_list(value)),
                    "PLACES" => report.places = Some(split_places(value)),
                    "ID" => report.id = Some(value.trim().to_string()),
                    "REPORTDATE" => report.report_date = Some(value.trim().to_string()),
                    "REFERENCEID" => report.reference_id = Some(value.trim().to_string()),
                    "REPORTSOURCE" => report.report_source = Some(value.trim().to_string()),
                    _ => {}
                }
            } else if let State::Description(buffer) = &mut state {
                buffer.push(line.trim().to_string());
            }
        }

        if let Some(mut report) = current.take() {
            flush_description(&mut report, &mut state);
            reports.push(report);
        }

        reports
    }
}

/// Commit an active description buffer into the record: fragments joined by
/// single spaces, trimmed. An active-but-empty buffer commits as the empty
/// string, since the header was explicitly present. Leaves the parser in
/// field-collection state.
fn flush_description(report: &mut Report, state: &mut State) {
    if let State::Description(buffer) = std::mem::replace(state, State::Fields) {
        report.description = Some(buffer.join(" ").trim().to_string());
    }
}

/// Split a list value on `;`, trimming pieces and dropping empty ones.
/// An empty value yields an empty list, not an absent field.
fn split_list(value: &str) -> Vec<String> {
    value
        .split(';')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(String::from)
        .collect()
}

/// Place values additionally split each `;`-piece on `/` and rejoin the
/// non-empty sub-components with ", ": one label per original piece, never
/// multiple entries.
fn split_places(value: &str) -> Vec<String> {
    value
        .split(';')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(|piece| {
            piece
                .split('/')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join(", ")
        })
        .collect()
}
