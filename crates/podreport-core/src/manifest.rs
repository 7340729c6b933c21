use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::PodReportError;

/// Name of the manifest that lists the available reports, newest first.
pub const MANIFEST_FILE: &str = "index_data.json";
pub const REPORT_PREFIX: &str = "report-";
pub const REPORT_SUFFIX: &str = ".json";

/// Ordered list of report filenames as published in the manifest.
///
/// The first entry is treated as the latest report. Nothing here checks that
/// the producer actually wrote the list in that order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportIndex {
    pub files: Vec<String>,
}

/// A selectable entry: the filename to fetch plus its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportOption {
    pub value: String,
    pub label: String,
}

impl ReportIndex {
    pub fn new(files: Vec<String>) -> Self {
        Self { files }
    }

    /// Interprets an already parsed JSON document as a manifest.
    pub fn from_value(value: Value) -> Result<Self, PodReportError> {
        let Value::Array(entries) = value else {
            return Err(PodReportError::InvalidIndex(format!(
                "expected an array of filenames, found {}",
                json_kind(&value)
            )));
        };
        let mut files = Vec::with_capacity(entries.len());
        for (position, entry) in entries.into_iter().enumerate() {
            match entry {
                Value::String(file) => files.push(file),
                other => {
                    return Err(PodReportError::InvalidIndex(format!(
                        "entry {position} is {}, not a filename",
                        json_kind(&other)
                    )))
                }
            }
        }
        Ok(Self { files })
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn latest(&self) -> Option<&str> {
        self.files.first().map(String::as_str)
    }

    pub fn options(&self) -> Vec<ReportOption> {
        self.files.iter().map(|file| ReportOption::for_file(file)).collect()
    }
}

impl ReportOption {
    pub fn for_file(file: &str) -> Self {
        Self {
            value: file.to_string(),
            label: report_label(file).to_string(),
        }
    }
}

/// Display label for a report filename: `report-` and `.json` removed.
///
/// Only affects what the user sees; the filename is fetched verbatim.
pub fn report_label(filename: &str) -> &str {
    let label = filename.strip_prefix(REPORT_PREFIX).unwrap_or(filename);
    label.strip_suffix(REPORT_SUFFIX).unwrap_or(label)
}

pub fn is_report_file(name: &str) -> bool {
    name.starts_with(REPORT_PREFIX) && name.ends_with(REPORT_SUFFIX) && name != MANIFEST_FILE
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
