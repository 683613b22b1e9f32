//! Model of the JSON report pyright prints with `--outputjson`.
//!
//! Parsing is permissive: missing fields fall back to zero or empty values,
//! unknown fields are ignored. Only text that is not a JSON object at all is
//! rejected.

use crate::error::{Result, TypingError};
use serde::{Deserialize, Serialize};

/// Rule identifier used when a diagnostic carries none.
pub const UNKNOWN_RULE: &str = "unknown";
/// File path used when a diagnostic carries none.
pub const UNKNOWN_FILE: &str = "unknown";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Information,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Diagnostic {
    #[serde(default)]
    pub severity: Severity,
    #[serde(default)]
    pub rule: Option<String>,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub message: String,
}

impl Diagnostic {
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn rule_or_unknown(&self) -> &str {
        self.rule.as_deref().unwrap_or(UNKNOWN_RULE)
    }

    pub fn file_or_unknown(&self) -> &str {
        self.file.as_deref().unwrap_or(UNKNOWN_FILE)
    }
}

/// Totals reported by the checker itself.
///
/// These are authoritative for the headline counts even when they disagree
/// with the number of error entries in `generalDiagnostics`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    #[serde(default)]
    pub error_count: usize,
    #[serde(default)]
    pub warning_count: usize,
    #[serde(default)]
    pub information_count: usize,
    #[serde(default)]
    pub files_analyzed: Option<usize>,
    #[serde(default)]
    pub time_in_sec: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    #[serde(default)]
    pub general_diagnostics: Vec<Diagnostic>,
    #[serde(default)]
    pub summary: Summary,
}

impl Report {
    /// Parse checker stdout into a report.
    pub fn from_json(text: &str) -> Result<Report> {
        let value: serde_json::Value = serde_json::from_str(text.trim())
            .map_err(|e| TypingError::InvalidReport(e.to_string()))?;
        if !value.is_object() {
            return Err(TypingError::InvalidReport(
                "expected a JSON object at the top level".into(),
            ));
        }
        serde_json::from_value(value).map_err(|e| TypingError::InvalidReport(e.to_string()))
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.general_diagnostics.iter().filter(|d| d.is_error())
    }
}

/// Summary fields that only appear in `--json` output.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunStats {
    pub information_count: usize,
    pub files_analyzed: Option<usize>,
    pub time_in_sec: Option<f64>,
}

impl From<&Summary> for RunStats {
    fn from(summary: &Summary) -> Self {
        Self {
            information_count: summary.information_count,
            files_analyzed: summary.files_analyzed,
            time_in_sec: summary.time_in_sec,
        }
    }
}
