//! Lint messages, per-file results and the run report.

use serde::{Deserialize, Serialize};

/// Severity level for messages.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Warning - should be reviewed.
    Warning,
    /// Error - must be fixed.
    #[default]
    Error,
}

/// A single message about one file.
///
/// A fatal message means the file could not be analyzed at all (missing,
/// unreadable, unparsable) as opposed to a finding inside analyzed content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LintMessage {
    /// Whether the file could not be processed.
    #[serde(default)]
    pub fatal: bool,

    /// Human-readable message.
    pub message: String,

    /// Severity level.
    #[serde(default)]
    pub severity: Severity,

    /// The rule that produced this message, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<String>,

    /// 1-based line number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,

    /// 1-based column number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
}

impl LintMessage {
    /// Creates a rule finding at the given location.
    pub fn new(
        rule_id: impl Into<String>,
        message: impl Into<String>,
        severity: Severity,
        line: usize,
        column: usize,
    ) -> Self {
        Self {
            fatal: false,
            message: message.into(),
            severity,
            rule_id: Some(rule_id.into()),
            line: Some(line),
            column: Some(column),
        }
    }

    /// Creates a fatal message with no location.
    pub fn fatal(message: impl Into<String>) -> Self {
        Self {
            fatal: true,
            message: message.into(),
            severity: Severity::Error,
            rule_id: None,
            line: None,
            column: None,
        }
    }

    /// Creates a non-fatal warning with no location and no rule.
    pub fn advisory(message: impl Into<String>) -> Self {
        Self {
            fatal: false,
            message: message.into(),
            severity: Severity::Warning,
            rule_id: None,
            line: None,
            column: None,
        }
    }

    /// Sets the location.
    pub fn at(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }
}

/// Result of linting a single file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LintResult {
    /// The path exactly as it was requested or discovered.
    pub file_path: String,

    /// Messages in report order.
    pub messages: Vec<LintMessage>,
}

impl LintResult {
    pub fn new(file_path: impl Into<String>, messages: Vec<LintMessage>) -> Self {
        Self {
            file_path: file_path.into(),
            messages,
        }
    }

    /// Returns the number of error-level messages.
    pub fn error_count(&self) -> usize {
        self.messages
            .iter()
            .filter(|m| m.severity == Severity::Error)
            .count()
    }

    /// Returns the number of warning-level messages.
    pub fn warning_count(&self) -> usize {
        self.messages
            .iter()
            .filter(|m| m.severity == Severity::Warning)
            .count()
    }

    /// Returns true if the file could not be analyzed.
    pub fn has_fatal(&self) -> bool {
        self.messages.iter().any(|m| m.fatal)
    }
}

/// The output of one run: results in traversal order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub results: Vec<LintResult>,
}

impl RunReport {
    pub fn new(results: Vec<LintResult>) -> Self {
        Self { results }
    }

    pub fn error_count(&self) -> usize {
        self.results.iter().map(LintResult::error_count).sum()
    }

    pub fn warning_count(&self) -> usize {
        self.results.iter().map(LintResult::warning_count).sum()
    }
}
