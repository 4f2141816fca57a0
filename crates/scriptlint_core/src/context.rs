//! Per-file lint context handed to rules.

use crate::message::{LintMessage, Severity};

/// A global declared by a `/* global */` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalDeclaration {
    pub name: String,
    pub line: usize,
    pub column: usize,
    /// Already declared by configuration or an earlier directive.
    pub redeclared: bool,
}

/// Everything a rule may inspect about one file, plus the messages reported
/// so far.
///
/// A context lives for exactly one `verify` call.
pub struct LintContext<'a> {
    source: &'a str,
    lines: Vec<&'a str>,
    declarations: Vec<GlobalDeclaration>,
    current_rule: Option<(String, Severity)>,
    messages: Vec<LintMessage>,
}

impl<'a> LintContext<'a> {
    pub fn new(source: &'a str, declarations: Vec<GlobalDeclaration>) -> Self {
        Self {
            source,
            lines: source.lines().collect(),
            declarations,
            current_rule: None,
            messages: Vec::new(),
        }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Source lines without their terminators.
    pub fn lines(&self) -> &[&'a str] {
        &self.lines
    }

    /// Globals declared by directives in this file, in source order.
    pub fn declarations(&self) -> &[GlobalDeclaration] {
        &self.declarations
    }

    /// Attributes subsequent reports to `rule_id` at `severity`.
    pub(crate) fn begin_rule(&mut self, rule_id: &str, severity: Severity) {
        self.current_rule = Some((rule_id.to_string(), severity));
    }

    /// Reports a finding for the current rule at a 1-based position.
    pub fn report(&mut self, line: usize, column: usize, message: impl Into<String>) {
        let (rule_id, severity) = self
            .current_rule
            .clone()
            .unwrap_or_else(|| (String::new(), Severity::Error));
        self.messages
            .push(LintMessage::new(rule_id, message, severity, line, column));
    }

    /// Pushes a message as-is.
    pub(crate) fn push(&mut self, message: LintMessage) {
        self.messages.push(message);
    }

    /// Consumes the context, returning messages sorted by position.
    pub fn into_messages(mut self) -> Vec<LintMessage> {
        self.messages.sort_by_key(|m| (m.line, m.column));
        self.messages
    }
}
