//! Custom rules defined by a regular expression.

use std::fs;
use std::path::Path;

use regex::Regex;
use serde::Deserialize;

use super::Rule;
use crate::LinterError;
use crate::context::LintContext;

/// On-disk form of a pattern rule.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PatternRuleFile {
    id: String,
    pattern: String,
    message: String,
}

/// Reports every line that matches `pattern`, at the first match.
#[derive(Debug)]
pub struct PatternRule {
    id: String,
    pattern: Regex,
    message: String,
}

impl PatternRule {
    pub fn new(
        id: impl Into<String>,
        pattern: &str,
        message: impl Into<String>,
    ) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("rule id must not be empty".to_string());
        }
        let pattern = Regex::new(pattern).map_err(|e| format!("invalid pattern: {}", e))?;
        Ok(Self {
            id,
            pattern,
            message: message.into(),
        })
    }

    /// Loads a rule definition file.
    pub fn from_file(path: &Path) -> Result<Self, LinterError> {
        let content = fs::read_to_string(path)
            .map_err(|e| LinterError::rule_load(path, e.to_string()))?;
        let file: PatternRuleFile = serde_json::from_str(&content)
            .map_err(|e| LinterError::rule_load(path, format!("invalid rule definition: {}", e)))?;
        Self::new(file.id, &file.pattern, file.message)
            .map_err(|e| LinterError::rule_load(path, e))
    }
}

impl Rule for PatternRule {
    fn id(&self) -> &str {
        &self.id
    }

    fn check(&self, ctx: &mut LintContext<'_>, _options: &serde_json::Value) {
        let lines = ctx.lines().to_vec();
        for (index, line) in lines.iter().enumerate() {
            if let Some(found) = self.pattern.find(line) {
                let column = line[..found.start()].chars().count() + 1;
                ctx.report(index + 1, column, self.message.clone());
            }
        }
    }
}
