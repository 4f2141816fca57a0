//! Verification engine.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::debug;

use crate::config::{EffectiveConfig, RuleLevel};
use crate::context::{GlobalDeclaration, LintContext};
use crate::message::{LintMessage, Severity};
use crate::registry::RuleRegistry;
use crate::source::{block_comments, global_directives};

/// Produces messages for one file's source text.
///
/// A verifier may carry state from one file to the next; callers reset it
/// before each file. One instance is never used by two threads at once.
pub trait Verifier: Send {
    /// Clears any state carried over from previously verified files.
    fn reset(&mut self);

    /// Lints `source` under `config`, reporting it as `display_name`.
    fn verify(
        &mut self,
        source: &str,
        config: &EffectiveConfig,
        display_name: &str,
    ) -> Vec<LintMessage>;
}

/// The default verifier, running rules from a [`RuleRegistry`].
///
/// Globals declared by `/* global */` directives accumulate across
/// [`verify`](Verifier::verify) calls until [`reset`](Verifier::reset).
pub struct Linter {
    registry: Arc<RuleRegistry>,
    declared: BTreeSet<String>,
}

impl Linter {
    pub fn new(registry: Arc<RuleRegistry>) -> Self {
        Self {
            registry,
            declared: BTreeSet::new(),
        }
    }

    /// Globals declared by directives since the last reset.
    pub fn declared_globals(&self) -> &BTreeSet<String> {
        &self.declared
    }
}

impl Verifier for Linter {
    fn reset(&mut self) {
        self.declared.clear();
    }

    fn verify(
        &mut self,
        source: &str,
        config: &EffectiveConfig,
        display_name: &str,
    ) -> Vec<LintMessage> {
        let comments = match block_comments(source) {
            Ok(comments) => comments,
            Err(e) => {
                debug!("Parsing {} failed: {}", display_name, e.message);
                return vec![
                    LintMessage::fatal(format!("Parsing error: {}", e.message)).at(e.line, e.column),
                ];
            }
        };

        let config_globals = config.declared_globals();
        let mut declarations = Vec::new();
        for directive in global_directives(&comments) {
            for name in directive.names {
                let redeclared =
                    config_globals.contains(&name) || !self.declared.insert(name.clone());
                declarations.push(GlobalDeclaration {
                    name,
                    line: directive.line,
                    column: directive.column,
                    redeclared,
                });
            }
        }

        let mut ctx = LintContext::new(source, declarations);

        for (rule_id, setting) in config.enabled_rules() {
            let severity = match setting.level {
                RuleLevel::Warn => Severity::Warning,
                _ => Severity::Error,
            };

            match self.registry.get(rule_id) {
                Some(rule) => {
                    ctx.begin_rule(rule_id, severity);
                    rule.check(&mut ctx, &setting.options);
                }
                None => ctx.push(LintMessage::new(
                    rule_id,
                    format!("Definition for rule '{}' was not found.", rule_id),
                    severity,
                    1,
                    1,
                )),
            }
        }

        ctx.into_messages()
    }
}
