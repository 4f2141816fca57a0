//! Built-in text rules.

use super::Rule;
use crate::context::LintContext;

pub struct NoTrailingSpaces;

impl Rule for NoTrailingSpaces {
    fn id(&self) -> &str {
        "no-trailing-spaces"
    }

    fn check(&self, ctx: &mut LintContext<'_>, _options: &serde_json::Value) {
        let lines = ctx.lines().to_vec();
        for (index, line) in lines.iter().enumerate() {
            let trimmed = line.trim_end_matches([' ', '\t']);
            if trimmed.len() != line.len() {
                ctx.report(
                    index + 1,
                    trimmed.chars().count() + 1,
                    "Trailing spaces not allowed.",
                );
            }
        }
    }
}

pub struct NoTabs;

impl Rule for NoTabs {
    fn id(&self) -> &str {
        "no-tabs"
    }

    fn check(&self, ctx: &mut LintContext<'_>, _options: &serde_json::Value) {
        let lines = ctx.lines().to_vec();
        for (index, line) in lines.iter().enumerate() {
            if let Some(pos) = line.find('\t') {
                ctx.report(
                    index + 1,
                    line[..pos].chars().count() + 1,
                    "Unexpected tab character.",
                );
            }
        }
    }
}

pub struct EolLast;

impl Rule for EolLast {
    fn id(&self) -> &str {
        "eol-last"
    }

    fn check(&self, ctx: &mut LintContext<'_>, _options: &serde_json::Value) {
        let source = ctx.source();
        if source.is_empty() || source.ends_with('\n') {
            return;
        }
        let line = ctx.lines().len().max(1);
        let column = ctx.lines().last().map_or(0, |l| l.chars().count()) + 1;
        ctx.report(line, column, "Newline required at end of file but not found.");
    }
}

/// Limits line length; `{ "max": n }`, default 80.
pub struct MaxLen;

impl MaxLen {
    const DEFAULT_MAX: usize = 80;
}

impl Rule for MaxLen {
    fn id(&self) -> &str {
        "max-len"
    }

    fn check(&self, ctx: &mut LintContext<'_>, options: &serde_json::Value) {
        let max = options
            .get("max")
            .and_then(serde_json::Value::as_u64)
            .map_or(Self::DEFAULT_MAX, |m| m as usize);

        let lines = ctx.lines().to_vec();
        for (index, line) in lines.iter().enumerate() {
            if line.chars().count() > max {
                ctx.report(
                    index + 1,
                    max + 1,
                    format!("Line exceeds the maximum line length of {}.", max),
                );
            }
        }
    }
}

/// Flags `/* global */` directives that name an already-declared global.
pub struct NoRedeclareGlobal;

impl Rule for NoRedeclareGlobal {
    fn id(&self) -> &str {
        "no-redeclare-global"
    }

    fn check(&self, ctx: &mut LintContext<'_>, _options: &serde_json::Value) {
        let redeclared: Vec<_> = ctx
            .declarations()
            .iter()
            .filter(|d| d.redeclared)
            .cloned()
            .collect();
        for decl in redeclared {
            ctx.report(
                decl.line,
                decl.column,
                format!("'{}' is already defined as a global.", decl.name),
            );
        }
    }
}
