//! Lint rules.

mod builtin;
mod pattern;

use std::sync::Arc;

pub use builtin::{EolLast, MaxLen, NoRedeclareGlobal, NoTabs, NoTrailingSpaces};
pub use pattern::PatternRule;

use crate::context::LintContext;

/// A single lint rule.
pub trait Rule: Send + Sync {
    /// The id the rule is configured by.
    fn id(&self) -> &str;

    /// Inspects the file and reports through `ctx`.
    fn check(&self, ctx: &mut LintContext<'_>, options: &serde_json::Value);
}

/// Returns the rules that ship with the linter.
pub fn builtin_rules() -> Vec<Arc<dyn Rule>> {
    vec![
        Arc::new(EolLast),
        Arc::new(MaxLen),
        Arc::new(NoRedeclareGlobal),
        Arc::new(NoTabs),
        Arc::new(NoTrailingSpaces),
    ]
}
