//! Per-file configuration resolution.

mod model;
mod resolver;

use std::path::Path;
use std::sync::Arc;

pub use model::{ConfigFile, EffectiveConfig, RuleLevel, RuleSetting, environment_globals};
pub use resolver::{CONFIG_FILE_NAME, FileConfigResolver};

use crate::LinterError;

/// Produces the effective configuration for a file.
///
/// Implementations must be deterministic for a fixed filesystem state and
/// safe to share across the worker threads of a run.
pub trait ConfigResolver: Send + Sync {
    /// Returns the merged configuration for the file at `absolute_path`.
    fn get_config(&self, absolute_path: &Path) -> Result<Arc<EffectiveConfig>, LinterError>;

    /// Returns the exclusion patterns for the run, in order.
    fn exclusion_patterns(&self) -> Vec<String>;
}
