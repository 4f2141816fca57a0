//! Rule registry.
//!
//! Holds the built-in rules and any custom rules loaded from rule
//! directories. A registry is shared through an `Arc`: engines that share one
//! also share every rule any of them loaded.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::LinterError;
use crate::rules::{PatternRule, Rule, builtin_rules};

/// Extension of custom rule definition files.
pub const RULE_FILE_EXTENSION: &str = "json";

pub struct RuleRegistry {
    rules: RwLock<BTreeMap<String, Arc<dyn Rule>>>,
    loaded_dirs: RwLock<HashSet<PathBuf>>,
}

impl RuleRegistry {
    /// Creates a registry with no rules.
    pub fn empty() -> Self {
        Self {
            rules: RwLock::new(BTreeMap::new()),
            loaded_dirs: RwLock::new(HashSet::new()),
        }
    }

    /// Creates a registry holding the built-in rules.
    pub fn with_builtins() -> Self {
        let registry = Self::empty();
        for rule in builtin_rules() {
            registry.register(rule);
        }
        registry
    }

    /// Registers a rule, replacing any rule with the same id.
    pub fn register(&self, rule: Arc<dyn Rule>) {
        let id = rule.id().to_string();
        if self.rules.write().insert(id.clone(), rule).is_some() {
            warn!("Rule '{}' was redefined", id);
        }
    }

    /// Loads every `*.json` rule definition in `dir`, returning how many
    /// rules were registered.
    ///
    /// Fails if the directory does not exist or any definition is invalid;
    /// in that case no rule from the directory is registered. Loading a
    /// directory a second time is a no-op that returns 0.
    pub fn load(&self, dir: &Path) -> Result<usize, LinterError> {
        let canonical = dir
            .canonicalize()
            .map_err(|e| LinterError::rule_load(dir, e.to_string()))?;
        if !canonical.is_dir() {
            return Err(LinterError::rule_load(dir, "not a directory"));
        }

        if self.loaded_dirs.read().contains(&canonical) {
            debug!("Rules from {} already loaded", canonical.display());
            return Ok(0);
        }

        let mut files: Vec<PathBuf> = fs::read_dir(&canonical)
            .map_err(|e| LinterError::rule_load(dir, e.to_string()))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.is_file()
                    && path.extension().and_then(|e| e.to_str()) == Some(RULE_FILE_EXTENSION)
            })
            .collect();
        files.sort();

        let rules = files
            .iter()
            .map(|path| PatternRule::from_file(path))
            .collect::<Result<Vec<_>, _>>()?;

        // Another loader may have finished the same directory meanwhile.
        let mut loaded_dirs = self.loaded_dirs.write();
        if !loaded_dirs.insert(canonical) {
            debug!("Rules from {} loaded concurrently", dir.display());
            return Ok(0);
        }

        let count = rules.len();
        for rule in rules {
            self.register(Arc::new(rule));
        }
        drop(loaded_dirs);

        info!("Loaded {} rule(s) from {}", count, dir.display());
        Ok(count)
    }

    pub fn get(&self, id: &str) -> Option<Arc<dyn Rule>> {
        self.rules.read().get(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.rules.read().contains_key(id)
    }

    /// Registered rule ids in sorted order.
    pub fn rule_ids(&self) -> Vec<String> {
        self.rules.read().keys().cloned().collect()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &self.rule_ids())
            .finish()
    }
}
