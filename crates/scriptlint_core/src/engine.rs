//! The engine facade: one configured linter, many runs.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use crate::config::{ConfigResolver, FileConfigResolver};
use crate::exclusion::ExclusionSet;
use crate::message::{LintMessage, LintResult, RunReport};
use crate::options::RunOptions;
use crate::registry::RuleRegistry;
use crate::traversal;
use crate::verifier::{Linter, Verifier};
use crate::walker::{FileWalker, WalkConfig};
use crate::LinterError;

/// Lints files according to one set of [`RunOptions`].
///
/// Custom rule directories are loaded once, at construction. Each call to
/// [`execute_on_files`](Self::execute_on_files) is an independent run.
pub struct Engine {
    options: RunOptions,
    registry: Arc<RuleRegistry>,
    resolver: FileConfigResolver,
    exclusions: ExclusionSet,
    walker: FileWalker,
}

impl Engine {
    /// Creates an engine with its own rule registry.
    ///
    /// Fails if any directory in `rule_paths` cannot be loaded.
    pub fn new(options: RunOptions) -> Result<Self, LinterError> {
        Self::with_registry(options, Arc::new(RuleRegistry::with_builtins()))
    }

    /// Creates an engine on a shared rule registry.
    ///
    /// Rules loaded here become visible to every engine sharing `registry`.
    pub fn with_registry(
        options: RunOptions,
        registry: Arc<RuleRegistry>,
    ) -> Result<Self, LinterError> {
        for dir in &options.rule_paths {
            registry.load(&options.resolve(dir))?;
        }

        let base_dir = options.base_dir();
        let resolver = FileConfigResolver::new(&options);
        let exclusions = ExclusionSet::new(resolver.exclusion_patterns()).with_base_dir(&base_dir);
        debug!("Exclusion patterns: {:?}", exclusions.patterns());

        let walker = FileWalker::new(&base_dir, WalkConfig::default());

        Ok(Self {
            options,
            registry,
            resolver,
            exclusions,
            walker,
        })
    }

    /// Replaces how directories are expanded. Hidden entries are skipped
    /// and symbolic links are not followed unless `config` says otherwise.
    pub fn with_walk_config(mut self, config: WalkConfig) -> Self {
        self.walker = FileWalker::new(self.options.base_dir(), config);
        self
    }

    pub fn options(&self) -> &RunOptions {
        &self.options
    }

    pub fn registry(&self) -> &Arc<RuleRegistry> {
        &self.registry
    }

    /// Lints the given files and directories.
    pub fn execute_on_files(&self, paths: &[String]) -> RunReport {
        info!("Linting {} path(s)", paths.len());
        let results = traversal::run(
            paths,
            &self.options,
            &self.exclusions,
            &self.walker,
            &self.resolver,
            || Linter::new(Arc::clone(&self.registry)),
        );
        RunReport::new(results)
    }

    /// Lints in-memory source as if it were the file `file_name`.
    ///
    /// Configuration is resolved for `file_name` relative to the base
    /// directory; exclusion patterns do not apply.
    pub fn execute_on_text(&self, text: &str, file_name: &str) -> RunReport {
        let absolute = self.options.resolve(file_name);
        let messages = match self.resolver.get_config(&absolute) {
            Ok(config) => {
                let mut linter = Linter::new(Arc::clone(&self.registry));
                linter.verify(text, &config, file_name)
            }
            Err(e) => vec![LintMessage::fatal(e.to_string())],
        };
        RunReport::new(vec![LintResult::new(file_name, messages)])
    }

    /// Returns true if `path` would be excluded by this engine's patterns.
    pub fn is_path_ignored(&self, path: impl AsRef<Path>) -> bool {
        self.options.ignore && self.exclusions.is_excluded(&path.as_ref().to_string_lossy())
    }
}
