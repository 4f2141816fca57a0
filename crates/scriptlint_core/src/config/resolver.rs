//! Configuration resolution from `.scriptlintrc.json` files and run options.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;
use tracing::{debug, warn};

use super::{ConfigFile, ConfigResolver, EffectiveConfig};
use crate::exclusion::{DEFAULT_PATTERNS, ExclusionSet, IGNORE_FILE_NAME};
use crate::{LinterError, RunOptions};

/// Name of the per-directory configuration file.
pub const CONFIG_FILE_NAME: &str = ".scriptlintrc.json";

/// Config files that apply to a directory, outermost first.
type ConfigChain = Arc<Vec<Arc<ConfigFile>>>;

/// Resolves configuration by merging, in order: built-in defaults, the
/// project config files from the outermost ancestor down to the file's own
/// directory, the explicit config file and finally the run overrides.
pub struct FileConfigResolver {
    options: RunOptions,
    base: EffectiveConfig,
    overrides: ConfigFile,
    explicit: OnceLock<Result<Arc<ConfigFile>, String>>,
    chains: RwLock<HashMap<PathBuf, ConfigChain>>,
}

impl FileConfigResolver {
    pub fn new(options: &RunOptions) -> Self {
        let base = if options.use_default_config {
            EffectiveConfig::defaults()
        } else {
            EffectiveConfig::default()
        };

        let overrides = ConfigFile {
            root: false,
            env: options.envs.iter().map(|e| (e.clone(), true)).collect(),
            globals: options.globals.iter().map(|g| (g.clone(), true)).collect(),
            rules: options.rules.clone(),
        };

        Self {
            options: options.clone(),
            base,
            overrides,
            explicit: OnceLock::new(),
            chains: RwLock::new(HashMap::new()),
        }
    }

    /// Loads the explicit config file once; later calls reuse the outcome.
    fn explicit_config(&self) -> Result<Option<Arc<ConfigFile>>, LinterError> {
        let Some(path) = &self.options.config_file else {
            return Ok(None);
        };

        self.explicit
            .get_or_init(|| {
                ConfigFile::from_file(&self.options.resolve(path))
                    .map(Arc::new)
                    .map_err(|e| e.to_string())
            })
            .clone()
            .map(Some)
            .map_err(LinterError::config)
    }

    /// Returns the config files applying to `dir`, caching per directory.
    fn chain_for(&self, dir: &Path) -> Result<ConfigChain, LinterError> {
        if let Some(chain) = self.chains.read().get(dir) {
            return Ok(Arc::clone(chain));
        }

        let candidate = dir.join(CONFIG_FILE_NAME);
        let local = if candidate.is_file() {
            Some(Arc::new(ConfigFile::from_file(&candidate)?))
        } else {
            None
        };

        let is_root = local.as_ref().is_some_and(|file| file.root);
        let chain: ConfigChain = match dir.parent() {
            Some(parent) if !is_root => {
                let mut files = self.chain_for(parent)?.as_ref().clone();
                files.extend(local);
                Arc::new(files)
            }
            _ => Arc::new(local.into_iter().collect()),
        };

        debug!(
            "Resolved {} config file(s) for {}",
            chain.len(),
            dir.display()
        );

        let mut chains = self.chains.write();
        Ok(Arc::clone(
            chains.entry(dir.to_path_buf()).or_insert(chain),
        ))
    }
}

impl ConfigResolver for FileConfigResolver {
    fn get_config(&self, absolute_path: &Path) -> Result<Arc<EffectiveConfig>, LinterError> {
        let mut config = self.base.clone();

        if self.options.use_project_config
            && let Some(dir) = absolute_path.parent()
        {
            for file in self.chain_for(dir)?.iter() {
                config.apply(file);
            }
        }

        if let Some(explicit) = self.explicit_config()? {
            config.apply(&explicit);
        }

        config.apply(&self.overrides);
        Ok(Arc::new(config))
    }

    fn exclusion_patterns(&self) -> Vec<String> {
        if !self.options.ignore {
            return Vec::new();
        }

        let mut patterns: Vec<String> = DEFAULT_PATTERNS.iter().map(|p| p.to_string()).collect();

        let ignore_file = match &self.options.ignore_path {
            Some(path) => Some(self.options.resolve(path)),
            None => {
                let default = self.options.base_dir().join(IGNORE_FILE_NAME);
                default.is_file().then_some(default)
            }
        };

        if let Some(path) = ignore_file {
            match ExclusionSet::read_ignore_file(&path) {
                Ok(read) => {
                    debug!("Read {} pattern(s) from {}", read.len(), path.display());
                    patterns.extend(read);
                }
                Err(e) => warn!("{}", e),
            }
        }

        patterns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RuleLevel, RuleSetting};
    use std::fs;
    use tempfile::tempdir;

    fn write(path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_defaults_only() {
        let dir = tempdir().unwrap();
        let options = RunOptions::new().cwd(dir.path()).use_project_config(false);
        let resolver = FileConfigResolver::new(&options);

        let config = resolver.get_config(&dir.path().join("a.js")).unwrap();
        assert_eq!(*config, EffectiveConfig::defaults());
    }

    #[test]
    fn test_no_default_config() {
        let dir = tempdir().unwrap();
        let options = RunOptions::new()
            .cwd(dir.path())
            .use_default_config(false)
            .use_project_config(false);
        let resolver = FileConfigResolver::new(&options);

        let config = resolver.get_config(&dir.path().join("a.js")).unwrap();
        assert!(config.rules.is_empty());
    }

    #[test]
    fn test_nearer_config_overrides_outer() {
        let dir = tempdir().unwrap();
        write(
            &dir.path().join(CONFIG_FILE_NAME),
            r#"{ "rules": { "no-tabs": "error", "max-len": "warn" }, "env": { "node": true } }"#,
        );
        write(
            &dir.path().join("lib").join(CONFIG_FILE_NAME),
            r#"{ "rules": { "no-tabs": "off" }, "globals": { "app": true } }"#,
        );

        let options = RunOptions::new().cwd(dir.path()).use_default_config(false);
        let resolver = FileConfigResolver::new(&options);

        let inner = resolver
            .get_config(&dir.path().join("lib").join("a.js"))
            .unwrap();
        assert_eq!(inner.rules["no-tabs"].level, RuleLevel::Off);
        assert_eq!(inner.rules["max-len"].level, RuleLevel::Warn);
        assert!(inner.envs.contains("node"));
        assert!(inner.globals.contains("app"));

        let outer = resolver.get_config(&dir.path().join("b.js")).unwrap();
        assert_eq!(outer.rules["no-tabs"].level, RuleLevel::Error);
        assert!(!outer.globals.contains("app"));
    }

    #[test]
    fn test_root_config_stops_lookup() {
        let dir = tempdir().unwrap();
        write(
            &dir.path().join(CONFIG_FILE_NAME),
            r#"{ "rules": { "max-len": "error" } }"#,
        );
        write(
            &dir.path().join("pkg").join(CONFIG_FILE_NAME),
            r#"{ "root": true, "rules": { "no-tabs": "warn" } }"#,
        );

        let options = RunOptions::new().cwd(dir.path()).use_default_config(false);
        let resolver = FileConfigResolver::new(&options);

        let config = resolver
            .get_config(&dir.path().join("pkg").join("a.js"))
            .unwrap();
        assert!(config.rules.contains_key("no-tabs"));
        assert!(!config.rules.contains_key("max-len"));
    }

    #[test]
    fn test_project_config_disabled() {
        let dir = tempdir().unwrap();
        write(
            &dir.path().join(CONFIG_FILE_NAME),
            r#"{ "rules": { "max-len": "error" } }"#,
        );

        let options = RunOptions::new()
            .cwd(dir.path())
            .use_default_config(false)
            .use_project_config(false);
        let resolver = FileConfigResolver::new(&options);

        let config = resolver.get_config(&dir.path().join("a.js")).unwrap();
        assert!(config.rules.is_empty());
    }

    #[test]
    fn test_explicit_config_and_overrides_order() {
        let dir = tempdir().unwrap();
        write(
            &dir.path().join(CONFIG_FILE_NAME),
            r#"{ "rules": { "no-tabs": "warn", "max-len": "warn" } }"#,
        );
        write(
            &dir.path().join("conf").join("strict.json"),
            r#"{ "rules": { "no-tabs": "error", "max-len": "error" } }"#,
        );

        let options = RunOptions::new()
            .cwd(dir.path())
            .use_default_config(false)
            .config_file("conf/strict.json")
            .rule("max-len", RuleSetting::new(RuleLevel::Off))
            .env("browser")
            .global("jQuery");
        let resolver = FileConfigResolver::new(&options);

        let config = resolver.get_config(&dir.path().join("a.js")).unwrap();
        assert_eq!(config.rules["no-tabs"].level, RuleLevel::Error);
        assert_eq!(config.rules["max-len"].level, RuleLevel::Off);
        assert!(config.envs.contains("browser"));
        assert!(config.globals.contains("jQuery"));
    }

    #[test]
    fn test_missing_explicit_config_is_error() {
        let dir = tempdir().unwrap();
        let options = RunOptions::new()
            .cwd(dir.path())
            .config_file("missing.json");
        let resolver = FileConfigResolver::new(&options);

        let first = resolver.get_config(&dir.path().join("a.js"));
        let second = resolver.get_config(&dir.path().join("b.js"));
        assert!(matches!(first, Err(LinterError::Config(_))));
        assert!(matches!(second, Err(LinterError::Config(_))));
    }

    #[test]
    fn test_invalid_project_config_is_error() {
        let dir = tempdir().unwrap();
        write(&dir.path().join(CONFIG_FILE_NAME), "{ rules: ");

        let options = RunOptions::new().cwd(dir.path());
        let resolver = FileConfigResolver::new(&options);

        assert!(resolver.get_config(&dir.path().join("a.js")).is_err());
    }

    #[test]
    fn test_chain_is_cached_per_directory() {
        let dir = tempdir().unwrap();
        write(
            &dir.path().join(CONFIG_FILE_NAME),
            r#"{ "rules": { "no-tabs": "warn" } }"#,
        );

        let options = RunOptions::new().cwd(dir.path()).use_default_config(false);
        let resolver = FileConfigResolver::new(&options);

        let before = resolver.get_config(&dir.path().join("a.js")).unwrap();
        // Cached chains survive on-disk edits for the resolver's lifetime.
        write(
            &dir.path().join(CONFIG_FILE_NAME),
            r#"{ "rules": { "no-tabs": "error" } }"#,
        );
        let after = resolver.get_config(&dir.path().join("b.js")).unwrap();

        assert_eq!(before, after);
        assert!(resolver.chains.read().contains_key(dir.path()));
    }

    #[test]
    fn test_exclusion_patterns_from_default_ignore_file() {
        let dir = tempdir().unwrap();
        write(&dir.path().join(IGNORE_FILE_NAME), "build/**\n# c\n");

        let options = RunOptions::new().cwd(dir.path());
        let resolver = FileConfigResolver::new(&options);

        assert_eq!(
            resolver.exclusion_patterns(),
            vec!["**/node_modules/**".to_string(), "build/**".to_string()]
        );
    }

    #[test]
    fn test_exclusion_patterns_explicit_ignore_path() {
        let dir = tempdir().unwrap();
        write(&dir.path().join("custom.ignore"), "dist/**\n");
        write(&dir.path().join(IGNORE_FILE_NAME), "build/**\n");

        let options = RunOptions::new()
            .cwd(dir.path())
            .ignore_path("custom.ignore");
        let resolver = FileConfigResolver::new(&options);

        let patterns = resolver.exclusion_patterns();
        assert!(patterns.contains(&"dist/**".to_string()));
        assert!(!patterns.contains(&"build/**".to_string()));
    }

    #[test]
    fn test_exclusion_patterns_missing_ignore_path_falls_back() {
        let dir = tempdir().unwrap();
        let options = RunOptions::new().cwd(dir.path()).ignore_path("nope");
        let resolver = FileConfigResolver::new(&options);

        assert_eq!(
            resolver.exclusion_patterns(),
            vec!["**/node_modules/**".to_string()]
        );
    }

    #[test]
    fn test_exclusion_patterns_disabled() {
        let dir = tempdir().unwrap();
        write(&dir.path().join(IGNORE_FILE_NAME), "build/**\n");

        let options = RunOptions::new().cwd(dir.path()).ignore(false);
        let resolver = FileConfigResolver::new(&options);

        assert!(resolver.exclusion_patterns().is_empty());
    }
}
