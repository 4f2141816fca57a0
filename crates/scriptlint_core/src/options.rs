//! Options for one engine instance.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use serde::Deserialize;

use crate::config::RuleSetting;

/// Options recognized by [`Engine`](crate::Engine).
///
/// Built once and then only read; every run of an engine shares them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RunOptions {
    /// Explicit configuration file, merged after project config files.
    pub config_file: Option<PathBuf>,
    /// Whether the built-in default rules apply.
    pub use_default_config: bool,
    /// Directories to load custom rules from, in order.
    pub rule_paths: Vec<PathBuf>,
    /// Whether `.scriptlintrc.json` files next to and above each file are consulted.
    pub use_project_config: bool,
    /// Extra environments to enable.
    pub envs: Vec<String>,
    /// Extra global names to declare.
    pub globals: Vec<String>,
    /// Rule settings applied on top of every other source.
    pub rules: BTreeMap<String, RuleSetting>,
    /// Whether exclusion patterns are honored.
    pub ignore: bool,
    /// Ignore file to read instead of `<cwd>/.scriptlintignore`.
    pub ignore_path: Option<PathBuf>,
    /// Base directory for relative paths. Defaults to the process working directory.
    pub cwd: Option<PathBuf>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            config_file: None,
            use_default_config: true,
            rule_paths: Vec::new(),
            use_project_config: true,
            envs: Vec::new(),
            globals: Vec::new(),
            rules: BTreeMap::new(),
            ignore: true,
            ignore_path: None,
            cwd: None,
        }
    }
}

impl RunOptions {
    /// Creates options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the explicit configuration file.
    pub fn config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Enables or disables the built-in default rules.
    pub fn use_default_config(mut self, yes: bool) -> Self {
        self.use_default_config = yes;
        self
    }

    /// Adds a custom rule directory.
    pub fn rule_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.rule_paths.push(path.into());
        self
    }

    /// Enables or disables project config file lookup.
    pub fn use_project_config(mut self, yes: bool) -> Self {
        self.use_project_config = yes;
        self
    }

    /// Adds an environment.
    pub fn env(mut self, name: impl Into<String>) -> Self {
        self.envs.push(name.into());
        self
    }

    /// Adds a global.
    pub fn global(mut self, name: impl Into<String>) -> Self {
        self.globals.push(name.into());
        self
    }

    /// Overrides a rule.
    pub fn rule(mut self, id: impl Into<String>, setting: RuleSetting) -> Self {
        self.rules.insert(id.into(), setting);
        self
    }

    /// Enables or disables exclusion patterns.
    pub fn ignore(mut self, yes: bool) -> Self {
        self.ignore = yes;
        self
    }

    /// Sets the ignore file.
    pub fn ignore_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.ignore_path = Some(path.into());
        self
    }

    /// Sets the base directory.
    pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// The directory relative paths are resolved against.
    pub fn base_dir(&self) -> PathBuf {
        self.cwd
            .clone()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Resolves `path` against [`base_dir`](Self::base_dir) unless it is
    /// absolute, collapsing `.` and `..` components.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        normalize_lexically(&self.base_dir().join(path))
    }
}

/// Removes `.` components and folds `..` into its parent without touching
/// the filesystem. `..` at the root stays at the root.
pub(crate) fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => normalized.push(component),
            },
            other => normalized.push(other),
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuleLevel;

    #[test]
    fn test_defaults() {
        let options = RunOptions::default();
        assert!(options.use_default_config);
        assert!(options.use_project_config);
        assert!(options.ignore);
        assert!(options.rule_paths.is_empty());
        assert!(options.config_file.is_none());
    }

    #[test]
    fn test_deserialize_camel_case() {
        let options: RunOptions = serde_json::from_str(
            r#"{
                "configFile": "conf.json",
                "useDefaultConfig": false,
                "rulePaths": ["rules"],
                "envs": ["node"],
                "rules": { "no-tabs": "warn" },
                "ignore": false
            }"#,
        )
        .unwrap();

        assert_eq!(options.config_file, Some(PathBuf::from("conf.json")));
        assert!(!options.use_default_config);
        assert!(options.use_project_config);
        assert_eq!(options.rule_paths, vec![PathBuf::from("rules")]);
        assert_eq!(options.envs, vec!["node".to_string()]);
        assert_eq!(options.rules["no-tabs"].level, RuleLevel::Warn);
        assert!(!options.ignore);
    }

    #[test]
    fn test_resolve_relative_against_cwd() {
        let options = RunOptions::new().cwd("/work");
        assert_eq!(options.resolve("a.js"), PathBuf::from("/work/a.js"));
        assert_eq!(options.resolve("/abs/a.js"), PathBuf::from("/abs/a.js"));
    }

    #[test]
    fn test_resolve_collapses_dot_segments() {
        let options = RunOptions::new().cwd("/work");
        assert_eq!(options.resolve("missing/../gone.js"), PathBuf::from("/work/gone.js"));
        assert_eq!(options.resolve("./src/./a.js"), PathBuf::from("/work/src/a.js"));
        assert_eq!(options.resolve("../../../a.js"), PathBuf::from("/a.js"));
    }

    #[test]
    fn test_normalize_lexically_relative() {
        assert_eq!(normalize_lexically(Path::new("a/b/../c")), PathBuf::from("a/c"));
        assert_eq!(normalize_lexically(Path::new("../a")), PathBuf::from("../a"));
        assert_eq!(normalize_lexically(Path::new("../../a")), PathBuf::from("../../a"));
    }

    #[test]
    fn test_builder() {
        let options = RunOptions::new()
            .env("browser")
            .global("jQuery")
            .rule("max-len", RuleSetting::new(RuleLevel::Error))
            .ignore(false)
            .ignore_path(".myignore");

        assert_eq!(options.envs, vec!["browser".to_string()]);
        assert_eq!(options.globals, vec!["jQuery".to_string()]);
        assert!(options.rules.contains_key("max-len"));
        assert!(!options.ignore);
        assert_eq!(options.ignore_path, Some(PathBuf::from(".myignore")));
    }
}
