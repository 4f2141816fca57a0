//! Configuration data types.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use jsonc_parser::ParseOptions;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::LinterError;

/// How a rule reports, or whether it runs at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "RawLevel")]
pub enum RuleLevel {
    Off,
    Warn,
    Error,
}

/// A level as written in a config file: a name or a number 0-2.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawLevel {
    Number(u64),
    Name(String),
}

impl TryFrom<RawLevel> for RuleLevel {
    type Error = String;

    fn try_from(raw: RawLevel) -> Result<Self, String> {
        match raw {
            RawLevel::Number(0) => Ok(RuleLevel::Off),
            RawLevel::Number(1) => Ok(RuleLevel::Warn),
            RawLevel::Number(2) => Ok(RuleLevel::Error),
            RawLevel::Number(n) => Err(format!("invalid rule level: {}", n)),
            RawLevel::Name(name) => name.parse(),
        }
    }
}

impl FromStr for RuleLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "off" | "0" => Ok(RuleLevel::Off),
            "warn" | "warning" | "1" => Ok(RuleLevel::Warn),
            "error" | "2" => Ok(RuleLevel::Error),
            other => Err(format!(
                "invalid rule level '{}' (expected off, warn or error)",
                other
            )),
        }
    }
}

impl fmt::Display for RuleLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RuleLevel::Off => "off",
            RuleLevel::Warn => "warn",
            RuleLevel::Error => "error",
        };
        f.write_str(name)
    }
}

/// Configuration for a single rule: a level plus optional rule options.
///
/// Written either as a bare level (`"warn"`, `2`) or as an array whose
/// first element is the level and second the options
/// (`["error", { "max": 100 }]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSetting", into = "RawSetting")]
pub struct RuleSetting {
    pub level: RuleLevel,
    pub options: serde_json::Value,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawSetting {
    Level(RuleLevel),
    WithOptions(Vec<serde_json::Value>),
}

impl TryFrom<RawSetting> for RuleSetting {
    type Error = String;

    fn try_from(raw: RawSetting) -> Result<Self, Self::Error> {
        match raw {
            RawSetting::Level(level) => Ok(RuleSetting::new(level)),
            RawSetting::WithOptions(mut values) => {
                if values.is_empty() {
                    return Err("rule setting array must start with a level".to_string());
                }
                let level: RuleLevel =
                    serde_json::from_value(values.remove(0)).map_err(|e| e.to_string())?;
                let options = if values.is_empty() {
                    serde_json::Value::Null
                } else {
                    values.remove(0)
                };
                Ok(RuleSetting { level, options })
            }
        }
    }
}

impl From<RuleSetting> for RawSetting {
    fn from(setting: RuleSetting) -> Self {
        if setting.options.is_null() {
            RawSetting::Level(setting.level)
        } else {
            RawSetting::WithOptions(vec![
                serde_json::Value::String(setting.level.to_string()),
                setting.options,
            ])
        }
    }
}

impl RuleSetting {
    pub fn new(level: RuleLevel) -> Self {
        Self {
            level,
            options: serde_json::Value::Null,
        }
    }

    pub fn with_options(mut self, options: serde_json::Value) -> Self {
        self.options = options;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.level != RuleLevel::Off
    }
}

impl FromStr for RuleSetting {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(RuleSetting::new)
    }
}

/// One `.scriptlintrc.json` file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    /// Stops the upward search for further config files.
    pub root: bool,
    /// Environments to enable (`true`) or disable (`false`).
    pub env: BTreeMap<String, bool>,
    /// Globals to declare. The value marks the global writable; either way
    /// the name counts as declared.
    pub globals: BTreeMap<String, bool>,
    pub rules: BTreeMap<String, RuleSetting>,
}

impl ConfigFile {
    /// Loads a config file; comments and trailing commas are accepted.
    pub fn from_file(path: &Path) -> Result<Self, LinterError> {
        debug!("Loading config file {}", path.display());
        let content = fs::read_to_string(path).map_err(|e| {
            LinterError::config(format!("Failed to read config {}: {}", path.display(), e))
        })?;
        Self::from_jsonc(&content)
            .map_err(|e| LinterError::config(format!("{}: {}", path.display(), e)))
    }

    /// Parses configuration from JSON-with-comments text.
    pub fn from_jsonc(content: &str) -> Result<Self, String> {
        let value = jsonc_parser::parse_to_serde_value(content, &ParseOptions::default())
            .map_err(|e| format!("Invalid JSON: {}", e))?
            .unwrap_or(serde_json::Value::Object(serde_json::Map::new()));

        serde_json::from_value(value).map_err(|e| format!("Invalid config: {}", e))
    }
}

/// Globals provided by each known environment.
pub fn environment_globals(env: &str) -> Option<&'static [&'static str]> {
    let globals: &'static [&'static str] = match env {
        "browser" => &[
            "window",
            "document",
            "navigator",
            "location",
            "localStorage",
            "fetch",
            "setTimeout",
            "clearTimeout",
            "setInterval",
            "clearInterval",
            "console",
        ],
        "node" => &[
            "require",
            "module",
            "exports",
            "process",
            "Buffer",
            "global",
            "__dirname",
            "__filename",
            "setTimeout",
            "clearTimeout",
            "setInterval",
            "clearInterval",
            "console",
        ],
        "es6" => &[
            "Promise", "Map", "Set", "WeakMap", "WeakSet", "Symbol", "Proxy", "Reflect",
        ],
        "mocha" => &[
            "describe",
            "it",
            "before",
            "after",
            "beforeEach",
            "afterEach",
        ],
        _ => return None,
    };
    Some(globals)
}

/// The fully merged configuration that applies to one file.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EffectiveConfig {
    pub rules: BTreeMap<String, RuleSetting>,
    pub globals: BTreeSet<String>,
    pub envs: BTreeSet<String>,
}

impl EffectiveConfig {
    /// Built-in defaults applied when `use_default_config` is set.
    pub fn defaults() -> Self {
        let mut config = Self::default();
        config
            .rules
            .insert("eol-last".to_string(), RuleSetting::new(RuleLevel::Warn));
        config.rules.insert(
            "no-trailing-spaces".to_string(),
            RuleSetting::new(RuleLevel::Error),
        );
        config.rules.insert(
            "no-redeclare-global".to_string(),
            RuleSetting::new(RuleLevel::Error),
        );
        config
    }

    /// Layers a config file on top: rules replace by name, environments and
    /// globals are added when `true` and removed when `false`.
    pub fn apply(&mut self, file: &ConfigFile) {
        for (env, enabled) in &file.env {
            if *enabled {
                self.envs.insert(env.clone());
            } else {
                self.envs.remove(env);
            }
        }
        for name in file.globals.keys() {
            self.globals.insert(name.clone());
        }
        for (rule, setting) in &file.rules {
            self.rules.insert(rule.clone(), setting.clone());
        }
    }

    /// Explicit globals plus those of every enabled, known environment.
    pub fn declared_globals(&self) -> BTreeSet<String> {
        let mut declared = self.globals.clone();
        for env in &self.envs {
            match environment_globals(env) {
                Some(names) => declared.extend(names.iter().map(|n| n.to_string())),
                None => debug!("Unknown environment '{}'", env),
            }
        }
        declared
    }

    /// Enabled rules in id order.
    pub fn enabled_rules(&self) -> impl Iterator<Item = (&str, &RuleSetting)> {
        self.rules
            .iter()
            .filter(|(_, setting)| setting.is_enabled())
            .map(|(id, setting)| (id.as_str(), setting))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::name_off(r#""off""#, RuleLevel::Off)]
    #[case::name_warn(r#""warn""#, RuleLevel::Warn)]
    #[case::name_error(r#""error""#, RuleLevel::Error)]
    #[case::number_zero("0", RuleLevel::Off)]
    #[case::number_one("1", RuleLevel::Warn)]
    #[case::number_two("2", RuleLevel::Error)]
    fn test_rule_level_parsing(#[case] json: &str, #[case] expected: RuleLevel) {
        let level: RuleLevel = serde_json::from_str(json).unwrap();
        assert_eq!(level, expected);
    }

    #[test]
    fn test_rule_level_invalid() {
        assert!(serde_json::from_str::<RuleLevel>("3").is_err());
        assert!(serde_json::from_str::<RuleLevel>(r#""loud""#).is_err());
    }

    #[test]
    fn test_rule_setting_with_options() {
        let setting: RuleSetting = serde_json::from_str(r#"["warn", { "max": 100 }]"#).unwrap();
        assert_eq!(setting.level, RuleLevel::Warn);
        assert_eq!(setting.options["max"], 100);
        assert!(setting.is_enabled());
    }

    #[test]
    fn test_rule_setting_bare_level_has_null_options() {
        let setting: RuleSetting = serde_json::from_str("2").unwrap();
        assert_eq!(setting.level, RuleLevel::Error);
        assert!(setting.options.is_null());
    }

    #[test]
    fn test_rule_setting_empty_array_rejected() {
        assert!(serde_json::from_str::<RuleSetting>("[]").is_err());
    }

    #[test]
    fn test_rule_setting_serializes_back() {
        let setting = RuleSetting::new(RuleLevel::Error).with_options(serde_json::json!({"max": 1}));
        let json = serde_json::to_value(&setting).unwrap();
        assert_eq!(json, serde_json::json!(["error", {"max": 1}]));

        let bare = serde_json::to_value(RuleSetting::new(RuleLevel::Off)).unwrap();
        assert_eq!(bare, serde_json::json!("off"));
    }

    #[test]
    fn test_config_file_accepts_comments() {
        let config = ConfigFile::from_jsonc(
            r#"{
                // project root
                "root": true,
                "env": { "node": true },
                "globals": { "jQuery": false },
                "rules": { "max-len": ["warn", { "max": 120 }], "no-tabs": "off" },
            }"#,
        )
        .unwrap();

        assert!(config.root);
        assert_eq!(config.env.get("node"), Some(&true));
        assert!(config.globals.contains_key("jQuery"));
        assert_eq!(config.rules["no-tabs"].level, RuleLevel::Off);
        assert_eq!(config.rules["max-len"].options["max"], 120);
    }

    #[test]
    fn test_config_file_empty_document() {
        assert_eq!(ConfigFile::from_jsonc("").unwrap(), ConfigFile::default());
    }

    #[test]
    fn test_config_file_invalid() {
        assert!(ConfigFile::from_jsonc("{ not json").is_err());
        assert!(ConfigFile::from_jsonc(r#"{ "rules": { "a": "loud" } }"#).is_err());
    }

    #[test]
    fn test_apply_layers() {
        let mut config = EffectiveConfig::defaults();
        let layer = ConfigFile {
            env: BTreeMap::from([("node".to_string(), true)]),
            rules: BTreeMap::from([(
                "no-trailing-spaces".to_string(),
                RuleSetting::new(RuleLevel::Off),
            )]),
            ..Default::default()
        };
        config.apply(&layer);

        assert_eq!(config.rules["no-trailing-spaces"].level, RuleLevel::Off);
        assert!(config.envs.contains("node"));

        let disable = ConfigFile {
            env: BTreeMap::from([("node".to_string(), false)]),
            ..Default::default()
        };
        config.apply(&disable);
        assert!(!config.envs.contains("node"));
    }

    #[test]
    fn test_apply_read_only_global_stays_declared() {
        let mut config = EffectiveConfig::default();
        config.apply(&ConfigFile {
            globals: BTreeMap::from([("jQuery".to_string(), true)]),
            ..Default::default()
        });
        config.apply(&ConfigFile {
            globals: BTreeMap::from([("jQuery".to_string(), false), ("$".to_string(), false)]),
            ..Default::default()
        });

        assert!(config.declared_globals().contains("jQuery"));
        assert!(config.declared_globals().contains("$"));
    }

    #[test]
    fn test_declared_globals_include_environments() {
        let mut config = EffectiveConfig::default();
        config.globals.insert("myGlobal".to_string());
        config.envs.insert("node".to_string());
        config.envs.insert("no-such-env".to_string());

        let declared = config.declared_globals();
        assert!(declared.contains("myGlobal"));
        assert!(declared.contains("require"));
        assert!(!declared.contains("window"));
    }

    #[test]
    fn test_enabled_rules_sorted_and_filtered() {
        let mut config = EffectiveConfig::default();
        config
            .rules
            .insert("z-rule".to_string(), RuleSetting::new(RuleLevel::Warn));
        config
            .rules
            .insert("a-rule".to_string(), RuleSetting::new(RuleLevel::Error));
        config
            .rules
            .insert("off-rule".to_string(), RuleSetting::new(RuleLevel::Off));

        let ids: Vec<&str> = config.enabled_rules().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["a-rule", "z-rule"]);
    }
}
