//! CLI argument definitions

use std::path::PathBuf;

use clap::Parser;
use scriptlint_core::{RuleSetting, RunOptions};

/// ScriptLint - Pluggable linter for JavaScript sources
#[derive(Parser)]
#[command(name = "sclint")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Files and directories to lint
    #[arg(required = true)]
    pub paths: Vec<String>,

    /// Configuration file applied after project configuration
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Disable lookup of .scriptlintrc.json files
    #[arg(long)]
    pub no_rc: bool,

    /// Disable the built-in default rules
    #[arg(long)]
    pub no_default_config: bool,

    /// Directory to load custom rules from
    #[arg(long = "rulesdir", value_name = "DIR")]
    pub rules_dirs: Vec<PathBuf>,

    /// Environment to enable
    #[arg(long = "env", value_name = "NAME")]
    pub envs: Vec<String>,

    /// Global name to declare
    #[arg(long = "global", value_name = "NAME")]
    pub globals: Vec<String>,

    /// Rule setting, e.g. `no-tabs=error`
    #[arg(long = "rule", value_name = "NAME=LEVEL", value_parser = parse_rule)]
    pub rules: Vec<(String, RuleSetting)>,

    /// Disable .scriptlintignore and default exclusions
    #[arg(long)]
    pub no_ignore: bool,

    /// Ignore file to use instead of .scriptlintignore
    #[arg(long, value_name = "FILE")]
    pub ignore_path: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Builds engine options from the parsed flags.
    pub fn run_options(&self) -> RunOptions {
        let mut options = RunOptions::new()
            .use_default_config(!self.no_default_config)
            .use_project_config(!self.no_rc)
            .ignore(!self.no_ignore);

        if let Some(config) = &self.config {
            options = options.config_file(config);
        }
        if let Some(ignore_path) = &self.ignore_path {
            options = options.ignore_path(ignore_path);
        }
        for dir in &self.rules_dirs {
            options = options.rule_path(dir);
        }
        for env in &self.envs {
            options = options.env(env);
        }
        for global in &self.globals {
            options = options.global(global);
        }
        for (id, setting) in &self.rules {
            options = options.rule(id, setting.clone());
        }
        options
    }
}

fn parse_rule(s: &str) -> Result<(String, RuleSetting), String> {
    let (name, level) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=LEVEL, got '{}'", s))?;
    let name = name.trim();
    if name.is_empty() {
        return Err("rule name must not be empty".to_string());
    }
    Ok((name.to_string(), level.trim().parse()?))
}
