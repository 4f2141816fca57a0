//! # scriptlint_core
//!
//! Core orchestration engine for ScriptLint.
//!
//! This crate provides:
//! - The `Engine` facade driving a lint run
//! - Input path expansion and exclusion filtering
//! - Per-file configuration resolution
//! - The rule registry and the default verifier
//!
//! ## Example
//!
//! ```rust,no_run
//! use scriptlint_core::{Engine, RunOptions};
//!
//! let engine = Engine::new(RunOptions::new().rule_path("lint-rules"))?;
//!
//! let report = engine.execute_on_files(&["src".to_string()]);
//! for result in &report.results {
//!     println!("{}: {} issues", result.file_path, result.messages.len());
//! }
//! # Ok::<(), scriptlint_core::LinterError>(())
//! ```

pub mod config;
pub mod context;
mod engine;
mod error;
pub mod exclusion;
mod message;
mod options;
pub mod processor;
pub mod registry;
pub mod rules;
pub mod source;
pub mod traversal;
pub mod verifier;
pub mod walker;

pub use config::{ConfigResolver, EffectiveConfig, FileConfigResolver, RuleLevel, RuleSetting};
pub use engine::Engine;
pub use error::LinterError;
pub use exclusion::{ExclusionSet, is_excluded};
pub use message::{LintMessage, LintResult, RunReport, Severity};
pub use options::RunOptions;
pub use processor::process_file;
pub use registry::RuleRegistry;
pub use verifier::{Linter, Verifier};
pub use walker::{Candidate, FileWalker, WalkConfig};
