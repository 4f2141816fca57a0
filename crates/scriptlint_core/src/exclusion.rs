//! Exclusion matching against ignore-file glob patterns.
//!
//! Paths are normalized to forward slashes before matching, so a pattern
//! such as `lib/vendor/**` matches `lib\vendor\a.js` as well. Patterns use
//! `globset` syntax (`*`, `**`, `?`, `[...]`); `*` and `?` never cross a
//! `/`. Negated patterns (`!pattern`) are not supported and are compiled as
//! ordinary globs.

use std::fs;
use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use tracing::{debug, warn};

use crate::LinterError;

/// Name of the ignore file looked up in the working directory.
pub const IGNORE_FILE_NAME: &str = ".scriptlintignore";

/// Patterns excluded even without an ignore file.
pub const DEFAULT_PATTERNS: &[&str] = &["**/node_modules/**"];

/// Returns true if any of `patterns` matches `path`.
///
/// Never fails: a malformed pattern matches nothing.
pub fn is_excluded(path: &str, patterns: &[String]) -> bool {
    ExclusionSet::new(patterns.to_vec()).matches(&normalize(path))
}

/// Converts every separator to `/` and drops a leading `./`.
fn normalize(path: &str) -> String {
    let normalized = path.replace('\\', "/");
    match normalized.strip_prefix("./") {
        Some(rest) => rest.to_string(),
        None => normalized,
    }
}

/// The compiled exclusion patterns of one engine instance.
#[derive(Debug, Clone)]
pub struct ExclusionSet {
    patterns: Vec<String>,
    globs: GlobSet,
    base_dir: Option<PathBuf>,
}

impl ExclusionSet {
    /// Compiles the given patterns, skipping any that fail to parse.
    pub fn new(patterns: Vec<String>) -> Self {
        let mut builder = GlobSetBuilder::new();
        for pattern in &patterns {
            match GlobBuilder::new(&normalize(pattern))
                .literal_separator(true)
                .build()
            {
                Ok(glob) => {
                    builder.add(glob);
                }
                Err(e) => warn!("Ignoring invalid exclusion pattern '{}': {}", pattern, e),
            }
        }

        let globs = builder.build().unwrap_or_else(|e| {
            warn!("Failed to build exclusion globset: {}", e);
            GlobSet::empty()
        });

        Self {
            patterns,
            globs,
            base_dir: None,
        }
    }

    /// Also matches absolute paths under `base_dir` by their relative form.
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(base_dir.into());
        self
    }

    /// Reads patterns from an ignore file.
    ///
    /// One pattern per line; blank lines and lines starting with `#` are
    /// skipped.
    pub fn read_ignore_file(path: &Path) -> Result<Vec<String>, LinterError> {
        let content = fs::read_to_string(path).map_err(|e| {
            LinterError::file(format!(
                "Failed to read ignore file {}: {}",
                path.display(),
                e
            ))
        })?;

        Ok(content
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.trim_start().is_empty() && !line.trim_start().starts_with('#'))
            .map(str::to_string)
            .collect())
    }

    /// The source patterns, in order.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn is_empty(&self) -> bool {
        self.globs.is_empty()
    }

    /// Returns true if the path is excluded.
    pub fn is_excluded(&self, path: &str) -> bool {
        let normalized = normalize(path);
        if self.matches(&normalized) {
            debug!("{} matches an exclusion pattern", path);
            return true;
        }

        let relative = self
            .base_dir
            .as_deref()
            .and_then(|base| Path::new(path).strip_prefix(base).ok())
            .map(|rel| normalize(&rel.to_string_lossy()));

        match relative {
            Some(rel) if self.matches(&rel) => {
                debug!("{} matches an exclusion pattern (as {})", path, rel);
                true
            }
            _ => false,
        }
    }

    fn matches(&self, normalized: &str) -> bool {
        !self.globs.is_empty() && self.globs.is_match(normalized)
    }
}

impl Default for ExclusionSet {
    fn default() -> Self {
        Self::new(DEFAULT_PATTERNS.iter().map(|p| p.to_string()).collect())
    }
}
