//! Input path expansion using the `ignore` crate.
//!
//! Directories expand recursively into the files below them, in file-name
//! order so that a given filesystem snapshot always yields the same
//! sequence. Anything that is not a directory, including paths that do not
//! exist, passes through unchanged and is tagged as explicitly requested.
//! `.gitignore` files play no part; exclusion is handled separately by the
//! traversal.

use std::iter;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use tracing::{debug, warn};

/// A path to consider for linting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// The path as the user wrote it, or as reached below a directory they wrote.
    pub path: String,
    /// Whether the user named this path directly.
    pub explicit: bool,
}

impl Candidate {
    pub fn explicit(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            explicit: true,
        }
    }

    pub fn discovered(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            explicit: false,
        }
    }
}

/// Configuration for directory expansion.
#[derive(Debug, Clone, Default)]
pub struct WalkConfig {
    /// Whether to descend into hidden files and directories (names starting with `.`).
    /// Default: false
    pub include_hidden: bool,
    /// Whether to follow symbolic links.
    /// Default: false
    pub follow_links: bool,
    /// Maximum directory depth to traverse.
    /// Default: None (no limit)
    pub max_depth: Option<usize>,
}

impl WalkConfig {
    /// Creates a new `WalkConfig` with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables hidden file inclusion.
    pub fn include_hidden(mut self, yes: bool) -> Self {
        self.include_hidden = yes;
        self
    }

    /// Sets whether to follow symbolic links.
    pub fn follow_links(mut self, yes: bool) -> Self {
        self.follow_links = yes;
        self
    }

    /// Sets the maximum directory depth.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }
}

/// Expands input paths into candidate files.
pub struct FileWalker {
    config: WalkConfig,
    base_dir: PathBuf,
}

impl FileWalker {
    /// Creates a walker resolving relative inputs against `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>, config: WalkConfig) -> Self {
        Self {
            config,
            base_dir: base_dir.into(),
        }
    }

    /// Lazily expands `inputs`, in input order.
    pub fn expand<'a>(&'a self, inputs: &'a [String]) -> impl Iterator<Item = Candidate> + 'a {
        inputs.iter().flat_map(move |input| self.expand_one(input))
    }

    fn expand_one(&self, input: &str) -> Box<dyn Iterator<Item = Candidate>> {
        let resolved = self.base_dir.join(input);
        if !resolved.is_dir() {
            return Box::new(iter::once(Candidate::explicit(input)));
        }

        debug!("Expanding directory {}", resolved.display());

        let mut builder = WalkBuilder::new(&resolved);
        builder
            .standard_filters(false)
            .hidden(!self.config.include_hidden)
            .follow_links(self.config.follow_links)
            .max_depth(self.config.max_depth)
            .sort_by_file_name(|a, b| a.cmp(b));

        let display_root = PathBuf::from(input);
        Box::new(builder.build().filter_map(move |entry| match entry {
            Ok(entry) if entry.file_type().is_some_and(|ft| ft.is_file()) => {
                let relative = entry.path().strip_prefix(&resolved).ok()?;
                Some(Candidate::discovered(display_path(&display_root, relative)))
            }
            Ok(_) => None,
            Err(e) => {
                warn!("Failed to read directory entry: {}", e);
                None
            }
        }))
    }
}

fn display_path(root: &Path, relative: &Path) -> String {
    root.join(relative).to_string_lossy().into_owned()
}
