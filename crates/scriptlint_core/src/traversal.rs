//! Traversal of input paths into per-file results.

use rayon::prelude::*;
use tracing::{debug, info};

use crate::config::ConfigResolver;
use crate::exclusion::ExclusionSet;
use crate::message::{LintMessage, LintResult};
use crate::options::RunOptions;
use crate::processor::process_file;
use crate::verifier::Verifier;
use crate::walker::{Candidate, FileWalker};

/// The only extension that is linted. Compared case-sensitively.
pub const LINT_EXTENSION: &str = ".js";

/// Advisory attached to explicitly requested files that are excluded.
pub const IGNORED_FILE_MESSAGE: &str =
    "File ignored because of your .scriptlintignore file. Use --no-ignore to override.";

/// What to do with one candidate, decided before any file is read.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Plan {
    Process(String),
    Ignored(String),
}

/// Decides the fate of each candidate, in discovery order.
///
/// Excluded files named directly by the user yield an advisory; excluded
/// files reached only by expanding a directory are dropped silently.
fn plan<I>(candidates: I, options: &RunOptions, exclusions: &ExclusionSet) -> Vec<Plan>
where
    I: IntoIterator<Item = Candidate>,
{
    candidates
        .into_iter()
        .filter_map(|candidate| {
            if !candidate.path.ends_with(LINT_EXTENSION) {
                debug!("Skipping {} (not {})", candidate.path, LINT_EXTENSION);
                return None;
            }

            if !options.ignore || !exclusions.is_excluded(&candidate.path) {
                return Some(Plan::Process(candidate.path));
            }

            if candidate.explicit {
                Some(Plan::Ignored(candidate.path))
            } else {
                debug!("Ignoring {}", candidate.path);
                None
            }
        })
        .collect()
}

/// Lints every eligible file reachable from `inputs`.
///
/// Files are processed in parallel; each worker gets its own verifier from
/// `make_verifier`. Results come back in discovery order.
pub fn run<V, F>(
    inputs: &[String],
    options: &RunOptions,
    exclusions: &ExclusionSet,
    walker: &FileWalker,
    resolver: &dyn ConfigResolver,
    make_verifier: F,
) -> Vec<LintResult>
where
    V: Verifier,
    F: Fn() -> V + Sync + Send,
{
    let plans = plan(walker.expand(inputs), options, exclusions);
    let base_dir = options.base_dir();

    let results: Vec<LintResult> = plans
        .into_par_iter()
        .map_init(make_verifier, |verifier, plan| match plan {
            Plan::Process(path) => process_file(&path, &base_dir, resolver, verifier),
            Plan::Ignored(path) => {
                LintResult::new(path, vec![LintMessage::advisory(IGNORED_FILE_MESSAGE)])
            }
        })
        .collect();

    info!("Linted {} file(s)", results.len());
    results
}
