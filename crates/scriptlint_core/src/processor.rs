//! Single file processing.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::ConfigResolver;
use crate::message::{LintMessage, LintResult};
use crate::options::normalize_lexically;
use crate::verifier::Verifier;

pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Lints one file.
///
/// `path` is resolved against `base_dir` for reading and configuration
/// lookup, but the result is reported under `path` exactly as given. Every
/// failure is folded into a single fatal message on the result.
pub fn process_file<V: Verifier + ?Sized>(
    path: &str,
    base_dir: &Path,
    resolver: &dyn ConfigResolver,
    verifier: &mut V,
) -> LintResult {
    let absolute = normalize_lexically(&base_dir.join(path));
    debug!("Processing {}", absolute.display());

    if !absolute.is_file() {
        return LintResult::new(
            path,
            vec![LintMessage::fatal(format!(
                "Could not find file at '{}'.",
                absolute.display()
            ))],
        );
    }

    let content = match read_source(&absolute) {
        Ok(content) => content,
        Err(message) => return LintResult::new(path, vec![LintMessage::fatal(message)]),
    };

    let config = match resolver.get_config(&absolute) {
        Ok(config) => config,
        Err(e) => return LintResult::new(path, vec![LintMessage::fatal(e.to_string())]),
    };

    verifier.reset();
    let messages = verifier.verify(&content, &config, path);
    LintResult::new(path, messages)
}

fn read_source(path: &Path) -> Result<String, String> {
    let metadata =
        fs::metadata(path).map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

    if metadata.len() > MAX_FILE_SIZE {
        return Err(format!(
            "File size exceeds limit of {} bytes: {}",
            MAX_FILE_SIZE,
            path.display()
        ));
    }

    fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path.display(), e))
}
