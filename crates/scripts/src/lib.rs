//! Script discovery and load tracking.
//!
//! The host loads plugin scripts from a directory at startup. Discovery is
//! recursive and filtered by file extension; paths are sorted so load
//! order does not depend on directory-listing order. A [`ScriptHost`]
//! guarantees each script executes exactly once per host start, no matter
//! how many times a directory is (re)loaded.
//!
//! Script execution itself is delegated to the embedder: this crate hands
//! each discovered path to a callback and never interprets file contents.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Errors from script discovery and execution.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("script {path} failed: {reason}")]
    ExecFailed { path: PathBuf, reason: String },
}

/// Recursively collect files under `dir` whose extension matches
/// `extension` (compared case-insensitively, without the leading dot).
/// Results are sorted by path.
pub fn discover(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, ScriptError> {
    let mut found = Vec::new();
    walk(dir, &extension.to_lowercase(), &mut found)?;
    found.sort();
    Ok(found)
}

fn walk(dir: &Path, extension: &str, out: &mut Vec<PathBuf>) -> Result<(), ScriptError> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            walk(&path, extension, out)?;
        } else if path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.to_lowercase() == extension)
        {
            out.push(path);
        }
    }
    Ok(())
}

/// Tracks which scripts have been executed during one host start.
pub struct ScriptHost {
    extension: String,
    loaded: BTreeSet<PathBuf>,
}

impl ScriptHost {
    /// `extension` without the leading dot, e.g. `"py"`.
    pub fn new(extension: &str) -> Self {
        Self {
            extension: extension.trim_start_matches('.').to_lowercase(),
            loaded: BTreeSet::new(),
        }
    }

    /// Discover scripts under `dir` and execute each not-yet-loaded one
    /// through `exec`. Returns the paths executed by this call.
    ///
    /// A missing directory loads nothing; startup proceeds without
    /// scripts. A failing script aborts the load and is not marked as
    /// loaded.
    pub fn load_directory(
        &mut self,
        dir: &Path,
        exec: &mut dyn FnMut(&Path) -> Result<(), ScriptError>,
    ) -> Result<Vec<PathBuf>, ScriptError> {
        if !dir.is_dir() {
            tracing::warn!(dir = %dir.display(), "script directory missing, loading nothing");
            return Ok(Vec::new());
        }

        let mut executed = Vec::new();
        for path in discover(dir, &self.extension)? {
            let canonical = path.canonicalize()?;
            if self.loaded.contains(&canonical) {
                tracing::debug!(path = %path.display(), "script already loaded, skipping");
                continue;
            }
            tracing::info!(path = %path.display(), "executing script");
            exec(&path)?;
            self.loaded.insert(canonical);
            executed.push(path);
        }
        Ok(executed)
    }

    /// Number of scripts loaded since this host start.
    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }
}
