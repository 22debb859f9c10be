//! Staleness evaluation engine
//!
//! Orchestrates the timestamp provider, dependency extraction, path
//! resolution, and the directory fallback into a single verdict per
//! document.

pub mod resolve;

pub use resolve::{Resolution, SkipReason};

use crate::extract;
use crate::repo::GitHistory;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Seconds in a day, for the days/hours decomposition
pub const SECONDS_PER_DAY: i64 = 86_400;

/// How the dependency set for a document was discovered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Detection {
    /// Declared in the document and resolved to in-project files
    Explicit,
    /// Implicit fallback: source files in the document's own directory
    Directory,
    /// No dependency discovery took place (e.g. the check errored early)
    None,
}

impl std::fmt::Display for Detection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Detection::Explicit => write!(f, "explicit"),
            Detection::Directory => write!(f, "directory"),
            Detection::None => write!(f, "none"),
        }
    }
}

/// Result of a staleness check, produced fresh per evaluation.
///
/// When `error` is set the verdict is unknown: `stale` is always `false`
/// and the staleness fields are not meaningful.
#[derive(Debug, Clone, Serialize)]
pub struct StalenessResult {
    /// Whether the document is behind its dependencies
    pub stale: bool,
    /// Last commit time of the document itself
    pub doc_time: Option<i64>,
    /// Last commit time of the most recently changed dependency
    pub newest_dependency_time: Option<i64>,
    /// The dependency achieving `newest_dependency_time`
    pub newest_dependency_path: Option<String>,
    /// Whole days behind (zero when not stale)
    pub days_behind: i64,
    /// Remaining whole hours behind after days are removed
    pub hours_behind: i64,
    /// How dependencies were discovered
    pub detection_source: Detection,
    /// Dependencies that actually yielded a timestamp
    pub dependency_count: usize,
    /// Set when the verdict could not be established
    pub error: Option<String>,
    /// Note for a non-stale, non-error outcome
    pub reason: Option<String>,
}

impl Default for StalenessResult {
    fn default() -> Self {
        Self {
            stale: false,
            doc_time: None,
            newest_dependency_time: None,
            newest_dependency_path: None,
            days_behind: 0,
            hours_behind: 0,
            detection_source: Detection::None,
            dependency_count: 0,
            error: None,
            reason: None,
        }
    }
}

impl StalenessResult {
    /// An unknown verdict carrying only an error
    fn unknown(error: impl std::fmt::Display) -> Self {
        Self {
            error: Some(error.to_string()),
            ..Self::default()
        }
    }

    /// A non-stale verdict annotated with a reason
    fn fresh(reason: impl Into<String>) -> Self {
        Self {
            reason: Some(reason.into()),
            ..Self::default()
        }
    }

    fn with_doc_time(mut self, time: i64) -> Self {
        self.doc_time = Some(time);
        self
    }

    fn with_detection(mut self, detection: Detection) -> Self {
        self.detection_source = detection;
        self
    }

    fn with_dependency_count(mut self, count: usize) -> Self {
        self.dependency_count = count;
        self
    }
}

/// Decompose a staleness delta into whole days plus remaining whole hours
fn time_behind(delta: i64) -> (i64, i64) {
    (delta / SECONDS_PER_DAY, (delta % SECONDS_PER_DAY) / 3600)
}

/// Evaluates document staleness against git history.
///
/// The project root is computed once per invocation and threaded through
/// every resolution; the checker itself holds no mutable state, so
/// evaluating many documents with one checker is safe.
pub struct StalenessChecker {
    root: PathBuf,
    history: GitHistory,
}

impl StalenessChecker {
    /// Create a checker scoped to a canonicalized project root
    pub fn new<P: Into<PathBuf>>(project_root: P) -> Self {
        let root = project_root.into();
        let history = GitHistory::new(&root);
        Self { root, history }
    }

    /// Check whether a document is stale relative to its dependencies.
    ///
    /// Never panics and never returns early through the caller: every
    /// failure mode is folded into the result's `error` or `reason` field.
    pub fn evaluate(&self, doc_path: &Path) -> StalenessResult {
        // Canonicalize so git queries and containment checks agree even
        // when the caller passes a path relative to some subdirectory.
        let doc_path = std::fs::canonicalize(doc_path).unwrap_or_else(|_| doc_path.to_path_buf());

        let doc_time = match self.history.last_commit_time(&doc_path) {
            Ok(Some(time)) => time,
            Ok(None) => return StalenessResult::fresh("Doc not tracked by git"),
            Err(e) => return StalenessResult::unknown(e),
        };

        let raw_deps = match extract::dependencies(&doc_path) {
            Ok(deps) => deps,
            Err(e) => return StalenessResult::unknown(e).with_doc_time(doc_time),
        };

        let mut resolved = Vec::new();
        for reference in &raw_deps {
            match resolve::resolve(&doc_path, reference, &self.root) {
                Ok(Resolution::Resolved(path)) => resolved.push(path),
                Ok(Resolution::Skipped(reason)) => {
                    debug!(reference = %reference, %reason, "skipping dependency reference");
                }
                Err(e) => {
                    return StalenessResult::unknown(format!("error resolving path: {}", e))
                        .with_doc_time(doc_time);
                }
            }
        }

        let detection = if resolved.is_empty() {
            Detection::Directory
        } else {
            Detection::Explicit
        };

        // Fallback: source files sharing the document's directory
        if resolved.is_empty() {
            let dir = doc_path.parent().unwrap_or_else(|| Path::new("."));
            resolved = match resolve::sibling_code_files(dir) {
                Ok(files) => files,
                Err(e) => {
                    return StalenessResult::unknown(format!("error reading directory: {}", e))
                        .with_doc_time(doc_time)
                        .with_detection(detection);
                }
            };
        }

        if resolved.is_empty() {
            return StalenessResult::fresh("No dependencies found")
                .with_doc_time(doc_time)
                .with_detection(detection);
        }

        let mut newest: Option<(i64, PathBuf)> = None;
        let mut checked = 0usize;

        for dep in &resolved {
            match self.history.last_commit_time(dep) {
                Ok(Some(time)) => {
                    checked += 1;
                    if newest.as_ref().map_or(true, |(t, _)| time > *t) {
                        newest = Some((time, dep.clone()));
                    }
                }
                // Untracked dependency: excluded from comparison, not fatal
                Ok(None) => {}
                Err(e) => {
                    return StalenessResult::unknown(e)
                        .with_doc_time(doc_time)
                        .with_detection(detection);
                }
            }
        }

        let Some((newest_time, newest_path)) = newest else {
            return StalenessResult::fresh("Dependencies not tracked by git")
                .with_doc_time(doc_time)
                .with_detection(detection)
                .with_dependency_count(resolved.len());
        };

        let stale = newest_time > doc_time;
        let delta = if stale { newest_time - doc_time } else { 0 };
        let (days_behind, hours_behind) = time_behind(delta);

        StalenessResult {
            stale,
            doc_time: Some(doc_time),
            newest_dependency_time: Some(newest_time),
            newest_dependency_path: Some(newest_path.display().to_string()),
            days_behind,
            hours_behind,
            detection_source: detection,
            dependency_count: checked,
            error: None,
            reason: None,
        }
    }
}
