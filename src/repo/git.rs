//! Git commit timestamp queries
//!
//! Wraps the `git` executable rather than a bindings library so that
//! "git is not installed" stays a distinguishable failure mode.

use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;
use tracing::debug;

/// Failure modes of a git timestamp query.
///
/// An untracked path is *not* represented here; `last_commit_time` reports
/// it as `Ok(None)`.
#[derive(Debug, Error)]
pub enum GitError {
    #[error("git is not installed or not in PATH")]
    NotInstalled,

    #[error("not a git repository")]
    NotARepository,

    #[error("permission denied running git: {0}")]
    PermissionDenied(io::Error),

    #[error("failed to run git: {0}")]
    Spawn(io::Error),

    #[error("git error: {0}")]
    Command(String),

    #[error("git command failed with code {0}")]
    ExitStatus(i32),

    #[error("invalid git timestamp: {0}")]
    InvalidTimestamp(String),
}

/// Answers "when was this file last committed?" for a single project
pub struct GitHistory {
    /// Working directory for git invocations
    root: PathBuf,
}

impl GitHistory {
    /// Create a history view scoped to the given project root
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// Get the unix timestamp of the last commit touching `path`.
    ///
    /// Returns `Ok(None)` when the path is not tracked by git.
    pub fn last_commit_time(&self, path: &Path) -> Result<Option<i64>, GitError> {
        let mut cmd = Command::new("git");
        cmd.args(["log", "-1", "--format=%ct", "--"])
            .arg(path)
            .current_dir(&self.root);

        let output = run(&mut cmd)?;
        debug!(path = %path.display(), output = %output, "git timestamp query");

        if output.is_empty() {
            return Ok(None); // Not tracked by git (not an error)
        }

        output
            .parse::<i64>()
            .map(Some)
            .map_err(|_| GitError::InvalidTimestamp(output))
    }
}

/// Run a prepared git command and capture trimmed stdout
fn run(cmd: &mut Command) -> Result<String, GitError> {
    let output = cmd.output().map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => GitError::NotInstalled,
        io::ErrorKind::PermissionDenied => GitError::PermissionDenied(e),
        _ => GitError::Spawn(e),
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if stderr.to_lowercase().contains("not a git repository") {
            return Err(GitError::NotARepository);
        }
        if !stderr.is_empty() {
            return Err(GitError::Command(stderr));
        }
        return Err(GitError::ExitStatus(output.status.code().unwrap_or(-1)));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_repository_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let history = GitHistory::new(dir.path());

        let err = history
            .last_commit_time(Path::new("anything.md"))
            .unwrap_err();
        assert!(matches!(err, GitError::NotARepository));
    }

    #[test]
    fn test_untracked_path_is_none() {
        let dir = tempfile::tempdir().unwrap();
        for args in [
            vec!["init", "-q"],
            vec!["add", "-A"],
            vec![
                "-c",
                "user.name=t",
                "-c",
                "user.email=t@example.com",
                "-c",
                "commit.gpgsign=false",
                "commit",
                "-q",
                "--allow-empty",
                "--no-verify",
                "-m",
                "init",
            ],
        ] {
            let status = Command::new("git")
                .args(&args)
                .current_dir(dir.path())
                .status()
                .unwrap();
            assert!(status.success());
        }

        let history = GitHistory::new(dir.path());
        let time = history.last_commit_time(Path::new("missing.md")).unwrap();
        assert!(time.is_none());
    }
}
