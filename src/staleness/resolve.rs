//! Dependency reference resolution
//!
//! Turns a raw reference from a document into an absolute, existing path
//! inside the project root, or a skip decision. Skips are never errors:
//! prose matching produces false positives by design, and those are
//! silently dropped.

use std::fmt;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::extract;

/// References longer than this are rejected outright
pub const MAX_REFERENCE_LEN: usize = 200;

/// Outcome of resolving a single raw reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Absolute, existing, in-project path
    Resolved(PathBuf),
    /// Non-fatal rejection
    Skipped(SkipReason),
}

/// Why a reference was rejected rather than resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    TooLong,
    ContainsNewline,
    MissingRelativePrefix(String),
    OutsideProject(String),
    DoesNotExist,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::TooLong => write!(f, "path too long (>{} chars)", MAX_REFERENCE_LEN),
            SkipReason::ContainsNewline => write!(f, "path contains newline"),
            SkipReason::MissingRelativePrefix(p) => {
                write!(f, "use ./ prefix for paths with directories: {}", p)
            }
            SkipReason::OutsideProject(p) => {
                write!(f, "path escapes project directory: {}", p)
            }
            SkipReason::DoesNotExist => write!(f, "path does not exist"),
        }
    }
}

/// Resolve a raw reference relative to the document that declared it.
///
/// `project_root` must be canonicalized; the resolved path is required to
/// lie within it regardless of what exists on disk. Filesystem errors
/// during the existence probe are surfaced, not swallowed.
pub fn resolve(
    doc_path: &Path,
    reference: &str,
    project_root: &Path,
) -> io::Result<Resolution> {
    if reference.len() > MAX_REFERENCE_LEN {
        return Ok(Resolution::Skipped(SkipReason::TooLong));
    }
    if reference.contains('\n') {
        return Ok(Resolution::Skipped(SkipReason::ContainsNewline));
    }
    // Guards against prose mentioning repo-style paths like `src/index.ts`
    // without relative-path intent.
    if !reference.starts_with("./") && !reference.starts_with("../") && reference.contains('/') {
        return Ok(Resolution::Skipped(SkipReason::MissingRelativePrefix(
            reference.to_string(),
        )));
    }

    let base_dir = doc_path.parent().unwrap_or_else(|| Path::new("."));
    let stripped = reference.strip_prefix("./").unwrap_or(reference);

    for candidate in [reference, stripped] {
        let resolved = normalize(&base_dir.join(candidate));

        if !resolved.starts_with(project_root) {
            return Ok(Resolution::Skipped(SkipReason::OutsideProject(
                reference.to_string(),
            )));
        }
        if resolved.try_exists()? {
            return Ok(Resolution::Resolved(resolved));
        }
    }

    Ok(Resolution::Skipped(SkipReason::DoesNotExist))
}

/// List source files directly inside `dir` (non-recursive).
///
/// A missing or non-directory path yields an empty list; listing failures
/// (e.g. permissions) are errors. The result is sorted so evaluation order
/// is deterministic.
pub fn sibling_code_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_file() && extract::has_code_extension(&path) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Lexically normalize a path, collapsing `.` and `..` components.
///
/// `..` at the root of an absolute path is clamped, matching filesystem
/// semantics; the containment check rejects such paths anyway.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() && !path.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let root = std::fs::canonicalize(dir.path()).unwrap();
        (dir, root)
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(Path::new("/a/b/./c")), PathBuf::from("/a/b/c"));
        assert_eq!(normalize(Path::new("/a/b/../c")), PathBuf::from("/a/c"));
        assert_eq!(normalize(Path::new("/a/../../b")), PathBuf::from("/b"));
    }

    #[test]
    fn test_resolves_existing_sibling() {
        let (_dir, root) = project();
        std::fs::write(root.join("lib.ts"), "export {}").unwrap();
        let doc = root.join("guide.md");

        let resolved = resolve(&doc, "./lib.ts", &root).unwrap();
        assert_eq!(resolved, Resolution::Resolved(root.join("lib.ts")));
    }

    #[test]
    fn test_bare_filename_without_prefix_is_allowed() {
        let (_dir, root) = project();
        std::fs::write(root.join("lib.ts"), "export {}").unwrap();
        let doc = root.join("guide.md");

        let resolved = resolve(&doc, "lib.ts", &root).unwrap();
        assert_eq!(resolved, Resolution::Resolved(root.join("lib.ts")));
    }

    #[test]
    fn test_rejects_oversized_reference() {
        let (_dir, root) = project();
        let long = "x".repeat(MAX_REFERENCE_LEN + 1);

        let resolved = resolve(&root.join("guide.md"), &long, &root).unwrap();
        assert_eq!(resolved, Resolution::Skipped(SkipReason::TooLong));
    }

    #[test]
    fn test_rejects_newline() {
        let (_dir, root) = project();
        let resolved = resolve(&root.join("guide.md"), "./a\nb.ts", &root).unwrap();
        assert_eq!(resolved, Resolution::Skipped(SkipReason::ContainsNewline));
    }

    #[test]
    fn test_rejects_unprefixed_directory_path() {
        let (_dir, root) = project();
        let resolved = resolve(&root.join("guide.md"), "src/index.ts", &root).unwrap();
        assert!(matches!(
            resolved,
            Resolution::Skipped(SkipReason::MissingRelativePrefix(_))
        ));
    }

    #[test]
    fn test_rejects_escape_even_when_target_exists() {
        let (_dir, root) = project();
        let doc = root.join("docs").join("guide.md");
        std::fs::create_dir_all(doc.parent().unwrap()).unwrap();

        // /etc/passwd exists on most systems; containment must still win.
        let resolved = resolve(&doc, "../../../../../../etc/passwd", &root).unwrap();
        assert!(matches!(
            resolved,
            Resolution::Skipped(SkipReason::OutsideProject(_))
        ));
    }

    #[test]
    fn test_nonexistent_target_is_a_silent_skip() {
        let (_dir, root) = project();
        let resolved = resolve(&root.join("guide.md"), "./ghost.ts", &root).unwrap();
        assert_eq!(resolved, Resolution::Skipped(SkipReason::DoesNotExist));
    }

    #[test]
    fn test_sibling_scan_filters_extensions() {
        let (_dir, root) = project();
        std::fs::write(root.join("a.rs"), "").unwrap();
        std::fs::write(root.join("b.py"), "").unwrap();
        std::fs::write(root.join("notes.md"), "").unwrap();
        std::fs::write(root.join("data.csv"), "").unwrap();
        std::fs::create_dir(root.join("sub.ts")).unwrap();

        let files = sibling_code_files(&root).unwrap();
        assert_eq!(files, vec![root.join("a.rs"), root.join("b.py")]);
    }

    #[test]
    fn test_sibling_scan_of_missing_directory_is_empty() {
        let (_dir, root) = project();
        let files = sibling_code_files(&root.join("no-such-dir")).unwrap();
        assert!(files.is_empty());
    }
}
