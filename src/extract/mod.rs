//! Dependency declaration extraction
//!
//! A document declares the source files it describes in one of two
//! dialects, selected by the document's own type:
//! - Prose documents (Markdown): a `Depends` section and inline code spans
//! - Source files: a `@depends` tag in a header comment

pub mod code;
pub mod doc;

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Recognized source-file extensions (fixed closed set)
pub const CODE_EXTENSIONS: [&str; 8] = ["ts", "tsx", "js", "jsx", "py", "go", "rs", "java"];

/// Extensions treated as prose documents
pub const DOC_EXTENSIONS: [&str; 3] = ["md", "mdx", "markdown"];

/// How dependency declarations are written in a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// Free-text documents: `Depends` section plus inline file references
    Prose,
    /// Source files: `@depends` tag in a comment
    Code,
}

impl Dialect {
    /// Select the dialect matching a document's file extension
    pub fn for_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        if DOC_EXTENSIONS.contains(&ext.as_str()) {
            Dialect::Prose
        } else {
            Dialect::Code
        }
    }
}

/// Check whether a path carries a recognized source-file extension
pub fn has_code_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| CODE_EXTENSIONS.contains(&e))
        .unwrap_or(false)
}

/// Failure to read a document for extraction.
///
/// Any of these aborts extraction for the document; "no declarations
/// found" is an empty list, never an error.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    #[error("permission denied reading: {0}")]
    PermissionDenied(PathBuf),

    #[error("file is not valid UTF-8: {0}")]
    InvalidUtf8(PathBuf),

    #[error("error reading file: {0}")]
    Io(io::Error),
}

/// Extract raw (unresolved) dependency references from a document,
/// dispatching on its dialect. References are returned in document order.
pub fn dependencies(path: &Path) -> Result<Vec<String>, ExtractError> {
    let content = read_document(path)?;
    Ok(match Dialect::for_path(path) {
        Dialect::Prose => doc::parse_dependencies(&content),
        Dialect::Code => code::parse_dependencies(&content),
    })
}

fn read_document(path: &Path) -> Result<String, ExtractError> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ExtractError::NotFound(path.to_path_buf()),
        io::ErrorKind::PermissionDenied => ExtractError::PermissionDenied(path.to_path_buf()),
        io::ErrorKind::InvalidData => ExtractError::InvalidUtf8(path.to_path_buf()),
        _ => ExtractError::Io(e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_selection() {
        assert_eq!(Dialect::for_path(Path::new("guide.md")), Dialect::Prose);
        assert_eq!(Dialect::for_path(Path::new("notes.MDX")), Dialect::Prose);
        assert_eq!(Dialect::for_path(Path::new("main.rs")), Dialect::Code);
        assert_eq!(Dialect::for_path(Path::new("Makefile")), Dialect::Code);
    }

    #[test]
    fn test_code_extension_set() {
        assert!(has_code_extension(Path::new("./lib.ts")));
        assert!(has_code_extension(Path::new("pkg/main.go")));
        assert!(!has_code_extension(Path::new("README.md")));
        assert!(!has_code_extension(Path::new("noext")));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = dependencies(&dir.path().join("absent.md")).unwrap_err();
        assert!(matches!(err, ExtractError::NotFound(_)));
    }

    #[test]
    fn test_non_utf8_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("binary.md");
        std::fs::write(&path, [0xff, 0xfe, 0x00, 0x41]).unwrap();

        let err = dependencies(&path).unwrap_err();
        assert!(matches!(err, ExtractError::InvalidUtf8(_)));
    }
}
