//! Source-code dialect: `@depends` tag extraction
//!
//! Looks for a header-comment tag of the form:
//! `@depends ./file1.ts, ./file2.ts`
//! terminated by end-of-line or an end-of-comment marker.

/// Extract raw dependency references from source-file content.
///
/// Only the first `@depends` tag is honored.
pub fn parse_dependencies(content: &str) -> Vec<String> {
    const TAG: &str = "@depends";

    for (idx, _) in content.match_indices(TAG) {
        let rest = &content[idx + TAG.len()..];
        if !rest.starts_with([' ', '\t']) {
            continue; // e.g. "@dependson" is not the tag
        }

        let line = rest.lines().next().unwrap_or("");
        let line = line.split('*').next().unwrap_or(line);

        return line
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
    }

    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_comment_tag() {
        let content = "// @depends ./auth.ts, ./session.ts\nfn main() {}\n";
        assert_eq!(parse_dependencies(content), vec!["./auth.ts", "./session.ts"]);
    }

    #[test]
    fn test_block_comment_terminator() {
        let content = "/* @depends ./lib.rs */\npub fn run() {}\n";
        assert_eq!(parse_dependencies(content), vec!["./lib.rs"]);
    }

    #[test]
    fn test_whitespace_and_empty_tokens() {
        let content = "# @depends  ./a.py ,,  ./b.py , \n";
        assert_eq!(parse_dependencies(content), vec!["./a.py", "./b.py"]);
    }

    #[test]
    fn test_only_first_tag_is_used() {
        let content = "// @depends ./a.ts\n// @depends ./b.ts\n";
        assert_eq!(parse_dependencies(content), vec!["./a.ts"]);
    }

    #[test]
    fn test_prefix_word_is_not_the_tag() {
        let content = "// @dependson nothing\n// @depends ./real.go\n";
        assert_eq!(parse_dependencies(content), vec!["./real.go"]);
    }

    #[test]
    fn test_no_tag() {
        assert!(parse_dependencies("fn main() {}\n").is_empty());
    }
}
