//! Prose-document dialect: dependency extraction from Markdown
//!
//! Two passes over the document:
//! 1. A `Depends` section (heading level 2 or 3, case-insensitive): every
//!    list item's backtick-quoted paths, in order, duplicates retained.
//! 2. Inline code spans anywhere in the document whose path part carries a
//!    recognized source extension, first-seen order, skipping anything
//!    already collected. A `:symbol` qualifier after the path is discarded.

use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};
use std::path::Path;

/// Extract raw dependency references from Markdown content
pub fn parse_dependencies(content: &str) -> Vec<String> {
    let mut deps = depends_section_paths(content);

    for token in inline_code_spans(content) {
        let path = token.split(':').next().unwrap_or(&token);
        if super::has_code_extension(Path::new(path)) && !deps.iter().any(|d| d == path) {
            deps.push(path.to_string());
        }
    }

    deps
}

/// Collect backtick-quoted paths from list items under a `Depends` heading
fn depends_section_paths(content: &str) -> Vec<String> {
    let mut paths = Vec::new();

    let mut in_heading = false;
    let mut heading_level = HeadingLevel::H1;
    let mut heading_text = String::new();
    let mut in_depends_section = false;
    let mut item_depth: usize = 0;

    for event in Parser::new(content) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                in_heading = true;
                heading_level = level;
                heading_text.clear();
            }
            Event::End(TagEnd::Heading(_)) => {
                in_heading = false;
                // Any heading ends the current section; a Depends heading
                // at level 2 or 3 starts one.
                in_depends_section = matches!(heading_level, HeadingLevel::H2 | HeadingLevel::H3)
                    && heading_text.trim().eq_ignore_ascii_case("depends");
                item_depth = 0;
            }
            Event::Start(Tag::Item) => item_depth += 1,
            Event::End(TagEnd::Item) => item_depth = item_depth.saturating_sub(1),
            Event::Text(text) if in_heading => heading_text.push_str(&text),
            Event::Code(code) if in_heading => heading_text.push_str(&code),
            Event::Code(code) if in_depends_section && item_depth > 0 => {
                paths.push(code.to_string());
            }
            _ => {}
        }
    }

    paths
}

/// Collect every inline code span in document order
fn inline_code_spans(content: &str) -> Vec<String> {
    Parser::new(content)
        .filter_map(|event| match event {
            Event::Code(code) => Some(code.to_string()),
            _ => None,
        })
        .collect()
}
