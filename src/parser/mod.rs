//! Markdown heading extraction.
//!
//! All parsing is delegated to `turbovault-parser` for unified, code-block-aware
//! OFM (Obsidian Flavored Markdown) support. This module only converts its
//! byte offsets into the 0-based line numbers the heading index works with.

pub mod utils;

use crate::host::StructuralHeading;
use std::path::Path;
use utils::LineIndex;

/// Parse a markdown file and extract its headings.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn parse_file(path: &Path) -> std::io::Result<Vec<StructuralHeading>> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_headings(&content))
}

/// Parse markdown content and extract headings with their line numbers.
///
/// Headings inside fenced code blocks are ignored.
pub fn parse_headings(content: &str) -> Vec<StructuralHeading> {
    let lines = LineIndex::new(content);
    turbovault_parser::parse_headings(content)
        .into_iter()
        .map(|h| StructuralHeading {
            level: h.level as usize,
            line: lines.line_of(h.position.offset),
            text: h.text,
        })
        .collect()
}
