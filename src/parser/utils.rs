//! Utility functions for markdown parsing.

/// Byte offsets of every line start, for offset → line lookups.
///
/// # Examples
///
/// ```
/// # use vaultheads::parser::utils::LineIndex;
/// let index = LineIndex::new("a\nbb\nccc");
/// assert_eq!(index.line_of(0), 0);
/// assert_eq!(index.line_of(2), 1);
/// assert_eq!(index.line_of(5), 2);
/// ```
#[derive(Debug, Clone)]
pub struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(content: &str) -> Self {
        let starts = std::iter::once(0)
            .chain(content.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { starts }
    }

    /// 0-based line containing byte `offset`.
    pub fn line_of(&self, offset: usize) -> usize {
        self.starts.partition_point(|&start| start <= offset) - 1
    }

    pub fn line_count(&self) -> usize {
        self.starts.len()
    }
}

/// Whether a path has a markdown extension.
pub fn is_markdown_path(path: &std::path::Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("md") || ext.eq_ignore_ascii_case("markdown"))
        .unwrap_or(false)
}
