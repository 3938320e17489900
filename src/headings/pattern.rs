//! User-defined line patterns that produce pseudo-headings.

use super::HeadingEntry;
use crate::config::PatternSetting;
use regex::Regex;
use std::fmt;

/// A configured pattern that failed to compile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternError {
    pub pattern: String,
    pub message: String,
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid pattern '{}': {}", self.pattern, self.message)
    }
}

impl std::error::Error for PatternError {}

/// Compiled pattern settings, in configured order.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    compiled: Vec<(Regex, usize)>,
    errors: Vec<PatternError>,
}

impl PatternSet {
    /// Compile every setting. Patterns that fail are recorded and never match.
    pub fn compile(settings: &[PatternSetting]) -> Self {
        let mut set = Self::default();
        for setting in settings {
            match Regex::new(&setting.pattern) {
                Ok(regex) => set.compiled.push((regex, setting.level)),
                Err(e) => {
                    log::warn!("skipping pattern '{}': {}", setting.pattern, e);
                    set.errors.push(PatternError {
                        pattern: setting.pattern.clone(),
                        message: e.to_string(),
                    });
                }
            }
        }
        set
    }

    /// True when no settings were configured at all.
    ///
    /// A set whose patterns all failed to compile is not empty: the file is
    /// still read, it just yields nothing.
    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty() && self.errors.is_empty()
    }

    pub fn errors(&self) -> &[PatternError] {
        &self.errors
    }

    /// One entry per `(line, pattern)` pair that matches.
    ///
    /// The entry text is the first capture group when the pattern has one
    /// and it took part in the match, otherwise the whole match.
    pub fn match_lines(&self, text: &str) -> Vec<HeadingEntry> {
        let mut entries = Vec::new();
        if self.compiled.is_empty() {
            return entries;
        }

        for (line_no, line) in text.lines().enumerate() {
            for (regex, level) in &self.compiled {
                let Some(caps) = regex.captures(line) else {
                    continue;
                };
                let matched = caps.get(1).or_else(|| caps.get(0));
                if let Some(m) = matched {
                    entries.push(HeadingEntry::new(m.as_str(), *level, line_no));
                }
            }
        }

        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PATTERN_LEVEL;

    fn set(patterns: &[(&str, usize)]) -> PatternSet {
        let settings: Vec<_> = patterns
            .iter()
            .map(|(p, l)| PatternSetting::new(*p, *l))
            .collect();
        PatternSet::compile(&settings)
    }

    #[test]
    fn test_bold_line_uses_capture_group() {
        let patterns = set(&[(r"^\*\*([^*]+)\*\*$", PATTERN_LEVEL)]);
        let entries = patterns.match_lines("intro\n**Important**\ntext");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].text, "Important");
        assert_eq!(entries[0].level, 7);
        assert_eq!(entries[0].line, 1);
    }

    #[test]
    fn test_no_capture_group_uses_whole_match() {
        let patterns = set(&[("TODO", 5)]);
        let entries = patterns.match_lines("- TODO write tests");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].text, "TODO");
        assert_eq!(entries[0].level, 5);
    }

    #[test]
    fn test_unmatched_optional_group_falls_back_to_match() {
        let patterns = set(&[(r"^Note(: (.*))?", PATTERN_LEVEL)]);
        let entries = patterns.match_lines("Note\nNote: details");
        assert_eq!(entries[0].text, "Note");
        assert_eq!(entries[1].text, ": details");
    }

    #[test]
    fn test_multiple_patterns_same_line() {
        let patterns = set(&[(r"^\*\*(.+)\*\*$", 7), (r"Important", 3)]);
        let entries = patterns.match_lines("**Important**");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].level, 7);
        assert_eq!(entries[1].level, 3);
        assert!(entries.iter().all(|e| e.line == 0));
    }

    #[test]
    fn test_invalid_pattern_does_not_block_others() {
        let patterns = set(&[("([unclosed", 7), (r"^> (.*)$", 4)]);
        assert_eq!(patterns.errors().len(), 1);
        assert_eq!(patterns.errors()[0].pattern, "([unclosed");
        assert!(!patterns.is_empty());

        let entries = patterns.match_lines("> quoted");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].text, "quoted");
    }

    #[test]
    fn test_empty_settings() {
        let patterns = PatternSet::compile(&[]);
        assert!(patterns.is_empty());
        assert!(patterns.match_lines("**Important**").is_empty());
    }

    #[test]
    fn test_crlf_lines() {
        let patterns = set(&[(r"^\*\*([^*]+)\*\*$", 7)]);
        let entries = patterns.match_lines("a\r\n**Bold**\r\n");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].line, 1);
    }
}
