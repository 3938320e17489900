use crate::error::{Error, Result};
use crate::keybindings::{Keybindings, KeybindingsConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Highest structural heading level produced by the markdown parser.
pub const MAX_STRUCTURAL_LEVEL: usize = 6;

/// Level reserved for pattern-matched pseudo-headings.
pub const PATTERN_LEVEL: usize = 7;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,

    #[serde(default)]
    pub headings: HeadingsConfig,

    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Width of the explorer pane as a percentage of the screen
    #[serde(default = "default_outline_width")]
    pub outline_width: u16,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            outline_width: default_outline_width(),
        }
    }
}

fn default_outline_width() -> u16 {
    35
}

/// A user-defined pattern that turns matching lines into pseudo-headings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternSetting {
    pub pattern: String,
    #[serde(default = "default_pattern_level")]
    pub level: usize,
}

impl PatternSetting {
    pub fn new(pattern: impl Into<String>, level: usize) -> Self {
        Self {
            pattern: pattern.into(),
            level: level.clamp(1, PATTERN_LEVEL),
        }
    }

    /// Parse `REGEX` or `REGEX:LEVEL` as given on the command line.
    ///
    /// The level suffix is only recognised when it is a number in 1..=7, so
    /// patterns that legitimately end in `:<digits>` need an explicit level.
    pub fn parse_cli(value: &str) -> Self {
        if let Some((pattern, level)) = value.rsplit_once(':') {
            if let Ok(level) = level.parse::<usize>() {
                if (1..=PATTERN_LEVEL).contains(&level) && !pattern.is_empty() {
                    return Self::new(pattern, level);
                }
            }
        }
        Self::new(value, PATTERN_LEVEL)
    }
}

fn default_pattern_level() -> usize {
    PATTERN_LEVEL
}

/// Heading display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadingsConfig {
    /// Master switch for heading rows in the explorer
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_true")]
    pub show_h1: bool,
    #[serde(default = "default_true")]
    pub show_h2: bool,
    #[serde(default = "default_true")]
    pub show_h3: bool,
    #[serde(default = "default_true")]
    pub show_h4: bool,
    #[serde(default = "default_true")]
    pub show_h5: bool,
    #[serde(default = "default_true")]
    pub show_h6: bool,

    /// Evaluated in order against every line of a file
    #[serde(default = "default_patterns")]
    pub patterns: Vec<PatternSetting>,

    /// Extra indent in terminal cells for each level below 1
    #[serde(default = "default_indent_per_level")]
    pub indent_per_level: u16,

    /// Delay between a file event and the heading rebuild, so the metadata
    /// cache has caught up with the edit
    #[serde(default = "default_refresh_delay_ms")]
    pub refresh_delay_ms: u64,

    /// How long a located heading stays highlighted
    #[serde(default = "default_highlight_duration_ms")]
    pub highlight_duration_ms: u64,

    /// Settle time before clearing the selection left by a heading jump
    #[serde(default = "default_selection_clear_delay_ms")]
    pub selection_clear_delay_ms: u64,

    #[serde(default = "default_startup_retries")]
    pub startup_retries: u32,

    #[serde(default = "default_startup_backoff_ms")]
    pub startup_backoff_ms: u64,
}

impl Default for HeadingsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            show_h1: true,
            show_h2: true,
            show_h3: true,
            show_h4: true,
            show_h5: true,
            show_h6: true,
            patterns: default_patterns(),
            indent_per_level: default_indent_per_level(),
            refresh_delay_ms: default_refresh_delay_ms(),
            highlight_duration_ms: default_highlight_duration_ms(),
            selection_clear_delay_ms: default_selection_clear_delay_ms(),
            startup_retries: default_startup_retries(),
            startup_backoff_ms: default_startup_backoff_ms(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_patterns() -> Vec<PatternSetting> {
    vec![PatternSetting::new(r"^\*\*([^*]+)\*\*$", PATTERN_LEVEL)]
}

fn default_indent_per_level() -> u16 {
    2
}

fn default_refresh_delay_ms() -> u64 {
    200
}

fn default_highlight_duration_ms() -> u64 {
    2000
}

fn default_selection_clear_delay_ms() -> u64 {
    300
}

fn default_startup_retries() -> u32 {
    5
}

fn default_startup_backoff_ms() -> u64 {
    500
}

impl HeadingsConfig {
    /// Whether structural headings of `level` should be shown.
    ///
    /// Levels outside 1..=6 are never filtered.
    pub fn level_visible(&self, level: usize) -> bool {
        match level {
            1 => self.show_h1,
            2 => self.show_h2,
            3 => self.show_h3,
            4 => self.show_h4,
            5 => self.show_h5,
            6 => self.show_h6,
            _ => true,
        }
    }

    pub fn set_level_visible(&mut self, level: usize, visible: bool) {
        match level {
            1 => self.show_h1 = visible,
            2 => self.show_h2 = visible,
            3 => self.show_h3 = visible,
            4 => self.show_h4 = visible,
            5 => self.show_h5 = visible,
            6 => self.show_h6 = visible,
            _ => {}
        }
    }

    /// Show exactly the given structural levels.
    pub fn show_only_levels(&mut self, levels: &[usize]) {
        for level in 1..=MAX_STRUCTURAL_LEVEL {
            self.set_level_visible(level, levels.contains(&level));
        }
    }

    /// Clamp pattern levels into 1..=7 after loading from disk.
    fn normalize(&mut self) {
        for setting in &mut self.patterns {
            setting.level = setting.level.clamp(1, PATTERN_LEVEL);
        }
    }
}

impl Config {
    /// Get the platform-specific config file path
    /// - macOS: ~/Library/Application Support/vaultheads/config.toml
    /// - Linux: ~/.config/vaultheads/config.toml
    /// - Windows: %APPDATA%/vaultheads/config.toml
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("vaultheads").join("config.toml"))
    }

    /// Load config from file, or return default if file doesn't exist
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| fs::read_to_string(&path).ok())
            .and_then(|contents| match Self::from_toml(&contents) {
                Ok(config) => Some(config),
                Err(e) => {
                    log::warn!("ignoring unreadable config file: {}", e);
                    None
                }
            })
            .unwrap_or_default()
    }

    /// Parse a config document, filling every missing field from the defaults.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(contents)?;
        config.headings.normalize();
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()
            .ok_or_else(|| Error::Config("could not determine config directory".to_string()))?;

        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(&path, contents)?;

        Ok(())
    }

    /// Flip the master heading switch and persist it
    pub fn set_headings_enabled(&mut self, enabled: bool) -> Result<()> {
        self.headings.enabled = enabled;
        self.save()
    }

    /// Persist only the master switch, leaving the rest of the stored file
    /// as it was (session overrides from the command line are not saved).
    pub fn store_headings_enabled(enabled: bool) -> Result<()> {
        Self::load().set_headings_enabled(enabled)
    }

    /// Get keybindings with user customizations applied
    pub fn keybindings(&self) -> Keybindings {
        self.keybindings.to_keybindings()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert!(config.headings.enabled);
        assert_eq!(config.headings.patterns, default_patterns());
        assert_eq!(config.headings.highlight_duration_ms, 2000);
        assert_eq!(config.ui.outline_width, 35);
    }

    #[test]
    fn test_partial_document_merges_over_defaults() {
        let config = Config::from_toml(
            r#"
[headings]
show_h2 = false
patterns = [{ pattern = "^TODO: (.*)$" }]
"#,
        )
        .unwrap();

        assert!(config.headings.show_h1);
        assert!(!config.headings.show_h2);
        assert_eq!(config.headings.patterns.len(), 1);
        assert_eq!(config.headings.patterns[0].level, PATTERN_LEVEL);
        assert_eq!(config.headings.refresh_delay_ms, 200);
    }

    #[test]
    fn test_pattern_levels_are_clamped() {
        let config = Config::from_toml(
            r#"
[headings]
patterns = [{ pattern = "a", level = 0 }, { pattern = "b", level = 42 }]
"#,
        )
        .unwrap();
        assert_eq!(config.headings.patterns[0].level, 1);
        assert_eq!(config.headings.patterns[1].level, PATTERN_LEVEL);
    }

    #[test]
    fn test_defaults_are_not_shared() {
        let mut a = HeadingsConfig::default();
        a.patterns.clear();
        let b = HeadingsConfig::default();
        assert_eq!(b.patterns.len(), 1);
    }

    #[test]
    fn test_show_only_levels() {
        let mut headings = HeadingsConfig::default();
        headings.show_only_levels(&[3]);
        for level in 1..=6 {
            assert_eq!(headings.level_visible(level), level == 3);
        }
        assert!(headings.level_visible(7));
    }

    #[test]
    fn test_parse_cli_pattern() {
        let setting = PatternSetting::parse_cli(r"^> (.*)$:2");
        assert_eq!(setting.pattern, r"^> (.*)$");
        assert_eq!(setting.level, 2);

        let setting = PatternSetting::parse_cli(r"^Note$");
        assert_eq!(setting.level, PATTERN_LEVEL);

        // Out-of-range suffix stays part of the pattern
        let setting = PatternSetting::parse_cli("x:99");
        assert_eq!(setting.pattern, "x:99");
    }

    #[test]
    fn test_round_trip_through_toml() {
        let mut config = Config::default();
        config.headings.show_h4 = false;
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed = Config::from_toml(&text).unwrap();
        assert!(!parsed.headings.show_h4);
        assert_eq!(parsed.headings.patterns, config.headings.patterns);
    }
}
