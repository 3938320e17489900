use crate::keybindings::{KeybindingMode, Keybindings};
use crate::tui::theme::Theme;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

/// Key column width for keybindings
const KEY_COLUMN_WIDTH: usize = 14;

#[derive(Debug, Clone, PartialEq)]
pub enum HelpLine {
    Title(&'static str),
    SectionHeader(String),
    KeyBinding { keys: String, desc: &'static str },
    Note(&'static str),
    Blank,
}

impl HelpLine {
    /// Convert this help line to a styled ratatui Line
    pub fn to_line(&self, theme: &Theme) -> Line<'static> {
        match self {
            HelpLine::Title(text) => Line::from(Span::styled(
                text.to_string(),
                Style::default()
                    .fg(theme.modal_title)
                    .add_modifier(Modifier::BOLD),
            )),
            HelpLine::SectionHeader(text) => Line::from(Span::styled(
                text.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            HelpLine::KeyBinding { keys, desc } => Line::from(vec![
                Span::styled(
                    format!("  {:<width$}", keys, width = KEY_COLUMN_WIDTH),
                    Style::default().fg(theme.modal_key_fg),
                ),
                Span::raw(desc.to_string()),
            ]),
            HelpLine::Note(text) => Line::from(Span::styled(
                text.to_string(),
                Style::default().add_modifier(Modifier::ITALIC),
            )),
            HelpLine::Blank => Line::from(""),
        }
    }
}

/// Help for the explorer and editor, generated from the live bindings.
pub fn build_help_lines(keybindings: &Keybindings) -> Vec<HelpLine> {
    let mut lines = vec![HelpLine::Title("vaultheads"), HelpLine::Blank];

    for mode in [KeybindingMode::Normal, KeybindingMode::Editor] {
        lines.push(HelpLine::SectionHeader(format!("{} keys", mode.display_name())));
        let mut category = "";
        for (action, keys) in keybindings.help_entries(mode) {
            if action.category() != category {
                category = action.category();
                lines.push(HelpLine::SectionHeader(format!(" {}", category)));
            }
            lines.push(HelpLine::KeyBinding {
                keys: keys.join(" "),
                desc: action.description(),
            });
        }
        lines.push(HelpLine::Blank);
    }

    lines.push(HelpLine::SectionHeader("Mouse".to_string()));
    lines.push(HelpLine::Note(
        "  Left click opens a row, middle click opens it in a new pane",
    ));
    lines.push(HelpLine::Note("  Wheel scrolls the pane under the pointer"));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_lists_highlight_location() {
        let lines = build_help_lines(&Keybindings::default());
        assert!(lines.iter().any(|line| matches!(
            line,
            HelpLine::KeyBinding { keys, desc } if desc == &"Locate cursor heading" && keys.contains('L')
        )));
    }
}
