//! Fixed color theme for the explorer and editor panes.

use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub foreground: Color,
    pub border_focused: Color,
    pub border_unfocused: Color,
    pub selection_bg: Color,
    pub highlight_bg: Color,
    pub flash_fg: Color,
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
    pub banner_fg: Color,
    pub line_number_fg: Color,
    pub heading_colors: [Color; 6],
    pub pattern_heading: Color,
    pub modal_bg: Color,
    pub modal_key_fg: Color,
    pub modal_title: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::Reset,
            foreground: Color::Reset,
            border_focused: Color::Cyan,
            border_unfocused: Color::DarkGray,
            selection_bg: Color::Rgb(45, 50, 65),
            highlight_bg: Color::Rgb(120, 95, 20),
            flash_fg: Color::Yellow,
            status_bar_bg: Color::Rgb(30, 34, 42),
            status_bar_fg: Color::Gray,
            banner_fg: Color::LightRed,
            line_number_fg: Color::DarkGray,
            heading_colors: [
                Color::LightBlue,
                Color::LightCyan,
                Color::LightGreen,
                Color::LightYellow,
                Color::LightMagenta,
                Color::Gray,
            ],
            pattern_heading: Color::Rgb(215, 150, 90),
            modal_bg: Color::Rgb(25, 28, 36),
            modal_key_fg: Color::Cyan,
            modal_title: Color::LightBlue,
        }
    }
}

impl Theme {
    /// Color of a heading row; levels past six are pattern matches.
    pub fn heading_color(&self, level: usize) -> Color {
        match level {
            1..=6 => self.heading_colors[level - 1],
            _ => self.pattern_heading,
        }
    }

    pub fn heading_style(&self, level: usize) -> Style {
        let style = Style::default().fg(self.heading_color(level));
        if level == 1 {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }

    pub fn border_style(&self, focused: bool) -> Style {
        let color = if focused {
            self.border_focused
        } else {
            self.border_unfocused
        };
        Style::default().fg(color)
    }

    pub fn selection_style(&self) -> Style {
        Style::default().bg(self.selection_bg)
    }

    /// Row under the located cursor heading
    pub fn highlight_style(&self) -> Style {
        Style::default()
            .bg(self.highlight_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn flash_style(&self) -> Style {
        Style::default()
            .fg(self.flash_fg)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    pub fn status_bar_style(&self) -> Style {
        Style::default().bg(self.status_bar_bg).fg(self.status_bar_fg)
    }

    pub fn banner_style(&self) -> Style {
        Style::default()
            .fg(self.banner_fg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn line_number_style(&self) -> Style {
        Style::default().fg(self.line_number_fg)
    }

    pub fn cursor_line_style(&self) -> Style {
        Style::default().add_modifier(Modifier::REVERSED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_colors_by_level() {
        let theme = Theme::default();
        assert_eq!(theme.heading_color(1), Color::LightBlue);
        assert_eq!(theme.heading_color(6), Color::Gray);
        assert_eq!(theme.heading_color(7), theme.pattern_heading);
        assert_eq!(theme.heading_color(0), theme.pattern_heading);
    }
}
