use ratatui::layout::{Constraint, Flex, Layout, Rect};
use unicode_width::UnicodeWidthChar;

/// A rect of the given percentage size, centered in `area`.
pub fn centered_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);
    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}

/// Cut `text` to at most `width` terminal cells, ending in `…` when cut.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    let total: usize = text.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("Intro", 10), "Intro");
        assert_eq!(truncate_to_width("Introduction", 6), "Intro…");
        assert_eq!(truncate_to_width("日本語の見出し", 5), "日本…");
        assert_eq!(truncate_to_width("abc", 0), "");
    }

    #[test]
    fn test_centered_area() {
        let area = centered_area(Rect::new(0, 0, 100, 40), 50, 50);
        assert_eq!(area, Rect::new(25, 10, 50, 20));
    }
}
