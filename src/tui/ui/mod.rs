mod layout;
mod util;

use crate::explorer::{FileTree, TreeRow};
use crate::tui::app::{App, AppMode, Focus};
use crate::tui::help_text;
use crate::tui::theme::Theme;
use layout::{DynamicLayout, Section};
use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph};
use util::{centered_area, truncate_to_width};

pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    let banner = banner_text(app);

    let main = DynamicLayout::vertical(area)
        .section(Section::Title, Constraint::Length(2))
        .section_if(banner.is_some(), Section::Banner, Constraint::Length(1))
        .section(Section::Body, Constraint::Min(0))
        .section(Section::Status, Constraint::Length(1))
        .build();

    render_title_bar(frame, app, main.area(Section::Title));
    if let Some(text) = banner {
        frame.render_widget(
            Paragraph::new(text).style(app.theme.banner_style()),
            main.area(Section::Banner),
        );
    }

    let body = DynamicLayout::horizontal(main.area(Section::Body))
        .section(Section::Explorer, Constraint::Percentage(app.outline_width))
        .section(Section::Editor, Constraint::Min(0))
        .build();
    render_explorer(frame, app, body.area(Section::Explorer));
    render_editor(frame, app, body.area(Section::Editor));

    render_status_bar(frame, app, main.area(Section::Status));

    if app.mode == AppMode::Help {
        render_help_popup(frame, app, area);
    }
}

fn banner_text(app: &App) -> Option<&'static str> {
    if app.vault().is_none() {
        Some(" ⚠ Vault unavailable, headings inactive. Press R to retry")
    } else if !app.config.headings.enabled {
        Some(" Headings are off. Press H to show them")
    } else {
        None
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let heading_count: usize = app.index.iter().map(|(_, entries)| entries.len()).sum();
    let title_text = format!(
        "vaultheads - {} ({} files, {} headings)",
        app.root().display(),
        app.tree.items().len(),
        heading_count
    );

    let title = Paragraph::new(title_text)
        .style(
            Style::default()
                .fg(app.theme.heading_color(1))
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(title, area);
}

fn tree_row_line(tree: &FileTree, theme: &Theme, row: &TreeRow, width: usize) -> Line<'static> {
    match *row {
        TreeRow::File { item } => {
            let entry = &tree.items()[item];
            let marker = match (&entry.headings, entry.expanded) {
                (Some(rows), true) if !rows.is_empty() => "▾ ",
                (Some(rows), false) if !rows.is_empty() => "▸ ",
                _ => "  ",
            };
            let style = if tree.is_flashing(&entry.path) {
                theme.flash_style()
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            };
            let label = truncate_to_width(&entry.label(), width.saturating_sub(2));
            Line::from(vec![Span::raw(marker), Span::styled(label, style)])
        }
        TreeRow::Heading { item, row } => {
            let Some(heading) = tree.heading_row(item, row) else {
                return Line::default();
            };
            let indent = 2 + usize::from(heading.indent);
            let mut style = theme.heading_style(heading.level);
            if tree.highlighted() == Some(&heading.key) {
                style = style.patch(theme.highlight_style());
            }
            let text = truncate_to_width(&heading.text, width.saturating_sub(indent));
            Line::from(vec![Span::raw(" ".repeat(indent)), Span::styled(text, style)])
        }
    }
}

fn render_explorer(frame: &mut Frame, app: &mut App, area: Rect) {
    app.tree_area = area;
    let height = usize::from(area.height.saturating_sub(2));
    app.tree_viewport = height;
    // Clamp the offset after any height change
    app.tree.scroll_by(0, height);

    let theme = app.theme;
    let width = usize::from(area.width.saturating_sub(2));
    let selected = app.tree.selected();
    let items: Vec<ListItem> = app
        .tree
        .rows()
        .iter()
        .enumerate()
        .skip(app.tree.offset())
        .take(height)
        .map(|(i, row)| {
            let item = ListItem::new(tree_row_line(&app.tree, &theme, row, width));
            if i == selected && app.focus == Focus::Explorer {
                item.style(theme.selection_style())
            } else {
                item
            }
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style(app.focus == Focus::Explorer))
            .title(" Explorer "),
    );
    frame.render_widget(list, area);
}

fn render_editor(frame: &mut Frame, app: &mut App, area: Rect) {
    let theme = app.theme;
    let focused_index = app.editor.focused_index();
    let tabs: Vec<Span> = app
        .editor
        .panes()
        .iter()
        .enumerate()
        .map(|(i, pane)| {
            let style = if Some(i) == focused_index {
                Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                theme.line_number_style()
            };
            Span::styled(format!(" {} ", pane.title()), style)
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style(app.focus == Focus::Editor))
        .title(Line::from(tabs));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let height = usize::from(inner.height);
    app.editor_viewport = height;
    let show_cursor = app.focus == Focus::Editor;

    let Some(pane) = app.editor.focused_pane_mut() else {
        let hint = Paragraph::new("Select a file or heading and press Enter")
            .style(theme.line_number_style());
        frame.render_widget(hint, inner);
        return;
    };
    pane.scroll_into_view(height);

    let lines: Vec<Line> = pane
        .lines
        .iter()
        .enumerate()
        .skip(pane.scroll)
        .take(height)
        .map(|(i, text)| {
            let mut style = Style::default();
            if pane.selection == Some(i) {
                style = style.patch(theme.selection_style());
            }
            if show_cursor && pane.cursor == i {
                style = style.patch(theme.cursor_line_style());
            }
            Line::from(vec![
                Span::styled(format!("{:>4} ", i + 1), theme.line_number_style()),
                Span::styled(text.clone(), style),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let focus_indicator = match app.focus {
        Focus::Explorer => "Explorer",
        Focus::Editor => "Editor",
    };

    let position = app
        .editor
        .focused_pane()
        .map(|pane| format!(" • {}:{}", pane.title(), pane.cursor + 1))
        .unwrap_or_default();

    let tail = match app.status_message() {
        Some(message) => message.to_string(),
        None => "Enter:Open • o:New pane • L:Locate • H:Headings • R:Rescan • ?:Help".to_string(),
    };

    let status_text = format!(" [{}]{} • {} ", focus_indicator, position, tail);
    frame.render_widget(
        Paragraph::new(status_text).style(app.theme.status_bar_style()),
        area,
    );
}

fn render_help_popup(frame: &mut Frame, app: &App, area: Rect) {
    let popup_area = centered_area(area, 70, 80);
    frame.render_widget(Clear, popup_area);

    let lines: Vec<Line> = help_text::build_help_lines(app.keybindings())
        .iter()
        .map(|line| line.to_line(&app.theme))
        .collect();

    let help = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.theme.border_style(true))
                .title(" Help (j/k scroll, Esc close) "),
        )
        .style(Style::default().bg(app.theme.modal_bg))
        .scroll((app.help_scroll, 0));
    frame.render_widget(help, popup_area);
}
