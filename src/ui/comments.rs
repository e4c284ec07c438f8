use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::{app::App, view_model};

pub fn render_comments(app: &App, area: Rect, buf: &mut Buffer) {
    let Some(repo) = app.repository() else {
        return;
    };

    let month_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let dim_style = Style::default().add_modifier(Modifier::DIM);

    let mut lines: Vec<Line> = Vec::new();
    let mut selected_line = 0usize;
    let mut flat_index = 0usize;

    for section in view_model::comment_sections(repo) {
        if !lines.is_empty() {
            lines.push(Line::default());
        }
        lines.push(Line::from(Span::styled(section.title, month_style)));

        for item in section.items {
            let selected = flat_index == app.list_selection;
            if selected {
                selected_line = lines.len();
            }

            let when = format!("{} at {}", item.date, item.time);
            let topic_style = if selected {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            };

            // right-align the date when the topic leaves room for it
            let used = item.topic.width() + when.width() + 2;
            let gap = (area.width as usize).saturating_sub(used).max(2);

            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(item.topic, topic_style),
                Span::raw(" ".repeat(gap)),
                Span::styled(when, dim_style),
            ]));
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(item.subject, Style::default().add_modifier(Modifier::ITALIC)),
            ]));

            flat_index += 1;
        }
    }

    // keep the selection on screen
    let height = area.height as usize;
    let scroll = (selected_line + 2).saturating_sub(height);

    Paragraph::new(lines)
        .scroll((scroll.min(u16::MAX as usize) as u16, 0))
        .render(area, buf);
}
