use chrono::Datelike;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::{app::App, calendar::MonthGrid};

const WEEKDAYS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];
const CELL_WIDTH: usize = 4;

pub fn render_calendar(app: &App, area: Rect, buf: &mut Buffer) {
    let Some(grid) = app.month_grid() else {
        return;
    };

    // weekday row + weeks + borders
    let grid_height = 1 + grid.weeks() as u16 + 2;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(grid_height), Constraint::Min(0)])
        .split(area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" < {} > ", grid.month.title()))
        .title_alignment(Alignment::Center);

    Paragraph::new(grid_lines(app, &grid))
        .block(block)
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

    render_day_list(app, chunks[1], buf);
}

fn grid_lines(app: &App, grid: &MonthGrid) -> Vec<Line<'static>> {
    let header_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let mut lines = vec![Line::from(
        WEEKDAYS
            .iter()
            .map(|d| Span::styled(format!("{d:>CELL_WIDTH$}"), header_style))
            .collect::<Vec<_>>(),
    )];

    let today = (grid.month.year == app.today.year() && grid.month.month == app.today.month())
        .then(|| app.today.day());

    let mut week: Vec<Span> = (0..grid.leading_blanks)
        .map(|_| Span::raw(" ".repeat(CELL_WIDTH)))
        .collect();

    for day in 1..=grid.days_in_month {
        let mut style = Style::default();
        if grid.has_class(day) {
            style = style.fg(Color::Green).add_modifier(Modifier::BOLD);
        } else {
            style = style.add_modifier(Modifier::DIM);
        }
        if Some(day) == today {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        if day == app.cursor_day {
            style = style.add_modifier(Modifier::REVERSED);
        }

        week.push(Span::styled(format!("{day:>CELL_WIDTH$}"), style));
        if week.len() == 7 {
            lines.push(Line::from(std::mem::take(&mut week)));
        }
    }
    if !week.is_empty() {
        lines.push(Line::from(week));
    }

    lines
}

fn render_day_list(app: &App, area: Rect, buf: &mut Buffer) {
    let Some(day) = app.selected_day else {
        return;
    };

    let title = app
        .month
        .day(day)
        .map(crate::dates::format_long)
        .unwrap_or_default();

    let lines: Vec<Line> = app
        .selected_day_items()
        .iter()
        .enumerate()
        .flat_map(|(idx, item)| {
            let selected = idx == app.day_selection;
            let topic_style = if selected {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            };
            [
                Line::from(Span::styled(item.topic.clone(), topic_style)),
                Line::from(Span::styled(
                    format!("Subject: {} | Time: {}", item.subject, item.time),
                    Style::default().add_modifier(Modifier::ITALIC),
                )),
            ]
        })
        .collect();

    Paragraph::new(lines)
        .block(Block::default().borders(Borders::TOP).title(title))
        .wrap(Wrap { trim: true })
        .render(area, buf);
}
