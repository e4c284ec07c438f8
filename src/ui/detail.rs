use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::{
    app::App,
    view_model::{self, DetailModel},
};

pub fn render_detail(app: &App, area: Rect, buf: &mut Buffer) {
    let Some(model) = app
        .repository()
        .and_then(|repo| view_model::detail(repo, &app.nav))
    else {
        return;
    };

    let reschedule_height = if model.reschedule.is_some() { 5 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),                 // topic
            Constraint::Length(reschedule_height), // reschedule box
            Constraint::Min(4),                    // body
            Constraint::Length(1),                 // prev / next
        ])
        .split(area);

    Paragraph::new(Span::styled(
        model.topic.clone(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center)
    .render(chunks[0], buf);

    if let Some(moved) = &model.reschedule {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let lines = vec![
            Line::from(format!("{} at {}", moved.original_date, moved.original_time)),
            Line::from(vec![
                Span::styled("Moved to: ", bold),
                Span::raw(format!("{} at {}", moved.new_date, moved.new_time)),
            ]),
            Line::from(vec![
                Span::styled("Reason: ", bold),
                Span::raw(moved.reason.clone()),
            ]),
        ];
        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow))
                    .title("Rescheduled"),
            )
            .wrap(Wrap { trim: true })
            .render(chunks[1], buf);
    }

    Paragraph::new(body_lines(&model))
        .wrap(Wrap { trim: false })
        .render(chunks[2], buf);

    render_nav(&model, chunks[3], buf);
}

fn body_lines(model: &DetailModel) -> Vec<Line<'static>> {
    let label = Style::default().add_modifier(Modifier::BOLD);
    let field = |name: &'static str, value: &str| {
        Line::from(vec![
            Span::styled(format!("{name}: "), label),
            Span::raw(value.to_string()),
        ])
    };

    vec![
        field("Date", &model.date),
        field("Time", &model.time),
        field("Subject", &model.subject),
        Line::default(),
        field("Score", &model.score),
        Line::default(),
        Line::from(Span::styled("Teacher's comment:", label)),
        Line::from(model.comment.clone()),
    ]
}

fn render_nav(model: &DetailModel, area: Rect, buf: &mut Buffer) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let style = Style::default().add_modifier(Modifier::BOLD);
    if model.has_previous {
        Paragraph::new(Span::styled("< previous", style)).render(halves[0], buf);
    }
    if model.has_next {
        Paragraph::new(Span::styled("next >", style))
            .alignment(Alignment::Right)
            .render(halves[1], buf);
    }

    let (pos, total) = model.position;
    Paragraph::new(Span::styled(
        format!("{pos}/{total}"),
        Style::default().add_modifier(Modifier::DIM),
    ))
    .alignment(Alignment::Center)
    .render(area, buf);
}
