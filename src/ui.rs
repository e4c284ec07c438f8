pub mod calendar;
pub mod comments;
pub mod detail;
pub mod screen;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::{app::App, loader::LoadState, navigator::View, view_model};

const HORIZONTAL_MARGIN: u16 = 2;
const VERTICAL_MARGIN: u16 = 1;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(3), // header
                Constraint::Min(1),    // body
                Constraint::Length(1), // tabs
                Constraint::Length(1), // legend
            ])
            .split(area);

        Paragraph::new(Span::styled(
            self.title(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

        if self.repository().is_none() {
            render_message(&self.load, chunks[1], buf);
            Paragraph::new(Span::styled(
                "(q)uit",
                Style::default().add_modifier(Modifier::ITALIC),
            ))
            .render(chunks[3], buf);
            return;
        }

        let view = self.nav.view();
        let screen = screen::current_screen(view);
        screen.render(self, chunks[1], buf);

        // the footer is hidden while a detail is open
        if view != View::Detail {
            render_tabs(view, chunks[2], buf);
        }

        Paragraph::new(Span::styled(
            screen.legend(),
            Style::default().add_modifier(Modifier::ITALIC),
        ))
        .render(chunks[3], buf);
    }
}

fn render_tabs(view: View, area: Rect, buf: &mut Buffer) {
    let active = Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let inactive = Style::default().add_modifier(Modifier::DIM);

    let (calendar, list) = match view {
        View::CommentList => (inactive, active),
        _ => (active, inactive),
    };

    Paragraph::new(Line::from(vec![
        Span::styled(" (c) Calendar ", calendar),
        Span::raw("  "),
        Span::styled(" (l) Comments ", list),
    ]))
    .alignment(Alignment::Center)
    .render(area, buf);
}

fn render_message(state: &LoadState, area: Rect, buf: &mut Buffer) {
    let text = match state {
        LoadState::NoSelection => view_model::NO_SELECTION_HINT.to_string(),
        LoadState::Empty { student } => format!("No classes found for {student}."),
        LoadState::Failed(err) => format!("The schedule could not be loaded.\n{err}"),
        LoadState::Ready { .. } => String::new(),
    };

    Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(area, buf);
}
