use ratatui::{buffer::Buffer, layout::Rect};

use crate::{
    app::App,
    navigator::View,
    ui::{calendar::render_calendar, comments::render_comments, detail::render_detail},
};

/// A UI Screen boundary: draws one view of the app into the body area
pub trait Screen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer);

    /// Key legend shown in the footer
    fn legend(&self) -> &'static str;
}

pub struct CalendarScreen;

impl Screen for CalendarScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        render_calendar(app, area, buf);
    }

    fn legend(&self) -> &'static str {
        "arrows move / [ ] month / (t)oday / enter select / tab next class / (l)ist / (q)uit"
    }
}

pub struct CommentListScreen;

impl Screen for CommentListScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        render_comments(app, area, buf);
    }

    fn legend(&self) -> &'static str {
        "up/down move / enter open / (c)alendar / (q)uit"
    }
}

pub struct DetailScreen;

impl Screen for DetailScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        render_detail(app, area, buf);
    }

    fn legend(&self) -> &'static str {
        "left previous / right next / (b)ack"
    }
}

/// Helper to construct the appropriate screen for the current view
pub fn current_screen(view: View) -> Box<dyn Screen> {
    match view {
        View::Calendar => Box::new(CalendarScreen),
        View::CommentList => Box::new(CommentListScreen),
        View::Detail => Box::new(DetailScreen),
    }
}
