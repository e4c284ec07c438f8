use chrono::{Datelike, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::calendar::{self, MonthGrid, YearMonth};
use crate::loader::LoadState;
use crate::navigator::{Navigator, View};
use crate::repository::SessionRepository;
use crate::view_model::{self, DayItem};

/// Root application state: the one-shot load result plus everything the
/// user can move around in.
#[derive(Debug)]
pub struct App {
    pub load: LoadState,
    pub nav: Navigator,
    pub today: NaiveDate,
    /// month shown by the calendar
    pub month: YearMonth,
    pub cursor_day: u32,
    /// day whose sessions are listed under the calendar
    pub selected_day: Option<u32>,
    pub day_selection: usize,
    pub list_selection: usize,
    pub should_quit: bool,
}

impl App {
    pub fn new(load: LoadState, month: YearMonth, today: NaiveDate) -> Self {
        let cursor_day = if YearMonth::of(today) == month {
            today.day()
        } else {
            1
        };

        Self {
            load,
            nav: Navigator::new(),
            today,
            month,
            cursor_day,
            selected_day: None,
            day_selection: 0,
            list_selection: 0,
            should_quit: false,
        }
    }

    pub fn repository(&self) -> Option<&SessionRepository> {
        self.load.repository()
    }

    pub fn title(&self) -> String {
        view_model::header_title(&self.load, self.nav.view())
    }

    pub fn month_grid(&self) -> Option<MonthGrid> {
        self.repository().map(|repo| calendar::project(repo, self.month))
    }

    pub fn selected_day_items(&self) -> Vec<DayItem> {
        match (self.repository(), self.selected_day) {
            (Some(repo), Some(day)) => view_model::day_items(repo, self.month, day),
            _ => Vec::new(),
        }
    }

    fn list_len(&self) -> usize {
        self.repository()
            .map(|repo| {
                repo.grouped_by_month()
                    .iter()
                    .map(|g| g.sessions.len())
                    .sum()
            })
            .unwrap_or(0)
    }

    /// Handle a key press. Returns true when the screen needs a redraw.
    pub fn on_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return true;
        }

        if self.repository().is_none() {
            if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                self.should_quit = true;
            }
            return false;
        }

        match self.nav.view() {
            View::Calendar => self.on_calendar_key(key.code),
            View::CommentList => self.on_list_key(key.code),
            View::Detail => self.on_detail_key(key.code),
        }
    }

    fn on_list_switch_key(&mut self, code: KeyCode) -> Option<bool> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
                Some(true)
            }
            KeyCode::Char('c') => Some(self.nav.show_calendar()),
            KeyCode::Char('l') => Some(self.nav.show_comments()),
            _ => None,
        }
    }

    fn on_calendar_key(&mut self, code: KeyCode) -> bool {
        if let Some(redraw) = self.on_list_switch_key(code) {
            return redraw;
        }

        match code {
            KeyCode::Left => self.move_cursor(-1),
            KeyCode::Right => self.move_cursor(1),
            KeyCode::Up => self.move_cursor(-7),
            KeyCode::Down => self.move_cursor(7),
            KeyCode::Char('[') | KeyCode::PageUp => self.set_month(self.month.prev(), None),
            KeyCode::Char(']') | KeyCode::PageDown => self.set_month(self.month.next(), None),
            KeyCode::Char('t') => self.set_month(YearMonth::of(self.today), Some(self.today.day())),
            KeyCode::Tab => {
                let count = self.selected_day_items().len();
                if count > 1 {
                    self.day_selection = (self.day_selection + 1) % count;
                    true
                } else {
                    false
                }
            }
            KeyCode::Enter => self.activate_day(),
            _ => false,
        }
    }

    fn activate_day(&mut self) -> bool {
        if self.selected_day == Some(self.cursor_day) {
            let items = self.selected_day_items();
            if let Some(item) = items.get(self.day_selection) {
                return self.open_detail(&item.class_id);
            }
            return false;
        }

        let has_class = self
            .month_grid()
            .is_some_and(|grid| grid.has_class(self.cursor_day));
        if !has_class {
            return false;
        }
        self.selected_day = Some(self.cursor_day);
        self.day_selection = 0;
        true
    }

    fn on_list_key(&mut self, code: KeyCode) -> bool {
        if let Some(redraw) = self.on_list_switch_key(code) {
            return redraw;
        }

        let len = self.list_len();
        match code {
            KeyCode::Up if self.list_selection > 0 => {
                self.list_selection -= 1;
                true
            }
            KeyCode::Down if self.list_selection + 1 < len => {
                self.list_selection += 1;
                true
            }
            KeyCode::Home => {
                self.list_selection = 0;
                true
            }
            KeyCode::End => {
                self.list_selection = len.saturating_sub(1);
                true
            }
            KeyCode::Enter if self.list_selection < len => {
                let class_id = self
                    .repository()
                    .and_then(|repo| repo.nth_descending(self.list_selection))
                    .map(|s| s.class_id.clone());
                match class_id {
                    Some(id) => self.open_detail(&id),
                    None => false,
                }
            }
            _ => false,
        }
    }

    fn on_detail_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Left | KeyCode::Char('p') => self.nav.previous(),
            KeyCode::Right | KeyCode::Char('n') => match self.load.repository() {
                Some(repo) => self.nav.next(repo),
                None => false,
            },
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => self.close_detail(),
            KeyCode::Char('q') => {
                self.should_quit = true;
                true
            }
            _ => false,
        }
    }

    pub fn open_detail(&mut self, class_id: &str) -> bool {
        match self.load.repository() {
            Some(repo) => self.nav.open_detail(repo, class_id),
            None => false,
        }
    }

    pub fn close_detail(&mut self) -> bool {
        let index = self.nav.detail_index();
        if !self.nav.close_detail() {
            return false;
        }
        // keep the list cursor on the class that was last viewed
        if let (View::CommentList, Some(index)) = (self.nav.view(), index) {
            self.list_selection = index.min(self.list_len().saturating_sub(1));
        }
        true
    }

    fn move_cursor(&mut self, delta: i64) -> bool {
        let Some(current) = self.month.day(self.cursor_day) else {
            return false;
        };
        let Some(target) = current.checked_add_signed(chrono::Duration::days(delta)) else {
            return false;
        };

        let target_month = YearMonth::of(target);
        if target_month != self.month {
            return self.set_month(target_month, Some(target.day()));
        }
        self.cursor_day = target.day();
        true
    }

    /// Show `month`; the day list of the previous month is cleared.
    pub fn set_month(&mut self, month: YearMonth, cursor_day: Option<u32>) -> bool {
        let last_day = crate::dates::days_in_month(month.year, month.month);
        self.month = month;
        self.cursor_day = cursor_day.unwrap_or(self.cursor_day).clamp(1, last_day.max(1));
        self.selected_day = None;
        self.day_selection = 0;
        true
    }
}
