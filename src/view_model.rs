//! Plain data handed to the renderer. Nothing here knows about terminals.

use crate::calendar::YearMonth;
use crate::dates::{format_long, format_short};
use crate::loader::LoadState;
use crate::navigator::{Navigator, View};
use crate::repository::SessionRepository;
use crate::session::{non_empty_or, ClassSession, NO_TIME};

pub const TITLE_DETAIL: &str = "Class details";
pub const TITLE_NOT_FOUND: &str = "Student not found";
pub const TITLE_LOAD_FAILED: &str = "Error loading data";
pub const TITLE_NO_SELECTION: &str = "No student selected";
pub const NO_SELECTION_HINT: &str =
    "Pass a student name, e.g. `classcal --name Ann`, or set \"student\" in the config file.";

pub fn header_title(state: &LoadState, view: View) -> String {
    match state {
        LoadState::Ready { student, .. } => match view {
            View::Detail => TITLE_DETAIL.to_string(),
            View::Calendar | View::CommentList => format!("Class summary - {student}"),
        },
        LoadState::Empty { .. } => TITLE_NOT_FOUND.to_string(),
        LoadState::Failed(_) => TITLE_LOAD_FAILED.to_string(),
        LoadState::NoSelection => TITLE_NO_SELECTION.to_string(),
    }
}

/// Display form of a raw date cell; the raw text when it does not parse.
fn date_label(raw: &str, parsed: Option<chrono::NaiveDate>, long: bool) -> String {
    match parsed {
        Some(date) if long => format_long(date),
        Some(date) => format_short(date),
        None => raw.to_string(),
    }
}

/// One row in the calendar's per-day session list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayItem {
    pub class_id: String,
    pub topic: String,
    pub subject: String,
    pub time: String,
}

impl From<&ClassSession> for DayItem {
    fn from(s: &ClassSession) -> Self {
        Self {
            class_id: s.class_id.clone(),
            topic: s.topic.clone(),
            subject: s.subject.clone(),
            time: s.effective_time.clone(),
        }
    }
}

pub fn day_items(repo: &SessionRepository, month: YearMonth, day: u32) -> Vec<DayItem> {
    repo.sessions_on(month.year, month.month, day)
        .into_iter()
        .map(DayItem::from)
        .collect()
}

/// One card in the comment list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub class_id: String,
    pub topic: String,
    pub subject: String,
    pub date: String,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthSection {
    pub title: String,
    pub items: Vec<ListItem>,
}

pub fn comment_sections(repo: &SessionRepository) -> Vec<MonthSection> {
    repo.grouped_by_month()
        .into_iter()
        .map(|group| MonthSection {
            title: YearMonth::new(group.year, group.month)
                .map(YearMonth::title)
                .unwrap_or_default(),
            items: group
                .sessions
                .into_iter()
                .map(|s| ListItem {
                    class_id: s.class_id.clone(),
                    topic: s.topic.clone(),
                    subject: s.subject.clone(),
                    date: date_label(&s.effective_date, s.effective_day, false),
                    time: s.time_or_placeholder().to_string(),
                })
                .collect(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RescheduleInfo {
    pub original_date: String,
    pub original_time: String,
    pub new_date: String,
    pub new_time: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailModel {
    pub topic: String,
    pub reschedule: Option<RescheduleInfo>,
    pub date: String,
    pub time: String,
    pub subject: String,
    pub score: String,
    pub comment: String,
    pub has_previous: bool,
    pub has_next: bool,
    /// 1-based position and total, newest first
    pub position: (usize, usize),
}

pub fn detail(repo: &SessionRepository, nav: &Navigator) -> Option<DetailModel> {
    let index = nav.detail_index()?;
    let s = repo.nth_descending(index)?;

    let reschedule = s.is_rescheduled().then(|| RescheduleInfo {
        original_date: date_label(&s.original_date, s.original_day, false),
        original_time: non_empty_or(&s.original_time, NO_TIME).to_string(),
        new_date: date_label(&s.rescheduled_date, s.effective_day, false),
        new_time: non_empty_or(&s.rescheduled_time, NO_TIME).to_string(),
        reason: s.reason_or_placeholder().to_string(),
    });

    Some(DetailModel {
        topic: s.topic.clone(),
        reschedule,
        date: date_label(&s.effective_date, s.effective_day, true),
        time: s.time_or_placeholder().to_string(),
        subject: non_empty_or(&s.subject, "-").to_string(),
        score: s.score_or_placeholder().to_string(),
        comment: s.comment_or_placeholder().to_string(),
        has_previous: nav.has_previous(),
        has_next: nav.has_next(repo),
        position: (index + 1, repo.len()),
    })
}
