use tracing::trace;

use crate::repository::SessionRepository;

/// The screen currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum View {
    Calendar,
    CommentList,
    Detail,
}

/// The non-detail view that `close_detail` returns to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListView {
    #[default]
    Calendar,
    CommentList,
}

impl From<ListView> for View {
    fn from(list: ListView) -> Self {
        match list {
            ListView::Calendar => View::Calendar,
            ListView::CommentList => View::CommentList,
        }
    }
}

/// View state machine over {Calendar, CommentList, Detail}.
///
/// Detail remembers which list view it was entered from, so backing out of a
/// detail opened from the calendar's day list lands on the calendar again.
/// Transition methods return whether anything changed so the caller knows
/// when to redraw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    view: View,
    last_list_view: ListView,
    /// position within `chronological_descending`, only meaningful in Detail
    detail_index: usize,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            view: View::Calendar,
            last_list_view: ListView::Calendar,
            detail_index: 0,
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn last_list_view(&self) -> ListView {
        self.last_list_view
    }

    pub fn detail_index(&self) -> Option<usize> {
        (self.view == View::Detail).then_some(self.detail_index)
    }

    pub fn show_calendar(&mut self) -> bool {
        self.switch_list(ListView::Calendar)
    }

    pub fn show_comments(&mut self) -> bool {
        self.switch_list(ListView::CommentList)
    }

    fn switch_list(&mut self, list: ListView) -> bool {
        let changed = self.view != View::from(list);
        self.view = list.into();
        self.last_list_view = list;
        trace!(view = %self.view, "switched list view");
        changed
    }

    /// Enter Detail for `class_id`. Unknown ids leave everything untouched.
    pub fn open_detail(&mut self, repo: &SessionRepository, class_id: &str) -> bool {
        let Some(index) = repo.position_of(class_id) else {
            trace!(class_id, "open_detail ignored, unknown class");
            return false;
        };

        // last_list_view already names the list we came from
        self.view = View::Detail;
        self.detail_index = index;
        trace!(class_id, index, "opened detail");
        true
    }

    pub fn has_previous(&self) -> bool {
        self.view == View::Detail && self.detail_index > 0
    }

    pub fn has_next(&self, repo: &SessionRepository) -> bool {
        self.view == View::Detail && self.detail_index + 1 < repo.len()
    }

    /// Move to the more recent neighbour (index - 1).
    pub fn previous(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }
        self.detail_index -= 1;
        true
    }

    /// Move to the older neighbour (index + 1).
    pub fn next(&mut self, repo: &SessionRepository) -> bool {
        if !self.has_next(repo) {
            return false;
        }
        self.detail_index += 1;
        true
    }

    /// The "back" action.
    pub fn close_detail(&mut self) -> bool {
        if self.view != View::Detail {
            return false;
        }
        self.view = self.last_list_view.into();
        trace!(view = %self.view, "closed detail");
        true
    }
}
