use tracing::{error, info, warn};

use crate::dates::DateOrder;
use crate::error::LoadError;
use crate::parser;
use crate::repository::SessionRepository;
use crate::source::TextSource;

/// Outcome of the one-shot startup load. Exactly one of these is reported
/// per run and none of them is retried.
#[derive(Debug)]
pub enum LoadState {
    Ready {
        student: String,
        repository: SessionRepository,
    },
    /// The student was selected and the data loaded, but nothing matched.
    Empty { student: String },
    NoSelection,
    Failed(LoadError),
}

impl LoadState {
    pub fn repository(&self) -> Option<&SessionRepository> {
        match self {
            LoadState::Ready { repository, .. } => Some(repository),
            _ => None,
        }
    }

    pub fn student(&self) -> Option<&str> {
        match self {
            LoadState::Ready { student, .. } | LoadState::Empty { student } => Some(student),
            _ => None,
        }
    }
}

/// Normalize the selector: blank means nothing was selected.
pub fn selected_student(selector: Option<&str>) -> Option<String> {
    selector
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

/// Fetch, parse and filter the schedule for the selected student.
///
/// Without a selection no fetch is attempted.
pub fn load(selector: Option<&str>, source: &dyn TextSource, order: DateOrder) -> LoadState {
    let Some(student) = selected_student(selector) else {
        warn!("no student selected, skipping fetch");
        return LoadState::NoSelection;
    };

    let text = match source.fetch_text() {
        Ok(text) => text,
        Err(err) => {
            error!(source = %source.describe(), %err, "failed to load schedule");
            return LoadState::Failed(err);
        }
    };

    let sessions = parser::parse(&text, order);
    let total = sessions.len();
    let repository = SessionRepository::new(sessions, &student);
    info!(
        student = %student,
        total,
        matched = repository.len(),
        %order,
        "schedule loaded"
    );

    if repository.is_empty() {
        LoadState::Empty { student }
    } else {
        LoadState::Ready {
            student,
            repository,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StaticSource;
    use assert_matches::assert_matches;
    use std::cell::Cell;

    const DATA: &str = "header\n\
        C1,Ann,S1,2024-05-01,10:00,,,,Math,Algebra,90,\"good\"\n\
        C2,Bob,S2,2024-05-02,11:00,,,,Math,Algebra,80,ok\n";

    struct CountingSource {
        calls: Cell<usize>,
    }

    impl TextSource for CountingSource {
        fn fetch_text(&self) -> Result<String, LoadError> {
            self.calls.set(self.calls.get() + 1);
            Ok(DATA.to_string())
        }

        fn describe(&self) -> String {
            "counting".into()
        }
    }

    struct FailingSource;

    impl TextSource for FailingSource {
        fn fetch_text(&self) -> Result<String, LoadError> {
            Err(LoadError::Status {
                url: "https://example.test".into(),
                status: 500,
            })
        }

        fn describe(&self) -> String {
            "failing".into()
        }
    }

    #[test]
    fn ready_when_the_student_has_sessions() {
        let state = load(Some("Ann"), &StaticSource::new(DATA), DateOrder::MonthFirst);
        assert_matches!(&state, LoadState::Ready { student, repository } => {
            assert_eq!(student, "Ann");
            assert_eq!(repository.len(), 1);
        });
        assert_eq!(state.student(), Some("Ann"));
        assert!(state.repository().is_some());
    }

    #[test]
    fn selector_is_trimmed() {
        let state = load(Some("  Ann "), &StaticSource::new(DATA), DateOrder::MonthFirst);
        assert_eq!(state.student(), Some("Ann"));
    }

    #[test]
    fn empty_when_nobody_matches() {
        let state = load(Some("Cat"), &StaticSource::new(DATA), DateOrder::MonthFirst);
        assert_matches!(state, LoadState::Empty { ref student } if student == "Cat");
        assert!(state.repository().is_none());
    }

    #[test]
    fn no_selection_skips_the_fetch() {
        let source = CountingSource {
            calls: Cell::new(0),
        };
        assert_matches!(load(None, &source, DateOrder::MonthFirst), LoadState::NoSelection);
        assert_matches!(load(Some("  "), &source, DateOrder::MonthFirst), LoadState::NoSelection);
        assert_eq!(source.calls.get(), 0);

        load(Some("Ann"), &source, DateOrder::MonthFirst);
        assert_eq!(source.calls.get(), 1);
    }

    #[test]
    fn fetch_failure_is_reported_once() {
        let state = load(Some("Ann"), &FailingSource, DateOrder::MonthFirst);
        assert_matches!(state, LoadState::Failed(LoadError::Status { status: 500, .. }));
        assert!(state.student().is_none());
    }
}
