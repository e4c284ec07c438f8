use std::collections::BTreeSet;
use std::path::PathBuf;

use assert_matches::assert_matches;
use classcal::{
    calendar::{self, YearMonth},
    dates::DateOrder,
    load,
    source::FileSource,
    LoadState, Navigator, View,
};

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("schedule.csv")
}

fn ready(student: &str) -> classcal::SessionRepository {
    match load(Some(student), &FileSource::new(fixture()), DateOrder::MonthFirst) {
        LoadState::Ready { repository, .. } => repository,
        other => panic!("expected Ready, got {other:?}"),
    }
}

#[test]
fn loads_only_the_selected_student() {
    let repo = ready("Ann");
    let ids: Vec<&str> = repo.all_sessions().iter().map(|s| s.class_id.as_str()).collect();
    assert_eq!(ids, vec!["C1", "C3", "C4", "C5", "C6"]);
    assert!(repo
        .all_sessions()
        .iter()
        .all(|s| !s.student_name.is_empty() && !s.original_date.is_empty()));
}

#[test]
fn effective_values_follow_reschedules() {
    let repo = ready("Ann");
    for s in repo.all_sessions() {
        if s.rescheduled_date.is_empty() {
            assert_eq!(s.effective_date, s.original_date);
        } else {
            assert_eq!(s.effective_date, s.rescheduled_date);
        }
        if s.rescheduled_time.is_empty() {
            assert_eq!(s.effective_time, s.original_time);
        } else {
            assert_eq!(s.effective_time, s.rescheduled_time);
        }
    }

    let on_ninth = repo.sessions_on(2024, 5, 9);
    let moved = on_ninth[0];
    assert_eq!(moved.class_id, "C3");
    assert_eq!(moved.effective_time, "16:00");
    assert_eq!(moved.comment, "Asked great questions");
    assert!(repo.sessions_on(2024, 5, 8).is_empty());
}

#[test]
fn calendar_projection_for_may() {
    let repo = ready("Ann");
    let may = YearMonth::new(2024, 5).unwrap();
    let grid = calendar::project(&repo, may);

    assert_eq!(grid.class_days, BTreeSet::from([1, 9, 15]));
    assert_eq!(grid.leading_blanks, 3);
    assert_eq!(grid.days_in_month, 31);
    assert_eq!(calendar::days_with_classes(&repo, may.prev()), BTreeSet::from([30]));
    assert_eq!(repo.session_days_in(2024, 5), repo.session_days_in(2024, 5));
}

#[test]
fn chronological_order_is_newest_first() {
    let repo = ready("Ann");
    let sorted = repo.chronological_descending();
    let ids: Vec<&str> = sorted.iter().map(|s| s.class_id.as_str()).collect();
    assert_eq!(ids, vec!["C6", "C4", "C3", "C1", "C5"]);
    for pair in sorted.windows(2) {
        assert!(pair[0].effective_day >= pair[1].effective_day);
    }
}

#[test]
fn detail_back_navigation_remembers_the_origin() {
    let repo = ready("Ann");

    let mut nav = Navigator::new();
    nav.open_detail(&repo, "C3");
    nav.next(&repo);
    nav.close_detail();
    assert_eq!(nav.view(), View::Calendar);

    nav.show_comments();
    nav.open_detail(&repo, "C6");
    assert!(!nav.has_previous());
    nav.close_detail();
    assert_eq!(nav.view(), View::CommentList);
}

#[test]
fn unknown_student_and_missing_file() {
    let state = load(Some("Zed"), &FileSource::new(fixture()), DateOrder::MonthFirst);
    assert_matches!(state, LoadState::Empty { .. });

    let state = load(
        Some("Ann"),
        &FileSource::new(fixture().with_file_name("missing.csv")),
        DateOrder::MonthFirst,
    );
    assert_matches!(state, LoadState::Failed(classcal::LoadError::Unreadable(_)));

    let state = load(None, &FileSource::new(fixture()), DateOrder::MonthFirst);
    assert_matches!(state, LoadState::NoSelection);
}
