use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use itertools::Itertools;

use crate::session::ClassSession;

/// The sessions of a single student for the lifetime of one load.
///
/// Built once from the parsed export and never mutated afterwards; every
/// query is a pure read.
#[derive(Debug, Clone, Default)]
pub struct SessionRepository {
    student: String,
    sessions: Vec<ClassSession>,
    /// indices into `sessions`, newest effective date first
    descending: Vec<usize>,
}

/// Consecutive sessions of [`SessionRepository::chronological_descending`]
/// that share a year and month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGroup<'a> {
    pub year: i32,
    pub month: u32,
    pub sessions: Vec<&'a ClassSession>,
}

impl SessionRepository {
    pub fn new(all: Vec<ClassSession>, student: &str) -> Self {
        let sessions: Vec<ClassSession> = all
            .into_iter()
            .filter(|s| s.student_name == student)
            .collect();

        let mut descending: Vec<usize> = (0..sessions.len()).collect();
        // stable: equal dates keep parse order, undated sessions go last
        descending.sort_by(|&a, &b| {
            match (sessions[a].effective_day, sessions[b].effective_day) {
                (Some(da), Some(db)) => db.cmp(&da),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            }
        });

        Self {
            student: student.to_string(),
            sessions,
            descending,
        }
    }

    pub fn student(&self) -> &str {
        &self.student
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// All of the student's sessions in parse order.
    pub fn all_sessions(&self) -> &[ClassSession] {
        &self.sessions
    }

    /// Sessions whose effective date is exactly `year-month-day`, in parse order.
    pub fn sessions_on(&self, year: i32, month: u32, day: u32) -> Vec<&ClassSession> {
        let Some(target) = NaiveDate::from_ymd_opt(year, month, day) else {
            return Vec::new();
        };

        self.sessions
            .iter()
            .filter(|s| s.effective_day == Some(target))
            .collect()
    }

    /// Distinct days of `year-month` that have at least one session.
    pub fn session_days_in(&self, year: i32, month: u32) -> BTreeSet<u32> {
        self.sessions
            .iter()
            .filter_map(|s| s.effective_day)
            .filter(|d| d.year() == year && d.month() == month)
            .map(|d| d.day())
            .collect()
    }

    /// Sessions ordered by effective date, most recent first.
    pub fn chronological_descending(&self) -> Vec<&ClassSession> {
        self.descending.iter().map(|&i| &self.sessions[i]).collect()
    }

    /// Position of `class_id` within [`Self::chronological_descending`].
    pub fn position_of(&self, class_id: &str) -> Option<usize> {
        self.descending
            .iter()
            .position(|&i| self.sessions[i].class_id == class_id)
    }

    /// Session at `index` of [`Self::chronological_descending`].
    pub fn nth_descending(&self, index: usize) -> Option<&ClassSession> {
        self.descending.get(index).map(|&i| &self.sessions[i])
    }

    /// Newest-first sessions bucketed by month, for the comment list.
    ///
    /// Sessions without a parseable date are not grouped.
    pub fn grouped_by_month(&self) -> Vec<MonthGroup<'_>> {
        self.chronological_descending()
            .into_iter()
            .filter_map(|s| s.effective_day.map(|d| ((d.year(), d.month()), s)))
            .chunk_by(|(key, _)| *key)
            .into_iter()
            .map(|((year, month), group)| MonthGroup {
                year,
                month,
                sessions: group.map(|(_, s)| s).collect(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::{parse_date, DateOrder};

    fn session(id: &str, student: &str, date: &str) -> ClassSession {
        ClassSession {
            class_id: id.into(),
            student_name: student.into(),
            original_date: date.into(),
            effective_date: date.into(),
            effective_day: parse_date(date, DateOrder::MonthFirst),
            ..Default::default()
        }
    }

    fn fixture() -> SessionRepository {
        SessionRepository::new(
            vec![
                session("a", "Ann", "2024-05-01"),
                session("b", "Bob", "2024-05-02"),
                session("c", "Ann", "2024-06-15"),
                session("d", "Ann", "2024-05-01"),
                session("e", "Ann", "2024-04-30"),
                session("f", "Ann", "2024-05-20"),
            ],
            "Ann",
        )
    }

    fn ids(sessions: &[&ClassSession]) -> Vec<String> {
        sessions.iter().map(|s| s.class_id.clone()).collect()
    }

    #[test]
    fn filters_to_the_target_student_in_parse_order() {
        let repo = fixture();
        let all: Vec<&str> = repo.all_sessions().iter().map(|s| s.class_id.as_str()).collect();
        assert_eq!(all, vec!["a", "c", "d", "e", "f"]);
        assert_eq!(repo.student(), "Ann");
        assert_eq!(repo.len(), 5);
    }

    #[test]
    fn unknown_student_is_empty_not_an_error() {
        let repo = SessionRepository::new(vec![session("b", "Bob", "2024-05-02")], "Ann");
        assert!(repo.is_empty());
        assert!(repo.chronological_descending().is_empty());
        assert!(repo.grouped_by_month().is_empty());
    }

    #[test]
    fn sessions_on_an_exact_day() {
        let repo = fixture();
        assert_eq!(ids(&repo.sessions_on(2024, 5, 1)), vec!["a", "d"]);
        assert!(repo.sessions_on(2024, 5, 2).is_empty());
        assert!(repo.sessions_on(2024, 2, 30).is_empty());
        assert_eq!(repo.sessions_on(2024, 5, 1), repo.sessions_on(2024, 5, 1));
    }

    #[test]
    fn session_days_stay_inside_the_month() {
        let repo = fixture();
        assert_eq!(repo.session_days_in(2024, 5), BTreeSet::from([1, 20]));
        assert_eq!(repo.session_days_in(2024, 4), BTreeSet::from([30]));
        assert_eq!(repo.session_days_in(2024, 6), BTreeSet::from([15]));
        assert!(repo.session_days_in(2023, 5).is_empty());
    }

    #[test]
    fn descending_is_a_stable_permutation() {
        let repo = fixture();
        let sorted = repo.chronological_descending();
        assert_eq!(ids(&sorted), vec!["c", "f", "a", "d", "e"]);
        assert_eq!(sorted.len(), repo.all_sessions().len());
        for pair in sorted.windows(2) {
            assert!(pair[0].effective_day >= pair[1].effective_day);
        }
    }

    #[test]
    fn undated_sessions_sort_last() {
        let repo = SessionRepository::new(
            vec![
                session("x", "Ann", "whenever"),
                session("a", "Ann", "2024-05-01"),
                session("y", "Ann", "later"),
                session("b", "Ann", "2024-06-01"),
            ],
            "Ann",
        );
        assert_eq!(ids(&repo.chronological_descending()), vec!["b", "a", "x", "y"]);
        assert_eq!(repo.grouped_by_month().len(), 2);
    }

    #[test]
    fn positions_in_descending_order() {
        let repo = fixture();
        assert_eq!(repo.position_of("c"), Some(0));
        assert_eq!(repo.position_of("e"), Some(4));
        assert_eq!(repo.position_of("b"), None);
        assert_eq!(repo.nth_descending(1).map(|s| s.class_id.as_str()), Some("f"));
        assert!(repo.nth_descending(5).is_none());
    }

    #[test]
    fn groups_by_month_newest_first() {
        let repo = fixture();
        let groups = repo.grouped_by_month();
        let keys: Vec<(i32, u32)> = groups.iter().map(|g| (g.year, g.month)).collect();
        assert_eq!(keys, vec![(2024, 6), (2024, 5), (2024, 4)]);
        assert_eq!(ids(&groups[1].sessions), vec!["f", "a", "d"]);
    }
}
