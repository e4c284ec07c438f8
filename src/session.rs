use chrono::NaiveDate;

pub const NO_TIME: &str = "N/A";
pub const NO_SCORE: &str = "No score";
pub const NO_COMMENT: &str = "No comment";
pub const NO_REASON: &str = "Not specified";

/// One scheduled class for a student, as read from a single sheet row.
///
/// The `effective_*` fields are resolved once by the parser: the rescheduled
/// value when one exists, the original otherwise. Everything downstream
/// (calendar placement, sorting, grouping) reads only those.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClassSession {
    pub class_id: String,
    pub student_name: String,
    pub student_id: String,
    pub original_date: String,
    pub original_time: String,
    pub rescheduled_date: String,
    pub rescheduled_time: String,
    pub reschedule_reason: String,
    pub subject: String,
    pub topic: String,
    pub score: String,
    pub comment: String,
    pub effective_date: String,
    pub effective_time: String,
    /// `effective_date` as a calendar date, `None` when it could not be parsed
    pub effective_day: Option<NaiveDate>,
    /// `original_date` as a calendar date, used only for display
    pub original_day: Option<NaiveDate>,
}

impl ClassSession {
    pub fn is_rescheduled(&self) -> bool {
        !self.rescheduled_date.trim().is_empty()
    }

    pub fn time_or_placeholder(&self) -> &str {
        non_empty_or(&self.effective_time, NO_TIME)
    }

    pub fn score_or_placeholder(&self) -> &str {
        non_empty_or(&self.score, NO_SCORE)
    }

    pub fn comment_or_placeholder(&self) -> &str {
        non_empty_or(&self.comment, NO_COMMENT)
    }

    pub fn reason_or_placeholder(&self) -> &str {
        non_empty_or(&self.reschedule_reason, NO_REASON)
    }
}

pub(crate) fn non_empty_or<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.is_empty() {
        placeholder
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_only_replace_empty_fields() {
        let mut session = ClassSession::default();
        assert_eq!(session.time_or_placeholder(), NO_TIME);
        assert_eq!(session.score_or_placeholder(), NO_SCORE);
        assert_eq!(session.comment_or_placeholder(), NO_COMMENT);
        assert_eq!(session.reason_or_placeholder(), NO_REASON);

        session.effective_time = "10:00".into();
        session.score = "90".into();
        session.comment = "good".into();
        session.reschedule_reason = "sick".into();
        assert_eq!(session.time_or_placeholder(), "10:00");
        assert_eq!(session.score_or_placeholder(), "90");
        assert_eq!(session.comment_or_placeholder(), "good");
        assert_eq!(session.reason_or_placeholder(), "sick");
    }

    #[test]
    fn rescheduled_requires_a_new_date() {
        let mut session = ClassSession::default();
        assert!(!session.is_rescheduled());
        session.rescheduled_date = "  ".into();
        assert!(!session.is_rescheduled());
        session.rescheduled_date = "2024-05-10".into();
        assert!(session.is_rescheduled());
    }
}
