use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, warn};

use crate::dates::{parse_date, DateOrder};
use crate::session::ClassSession;

/// Column positions in the published sheet export.
///
/// Columns 8..=10 are subject, topic, score in that order; this matches the
/// exports the schedule sheet produces today.
pub mod columns {
    pub const CLASS_ID: usize = 0;
    pub const STUDENT_NAME: usize = 1;
    pub const STUDENT_ID: usize = 2;
    pub const ORIGINAL_DATE: usize = 3;
    pub const ORIGINAL_TIME: usize = 4;
    pub const RESCHEDULED_DATE: usize = 5;
    pub const RESCHEDULED_TIME: usize = 6;
    pub const RESCHEDULE_REASON: usize = 7;
    pub const SUBJECT: usize = 8;
    pub const TOPIC: usize = 9;
    pub const SCORE: usize = 10;
    pub const COMMENT: usize = 11;
}

/// Parse a sheet export into sessions.
///
/// The first line is always a header and is skipped. Each following line is
/// one row, read on its own so that a stray quote cannot swallow the rows
/// after it. Rows that lack a student name or an original date are dropped;
/// short or malformed rows never abort the parse.
pub fn parse(raw: &str, order: DateOrder) -> Vec<ClassSession> {
    let Some((_header, body)) = raw.split_once('\n') else {
        return Vec::new();
    };

    let mut sessions = Vec::new();
    let mut dropped = 0usize;

    for (idx, line) in body.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let record = match read_row(line) {
            Some(Ok(record)) => record,
            Some(Err(err)) => {
                warn!(line = idx + 2, %err, "skipping unreadable row");
                continue;
            }
            None => continue,
        };

        let session = session_from_record(&record, order);
        if session.student_name.is_empty() || session.original_date.is_empty() {
            dropped += 1;
            continue;
        }
        sessions.push(session);
    }

    debug!(kept = sessions.len(), dropped, "parsed sheet export");
    sessions
}

/// Read one line as a single CSV record. Quoted commas are honoured within
/// the line; an unclosed quote runs to the end of the line only.
fn read_row(line: &str) -> Option<Result<StringRecord, csv::Error>> {
    ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes())
        .records()
        .next()
}

fn session_from_record(record: &StringRecord, order: DateOrder) -> ClassSession {
    let field = |idx: usize| record.get(idx).map(str::trim).unwrap_or_default().to_string();

    let original_date = field(columns::ORIGINAL_DATE);
    let original_time = field(columns::ORIGINAL_TIME);
    let rescheduled_date = field(columns::RESCHEDULED_DATE);
    let rescheduled_time = field(columns::RESCHEDULED_TIME);

    let effective_date = prefer_rescheduled(&rescheduled_date, &original_date);
    let effective_time = prefer_rescheduled(&rescheduled_time, &original_time);

    ClassSession {
        class_id: field(columns::CLASS_ID),
        student_name: field(columns::STUDENT_NAME),
        student_id: field(columns::STUDENT_ID),
        effective_day: parse_date(&effective_date, order),
        original_day: parse_date(&original_date, order),
        original_date,
        original_time,
        rescheduled_date,
        rescheduled_time,
        reschedule_reason: field(columns::RESCHEDULE_REASON),
        subject: field(columns::SUBJECT),
        topic: field(columns::TOPIC),
        score: field(columns::SCORE),
        comment: field(columns::COMMENT).replace('"', "").trim().to_string(),
        effective_date,
        effective_time,
    }
}

fn prefer_rescheduled(rescheduled: &str, original: &str) -> String {
    if rescheduled.is_empty() {
        original.to_string()
    } else {
        rescheduled.to_string()
    }
}
