//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as fixed-width RFC 3339 strings (microseconds, `Z`
//! suffix) so that lexical order equals chronological order. Option-list
//! values are stored as their display labels; collections as compact JSON.

use std::collections::BTreeSet;

use chrono::{DateTime, SecondsFormat, Utc};
use estagio_core::{
  schedule::CourseSchedule,
  submission::{Availability, Course, Submission},
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Availability ────────────────────────────────────────────────────────────

pub fn encode_availability(a: Availability) -> String { a.to_string() }

pub fn decode_availability(s: &str) -> Result<Availability> {
  Ok(serde_json::from_value(serde_json::Value::String(s.to_owned()))?)
}

// ─── Courses ─────────────────────────────────────────────────────────────────

pub fn encode_courses(courses: &BTreeSet<Course>) -> Result<String> {
  Ok(serde_json::to_string(courses)?)
}

pub fn decode_courses(s: &str) -> Result<BTreeSet<Course>> {
  Ok(serde_json::from_str(s)?)
}

// ─── CourseSchedule ──────────────────────────────────────────────────────────

pub fn encode_schedule(schedule: &CourseSchedule) -> Result<String> {
  Ok(serde_json::to_string(schedule)?)
}

pub fn decode_schedule(s: &str) -> Result<CourseSchedule> {
  Ok(serde_json::from_str(s)?)
}

// ─── Row type ────────────────────────────────────────────────────────────────

pub const COLUMNS: &str = "id, created_at, full_name, phone, school_name, \
                           completed_courses, other_course_name, \
                           internship_availability, course_schedule";

/// Raw strings read directly from an `inscricoes` row, in [`COLUMNS`] order.
pub struct RawSubmission {
  pub id:                String,
  pub created_at:        String,
  pub full_name:         String,
  pub phone:             String,
  pub school_name:       String,
  pub completed_courses: String,
  pub other_course_name: Option<String>,
  pub availability:      String,
  pub course_schedule:   String,
}

impl RawSubmission {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:                row.get(0)?,
      created_at:        row.get(1)?,
      full_name:         row.get(2)?,
      phone:             row.get(3)?,
      school_name:       row.get(4)?,
      completed_courses: row.get(5)?,
      other_course_name: row.get(6)?,
      availability:      row.get(7)?,
      course_schedule:   row.get(8)?,
    })
  }

  /// Encode a submission for insertion.
  pub fn encode(s: &Submission) -> Result<Self> {
    Ok(Self {
      id:                encode_uuid(s.id),
      created_at:        encode_dt(s.created_at),
      full_name:         s.full_name.clone(),
      phone:             s.phone.clone(),
      school_name:       s.school_name.clone(),
      completed_courses: encode_courses(&s.completed_courses)?,
      other_course_name: s.other_course_name.clone(),
      availability:      encode_availability(s.availability),
      course_schedule:   encode_schedule(&s.course_schedule)?,
    })
  }

  pub fn into_submission(self) -> Result<Submission> {
    Ok(Submission {
      id:                decode_uuid(&self.id)?,
      created_at:        decode_dt(&self.created_at)?,
      full_name:         self.full_name,
      phone:             self.phone,
      school_name:       self.school_name,
      completed_courses: decode_courses(&self.completed_courses)?,
      other_course_name: self.other_course_name,
      availability:      decode_availability(&self.availability)?,
      course_schedule:   decode_schedule(&self.course_schedule)?,
    })
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone as _;

  use super::*;

  #[test]
  fn timestamps_sort_lexically() {
    let a = Utc.with_ymd_and_hms(2025, 1, 10, 9, 0, 0).unwrap();
    let b = a + chrono::Duration::microseconds(1);
    let c = a + chrono::Duration::hours(20);
    let (ea, eb, ec) = (encode_dt(a), encode_dt(b), encode_dt(c));
    assert_eq!(ea, "2025-01-10T09:00:00.000000Z");
    assert!(ea < eb && eb < ec);
    assert_eq!(decode_dt(&eb).unwrap(), b);
  }

  #[test]
  fn availability_uses_labels() {
    assert_eq!(encode_availability(Availability::ManhaETarde), "Manhã e Tarde");
    assert_eq!(decode_availability("Flexível").unwrap(), Availability::Flexivel);
    assert!(decode_availability("Noite").is_err());
  }
}
