//! Submission types, the single persisted entity of the intake.
//!
//! A submission is written once and never updated or deleted. Field names on
//! the wire follow the `inscricoes` collection layout (camelCase).

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter};
use uuid::Uuid;

use crate::schedule::CourseSchedule;

// ─── Option lists ────────────────────────────────────────────────────────────

/// Courses an applicant may have completed. [`Course::Outros`] is the Other
/// sentinel that unlocks the free-text course name.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Serialize,
  Deserialize,
  AsRefStr,
  Display,
  EnumIter,
)]
pub enum Course {
  #[serde(rename = "Informática")]
  #[strum(serialize = "Informática")]
  Informatica,
  Excel,
  #[serde(rename = "Power BI")]
  #[strum(serialize = "Power BI")]
  PowerBi,
  #[serde(rename = "Design Gráfico")]
  #[strum(serialize = "Design Gráfico")]
  DesignGrafico,
  #[serde(rename = "Programação")]
  #[strum(serialize = "Programação")]
  Programacao,
  Outros,
}

/// When the applicant can work as an intern.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  AsRefStr,
  Display,
  EnumIter,
)]
pub enum Availability {
  #[serde(rename = "Manhã")]
  #[strum(serialize = "Manhã")]
  Manha,
  Tarde,
  #[serde(rename = "Manhã e Tarde")]
  #[strum(serialize = "Manhã e Tarde")]
  ManhaETarde,
  #[serde(rename = "Flexível")]
  #[strum(serialize = "Flexível")]
  Flexivel,
}

// ─── NewSubmission ───────────────────────────────────────────────────────────

/// Input to [`crate::store::SubmissionStore::create_submission`]: normalised,
/// validated field values. `id` and `created_at` are always assigned by the
/// store and are not accepted from callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubmission {
  pub full_name:         String,
  /// Canonical digits-only phone.
  pub phone:             String,
  pub school_name:       String,
  pub completed_courses: BTreeSet<Course>,
  /// Only ever `Some` when `completed_courses` contains [`Course::Outros`].
  pub other_course_name: Option<String>,
  pub availability:      Availability,
  pub course_schedule:   CourseSchedule,
}

impl NewSubmission {
  /// Persist this input under a store-assigned id and timestamp.
  pub fn into_submission(self, id: Uuid, created_at: DateTime<Utc>) -> Submission {
    Submission {
      id,
      full_name: self.full_name,
      phone: self.phone,
      school_name: self.school_name,
      completed_courses: self.completed_courses,
      other_course_name: self.other_course_name,
      availability: self.availability,
      course_schedule: self.course_schedule,
      created_at,
    }
  }
}

// ─── Submission ──────────────────────────────────────────────────────────────

/// A persisted application. Once written, no field is ever updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
  pub id:                Uuid,
  pub full_name:         String,
  pub phone:             String,
  pub school_name:       String,
  #[serde(default)]
  pub completed_courses: BTreeSet<Course>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub other_course_name: Option<String>,
  #[serde(rename = "internshipAvailability", alias = "availability")]
  pub availability:      Availability,
  #[serde(default)]
  pub course_schedule:   CourseSchedule,
  /// Store-assigned timestamp; never changes after creation.
  pub created_at:        DateTime<Utc>,
}

impl Submission {
  /// The free-text course name, only when the Other sentinel is selected.
  pub fn other_course(&self) -> Option<&str> {
    self
      .completed_courses
      .contains(&Course::Outros)
      .then_some(self.other_course_name.as_deref())
      .flatten()
      .filter(|name| !name.trim().is_empty())
  }
}
