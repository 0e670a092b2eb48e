//! Course schedule representations.
//!
//! A submission records when the applicant attends classes either as free
//! text or as a per-weekday map of time ranges. Which of the two a form
//! collects is fixed when the form is built ([`ScheduleMode`]); the stored
//! [`CourseSchedule`] keeps whichever shape was collected.

use std::{collections::BTreeMap, fmt};

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, IntoEnumIterator as _};

/// Wire and input format for times of day.
pub const TIME_FORMAT: &str = "%H:%M";

// ─── Weekday ─────────────────────────────────────────────────────────────────

/// The fixed list of days offered by the structured schedule.
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
pub enum Weekday {
  Segunda,
  #[serde(rename = "Terça")]
  #[strum(serialize = "Terça")]
  Terca,
  Quarta,
  Quinta,
  Sexta,
  #[serde(rename = "Sábado")]
  #[strum(serialize = "Sábado")]
  Sabado,
}

// ─── TimeRange ───────────────────────────────────────────────────────────────

/// A `from`–`to` pair of times of day, serialised as `"HH:MM"` strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
  #[serde(with = "hhmm")]
  pub from: NaiveTime,
  #[serde(with = "hhmm")]
  pub to:   NaiveTime,
}

impl fmt::Display for TimeRange {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{}–{}",
      self.from.format(TIME_FORMAT),
      self.to.format(TIME_FORMAT)
    )
  }
}

/// Parse a time typed as `HH:MM`, ignoring surrounding whitespace.
pub fn parse_time(input: &str) -> Option<NaiveTime> {
  NaiveTime::parse_from_str(input.trim(), TIME_FORMAT).ok()
}

mod hhmm {
  use chrono::NaiveTime;
  use serde::{Deserialize as _, Deserializer, Serializer, de};

  use super::TIME_FORMAT;

  pub fn serialize<S: Serializer>(
    time: &NaiveTime,
    serializer: S,
  ) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&time.format(TIME_FORMAT))
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(
    deserializer: D,
  ) -> Result<NaiveTime, D::Error> {
    let raw = String::deserialize(deserializer)?;
    super::parse_time(&raw)
      .ok_or_else(|| de::Error::custom(format!("expected HH:MM, got {raw:?}")))
  }
}

// ─── Stored schedule ─────────────────────────────────────────────────────────

/// The stored `courseSchedule` value. Untagged on the wire: a JSON string is
/// the free-text variant, a JSON object the per-weekday variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CourseSchedule {
  FreeText(String),
  Weekly(BTreeMap<Weekday, TimeRange>),
}

impl CourseSchedule {
  pub fn is_empty(&self) -> bool {
    match self {
      Self::FreeText(text) => text.trim().is_empty(),
      Self::Weekly(days) => days.is_empty(),
    }
  }
}

impl Default for CourseSchedule {
  fn default() -> Self { Self::Weekly(BTreeMap::new()) }
}

// ─── Form-side schedule ──────────────────────────────────────────────────────

/// Which schedule representation a form collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScheduleMode {
  FreeText,
  #[default]
  Weekly,
}

/// One weekday row of the structured schedule input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayInput {
  pub checked: bool,
  pub from:    String,
  pub to:      String,
}

/// Raw schedule input, shaped by the form's [`ScheduleMode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleInput {
  FreeText(String),
  Weekly(BTreeMap<Weekday, DayInput>),
}

impl ScheduleInput {
  /// Empty input for `mode`. The weekly variant carries one unchecked row per
  /// day so the form can render the full day list.
  pub fn empty(mode: ScheduleMode) -> Self {
    match mode {
      ScheduleMode::FreeText => Self::FreeText(String::new()),
      ScheduleMode::Weekly => Self::Weekly(
        Weekday::iter().map(|day| (day, DayInput::default())).collect(),
      ),
    }
  }

  pub fn mode(&self) -> ScheduleMode {
    match self {
      Self::FreeText(_) => ScheduleMode::FreeText,
      Self::Weekly(_) => ScheduleMode::Weekly,
    }
  }

  /// Prefill the input from a stored schedule.
  pub fn from_schedule(schedule: &CourseSchedule) -> Self {
    match schedule {
      CourseSchedule::FreeText(text) => Self::FreeText(text.clone()),
      CourseSchedule::Weekly(days) => {
        let mut input = Self::empty(ScheduleMode::Weekly);
        if let Self::Weekly(rows) = &mut input {
          for (day, range) in days {
            rows.insert(*day, DayInput {
              checked: true,
              from:    range.from.format(TIME_FORMAT).to_string(),
              to:      range.to.format(TIME_FORMAT).to_string(),
            });
          }
        }
        input
      }
    }
  }
}
