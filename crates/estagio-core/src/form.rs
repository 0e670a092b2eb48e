//! The application form: field state, validation, and the submit lifecycle.
//!
//! [`ApplicationForm`] holds what the applicant has typed so far. Fields whose
//! visibility depends on a checkbox (the "other course" name, per-weekday
//! times) are cleared when their checkbox is unchecked, and normalisation
//! ignores them anyway, so stale input can never reach a submission.
//!
//! [`FormController`] wraps a form with an injected [`SubmissionStore`] and
//! drives `idle → submitting → success | error`.

use std::{
  collections::{BTreeMap, BTreeSet},
  fmt,
  sync::Arc,
};

use crate::{
  Error, Result,
  phone,
  schedule::{
    CourseSchedule, DayInput, ScheduleInput, ScheduleMode, TimeRange, Weekday,
    parse_time,
  },
  store::SubmissionStore,
  submission::{Availability, Course, NewSubmission, Submission},
  writer,
};

pub const SUCCESS_MESSAGE: &str = "Inscrição enviada com sucesso! Boa sorte!";
pub const FAILURE_MESSAGE: &str =
  "Houve um erro ao enviar sua inscrição. Tente novamente.";

// ─── Fields and errors ───────────────────────────────────────────────────────

/// A validated input of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
  FullName,
  Phone,
  SchoolName,
  Availability,
  /// The free-text schedule input.
  CourseSchedule,
  DayFrom(Weekday),
  DayTo(Weekday),
}

impl Field {
  /// Stable key used in API error bodies, e.g. `fullName` or
  /// `courseSchedule.Terça.from`.
  pub fn key(&self) -> String {
    match self {
      Self::FullName => "fullName".into(),
      Self::Phone => "phone".into(),
      Self::SchoolName => "schoolName".into(),
      Self::Availability => "internshipAvailability".into(),
      Self::CourseSchedule => "courseSchedule".into(),
      Self::DayFrom(day) => format!("courseSchedule.{day}.from"),
      Self::DayTo(day) => format!("courseSchedule.{day}.to"),
    }
  }
}

/// Why a field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
  /// Empty, whitespace-only, or still on the placeholder option.
  Required,
  /// More digits than a number with area code can hold. Raised where a whole
  /// value arrives at once; typed input is truncated instead.
  PhoneTooLong,
  /// A time that does not parse as `HH:MM`.
  InvalidTime,
}

impl FieldError {
  /// The inline message shown next to `field`.
  pub fn message(&self, field: Field) -> &'static str {
    match (self, field) {
      (Self::Required, Field::FullName) => "O nome completo é obrigatório.",
      (Self::Required, Field::Phone) => "O telefone é obrigatório.",
      (Self::Required, Field::SchoolName) => "O nome da escola é obrigatório.",
      (Self::Required, Field::Availability) => "Selecione uma opção.",
      (Self::Required, Field::CourseSchedule) => "Esta informação é obrigatória.",
      (Self::Required, Field::DayFrom(_) | Field::DayTo(_)) => "Informe o horário.",
      (Self::PhoneTooLong, _) => "O telefone deve ter no máximo 11 dígitos.",
      (Self::InvalidTime, _) => "Use o formato HH:MM.",
    }
  }
}

/// Per-field validation failures, keyed in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<Field, FieldError>);

impl ValidationErrors {
  pub fn insert(&mut self, field: Field, error: FieldError) {
    self.0.insert(field, error);
  }

  pub fn get(&self, field: Field) -> Option<FieldError> { self.0.get(&field).copied() }

  /// The inline message for `field`, if it failed.
  pub fn message(&self, field: Field) -> Option<&'static str> {
    self.get(field).map(|e| e.message(field))
  }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  pub fn len(&self) -> usize { self.0.len() }

  pub fn iter(&self) -> impl Iterator<Item = (Field, FieldError)> + '_ {
    self.0.iter().map(|(f, e)| (*f, *e))
  }

  pub fn clear(&mut self) { self.0.clear(); }
}

impl fmt::Display for ValidationErrors {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut first = true;
    for (field, error) in self.iter() {
      if !first {
        f.write_str(", ")?;
      }
      first = false;
      write!(f, "{}: {}", field.key(), error.message(field))?;
    }
    Ok(())
  }
}

// ─── ApplicationForm ─────────────────────────────────────────────────────────

/// Raw field values as entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationForm {
  pub full_name:     String,
  /// Kept in masked form; see [`phone::mask`].
  phone:             String,
  pub school_name:   String,
  completed_courses: BTreeSet<Course>,
  other_course_name: String,
  /// `None` is the "Selecione..." placeholder.
  pub availability:  Option<Availability>,
  schedule:          ScheduleInput,
}

impl ApplicationForm {
  /// An empty form collecting the schedule as `mode`.
  pub fn new(mode: ScheduleMode) -> Self {
    Self {
      full_name:         String::new(),
      phone:             String::new(),
      school_name:       String::new(),
      completed_courses: BTreeSet::new(),
      other_course_name: String::new(),
      availability:      None,
      schedule:          ScheduleInput::empty(mode),
    }
  }

  /// An empty form whose schedule input starts as `schedule`; the mode
  /// follows the input's variant.
  pub fn with_schedule(schedule: ScheduleInput) -> Self {
    Self { schedule, ..Self::new(ScheduleMode::FreeText) }
  }

  pub fn mode(&self) -> ScheduleMode { self.schedule.mode() }

  // ── Phone ─────────────────────────────────────────────────────────────────

  /// The phone as displayed in the input, e.g. `(11) 98765-4321`.
  pub fn phone(&self) -> &str { &self.phone }

  /// Replace the phone input; the value is re-masked and truncated.
  pub fn set_phone(&mut self, input: &str) { self.phone = phone::mask(input); }

  // ── Courses ───────────────────────────────────────────────────────────────

  pub fn completed_courses(&self) -> &BTreeSet<Course> { &self.completed_courses }

  pub fn is_course_checked(&self, course: Course) -> bool {
    self.completed_courses.contains(&course)
  }

  /// Check or uncheck `course`. Unchecking the Other sentinel clears the
  /// free-text course name.
  pub fn set_course(&mut self, course: Course, checked: bool) {
    if checked {
      self.completed_courses.insert(course);
    } else {
      self.completed_courses.remove(&course);
      if course == Course::Outros {
        self.other_course_name.clear();
      }
    }
  }

  pub fn toggle_course(&mut self, course: Course) {
    let checked = !self.is_course_checked(course);
    self.set_course(course, checked);
  }

  /// Whether the "other course" input is shown.
  pub fn shows_other_course(&self) -> bool { self.is_course_checked(Course::Outros) }

  pub fn other_course_name(&self) -> &str { &self.other_course_name }

  /// Edit the "other course" input. Ignored while the input is hidden.
  pub fn set_other_course_name(&mut self, text: &str) {
    if self.shows_other_course() {
      self.other_course_name = text.to_owned();
    }
  }

  // ── Schedule ──────────────────────────────────────────────────────────────

  pub fn schedule(&self) -> &ScheduleInput { &self.schedule }

  /// Edit the free-text schedule. Ignored by weekly forms.
  pub fn set_schedule_text(&mut self, text: &str) {
    if let ScheduleInput::FreeText(current) = &mut self.schedule {
      *current = text.to_owned();
    }
  }

  /// The input row for `day`; `None` on free-text forms.
  pub fn day(&self, day: Weekday) -> Option<&DayInput> {
    match &self.schedule {
      ScheduleInput::Weekly(rows) => rows.get(&day),
      ScheduleInput::FreeText(_) => None,
    }
  }

  fn day_mut(&mut self, day: Weekday) -> Option<&mut DayInput> {
    match &mut self.schedule {
      ScheduleInput::Weekly(rows) => Some(rows.entry(day).or_default()),
      ScheduleInput::FreeText(_) => None,
    }
  }

  /// Check or uncheck `day`. Unchecking clears its times.
  pub fn set_day(&mut self, day: Weekday, checked: bool) {
    if let Some(row) = self.day_mut(day) {
      row.checked = checked;
      if !checked {
        row.from.clear();
        row.to.clear();
      }
    }
  }

  pub fn toggle_day(&mut self, day: Weekday) {
    let checked = self.day(day).is_some_and(|row| !row.checked);
    self.set_day(day, checked);
  }

  /// Edit the `from` time of a checked day. Ignored while the day is
  /// unchecked.
  pub fn set_day_from(&mut self, day: Weekday, text: &str) {
    if let Some(row) = self.day_mut(day).filter(|row| row.checked) {
      row.from = text.to_owned();
    }
  }

  /// Edit the `to` time of a checked day. Ignored while the day is unchecked.
  pub fn set_day_to(&mut self, day: Weekday, text: &str) {
    if let Some(row) = self.day_mut(day).filter(|row| row.checked) {
      row.to = text.to_owned();
    }
  }

  // ── Validation ────────────────────────────────────────────────────────────

  /// Run every validator and normalise the values into a [`NewSubmission`].
  pub fn validate(&self) -> Result<NewSubmission, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let full_name = required_text(&self.full_name, Field::FullName, &mut errors);
    let school_name =
      required_text(&self.school_name, Field::SchoolName, &mut errors);

    let digits = phone::strip(&self.phone);
    if digits.is_empty() {
      errors.insert(Field::Phone, FieldError::Required);
    }

    if self.availability.is_none() {
      errors.insert(Field::Availability, FieldError::Required);
    }

    let course_schedule = self.normalize_schedule(&mut errors);

    let other_course_name = self
      .shows_other_course()
      .then(|| self.other_course_name.trim().to_owned())
      .filter(|name| !name.is_empty());

    match self.availability {
      Some(availability) if errors.is_empty() => Ok(NewSubmission {
        full_name,
        phone: digits,
        school_name,
        completed_courses: self.completed_courses.clone(),
        other_course_name,
        availability,
        course_schedule,
      }),
      _ => Err(errors),
    }
  }

  fn normalize_schedule(&self, errors: &mut ValidationErrors) -> CourseSchedule {
    match &self.schedule {
      ScheduleInput::FreeText(text) => CourseSchedule::FreeText(required_text(
        text,
        Field::CourseSchedule,
        errors,
      )),
      ScheduleInput::Weekly(rows) => {
        let mut days = BTreeMap::new();
        for (day, row) in rows.iter().filter(|(_, row)| row.checked) {
          let from = required_time(&row.from, Field::DayFrom(*day), errors);
          let to = required_time(&row.to, Field::DayTo(*day), errors);
          if let (Some(from), Some(to)) = (from, to) {
            days.insert(*day, TimeRange { from, to });
          }
        }
        CourseSchedule::Weekly(days)
      }
    }
  }
}

impl Default for ApplicationForm {
  fn default() -> Self { Self::new(ScheduleMode::default()) }
}

fn required_text(
  value: &str,
  field: Field,
  errors: &mut ValidationErrors,
) -> String {
  let trimmed = value.trim();
  if trimmed.is_empty() {
    errors.insert(field, FieldError::Required);
  }
  trimmed.to_owned()
}

fn required_time(
  value: &str,
  field: Field,
  errors: &mut ValidationErrors,
) -> Option<chrono::NaiveTime> {
  if value.trim().is_empty() {
    errors.insert(field, FieldError::Required);
    return None;
  }
  let parsed = parse_time(value);
  if parsed.is_none() {
    errors.insert(field, FieldError::InvalidTime);
  }
  parsed
}

// ─── FormController ──────────────────────────────────────────────────────────

/// A transient message shown after a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
  Success(String),
  Error(String),
}

/// Owns the form state and drives the submit lifecycle against an injected
/// store.
pub struct FormController<S> {
  store:  Arc<S>,
  form:   ApplicationForm,
  errors: ValidationErrors,
  busy:   bool,
  notice: Option<Notice>,
}

impl<S: SubmissionStore> FormController<S> {
  /// A controller with an empty form collecting the schedule as `mode`.
  pub fn new(store: Arc<S>, mode: ScheduleMode) -> Self {
    Self {
      store,
      form: ApplicationForm::new(mode),
      errors: ValidationErrors::default(),
      busy: false,
      notice: None,
    }
  }

  pub fn store(&self) -> &Arc<S> { &self.store }

  pub fn form(&self) -> &ApplicationForm { &self.form }

  /// Mutable access for field edits; allowed while a submit is in flight.
  pub fn form_mut(&mut self) -> &mut ApplicationForm { &mut self.form }

  pub fn errors(&self) -> &ValidationErrors { &self.errors }

  /// `true` between [`Self::begin_submit`] and [`Self::finish_submit`].
  pub fn is_busy(&self) -> bool { self.busy }

  pub fn notice(&self) -> Option<&Notice> { self.notice.as_ref() }

  pub fn take_notice(&mut self) -> Option<Notice> { self.notice.take() }

  /// First half of a submit: validate and mark the form busy.
  ///
  /// Returns [`Error::Busy`] while a previous submit is in flight and
  /// [`Error::Validation`] when any field fails; in both cases the writer must
  /// not be called and busy stays as it was.
  pub fn begin_submit(&mut self) -> Result<NewSubmission> {
    if self.busy {
      return Err(Error::Busy);
    }
    match self.form.validate() {
      Ok(input) => {
        self.errors.clear();
        self.notice = None;
        self.busy = true;
        Ok(input)
      }
      Err(errors) => {
        tracing::debug!(fields = errors.len(), "application rejected by validation");
        self.errors = errors.clone();
        Err(Error::Validation(errors))
      }
    }
  }

  /// Second half of a submit: record the writer's outcome.
  ///
  /// On success the form resets to empty; on failure the values are kept so
  /// the applicant can resubmit.
  pub fn finish_submit(&mut self, result: Result<Submission>) -> Result<Submission> {
    self.busy = false;
    match &result {
      Ok(_) => {
        self.form = ApplicationForm::new(self.form.mode());
        self.notice = Some(Notice::Success(SUCCESS_MESSAGE.into()));
      }
      Err(_) => {
        self.notice = Some(Notice::Error(FAILURE_MESSAGE.into()));
      }
    }
    result
  }

  /// Validate, write, and record the outcome in one call.
  pub async fn submit(&mut self) -> Result<Submission> {
    let input = self.begin_submit()?;
    let result = writer::write_submission(self.store.as_ref(), input).await;
    self.finish_submit(result)
  }
}
