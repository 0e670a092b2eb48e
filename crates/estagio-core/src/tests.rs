//! Submission pipeline tests against the in-memory store.

use std::sync::Arc;

use chrono::{Duration, TimeZone as _, Utc};
use uuid::Uuid;

use crate::{
  Error,
  form::{
    ApplicationForm, FAILURE_MESSAGE, Field, FieldError, FormController, Notice,
    SUCCESS_MESSAGE,
  },
  gate::{AdminSecret, Session},
  memory::MemoryStore,
  reader::load_submissions,
  schedule::{CourseSchedule, ScheduleMode, Weekday},
  store::SubmissionStore,
  submission::{Availability, Course, Submission},
};

const SECRET: &str = "s3nha.2025";

fn controller(mode: ScheduleMode) -> (MemoryStore, FormController<MemoryStore>) {
  let store = MemoryStore::new();
  let ctl = FormController::new(Arc::new(store.clone()), mode);
  (store, ctl)
}

fn fill_valid(form: &mut ApplicationForm) {
  form.full_name = "Ana Silva".into();
  form.set_phone("11987654321");
  form.school_name = "Escola X".into();
  form.toggle_course(Course::Excel);
  form.availability = Some(Availability::Manha);
}

fn unlocked_session() -> Session {
  let mut session = Session::new(AdminSecret::new(SECRET));
  session.unlock(SECRET).unwrap();
  session
}

// ─── Required fields ─────────────────────────────────────────────────────────

#[tokio::test]
async fn each_required_field_blocks_the_writer() {
  type Clear = fn(&mut ApplicationForm);
  let cases: [(Field, Clear); 4] = [
    (Field::FullName, |f| f.full_name = "   ".into()),
    (Field::Phone, |f| f.set_phone("")),
    (Field::SchoolName, |f| f.school_name.clear()),
    (Field::Availability, |f| f.availability = None),
  ];

  for (field, clear) in cases {
    let (store, mut ctl) = controller(ScheduleMode::Weekly);
    fill_valid(ctl.form_mut());
    clear(ctl.form_mut());

    let err = ctl.submit().await.unwrap_err();
    let Error::Validation(errors) = err else {
      panic!("expected validation error for {field:?}, got {err:?}");
    };
    assert_eq!(errors.len(), 1, "{field:?}: {errors}");
    assert_eq!(errors.get(field), Some(FieldError::Required));
    assert_eq!(ctl.errors().get(field), Some(FieldError::Required));
    assert!(!ctl.is_busy());
    assert!(ctl.notice().is_none());
    assert!(store.is_empty(), "writer must not run for {field:?}");
  }
}

#[tokio::test]
async fn free_text_schedule_is_required() {
  let (store, mut ctl) = controller(ScheduleMode::FreeText);
  fill_valid(ctl.form_mut());

  let err = ctl.submit().await.unwrap_err();
  assert!(matches!(err, Error::Validation(_)));
  assert_eq!(ctl.errors().get(Field::CourseSchedule), Some(FieldError::Required));
  assert!(store.is_empty());

  ctl.form_mut().set_schedule_text("Segunda a Sexta, 19h - 22h");
  let written = ctl.submit().await.unwrap();
  assert_eq!(
    written.course_schedule,
    CourseSchedule::FreeText("Segunda a Sexta, 19h - 22h".into())
  );
}

#[test]
fn short_phone_is_accepted_as_typed() {
  let mut form = ApplicationForm::default();
  fill_valid(&mut form);
  form.set_phone("1198765");
  assert_eq!(form.validate().unwrap().phone, "1198765");
}

#[test]
fn landline_phone_is_accepted() {
  let mut form = ApplicationForm::default();
  fill_valid(&mut form);
  form.set_phone("(11) 3333-4444");
  assert_eq!(form.validate().unwrap().phone, "1133334444");
}

// ─── Conditional fields ──────────────────────────────────────────────────────

#[test]
fn other_course_name_dropped_when_sentinel_unchecked() {
  let mut form = ApplicationForm::default();
  fill_valid(&mut form);
  form.toggle_course(Course::Outros);
  form.set_other_course_name("Curso Z");
  form.toggle_course(Course::Outros);

  assert_eq!(form.other_course_name(), "");
  let input = form.validate().unwrap();
  assert_eq!(input.other_course_name, None);

  // Typing while hidden is ignored too.
  form.set_other_course_name("Curso Y");
  assert_eq!(form.validate().unwrap().other_course_name, None);
}

#[test]
fn weekly_schedule_keeps_only_checked_complete_days() {
  let mut form = ApplicationForm::new(ScheduleMode::Weekly);
  fill_valid(&mut form);

  form.toggle_day(Weekday::Segunda);
  form.set_day_from(Weekday::Segunda, "19:00");
  form.set_day_to(Weekday::Segunda, "22:00");

  // Filled, then unchecked: must not appear.
  form.toggle_day(Weekday::Quarta);
  form.set_day_from(Weekday::Quarta, "08:00");
  form.set_day_to(Weekday::Quarta, "12:00");
  form.toggle_day(Weekday::Quarta);

  // Never checked: edits are ignored.
  form.set_day_from(Weekday::Sexta, "10:00");

  let input = form.validate().unwrap();
  let CourseSchedule::Weekly(days) = input.course_schedule else {
    panic!("expected weekly schedule");
  };
  assert_eq!(days.keys().copied().collect::<Vec<_>>(), [Weekday::Segunda]);
  assert_eq!(days[&Weekday::Segunda].to_string(), "19:00–22:00");
}

#[test]
fn checked_day_requires_both_times() {
  let mut form = ApplicationForm::new(ScheduleMode::Weekly);
  fill_valid(&mut form);
  form.toggle_day(Weekday::Terca);
  form.set_day_from(Weekday::Terca, "19:00");

  let errors = form.validate().unwrap_err();
  assert_eq!(errors.len(), 1);
  assert_eq!(errors.get(Field::DayTo(Weekday::Terca)), Some(FieldError::Required));

  form.set_day_to(Weekday::Terca, "7pm");
  let errors = form.validate().unwrap_err();
  assert_eq!(
    errors.get(Field::DayTo(Weekday::Terca)),
    Some(FieldError::InvalidTime)
  );
}

#[test]
fn weekly_schedule_may_be_empty() {
  let mut form = ApplicationForm::new(ScheduleMode::Weekly);
  fill_valid(&mut form);
  let input = form.validate().unwrap();
  assert!(input.course_schedule.is_empty());
}

// ─── Submit lifecycle ────────────────────────────────────────────────────────

#[tokio::test]
async fn successful_submit_writes_record_and_resets() {
  let (store, mut ctl) = controller(ScheduleMode::Weekly);
  fill_valid(ctl.form_mut());
  let before = Utc::now();

  let written = ctl.submit().await.unwrap();

  assert_eq!(written.full_name, "Ana Silva");
  assert_eq!(written.phone, "11987654321");
  assert_eq!(written.school_name, "Escola X");
  assert_eq!(written.completed_courses, [Course::Excel].into());
  assert_eq!(written.availability, Availability::Manha);
  assert_eq!(written.other_course_name, None);
  assert!(written.created_at >= before);

  assert_eq!(store.snapshot(), vec![written]);
  assert_eq!(ctl.notice(), Some(&Notice::Success(SUCCESS_MESSAGE.into())));
  assert_eq!(ctl.form(), &ApplicationForm::new(ScheduleMode::Weekly));
  assert!(!ctl.is_busy());
}

#[tokio::test]
async fn other_course_name_retained_with_sentinel() {
  let (_store, mut ctl) = controller(ScheduleMode::Weekly);
  fill_valid(ctl.form_mut());
  ctl.form_mut().set_course(Course::Excel, false);
  ctl.form_mut().toggle_course(Course::Outros);
  ctl.form_mut().set_other_course_name("Curso Z");

  let written = ctl.submit().await.unwrap();
  assert_eq!(written.completed_courses, [Course::Outros].into());
  assert_eq!(written.other_course_name.as_deref(), Some("Curso Z"));
}

#[tokio::test]
async fn failed_write_keeps_fields() {
  let (store, mut ctl) = controller(ScheduleMode::Weekly);
  store.set_fail_writes(true);
  fill_valid(ctl.form_mut());
  let filled = ctl.form().clone();

  let err = ctl.submit().await.unwrap_err();
  assert!(matches!(err, Error::WriteFailure));
  assert_eq!(ctl.form(), &filled);
  assert_eq!(ctl.notice(), Some(&Notice::Error(FAILURE_MESSAGE.into())));
  assert!(!ctl.is_busy());

  // Manual resubmit once the store recovers.
  store.set_fail_writes(false);
  ctl.submit().await.unwrap();
  assert_eq!(store.len(), 1);
}

#[test]
fn second_begin_while_busy_is_refused() {
  let (_store, mut ctl) = controller(ScheduleMode::Weekly);
  fill_valid(ctl.form_mut());

  ctl.begin_submit().unwrap();
  assert!(ctl.is_busy());
  assert!(matches!(ctl.begin_submit(), Err(Error::Busy)));
  assert!(ctl.is_busy());

  ctl.finish_submit(Err(Error::WriteFailure)).unwrap_err();
  assert!(!ctl.is_busy());
  assert!(ctl.begin_submit().is_ok());
}

// ─── Reading ─────────────────────────────────────────────────────────────────

fn stored(name: &str, created_at: chrono::DateTime<Utc>) -> Submission {
  let mut form = ApplicationForm::default();
  fill_valid(&mut form);
  form.full_name = name.into();
  form.validate().unwrap().into_submission(Uuid::new_v4(), created_at)
}

#[tokio::test]
async fn dashboard_lists_newest_first() {
  let store = MemoryStore::new();
  let t1 = Utc.with_ymd_and_hms(2025, 1, 10, 9, 0, 0).unwrap();
  let t2 = t1 + Duration::hours(3);
  store.seed(stored("Primeira", t1));
  store.seed(stored("Segunda", t2));

  let list = load_submissions(&unlocked_session(), &store).await.unwrap();
  let names: Vec<_> = list.iter().map(|s| s.full_name.as_str()).collect();
  assert_eq!(names, ["Segunda", "Primeira"]);
}

#[tokio::test]
async fn listing_is_non_increasing_after_many_writes() {
  let (store, mut ctl) = controller(ScheduleMode::Weekly);
  for _ in 0..10 {
    fill_valid(ctl.form_mut());
    ctl.submit().await.unwrap();
  }
  store.seed(stored("Antiga", Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()));

  let list = load_submissions(&unlocked_session(), &store).await.unwrap();
  assert_eq!(list.len(), 11);
  assert!(list.windows(2).all(|w| w[0].created_at >= w[1].created_at));
  assert_eq!(list.last().unwrap().full_name, "Antiga");
}

#[tokio::test]
async fn locked_session_never_reads() {
  let store = MemoryStore::new();
  store.set_fail_reads(true);
  let mut session = Session::new(AdminSecret::new(SECRET));

  assert!(matches!(session.unlock("errada"), Err(Error::AuthMismatch)));
  let err = load_submissions(&session, &store).await.unwrap_err();
  assert!(matches!(err, Error::Locked));
}

#[tokio::test]
async fn unlock_permits_read() {
  let store = MemoryStore::new();
  store.seed(stored("Ana Silva", Utc::now()));
  let mut session = Session::new(AdminSecret::new(SECRET));

  session.unlock(SECRET).unwrap();
  let list = load_submissions(&session, &store).await.unwrap();
  assert_eq!(list.len(), 1);

  session.logout();
  assert!(matches!(
    load_submissions(&session, &store).await,
    Err(Error::Locked)
  ));
}

#[tokio::test]
async fn read_failure_is_generic() {
  let store = MemoryStore::new();
  store.set_fail_reads(true);
  let err = load_submissions(&unlocked_session(), &store).await.unwrap_err();
  assert!(matches!(err, Error::ReadFailure));
}

#[tokio::test]
async fn get_submission_by_id() {
  let store = MemoryStore::new();
  let s = stored("Ana Silva", Utc::now());
  store.seed(s.clone());
  assert_eq!(store.get_submission(s.id).await.unwrap(), Some(s));
  assert_eq!(store.get_submission(Uuid::new_v4()).await.unwrap(), None);
}

#[tokio::test]
async fn written_timestamp_matches_every_read() {
  let (store, mut ctl) = controller(ScheduleMode::Weekly);
  fill_valid(ctl.form_mut());
  let written = ctl.submit().await.unwrap();

  let fetched = store.get_submission(written.id).await.unwrap().unwrap();
  let listed = load_submissions(&unlocked_session(), &store).await.unwrap();

  assert_eq!(fetched.created_at, written.created_at);
  assert_eq!(listed[0].created_at, written.created_at);
  assert_eq!(written.created_at.timestamp_subsec_nanos() % 1_000, 0);
}

// ─── Wire shape ──────────────────────────────────────────────────────────────

#[test]
fn submission_json_uses_collection_field_names() {
  let s = stored("Ana Silva", Utc.with_ymd_and_hms(2025, 1, 10, 9, 0, 0).unwrap());
  let json = serde_json::to_value(&s).unwrap();

  assert_eq!(json["fullName"], "Ana Silva");
  assert_eq!(json["phone"], "11987654321");
  assert_eq!(json["schoolName"], "Escola X");
  assert_eq!(json["completedCourses"], serde_json::json!(["Excel"]));
  assert_eq!(json["internshipAvailability"], "Manhã");
  assert_eq!(json["courseSchedule"], serde_json::json!({}));
  assert!(json.get("otherCourseName").is_none());
  assert!(json.get("createdAt").is_some());
}

#[test]
fn submission_json_accepts_legacy_availability_key() {
  let json = serde_json::json!({
    "id": Uuid::nil(),
    "fullName": "Ana Silva",
    "phone": "11987654321",
    "schoolName": "Escola X",
    "availability": "Flexível",
    "courseSchedule": "Noite",
    "createdAt": "2025-01-10T09:00:00Z",
  });
  let s: Submission = serde_json::from_value(json).unwrap();
  assert_eq!(s.availability, Availability::Flexivel);
  assert!(s.completed_courses.is_empty());
  assert_eq!(s.course_schedule, CourseSchedule::FreeText("Noite".into()));
}
