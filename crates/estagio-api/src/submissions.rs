//! Handlers for `/inscricoes` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/inscricoes` | Public. 201 with the stored record, 422 on validation |
//! | `GET`  | `/inscricoes` | Basic auth. Newest first |
//! | `GET`  | `/inscricoes/{id}` | Basic auth. 404 if not found |

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use estagio_core::{
  form::{ApplicationForm, Field, FieldError, ValidationErrors},
  phone,
  schedule::{CourseSchedule, ScheduleInput},
  store::SubmissionStore,
  submission::{Availability, Course, NewSubmission, Submission},
  writer,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{AppState, auth::Authenticated, error::ApiError};

// ─── Create ──────────────────────────────────────────────────────────────────

/// Request body for `POST /inscricoes`. Every field is optional on the wire
/// so that missing values surface as per-field validation errors rather than
/// a parse failure.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationBody {
  pub full_name:         String,
  pub phone:             String,
  pub school_name:       String,
  pub completed_courses: Vec<Course>,
  pub other_course_name: Option<String>,
  #[serde(alias = "availability")]
  pub internship_availability: Option<Availability>,
  pub course_schedule:   Option<CourseSchedule>,
}

impl ApplicationBody {
  /// Validate the body with the form's rules. A phone longer than
  /// [`phone::MAX_DIGITS`] is rejected here rather than truncated the way
  /// typed input is.
  pub fn validate(self) -> Result<NewSubmission, ValidationErrors> {
    let too_long = phone::strip(&self.phone).len() > phone::MAX_DIGITS;
    let validated = self.into_form().validate();
    if !too_long {
      return validated;
    }
    let mut errors = validated.err().unwrap_or_default();
    errors.insert(Field::Phone, FieldError::PhoneTooLong);
    Err(errors)
  }

  /// Replay the body through the same form the terminal client fills in, so
  /// both paths share one set of validators.
  pub fn into_form(self) -> ApplicationForm {
    let schedule = self.course_schedule.unwrap_or_default();
    let mut form = ApplicationForm::with_schedule(ScheduleInput::from_schedule(&schedule));
    form.full_name = self.full_name;
    form.set_phone(&self.phone);
    form.school_name = self.school_name;
    for course in self.completed_courses {
      form.set_course(course, true);
    }
    if let Some(other) = self.other_course_name {
      form.set_other_course_name(&other);
    }
    form.availability = self.internship_availability;
    form
  }
}

/// `POST /inscricoes`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  body: Result<Json<ApplicationBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SubmissionStore + 'static,
{
  let Json(body) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
  let input = body.validate().map_err(ApiError::Validation)?;

  let submission = writer::write_submission(state.store.as_ref(), input).await?;
  Ok((StatusCode::CREATED, Json(submission)))
}

// ─── List ────────────────────────────────────────────────────────────────────

/// `GET /inscricoes`
pub async fn list<S>(
  _auth: Authenticated,
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<Submission>>, ApiError>
where
  S: SubmissionStore + 'static,
{
  let mut submissions = state
    .store
    .list_submissions()
    .await
    .map_err(ApiError::read)?;
  submissions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
  Ok(Json(submissions))
}

// ─── Get one ─────────────────────────────────────────────────────────────────

/// `GET /inscricoes/{id}`
pub async fn get_one<S>(
  _auth: Authenticated,
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Submission>, ApiError>
where
  S: SubmissionStore + 'static,
{
  let submission = state
    .store
    .get_submission(id)
    .await
    .map_err(ApiError::read)?
    .ok_or_else(|| ApiError::NotFound(format!("submission {id} not found")))?;
  Ok(Json(submission))
}
