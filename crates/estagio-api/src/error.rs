//! API error type and [`axum::response::IntoResponse`] implementation.

use std::collections::BTreeMap;

use axum::{
  Json,
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use estagio_core::{
  Error as CoreError,
  form::{FAILURE_MESSAGE, ValidationErrors},
};
use serde_json::json;
use thiserror::Error;

/// Shown when the submissions list cannot be loaded.
pub const LOAD_FAILURE_MESSAGE: &str = "Erro ao carregar inscrições.";

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("validation failed: {0}")]
  Validation(ValidationErrors),

  #[error("unauthorized")]
  Unauthorized,

  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  /// The store rejected a write. Detail is logged, never returned.
  #[error("write failed: {0}")]
  Write(#[source] Box<dyn std::error::Error + Send + Sync>),

  /// The store rejected a read. Detail is logged, never returned.
  #[error("read failed: {0}")]
  Read(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  pub fn write(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Write(Box::new(e))
  }

  pub fn read(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Read(Box::new(e))
  }
}

impl From<CoreError> for ApiError {
  fn from(e: CoreError) -> Self {
    match e {
      CoreError::Validation(errors) => ApiError::Validation(errors),
      CoreError::AuthMismatch | CoreError::Locked => ApiError::Unauthorized,
      CoreError::ReadFailure => ApiError::read(e),
      other => ApiError::write(other),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match self {
      ApiError::Validation(errors) => {
        let fields: BTreeMap<String, &str> = errors
          .iter()
          .map(|(field, error)| (field.key(), error.message(field)))
          .collect();
        (
          StatusCode::UNPROCESSABLE_ENTITY,
          Json(json!({ "error": errors.to_string(), "fields": fields })),
        )
          .into_response()
      }
      ApiError::Unauthorized => {
        let mut res = (
          StatusCode::UNAUTHORIZED,
          Json(json!({ "error": "unauthorized" })),
        )
          .into_response();
        res.headers_mut().insert(
          header::WWW_AUTHENTICATE,
          HeaderValue::from_static(crate::auth::CHALLENGE),
        );
        res
      }
      ApiError::NotFound(m) => {
        (StatusCode::NOT_FOUND, Json(json!({ "error": m }))).into_response()
      }
      ApiError::BadRequest(m) => {
        (StatusCode::BAD_REQUEST, Json(json!({ "error": m }))).into_response()
      }
      ApiError::Write(e) => {
        tracing::error!(error = %e, "store write failed");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          Json(json!({ "error": FAILURE_MESSAGE })),
        )
          .into_response()
      }
      ApiError::Read(e) => {
        tracing::error!(error = %e, "store read failed");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          Json(json!({ "error": LOAD_FAILURE_MESSAGE })),
        )
          .into_response()
      }
    }
  }
}
