//! Async HTTP client wrapping the submissions JSON API.
//!
//! [`ApiClient`] implements [`SubmissionStore`], so the form controller and
//! the dashboard reader talk to the server exactly as they would to any other
//! store.

use std::{collections::BTreeSet, time::Duration};

use anyhow::Context as _;
use estagio_core::{
  schedule::CourseSchedule,
  store::{COLLECTION, SubmissionStore},
  submission::{Availability, Course, NewSubmission, Submission},
};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("{method} {path} → {status}")]
  Status {
    method: &'static str,
    path:   String,
    status: StatusCode,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Connection settings for the API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
  pub username: String,
  pub password: String,
}

/// Async HTTP client for the submissions API.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

/// Body of `POST /api/inscricoes`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ApplicationRequest<'a> {
  full_name:               &'a str,
  phone:                   &'a str,
  school_name:             &'a str,
  completed_courses:       &'a BTreeSet<Course>,
  #[serde(skip_serializing_if = "Option::is_none")]
  other_course_name:       Option<&'a str>,
  internship_availability: Availability,
  course_schedule:         &'a CourseSchedule,
}

impl<'a> From<&'a NewSubmission> for ApplicationRequest<'a> {
  fn from(s: &'a NewSubmission) -> Self {
    Self {
      full_name:               &s.full_name,
      phone:                   &s.phone,
      school_name:             &s.school_name,
      completed_courses:       &s.completed_courses,
      other_course_name:       s.other_course_name.as_deref(),
      internship_availability: s.availability,
      course_schedule:         &s.course_schedule,
    }
  }
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> anyhow::Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!(
      "{}/api{}",
      self.config.base_url.trim_end_matches('/'),
      path
    )
  }

  fn auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
    if self.config.username.is_empty() {
      req
    } else {
      req.basic_auth(&self.config.username, Some(&self.config.password))
    }
  }
}

impl SubmissionStore for ApiClient {
  type Error = Error;

  /// `POST /api/inscricoes`. Public; no credentials are sent.
  async fn create_submission(&self, input: NewSubmission) -> Result<Submission> {
    let path = format!("/{COLLECTION}");
    let resp = self
      .client
      .post(self.url(&path))
      .json(&ApplicationRequest::from(&input))
      .send()
      .await?;

    if resp.status() != StatusCode::CREATED {
      return Err(Error::Status { method: "POST", path, status: resp.status() });
    }
    Ok(resp.json().await?)
  }

  /// `GET /api/inscricoes`
  async fn list_submissions(&self) -> Result<Vec<Submission>> {
    let path = format!("/{COLLECTION}");
    let resp = self.auth(self.client.get(self.url(&path))).send().await?;

    if !resp.status().is_success() {
      return Err(Error::Status { method: "GET", path, status: resp.status() });
    }
    Ok(resp.json().await?)
  }

  /// `GET /api/inscricoes/{id}`
  async fn get_submission(&self, id: Uuid) -> Result<Option<Submission>> {
    let path = format!("/{COLLECTION}/{id}");
    let resp = self.auth(self.client.get(self.url(&path))).send().await?;

    match resp.status() {
      StatusCode::NOT_FOUND => Ok(None),
      s if s.is_success() => Ok(Some(resp.json().await?)),
      status => Err(Error::Status { method: "GET", path, status }),
    }
  }
}
