//! [`SqliteStore`], the SQLite implementation of [`SubmissionStore`].

use std::path::Path;

use estagio_core::{
  store::{self, SubmissionStore},
  submission::{NewSubmission, Submission},
};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use crate::{
  Error, Result,
  encode::{COLUMNS, RawSubmission, encode_uuid},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// The submissions collection backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Insert a fully-built [`Submission`], timestamp included.
  pub(crate) async fn insert(&self, submission: &Submission) -> Result<()> {
    let raw = RawSubmission::encode(submission)?;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO inscricoes (
             id, created_at, full_name, phone, school_name,
             completed_courses, other_course_name,
             internship_availability, course_schedule
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
          rusqlite::params![
            raw.id,
            raw.created_at,
            raw.full_name,
            raw.phone,
            raw.school_name,
            raw.completed_courses,
            raw.other_course_name,
            raw.availability,
            raw.course_schedule,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── SubmissionStore impl ────────────────────────────────────────────────────

impl SubmissionStore for SqliteStore {
  type Error = Error;

  async fn create_submission(&self, input: NewSubmission) -> Result<Submission> {
    let submission = input.into_submission(Uuid::new_v4(), store::now());
    self.insert(&submission).await?;
    tracing::debug!(id = %submission.id, "inserted submission row");
    Ok(submission)
  }

  async fn list_submissions(&self) -> Result<Vec<Submission>> {
    let raws: Vec<RawSubmission> = self
      .conn
      .call(|conn| {
        // rowid breaks ties between identical timestamps: later insert first.
        let mut stmt = conn.prepare(&format!(
          "SELECT {COLUMNS} FROM inscricoes ORDER BY created_at DESC, rowid DESC"
        ))?;
        let rows = stmt
          .query_map([], RawSubmission::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSubmission::into_submission).collect()
  }

  async fn get_submission(&self, id: Uuid) -> Result<Option<Submission>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawSubmission> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {COLUMNS} FROM inscricoes WHERE id = ?1"),
              rusqlite::params![id_str],
              RawSubmission::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawSubmission::into_submission).transpose()
  }
}
