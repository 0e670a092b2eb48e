//! The read path behind the dashboard.

use crate::{
  Error, Result,
  gate::{SESSION_KEY, Session},
  store::{COLLECTION, SubmissionStore},
  submission::Submission,
};

/// Load every submission, newest first.
///
/// Returns [`Error::Locked`] without touching the store unless `session` is
/// unlocked. A store failure is logged and reported as the generic
/// [`Error::ReadFailure`]; the caller shows an empty list.
pub async fn load_submissions<S: SubmissionStore>(
  session: &Session,
  store: &S,
) -> Result<Vec<Submission>> {
  if !session.is_unlocked() {
    tracing::warn!(key = SESSION_KEY, "refusing to load submissions while locked");
    return Err(Error::Locked);
  }

  let mut submissions = store.list_submissions().await.map_err(|e| {
    tracing::error!(collection = COLLECTION, error = %e, "failed to load submissions");
    Error::ReadFailure
  })?;

  // Stores are expected to return this order already; a stable sort keeps
  // their tie-breaking.
  submissions.sort_by(|a, b| b.created_at.cmp(&a.created_at));

  tracing::debug!(collection = COLLECTION, count = submissions.len(), "submissions loaded");
  Ok(submissions)
}
