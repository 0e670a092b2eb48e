//! The write path: one append-only create call per submit.

use crate::{
  Error, Result,
  store::{COLLECTION, SubmissionStore},
  submission::{NewSubmission, Submission},
};

/// Append `input` to the submissions collection.
///
/// The store assigns `id` and `created_at`. A store failure is logged with its
/// detail and reported as the generic [`Error::WriteFailure`]; applicants never
/// see the store's message.
pub async fn write_submission<S: SubmissionStore>(
  store: &S,
  input: NewSubmission,
) -> Result<Submission> {
  match store.create_submission(input).await {
    Ok(submission) => {
      tracing::info!(
        collection = COLLECTION,
        id = %submission.id,
        created_at = %submission.created_at,
        "submission written"
      );
      Ok(submission)
    }
    Err(e) => {
      tracing::error!(collection = COLLECTION, error = %e, "failed to write submission");
      Err(Error::WriteFailure)
    }
  }
}
