//! [`MemoryStore`]: an in-process [`SubmissionStore`] for tests and demos.

use std::sync::{
  Arc,
  Mutex,
  atomic::{AtomicBool, Ordering},
};

use thiserror::Error;
use uuid::Uuid;

use crate::{
  store::{self, SubmissionStore},
  submission::{NewSubmission, Submission},
};

#[derive(Debug, Error)]
pub enum MemoryError {
  /// Returned while failure injection is switched on.
  #[error("store unavailable")]
  Unavailable,
}

#[derive(Default)]
struct Inner {
  records:     Mutex<Vec<Submission>>,
  fail_writes: AtomicBool,
  fail_reads:  AtomicBool,
}

/// Submissions held in a `Vec`, in insertion order.
///
/// Cloning is cheap and clones share the same records.
#[derive(Clone, Default)]
pub struct MemoryStore {
  inner: Arc<Inner>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  /// Insert an already-built record, timestamp included. Used to seed
  /// fixtures with known `created_at` values.
  pub fn seed(&self, submission: Submission) {
    self.records().push(submission);
  }

  /// Make every subsequent create call fail.
  pub fn set_fail_writes(&self, fail: bool) {
    self.inner.fail_writes.store(fail, Ordering::SeqCst);
  }

  /// Make every subsequent list/get call fail.
  pub fn set_fail_reads(&self, fail: bool) {
    self.inner.fail_reads.store(fail, Ordering::SeqCst);
  }

  /// Number of stored records.
  pub fn len(&self) -> usize { self.records().len() }

  pub fn is_empty(&self) -> bool { self.len() == 0 }

  /// Snapshot of the records in insertion order.
  pub fn snapshot(&self) -> Vec<Submission> { self.records().clone() }

  fn records(&self) -> std::sync::MutexGuard<'_, Vec<Submission>> {
    // A poisoned lock only means a test panicked mid-push; the Vec is intact.
    self
      .inner
      .records
      .lock()
      .unwrap_or_else(std::sync::PoisonError::into_inner)
  }

  fn check(&self, flag: &AtomicBool) -> Result<(), MemoryError> {
    if flag.load(Ordering::SeqCst) {
      Err(MemoryError::Unavailable)
    } else {
      Ok(())
    }
  }
}

impl SubmissionStore for MemoryStore {
  type Error = MemoryError;

  async fn create_submission(
    &self,
    input: NewSubmission,
  ) -> Result<Submission, MemoryError> {
    self.check(&self.inner.fail_writes)?;
    let submission = input.into_submission(Uuid::new_v4(), store::now());
    self.records().push(submission.clone());
    Ok(submission)
  }

  async fn list_submissions(&self) -> Result<Vec<Submission>, MemoryError> {
    self.check(&self.inner.fail_reads)?;
    let mut all = self.snapshot();
    // Reverse first so equal timestamps come out newest-inserted first.
    all.reverse();
    all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(all)
  }

  async fn get_submission(&self, id: Uuid) -> Result<Option<Submission>, MemoryError> {
    self.check(&self.inner.fail_reads)?;
    Ok(self.records().iter().find(|s| s.id == id).cloned())
  }
}
