//! The `SubmissionStore` trait.
//!
//! Implemented by storage backends (`estagio-store-sqlite`, the in-memory
//! [`crate::memory::MemoryStore`]) and by the terminal client's HTTP client.
//! The form controller and the dashboard reader depend on this abstraction,
//! never on a concrete backend.

use std::future::Future;

use chrono::{DateTime, SubsecRound as _, Utc};
use uuid::Uuid;

use crate::submission::{NewSubmission, Submission};

/// Name of the submissions collection.
pub const COLLECTION: &str = "inscricoes";

/// Sub-second digits kept on `created_at`: microseconds, the finest
/// precision every backend stores.
pub const TIMESTAMP_PRECISION: u16 = 6;

/// The store clock. Stores stamp `created_at` with this so the value returned
/// by a create is the value every later read returns.
pub fn now() -> DateTime<Utc> { Utc::now().trunc_subsecs(TIMESTAMP_PRECISION) }

/// Abstraction over the submissions collection.
///
/// The collection is append-only: there is no update or delete.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait SubmissionStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Append a submission. The store assigns `id` and `created_at`; the
  /// timestamp comes from the store's clock, never the caller's.
  fn create_submission(
    &self,
    input: NewSubmission,
  ) -> impl Future<Output = Result<Submission, Self::Error>> + Send + '_;

  /// Every submission, newest `created_at` first.
  fn list_submissions(
    &self,
  ) -> impl Future<Output = Result<Vec<Submission>, Self::Error>> + Send + '_;

  /// Retrieve one submission by id. Returns `None` if not found.
  fn get_submission(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Submission>, Self::Error>> + Send + '_;
}
