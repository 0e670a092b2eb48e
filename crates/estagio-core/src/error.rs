//! Error types for `estagio-core`.

use thiserror::Error;

use crate::form::ValidationErrors;

#[derive(Debug, Error)]
pub enum Error {
  /// One or more form fields failed local validation. Never reaches a store.
  #[error("validation failed: {0}")]
  Validation(ValidationErrors),

  /// A submit was triggered while the previous one is still in flight.
  #[error("a submission is already in progress")]
  Busy,

  /// The store rejected or failed the create call. The store's own error is
  /// logged where it happens and not carried here.
  #[error("failed to write submission")]
  WriteFailure,

  /// The store failed the list query.
  #[error("failed to load submissions")]
  ReadFailure,

  #[error("incorrect dashboard password")]
  AuthMismatch,

  #[error("dashboard is locked")]
  Locked,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
