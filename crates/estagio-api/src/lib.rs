//! JSON REST API for the internship intake.
//!
//! Exposes an axum [`Router`] backed by any
//! [`estagio_core::store::SubmissionStore`]. Submitting an application is
//! public; reading submissions requires HTTP Basic credentials. TLS and
//! transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", estagio_api::api_router(state))
//! ```

pub mod auth;
pub mod error;
pub mod submissions;

use std::sync::Arc;

use axum::{Router, routing::get};
use estagio_core::store::{COLLECTION, SubmissionStore};

pub use auth::AuthConfig;
pub use error::ApiError;

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
pub struct AppState<S> {
  pub store: Arc<S>,
  pub auth:  Arc<AuthConfig>,
}

impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self { store: Arc::clone(&self.store), auth: Arc::clone(&self.auth) }
  }
}

impl<S> AppState<S> {
  pub fn new(store: Arc<S>, auth: AuthConfig) -> Self {
    Self { store, auth: Arc::new(auth) }
  }
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(state: AppState<S>) -> Router<()>
where
  S: SubmissionStore + 'static,
{
  Router::new()
    .route(
      &format!("/{COLLECTION}"),
      get(submissions::list::<S>).post(submissions::create::<S>),
    )
    .route(&format!("/{COLLECTION}/{{id}}"), get(submissions::get_one::<S>))
    .with_state(state)
}
