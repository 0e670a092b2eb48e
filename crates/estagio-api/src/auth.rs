//! Dashboard credentials for the read endpoints.
//!
//! Reads of the `inscricoes` collection require HTTP Basic credentials for the
//! single configured dashboard account. The password is checked against an
//! argon2 PHC hash; the plaintext never appears in configuration.

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, header, request::Parts};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;
use estagio_core::store::SubmissionStore;

use crate::{AppState, error::ApiError};

/// Challenge sent with every 401 from the read endpoints.
pub const CHALLENGE: &str = "Basic realm=\"estagio-dashboard\", charset=\"UTF-8\"";

/// The dashboard account.
#[derive(Clone)]
pub struct AuthConfig {
  pub username:      String,
  /// PHC string produced by argon2, e.g. `$argon2id$v=19$…`
  pub password_hash: String,
}

/// Why a request was refused. Logged, never sent to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
  /// No `Authorization: Basic` header, or one that does not decode.
  MissingCredentials,
  /// A username other than the dashboard account.
  UnknownUser,
  /// Empty password; never checked against the hash.
  EmptyPassword,
  WrongPassword,
  /// The configured hash is not a PHC string. Nobody can log in until the
  /// server is reconfigured.
  InvalidStoredHash,
}

/// Credentials decoded from an `Authorization: Basic` header.
#[derive(Debug, PartialEq, Eq)]
pub struct Credentials {
  pub username: String,
  pub password: String,
}

impl Credentials {
  /// Decode the Basic header. The password may contain `:`.
  pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
    let encoded = headers
      .get(header::AUTHORIZATION)?
      .to_str()
      .ok()?
      .strip_prefix("Basic ")?;
    let decoded = String::from_utf8(B64.decode(encoded.trim()).ok()?).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some(Self { username: username.to_owned(), password: password.to_owned() })
  }
}

impl AuthConfig {
  /// Check `credentials` against the dashboard account. The username match is
  /// exact and case-sensitive.
  pub fn verify(&self, credentials: &Credentials) -> Result<(), AuthFailure> {
    if credentials.username != self.username {
      return Err(AuthFailure::UnknownUser);
    }
    if credentials.password.is_empty() {
      return Err(AuthFailure::EmptyPassword);
    }
    let hash = PasswordHash::new(&self.password_hash)
      .map_err(|_| AuthFailure::InvalidStoredHash)?;
    Argon2::default()
      .verify_password(credentials.password.as_bytes(), &hash)
      .map_err(|_| AuthFailure::WrongPassword)
  }

  /// Decode and verify the credentials carried by `headers`.
  pub fn check(&self, headers: &HeaderMap) -> Result<(), AuthFailure> {
    let credentials =
      Credentials::from_headers(headers).ok_or(AuthFailure::MissingCredentials)?;
    self.verify(&credentials)
  }
}

/// Zero-size marker: present in the handler means the request carried the
/// dashboard credentials.
pub struct Authenticated;

impl<S> FromRequestParts<AppState<S>> for Authenticated
where
  S: SubmissionStore + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    match state.auth.check(&parts.headers) {
      Ok(()) => Ok(Authenticated),
      Err(AuthFailure::InvalidStoredHash) => {
        tracing::error!(uri = %parts.uri, "configured dashboard password hash is invalid");
        Err(ApiError::Unauthorized)
      }
      Err(reason) => {
        tracing::warn!(uri = %parts.uri, ?reason, "rejected dashboard credentials");
        Err(ApiError::Unauthorized)
      }
    }
  }
}
