//! The dashboard access gate.
//!
//! A plaintext password comparison that unlocks the dashboard for the rest of
//! the current session. This is a UI convenience, not a security boundary:
//! anyone holding the client configuration holds the secret, and the data it
//! guards must be protected by the store itself.

use std::fmt;

use crate::{Error, Result};

/// Key under which the unlocked state is reported in logs.
pub const SESSION_KEY: &str = "dashboard_auth";

/// The fixed dashboard password.
#[derive(Clone, PartialEq, Eq)]
pub struct AdminSecret(String);

impl AdminSecret {
  pub fn new(secret: impl Into<String>) -> Self { Self(secret.into()) }

  /// `false` for an empty secret, which never unlocks anything.
  pub fn is_set(&self) -> bool { !self.0.is_empty() }

  /// Exact, case-sensitive comparison. Nothing matches an unset secret.
  pub fn matches(&self, attempt: &str) -> bool { self.is_set() && self.0 == attempt }
}

impl fmt::Debug for AdminSecret {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("AdminSecret(..)")
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GateState {
  #[default]
  Locked,
  Unlocked,
}

/// Two-state machine: `Locked` until the secret is entered, `Unlocked` until
/// [`AccessGate::lock`] or the end of the session.
#[derive(Debug, Clone)]
pub struct AccessGate {
  secret: AdminSecret,
  state:  GateState,
}

impl AccessGate {
  pub fn new(secret: AdminSecret) -> Self {
    Self { secret, state: GateState::Locked }
  }

  pub fn state(&self) -> GateState { self.state }

  pub fn is_unlocked(&self) -> bool { self.state == GateState::Unlocked }

  /// Compare `attempt` with the secret. A match unlocks the gate; a mismatch
  /// leaves it locked and returns [`Error::AuthMismatch`]. Attempts are not
  /// limited. While no secret is configured every attempt is a mismatch.
  pub fn unlock(&mut self, attempt: &str) -> Result<()> {
    if !self.secret.is_set() {
      tracing::warn!(key = SESSION_KEY, "no dashboard password configured");
      return Err(Error::AuthMismatch);
    }
    if self.secret.matches(attempt) {
      self.state = GateState::Unlocked;
      tracing::info!(key = SESSION_KEY, "dashboard unlocked");
      Ok(())
    } else {
      tracing::warn!(key = SESSION_KEY, "dashboard password mismatch");
      Err(Error::AuthMismatch)
    }
  }

  /// Logout: return to `Locked`.
  pub fn lock(&mut self) {
    if self.state == GateState::Unlocked {
      tracing::info!(key = SESSION_KEY, "dashboard locked");
    }
    self.state = GateState::Locked;
  }
}

/// Session-scoped authentication context handed to the dashboard.
///
/// One `Session` lives for one run of the client; a new run starts locked.
#[derive(Debug, Clone)]
pub struct Session {
  gate: AccessGate,
}

impl Session {
  pub fn new(secret: AdminSecret) -> Self { Self { gate: AccessGate::new(secret) } }

  pub fn gate(&self) -> &AccessGate { &self.gate }

  pub fn is_unlocked(&self) -> bool { self.gate.is_unlocked() }

  pub fn unlock(&mut self, attempt: &str) -> Result<()> { self.gate.unlock(attempt) }

  pub fn logout(&mut self) { self.gate.lock(); }
}
