//! Caller verification.
//!
//! Operations that mutate or enumerate the whole collection require an
//! [`AuthContext`], which can only be obtained from a [`CallerVerifier`].

use crate::{Error, Result};

/// An authenticated principal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
  principal: String,
}

impl AuthContext {
  /// Wrap an already-verified principal. Intended for verifier implementations.
  pub fn new(principal: impl Into<String>) -> Self {
    Self { principal: principal.into() }
  }

  pub fn principal(&self) -> &str { &self.principal }
}

/// Turns a caller-supplied identifier into an [`AuthContext`], or rejects it
/// with [`Error::Unauthorized`].
pub trait CallerVerifier: Send + Sync {
  fn verify(&self, caller: Option<&str>) -> Result<AuthContext>;
}

/// Accepts any non-blank identifier as-is. Presence is checked, validity is not.
#[derive(Debug, Clone, Copy, Default)]
pub struct NonEmptyCaller;

impl CallerVerifier for NonEmptyCaller {
  fn verify(&self, caller: Option<&str>) -> Result<AuthContext> {
    match caller.map(str::trim) {
      Some(principal) if !principal.is_empty() => Ok(AuthContext::new(principal)),
      _ => Err(Error::Unauthorized),
    }
  }
}
