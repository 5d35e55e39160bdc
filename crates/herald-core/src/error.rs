//! Error types for `herald-core`.

use thiserror::Error;

/// The four failure kinds an announcement operation can surface.
#[derive(Debug, Error)]
pub enum Error {
  /// No usable caller identifier was supplied.
  #[error("authentication required")]
  Unauthorized,

  #[error("{0}")]
  InvalidInput(String),

  #[error("{0}")]
  NotFound(String),

  /// The store (or something below it) failed unexpectedly.
  #[error("internal error: {0}")]
  Internal(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub fn invalid(message: impl Into<String>) -> Self {
    Self::InvalidInput(message.into())
  }

  pub(crate) fn announcement_not_found() -> Self {
    Self::NotFound("Announcement not found".to_owned())
  }

  pub(crate) fn internal<E>(source: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Internal(Box::new(source))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
