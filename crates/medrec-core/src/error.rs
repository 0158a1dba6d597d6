//! Error types for `medrec-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("patient not found: {0}")]
  NotFound(i64),

  #[error("{0}")]
  Validation(String),

  #[error("unknown role: {0:?}")]
  UnknownRole(String),

  #[error("unknown gender: {0:?}")]
  UnknownGender(String),

  #[error("storage error: {0}")]
  Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Wrap a backend error as [`Error::Storage`].
  pub fn storage<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Storage(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
