//! Error type for `medrec-auth`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
  /// Bad signature, malformed token, wrong algorithm or expired.
  #[error("invalid token: {0}")]
  InvalidToken(#[source] jsonwebtoken::errors::Error),

  #[error("token signing failed: {0}")]
  Signing(#[source] jsonwebtoken::errors::Error),

  /// Unknown email or wrong password; deliberately indistinguishable.
  #[error("invalid credentials")]
  InvalidCredentials,

  #[error("password hashing failed: {0}")]
  PasswordHash(String),

  #[error("credential store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl AuthError {
  /// Whether the token was well-formed and signed but past its `exp`.
  pub fn is_expired(&self) -> bool {
    matches!(
      self,
      AuthError::InvalidToken(e)
        if matches!(e.kind(), jsonwebtoken::errors::ErrorKind::ExpiredSignature)
    )
  }
}

pub type Result<T, E = AuthError> = std::result::Result<T, E>;
