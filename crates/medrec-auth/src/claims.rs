//! The payload carried inside every session token.

use medrec_core::user::Role;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
  pub user_id: i64,
  pub role:    Role,
  /// Issued at (Unix seconds).
  pub iat:     i64,
  /// Expiration (Unix seconds, UTC). Checked on every validation.
  pub exp:     i64,
}
