//! Users and roles: the credential principals that may call the API.
//!
//! Users are seeded at startup and never mutated afterwards.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

/// A coarse permission class gating access to routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  Receptionist,
  Doctor,
}

impl Role {
  pub fn as_str(self) -> &'static str {
    match self {
      Role::Receptionist => "receptionist",
      Role::Doctor => "doctor",
    }
  }
}

impl fmt::Display for Role {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Role {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "receptionist" => Ok(Role::Receptionist),
      "doctor" => Ok(Role::Doctor),
      other => Err(Error::UnknownRole(other.to_owned())),
    }
  }
}

/// A stored credential principal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
  pub id:            i64,
  pub email:         String,
  /// PHC string produced by argon2, e.g. `$argon2id$v=19$…`
  pub password_hash: String,
  pub role:          Role,
}

/// Input for creating a [`User`]; the store assigns the identifier.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
  pub email:         String,
  pub password_hash: String,
  pub role:          Role,
}

/// The public view of a user returned by the login endpoint.
///
/// Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
  pub id:    i64,
  pub email: String,
  pub role:  Role,
}

impl From<&User> for UserSummary {
  fn from(u: &User) -> Self {
    UserSummary {
      id:    u.id,
      email: u.email.clone(),
      role:  u.role,
    }
  }
}
