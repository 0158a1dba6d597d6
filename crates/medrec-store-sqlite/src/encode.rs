//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings. Enums are stored as the same
//! strings they serialise to over the API.

use chrono::{DateTime, Utc};
use medrec_core::{
  patient::{Gender, Patient},
  user::{Role, User},
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Enums ───────────────────────────────────────────────────────────────────

pub fn encode_role(r: Role) -> &'static str { r.as_str() }

pub fn decode_role(s: &str) -> Result<Role> { Ok(s.parse()?) }

pub fn encode_gender(g: Gender) -> &'static str { g.as_str() }

pub fn decode_gender(s: &str) -> Result<Gender> { Ok(s.parse()?) }

// ─── Raw rows ────────────────────────────────────────────────────────────────

/// A `patients` row as read from SQLite, before decoding.
pub struct RawPatient {
  pub id:              i64,
  pub first_name:      String,
  pub last_name:       String,
  pub date_of_birth:   String,
  pub gender:          String,
  pub contact:         String,
  pub address:         String,
  pub medical_history: String,
}

impl RawPatient {
  /// Column order expected by [`RawPatient::from_row`].
  pub const COLUMNS: &'static str = "id, first_name, last_name, date_of_birth, \
                                     gender, contact, address, medical_history";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(RawPatient {
      id:              row.get(0)?,
      first_name:      row.get(1)?,
      last_name:       row.get(2)?,
      date_of_birth:   row.get(3)?,
      gender:          row.get(4)?,
      contact:         row.get(5)?,
      address:         row.get(6)?,
      medical_history: row.get(7)?,
    })
  }

  pub fn into_patient(self) -> Result<Patient> {
    Ok(Patient {
      id:              self.id,
      first_name:      self.first_name,
      last_name:       self.last_name,
      date_of_birth:   decode_dt(&self.date_of_birth)?,
      gender:          decode_gender(&self.gender)?,
      contact:         self.contact,
      address:         self.address,
      medical_history: self.medical_history,
    })
  }
}

/// A `users` row as read from SQLite, before decoding.
pub struct RawUser {
  pub id:            i64,
  pub email:         String,
  pub password_hash: String,
  pub role:          String,
}

impl RawUser {
  pub fn into_user(self) -> Result<User> {
    Ok(User {
      id:            self.id,
      email:         self.email,
      password_hash: self.password_hash,
      role:          decode_role(&self.role)?,
    })
  }
}
