//! Patient records and the input/output shapes around them.

use std::{fmt, str::FromStr};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::{Error, Result};

// ─── Gender ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
  Male,
  Female,
  Other,
}

impl Gender {
  pub fn as_str(self) -> &'static str {
    match self {
      Gender::Male => "Male",
      Gender::Female => "Female",
      Gender::Other => "Other",
    }
  }
}

impl fmt::Display for Gender {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Gender {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s {
      "Male" => Ok(Gender::Male),
      "Female" => Ok(Gender::Female),
      "Other" => Ok(Gender::Other),
      other => Err(Error::UnknownGender(other.to_owned())),
    }
  }
}

// ─── Dates ───────────────────────────────────────────────────────────────────

/// Parse an RFC 3339 instant (e.g. `1995-05-05T00:00:00Z`) into UTC.
pub fn parse_instant(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|_| Error::Validation("invalid date of birth".to_string()))
}

/// Format an instant as RFC 3339 with second precision and a `Z` suffix.
pub fn format_instant(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Secs, true)
}

// ─── Stored record ───────────────────────────────────────────────────────────

/// A persisted patient record. `id` is assigned by the store and never
/// changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patient {
  pub id:              i64,
  pub first_name:      String,
  pub last_name:       String,
  pub date_of_birth:   DateTime<Utc>,
  pub gender:          Gender,
  pub contact:         String,
  pub address:         String,
  pub medical_history: String,
}

/// A validated record ready to be handed to
/// [`PatientStore::create`](crate::store::PatientStore::create).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPatient {
  pub first_name:      String,
  pub last_name:       String,
  pub date_of_birth:   DateTime<Utc>,
  pub gender:          Gender,
  pub contact:         String,
  pub address:         String,
  pub medical_history: String,
}

// ─── Inputs ──────────────────────────────────────────────────────────────────

/// Body accepted when a receptionist registers a patient.
///
/// `gender` is typed, so an out-of-range value is rejected while the body is
/// deserialised. `date_of_birth` stays a string until the service parses it.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePatient {
  pub first_name:    String,
  pub last_name:     String,
  pub date_of_birth: String,
  pub gender:        Gender,
  #[serde(default)]
  pub contact:       String,
  #[serde(default)]
  pub address:       String,
}

/// Partial update of demographic fields.
///
/// A field that is absent or an empty string leaves the stored value as is.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PatientPatch {
  #[serde(default)]
  pub first_name:    Option<String>,
  #[serde(default)]
  pub last_name:     Option<String>,
  #[serde(default)]
  pub date_of_birth: Option<String>,
  #[serde(default, deserialize_with = "empty_gender_as_none")]
  pub gender:        Option<Gender>,
  #[serde(default)]
  pub contact:       Option<String>,
  #[serde(default)]
  pub address:       Option<String>,
}

fn empty_gender_as_none<'de, D>(d: D) -> std::result::Result<Option<Gender>, D::Error>
where
  D: Deserializer<'de>,
{
  match Option::<String>::deserialize(d)? {
    None => Ok(None),
    Some(s) if s.is_empty() => Ok(None),
    Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
  }
}

/// Body accepted when a doctor rewrites a patient's medical history.
#[derive(Debug, Clone, Deserialize)]
pub struct MedicalHistoryInput {
  pub medical_history: String,
}

// ─── Output ──────────────────────────────────────────────────────────────────

/// The normalised shape every patient operation returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientResponse {
  pub id:              i64,
  pub first_name:      String,
  pub last_name:       String,
  pub date_of_birth:   String,
  pub gender:          String,
  pub contact:         String,
  pub address:         String,
  pub medical_history: String,
}

impl From<&Patient> for PatientResponse {
  fn from(p: &Patient) -> Self {
    PatientResponse {
      id:              p.id,
      first_name:      p.first_name.clone(),
      last_name:       p.last_name.clone(),
      date_of_birth:   format_instant(p.date_of_birth),
      gender:          p.gender.to_string(),
      contact:         p.contact.clone(),
      address:         p.address.clone(),
      medical_history: p.medical_history.clone(),
    }
  }
}
