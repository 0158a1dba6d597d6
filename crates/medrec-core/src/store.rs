//! The storage traits the rest of the workspace is written against.
//!
//! The traits are implemented by storage backends (e.g.
//! `medrec-store-sqlite`). Higher layers (`medrec-auth`, `medrec-api`) depend
//! on these abstractions, not on any concrete backend.

use std::future::Future;

use crate::{
  patient::{NewPatient, Patient},
  user::{NewUser, User},
};

// ─── Record store ────────────────────────────────────────────────────────────

/// Persistence for patient records.
///
/// Every method is a single-record (or single-statement) operation; the
/// backend is responsible for making each one atomic.
pub trait PatientStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist a new record and return it with its store-assigned `id`.
  fn create(
    &self,
    patient: NewPatient,
  ) -> impl Future<Output = Result<Patient, Self::Error>> + Send + '_;

  /// All records in insertion order.
  fn find_all(
    &self,
  ) -> impl Future<Output = Result<Vec<Patient>, Self::Error>> + Send + '_;

  /// Retrieve a record by id. Returns `None` if not found.
  fn find_by_id(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Patient>, Self::Error>> + Send + '_;

  /// Overwrite every mutable column of an existing record.
  fn save<'a>(
    &'a self,
    patient: &'a Patient,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Remove a record. Returns `false` if no record had that id.
  fn delete_by_id(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}

// ─── Credential store ────────────────────────────────────────────────────────

/// Lookup of credential principals by login email.
pub trait CredentialStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Retrieve a user by exact email. Returns `None` if not found.
  fn find_by_email<'a>(
    &'a self,
    email: &'a str,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + 'a;

  /// Insert a user. Returns an error if the email is already taken.
  fn add_user(
    &self,
    user: NewUser,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + '_;
}
