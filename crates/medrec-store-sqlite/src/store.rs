//! [`SqliteStore`]: the SQLite implementation of [`PatientStore`] and
//! [`CredentialStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;

use medrec_core::{
  patient::{NewPatient, Patient},
  store::{CredentialStore, PatientStore},
  user::{NewUser, User},
};

use crate::{
  Result,
  encode::{RawPatient, RawUser, encode_dt, encode_gender, encode_role},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// Patient and user tables backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    tracing::debug!("sqlite schema initialised");
    Ok(())
  }
}

// ─── PatientStore impl ───────────────────────────────────────────────────────

impl PatientStore for SqliteStore {
  type Error = crate::Error;

  async fn create(&self, p: NewPatient) -> Result<Patient> {
    let dob_str    = encode_dt(p.date_of_birth);
    let gender_str = encode_gender(p.gender).to_owned();
    let row        = (
      p.first_name.clone(),
      p.last_name.clone(),
      p.contact.clone(),
      p.address.clone(),
      p.medical_history.clone(),
    );

    let id: i64 = self
      .conn
      .call(move |conn| {
        let (first_name, last_name, contact, address, medical_history) = row;
        conn.execute(
          "INSERT INTO patients (
             first_name, last_name, date_of_birth, gender,
             contact, address, medical_history
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![
            first_name,
            last_name,
            dob_str,
            gender_str,
            contact,
            address,
            medical_history,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Patient {
      id,
      first_name:      p.first_name,
      last_name:       p.last_name,
      date_of_birth:   p.date_of_birth,
      gender:          p.gender,
      contact:         p.contact,
      address:         p.address,
      medical_history: p.medical_history,
    })
  }

  async fn find_all(&self) -> Result<Vec<Patient>> {
    let raws: Vec<RawPatient> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {} FROM patients ORDER BY id",
          RawPatient::COLUMNS
        ))?;
        let rows = stmt
          .query_map([], RawPatient::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPatient::into_patient).collect()
  }

  async fn find_by_id(&self, id: i64) -> Result<Option<Patient>> {
    let raw: Option<RawPatient> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {} FROM patients WHERE id = ?1", RawPatient::COLUMNS),
              rusqlite::params![id],
              RawPatient::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawPatient::into_patient).transpose()
  }

  async fn save(&self, patient: &Patient) -> Result<()> {
    let id              = patient.id;
    let first_name      = patient.first_name.clone();
    let last_name       = patient.last_name.clone();
    let dob_str         = encode_dt(patient.date_of_birth);
    let gender_str      = encode_gender(patient.gender).to_owned();
    let contact         = patient.contact.clone();
    let address         = patient.address.clone();
    let medical_history = patient.medical_history.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE patients SET
             first_name = ?2, last_name = ?3, date_of_birth = ?4, gender = ?5,
             contact = ?6, address = ?7, medical_history = ?8
           WHERE id = ?1",
          rusqlite::params![
            id,
            first_name,
            last_name,
            dob_str,
            gender_str,
            contact,
            address,
            medical_history,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn delete_by_id(&self, id: i64) -> Result<bool> {
    let n = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM patients WHERE id = ?1", rusqlite::params![id])?)
      })
      .await?;
    Ok(n > 0)
  }
}

// ─── CredentialStore impl ────────────────────────────────────────────────────

impl CredentialStore for SqliteStore {
  type Error = crate::Error;

  async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
    let email = email.to_owned();

    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, email, password_hash, role FROM users WHERE email = ?1",
              rusqlite::params![email],
              |row| {
                Ok(RawUser {
                  id:            row.get(0)?,
                  email:         row.get(1)?,
                  password_hash: row.get(2)?,
                  role:          row.get(3)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawUser::into_user).transpose()
  }

  async fn add_user(&self, user: NewUser) -> Result<User> {
    let role_str      = encode_role(user.role).to_owned();
    let email         = user.email.clone();
    let password_hash = user.password_hash.clone();

    let id: i64 = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO users (email, password_hash, role) VALUES (?1, ?2, ?3)",
          rusqlite::params![email, password_hash, role_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(User {
      id,
      email:         user.email,
      password_hash: user.password_hash,
      role:          user.role,
    })
  }
}
