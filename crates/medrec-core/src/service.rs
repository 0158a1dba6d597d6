//! [`PatientService`]: field-level rules applied on top of a
//! [`PatientStore`].
//!
//! Every operation returns the normalised [`PatientResponse`]. Store failures
//! surface as [`Error::Storage`] and are never retried.

use std::sync::Arc;

use crate::{
  Error, Result,
  patient::{
    CreatePatient, NewPatient, PatientPatch, PatientResponse, parse_instant,
  },
  store::PatientStore,
};

/// Patient record operations over any [`PatientStore`].
///
/// Cloning is cheap; the store is reference-counted.
pub struct PatientService<S> {
  store: Arc<S>,
}

impl<S> Clone for PatientService<S> {
  fn clone(&self) -> Self {
    Self {
      store: Arc::clone(&self.store),
    }
  }
}

fn required(field: &str, value: String) -> Result<String> {
  if value.trim().is_empty() {
    return Err(Error::Validation(format!("{field} is required")));
  }
  Ok(value)
}

/// `Some` only for a present, non-empty value.
fn provided(value: Option<String>) -> Option<String> {
  value.filter(|v| !v.is_empty())
}

/// Like [`provided`], but a whitespace-only replacement is an error so a
/// required field can never be blanked.
fn provided_required(
  field: &str,
  value: Option<String>,
) -> Result<Option<String>> {
  provided(value).map(|v| required(field, v)).transpose()
}

impl<S: PatientStore> PatientService<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  pub async fn create(&self, input: CreatePatient) -> Result<PatientResponse> {
    let new = NewPatient {
      first_name:      required("first_name", input.first_name)?,
      last_name:       required("last_name", input.last_name)?,
      date_of_birth:   parse_instant(&required(
        "date_of_birth",
        input.date_of_birth,
      )?)?,
      gender:          input.gender,
      contact:         input.contact,
      address:         input.address,
      medical_history: String::new(),
    };

    let patient = self.store.create(new).await.map_err(Error::storage)?;
    Ok(PatientResponse::from(&patient))
  }

  pub async fn list(&self) -> Result<Vec<PatientResponse>> {
    let patients = self.store.find_all().await.map_err(Error::storage)?;
    Ok(patients.iter().map(PatientResponse::from).collect())
  }

  pub async fn get(&self, id: i64) -> Result<PatientResponse> {
    let patient = self
      .store
      .find_by_id(id)
      .await
      .map_err(Error::storage)?
      .ok_or(Error::NotFound(id))?;
    Ok(PatientResponse::from(&patient))
  }

  /// Apply a partial update. Absent and empty fields are left unchanged.
  ///
  /// Names and the date of birth are checked before any field is touched, so
  /// a blank name or a bad date never results in a partial write.
  pub async fn update(
    &self,
    id: i64,
    patch: PatientPatch,
  ) -> Result<PatientResponse> {
    let mut patient = self
      .store
      .find_by_id(id)
      .await
      .map_err(Error::storage)?
      .ok_or(Error::NotFound(id))?;

    let first_name = provided_required("first_name", patch.first_name)?;
    let last_name = provided_required("last_name", patch.last_name)?;
    let date_of_birth = provided(patch.date_of_birth)
      .map(|s| parse_instant(&s))
      .transpose()?;

    if let Some(v) = first_name {
      patient.first_name = v;
    }
    if let Some(v) = last_name {
      patient.last_name = v;
    }
    if let Some(v) = date_of_birth {
      patient.date_of_birth = v;
    }
    if let Some(v) = patch.gender {
      patient.gender = v;
    }
    if let Some(v) = provided(patch.contact) {
      patient.contact = v;
    }
    if let Some(v) = provided(patch.address) {
      patient.address = v;
    }

    self.store.save(&patient).await.map_err(Error::storage)?;
    Ok(PatientResponse::from(&patient))
  }

  pub async fn delete(&self, id: i64) -> Result<()> {
    let deleted = self.store.delete_by_id(id).await.map_err(Error::storage)?;
    if !deleted {
      return Err(Error::NotFound(id));
    }
    Ok(())
  }

  /// Overwrite the medical history unconditionally. An empty string clears
  /// it.
  pub async fn update_medical_history(
    &self,
    id: i64,
    text: String,
  ) -> Result<PatientResponse> {
    let mut patient = self
      .store
      .find_by_id(id)
      .await
      .map_err(Error::storage)?
      .ok_or(Error::NotFound(id))?;

    patient.medical_history = text;

    self.store.save(&patient).await.map_err(Error::storage)?;
    Ok(PatientResponse::from(&patient))
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Mutex;

  use super::*;
  use crate::patient::{Gender, Patient};

  // A minimal in-process store; insertion order is preserved by the Vec.
  #[derive(Default)]
  struct MemoryStore {
    rows:    Mutex<Vec<Patient>>,
    next_id: Mutex<i64>,
    saves:   Mutex<usize>,
  }

  #[derive(Debug, thiserror::Error)]
  #[error("memory store failure")]
  struct MemoryError;

  impl PatientStore for MemoryStore {
    type Error = MemoryError;

    async fn create(&self, p: NewPatient) -> Result<Patient, MemoryError> {
      let mut next = self.next_id.lock().unwrap();
      *next += 1;
      let patient = Patient {
        id:              *next,
        first_name:      p.first_name,
        last_name:       p.last_name,
        date_of_birth:   p.date_of_birth,
        gender:          p.gender,
        contact:         p.contact,
        address:         p.address,
        medical_history: p.medical_history,
      };
      self.rows.lock().unwrap().push(patient.clone());
      Ok(patient)
    }

    async fn find_all(&self) -> Result<Vec<Patient>, MemoryError> {
      Ok(self.rows.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Patient>, MemoryError> {
      Ok(self.rows.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }

    async fn save(&self, patient: &Patient) -> Result<(), MemoryError> {
      *self.saves.lock().unwrap() += 1;
      let mut rows = self.rows.lock().unwrap();
      if let Some(row) = rows.iter_mut().find(|p| p.id == patient.id) {
        *row = patient.clone();
      }
      Ok(())
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, MemoryError> {
      let mut rows = self.rows.lock().unwrap();
      let before = rows.len();
      rows.retain(|p| p.id != id);
      Ok(rows.len() != before)
    }
  }

  // Fails every call.
  struct BrokenStore;

  impl PatientStore for BrokenStore {
    type Error = MemoryError;

    async fn create(&self, _: NewPatient) -> Result<Patient, MemoryError> { Err(MemoryError) }
    async fn find_all(&self) -> Result<Vec<Patient>, MemoryError> { Err(MemoryError) }
    async fn find_by_id(&self, _: i64) -> Result<Option<Patient>, MemoryError> { Err(MemoryError) }
    async fn save(&self, _: &Patient) -> Result<(), MemoryError> { Err(MemoryError) }
    async fn delete_by_id(&self, _: i64) -> Result<bool, MemoryError> { Err(MemoryError) }
  }

  fn service() -> (PatientService<MemoryStore>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    (PatientService::new(store.clone()), store)
  }

  fn jane() -> CreatePatient {
    CreatePatient {
      first_name:    "Jane".into(),
      last_name:     "Doe".into(),
      date_of_birth: "1995-05-05T00:00:00Z".into(),
      gender:        Gender::Female,
      contact:       "9876543210".into(),
      address:       "456 Elm St".into(),
    }
  }

  // ── Create / Get ──────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_then_get_round_trips() {
    let (svc, _) = service();
    let created = svc.create(jane()).await.unwrap();
    assert!(created.id > 0);

    let fetched = svc.get(created.id).await.unwrap();
    assert_eq!(fetched, created);
    assert_eq!(fetched.first_name, "Jane");
    assert_eq!(fetched.last_name, "Doe");
    assert_eq!(fetched.date_of_birth, "1995-05-05T00:00:00Z");
    assert_eq!(fetched.gender, "Female");
    assert_eq!(fetched.contact, "9876543210");
    assert_eq!(fetched.address, "456 Elm St");
    assert_eq!(fetched.medical_history, "");
  }

  #[tokio::test]
  async fn create_rejects_invalid_date() {
    let (svc, store) = service();
    let mut input = jane();
    input.date_of_birth = "05/05/1995".into();
    assert!(matches!(svc.create(input).await, Err(Error::Validation(_))));
    assert!(store.rows.lock().unwrap().is_empty());
  }

  #[tokio::test]
  async fn create_rejects_blank_name() {
    let (svc, _) = service();
    let mut input = jane();
    input.last_name = "  ".into();
    assert!(matches!(svc.create(input).await, Err(Error::Validation(_))));
  }

  #[tokio::test]
  async fn create_surfaces_storage_errors() {
    let svc = PatientService::new(Arc::new(BrokenStore));
    assert!(matches!(svc.create(jane()).await, Err(Error::Storage(_))));
  }

  #[tokio::test]
  async fn get_missing_is_not_found() {
    let (svc, _) = service();
    assert!(matches!(svc.get(42).await, Err(Error::NotFound(42))));
  }

  // ── List ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn list_empty_store_is_empty() {
    let (svc, _) = service();
    assert!(svc.list().await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn list_preserves_insertion_order() {
    let (svc, _) = service();
    let a = svc.create(jane()).await.unwrap();
    let mut second = jane();
    second.first_name = "John".into();
    let b = svc.create(second).await.unwrap();

    let ids: Vec<i64> = svc.list().await.unwrap().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![a.id, b.id]);
  }

  // ── Update ────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn update_only_contact_leaves_other_fields() {
    let (svc, _) = service();
    let before = svc.create(jane()).await.unwrap();

    let patch = PatientPatch {
      contact: Some("555-1111".into()),
      ..Default::default()
    };
    let after = svc.update(before.id, patch).await.unwrap();

    assert_eq!(after.contact, "555-1111");
    assert_eq!(
      PatientResponse { contact: before.contact.clone(), ..after.clone() },
      before
    );
  }

  #[tokio::test]
  async fn update_skips_empty_strings() {
    let (svc, _) = service();
    let before = svc.create(jane()).await.unwrap();

    let patch = PatientPatch {
      first_name: Some(String::new()),
      address:    Some(String::new()),
      ..Default::default()
    };
    let after = svc.update(before.id, patch).await.unwrap();
    assert_eq!(after, before);
  }

  #[tokio::test]
  async fn update_with_invalid_date_writes_nothing() {
    let (svc, store) = service();
    let before = svc.create(jane()).await.unwrap();

    let patch = PatientPatch {
      first_name:    Some("Janet".into()),
      date_of_birth: Some("not-a-date".into()),
      ..Default::default()
    };
    assert!(matches!(
      svc.update(before.id, patch).await,
      Err(Error::Validation(_))
    ));
    assert_eq!(*store.saves.lock().unwrap(), 0);
    assert_eq!(svc.get(before.id).await.unwrap(), before);
  }

  #[tokio::test]
  async fn update_rejects_whitespace_only_name() {
    let (svc, store) = service();
    let before = svc.create(jane()).await.unwrap();

    let patch = PatientPatch {
      first_name: Some("   ".into()),
      contact:    Some("555-2222".into()),
      ..Default::default()
    };
    assert!(matches!(
      svc.update(before.id, patch).await,
      Err(Error::Validation(_))
    ));
    assert_eq!(*store.saves.lock().unwrap(), 0);
    assert_eq!(svc.get(before.id).await.unwrap(), before);
  }

  #[tokio::test]
  async fn update_applies_every_provided_field() {
    let (svc, _) = service();
    let before = svc.create(jane()).await.unwrap();

    let patch = PatientPatch {
      first_name:    Some("Janet".into()),
      last_name:     Some("Smith".into()),
      date_of_birth: Some("1990-01-02T00:00:00Z".into()),
      gender:        Some(Gender::Other),
      contact:       Some("1".into()),
      address:       Some("2".into()),
    };
    let after = svc.update(before.id, patch).await.unwrap();
    assert_eq!(after.first_name, "Janet");
    assert_eq!(after.last_name, "Smith");
    assert_eq!(after.date_of_birth, "1990-01-02T00:00:00Z");
    assert_eq!(after.gender, "Other");
    assert_eq!(after.contact, "1");
    assert_eq!(after.address, "2");
  }

  #[tokio::test]
  async fn update_missing_is_not_found() {
    let (svc, _) = service();
    let result = svc.update(7, PatientPatch::default()).await;
    assert!(matches!(result, Err(Error::NotFound(7))));
  }

  // ── Delete ────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn delete_removes_record() {
    let (svc, _) = service();
    let p = svc.create(jane()).await.unwrap();
    svc.delete(p.id).await.unwrap();
    assert!(matches!(svc.get(p.id).await, Err(Error::NotFound(_))));
  }

  #[tokio::test]
  async fn delete_missing_is_not_found() {
    let (svc, _) = service();
    assert!(matches!(svc.delete(3).await, Err(Error::NotFound(3))));
  }

  // ── Medical history ───────────────────────────────────────────────────────

  #[tokio::test]
  async fn medical_history_set_and_cleared() {
    let (svc, _) = service();
    let p = svc.create(jane()).await.unwrap();

    let updated = svc
      .update_medical_history(p.id, "Asthma since 2010".into())
      .await
      .unwrap();
    assert_eq!(updated.medical_history, "Asthma since 2010");
    assert_eq!(updated.first_name, p.first_name);

    let cleared = svc.update_medical_history(p.id, String::new()).await.unwrap();
    assert_eq!(cleared.medical_history, "");
    assert_eq!(svc.get(p.id).await.unwrap().medical_history, "");
  }

  #[tokio::test]
  async fn medical_history_missing_is_not_found() {
    let (svc, _) = service();
    let result = svc.update_medical_history(9, "x".into()).await;
    assert!(matches!(result, Err(Error::NotFound(9))));
  }
}
