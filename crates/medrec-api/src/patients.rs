//! Handlers for the patient endpoints.
//!
//! | Method   | Path                              | Role         | Notes |
//! |----------|-----------------------------------|--------------|-------|
//! | `POST`   | `/api/receptionist/patients`      | receptionist | Body: [`CreatePatient`]; 201 |
//! | `GET`    | `/api/receptionist/patients`      | receptionist | |
//! | `GET`    | `/api/receptionist/patients/{id}` | receptionist | 404 if not found |
//! | `PUT`    | `/api/receptionist/patients/{id}` | receptionist | Body: [`PatientPatch`] |
//! | `DELETE` | `/api/receptionist/patients/{id}` | receptionist | 204 |
//! | `GET`    | `/api/doctor/patients`            | doctor       | |
//! | `GET`    | `/api/doctor/patients/{id}`       | doctor       | 404 if not found |
//! | `PUT`    | `/api/doctor/patients/{id}`       | doctor       | Body: [`MedicalHistoryInput`] |

use axum::{
  Json,
  extract::{
    Path, State,
    rejection::{JsonRejection, PathRejection},
  },
  http::StatusCode,
  response::IntoResponse,
};
use medrec_core::{
  patient::{CreatePatient, MedicalHistoryInput, PatientPatch, PatientResponse},
  store::PatientStore,
};
use tracing::debug;

use crate::{
  AppState,
  error::ApiError,
  guard::{Doctor, Receptionist, RequireRole, RoleRequirement},
  json_body,
};

fn patient_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
  path
    .map(|Path(id)| id)
    .map_err(|_| ApiError::BadRequest("invalid patient id".to_string()))
}

// ─── List / Get (shared) ──────────────────────────────────────────────────────

/// `GET /api/{role}/patients`
pub async fn list<S, R>(
  State(state): State<AppState<S>>,
  _guard: RequireRole<R>,
) -> Result<Json<Vec<PatientResponse>>, ApiError>
where
  S: PatientStore + 'static,
  R: RoleRequirement,
{
  Ok(Json(state.patients.list().await?))
}

/// `GET /api/{role}/patients/{id}`
pub async fn get_one<S, R>(
  State(state): State<AppState<S>>,
  _guard: RequireRole<R>,
  path: Result<Path<i64>, PathRejection>,
) -> Result<Json<PatientResponse>, ApiError>
where
  S: PatientStore + 'static,
  R: RoleRequirement,
{
  let id = patient_id(path)?;
  Ok(Json(state.patients.get(id).await?))
}

// ─── Receptionist ─────────────────────────────────────────────────────────────

/// `POST /api/receptionist/patients`, returning 201 and the stored patient.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  guard: RequireRole<Receptionist>,
  body: Result<Json<CreatePatient>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: PatientStore + 'static,
{
  let input = json_body(body)?;
  let patient = state.patients.create(input).await?;
  debug!(patient_id = patient.id, user_id = guard.user.user_id, "patient created");
  Ok((StatusCode::CREATED, Json(patient)))
}

/// `PUT /api/receptionist/patients/{id}`. Absent or empty fields are kept.
pub async fn update<S>(
  State(state): State<AppState<S>>,
  _guard: RequireRole<Receptionist>,
  path: Result<Path<i64>, PathRejection>,
  body: Result<Json<PatientPatch>, JsonRejection>,
) -> Result<Json<PatientResponse>, ApiError>
where
  S: PatientStore + 'static,
{
  let id = patient_id(path)?;
  let patch = json_body(body)?;
  Ok(Json(state.patients.update(id, patch).await?))
}

/// `DELETE /api/receptionist/patients/{id}`, returning 204.
pub async fn delete<S>(
  State(state): State<AppState<S>>,
  guard: RequireRole<Receptionist>,
  path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError>
where
  S: PatientStore + 'static,
{
  let id = patient_id(path)?;
  state.patients.delete(id).await?;
  debug!(patient_id = id, user_id = guard.user.user_id, "patient deleted");
  Ok(StatusCode::NO_CONTENT)
}

// ─── Doctor ───────────────────────────────────────────────────────────────────

/// `PUT /api/doctor/patients/{id}` with body `{"medical_history":"..."}`.
///
/// An empty string clears the history.
pub async fn update_medical_history<S>(
  State(state): State<AppState<S>>,
  _guard: RequireRole<Doctor>,
  path: Result<Path<i64>, PathRejection>,
  body: Result<Json<MedicalHistoryInput>, JsonRejection>,
) -> Result<Json<PatientResponse>, ApiError>
where
  S: PatientStore + 'static,
{
  let id = patient_id(path)?;
  let input = json_body(body)?;
  Ok(Json(
    state
      .patients
      .update_medical_history(id, input.medical_history)
      .await?,
  ))
}
