//! JSON REST API for medrec.
//!
//! Exposes an axum [`Router`] backed by any store implementing both
//! [`PatientStore`] and [`CredentialStore`]. TLS and transport concerns are
//! the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = medrec_api::api_router(AppState::new(store, tokens));
//! ```

pub mod auth;
pub mod error;
pub mod guard;
pub mod patients;

use std::sync::Arc;

use axum::{
  Json, Router,
  extract::rejection::JsonRejection,
  routing::{get, post},
};
use medrec_auth::TokenService;
use medrec_core::{
  service::PatientService,
  store::{CredentialStore, PatientStore},
};
use serde_json::{Value, json};

pub use error::ApiError;
use guard::{Doctor, Receptionist};

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S> {
  pub store:    Arc<S>,
  pub patients: PatientService<S>,
  pub tokens:   Arc<TokenService>,
}

impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self {
      store:    Arc::clone(&self.store),
      patients: self.patients.clone(),
      tokens:   Arc::clone(&self.tokens),
    }
  }
}

impl<S: PatientStore> AppState<S> {
  pub fn new(store: Arc<S>, tokens: TokenService) -> Self {
    Self {
      patients: PatientService::new(Arc::clone(&store)),
      store,
      tokens: Arc::new(tokens),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(state: AppState<S>) -> Router<()>
where
  S: PatientStore + CredentialStore + 'static,
{
  Router::new()
    .route("/health", get(health))
    .route("/login", post(auth::login::<S>))
    // Receptionist
    .route(
      "/api/receptionist/patients",
      get(patients::list::<S, Receptionist>).post(patients::create::<S>),
    )
    .route(
      "/api/receptionist/patients/{id}",
      get(patients::get_one::<S, Receptionist>)
        .put(patients::update::<S>)
        .delete(patients::delete::<S>),
    )
    // Doctor
    .route("/api/doctor/patients", get(patients::list::<S, Doctor>))
    .route(
      "/api/doctor/patients/{id}",
      get(patients::get_one::<S, Doctor>)
        .put(patients::update_medical_history::<S>),
    )
    .with_state(state)
}

/// `GET /health`
async fn health() -> Json<Value> { Json(json!({ "status": "ok" })) }

/// Unwrap a JSON body, turning any rejection into a 400.
pub(crate) fn json_body<T>(
  body: Result<Json<T>, JsonRejection>,
) -> Result<T, ApiError> {
  body
    .map(|Json(v)| v)
    .map_err(|e| ApiError::BadRequest(e.body_text()))
}

// ─── Integration tests ────────────────────────────────────────────────────────
