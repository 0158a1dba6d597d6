//! Handler for `POST /login`.

use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
};
use medrec_auth::LoginOutcome;
use medrec_core::store::{CredentialStore, PatientStore};
use serde::Deserialize;

use crate::{AppState, error::ApiError, json_body};

#[derive(Debug, Deserialize)]
pub struct LoginBody {
  pub email:    String,
  pub password: String,
}

impl LoginBody {
  fn validate(&self) -> Result<(), ApiError> {
    if self.email.is_empty() || self.password.is_empty() {
      return Err(ApiError::BadRequest(
        "email and password are required".to_string(),
      ));
    }
    match self.email.split_once('@') {
      Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
      _ => Err(ApiError::BadRequest("email is not valid".to_string())),
    }
  }
}

/// `POST /login` with body `{"email":"...","password":"..."}`
///
/// Returns `{"token":"...","user":{"id":..,"email":"..","role":".."}}`.
pub async fn login<S>(
  State(state): State<AppState<S>>,
  body: Result<Json<LoginBody>, JsonRejection>,
) -> Result<Json<LoginOutcome>, ApiError>
where
  S: PatientStore + CredentialStore + 'static,
{
  let body = json_body(body)?;
  body.validate()?;

  let outcome = medrec_auth::login(
    state.store.as_ref(),
    &state.tokens,
    &body.email,
    &body.password,
  )
  .await?;
  Ok(Json(outcome))
}
