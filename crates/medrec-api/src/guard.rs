//! Bearer-token access guard.
//!
//! [`RequireRole<R>`] is an axum extractor: a handler that takes one only runs
//! when the request carries `Authorization: Bearer <token>`, the token
//! validates, and its role equals `R::ROLE`. A bare token without the
//! `Bearer` scheme is rejected.

use std::marker::PhantomData;

use axum::{
  extract::FromRequestParts,
  http::{HeaderMap, header, request::Parts},
};
use medrec_auth::TokenService;
use medrec_core::{store::PatientStore, user::Role};
use tracing::debug;

use crate::{AppState, error::ApiError};

// ─── Role requirements ───────────────────────────────────────────────────────

/// A route's declared role requirement.
pub trait RoleRequirement: Send + Sync + 'static {
  const ROLE: Role;
}

/// Marker: the route is reserved for receptionists.
pub struct Receptionist;

impl RoleRequirement for Receptionist {
  const ROLE: Role = Role::Receptionist;
}

/// Marker: the route is reserved for doctors.
pub struct Doctor;

impl RoleRequirement for Doctor {
  const ROLE: Role = Role::Doctor;
}

// ─── Extracted identity ──────────────────────────────────────────────────────

/// Who made the request, as proven by their token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
  pub user_id: i64,
  pub role:    Role,
}

/// Present in the handler means the caller holds a valid token for `R`.
pub struct RequireRole<R> {
  pub user: AuthenticatedUser,
  marker:   PhantomData<fn() -> R>,
}

// ─── Checks ──────────────────────────────────────────────────────────────────

/// Pull the token out of an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
  let value = headers
    .get(header::AUTHORIZATION)
    .ok_or(ApiError::Unauthenticated("authorization header required"))?
    .to_str()
    .map_err(|_| ApiError::Unauthenticated("invalid authorization header"))?;

  match value.strip_prefix("Bearer ") {
    Some(token) if !token.is_empty() && !token.contains(' ') => Ok(token),
    _ => Err(ApiError::Unauthenticated("invalid authorization header")),
  }
}

/// Run the full guard: header shape, token validity, then role.
pub fn authorize(
  headers: &HeaderMap,
  tokens: &TokenService,
  required: Role,
) -> Result<AuthenticatedUser, ApiError> {
  let token = bearer_token(headers)?;

  let claims = tokens.validate(token).map_err(|e| {
    debug!(error = %e, expired = e.is_expired(), "token rejected");
    ApiError::Unauthenticated("invalid token")
  })?;

  if claims.role != required {
    debug!(
      user_id = claims.user_id,
      role = %claims.role,
      required = %required,
      "role mismatch"
    );
    return Err(ApiError::Forbidden);
  }

  Ok(AuthenticatedUser {
    user_id: claims.user_id,
    role:    claims.role,
  })
}

impl<S, R> FromRequestParts<AppState<S>> for RequireRole<R>
where
  S: PatientStore + 'static,
  R: RoleRequirement,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let user = authorize(&parts.headers, &state.tokens, R::ROLE)?;
    Ok(RequireRole {
      user,
      marker: PhantomData,
    })
  }
}
