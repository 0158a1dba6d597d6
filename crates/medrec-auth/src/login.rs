//! Email/password login against a [`CredentialStore`].

use medrec_core::{store::CredentialStore, user::UserSummary};
use serde::Serialize;
use tracing::debug;

use crate::{AuthError, Result, TokenService, password::verify_password};

/// Successful login: a fresh token plus the public view of the user.
#[derive(Debug, Clone, Serialize)]
pub struct LoginOutcome {
  pub token: String,
  pub user:  UserSummary,
}

/// Check `email`/`password` and issue a token for the matching user.
///
/// An unknown email and a wrong password both yield
/// [`AuthError::InvalidCredentials`].
pub async fn login<C>(
  store: &C,
  tokens: &TokenService,
  email: &str,
  password: &str,
) -> Result<LoginOutcome>
where
  C: CredentialStore,
{
  let user = store
    .find_by_email(email)
    .await
    .map_err(|e| AuthError::Store(Box::new(e)))?;

  let Some(user) = user else {
    debug!(email, "login rejected: unknown email");
    return Err(AuthError::InvalidCredentials);
  };

  if !verify_password(password, &user.password_hash) {
    debug!(email, "login rejected: password mismatch");
    return Err(AuthError::InvalidCredentials);
  }

  let token = tokens.issue(user.id, user.role)?;
  debug!(user_id = user.id, role = %user.role, "login succeeded");

  Ok(LoginOutcome {
    token,
    user: UserSummary::from(&user),
  })
}
