//! Server assembly for medrec: configuration, seeding, and the HTTP stack.
//!
//! The binary in `main.rs` is a thin wrapper around these pieces.

pub mod settings;

use std::sync::Arc;

use axum::Router;
use medrec_api::{AppState, api_router};
use medrec_auth::TokenService;
use medrec_core::store::CredentialStore;
use medrec_store_sqlite::SqliteStore;
use tower_http::trace::TraceLayer;

pub use settings::{ConfigError, SeedUser, ServerConfig};

/// Build the request-traced application router over `store`.
pub fn app(store: Arc<SqliteStore>, config: &ServerConfig) -> Router {
  let tokens = TokenService::new(config.jwt_secret.as_bytes(), config.token_ttl());
  api_router(AppState::new(store, tokens)).layer(TraceLayer::new_for_http())
}

/// Insert every configured user whose email is not yet present.
///
/// Existing accounts are left untouched, so seeding is safe on every start.
/// Returns how many were inserted.
pub async fn seed_users<C: CredentialStore>(
  store: &C,
  users: &[SeedUser],
) -> Result<usize, C::Error> {
  let mut inserted = 0;
  for user in users {
    if store.find_by_email(&user.email).await?.is_some() {
      tracing::debug!(email = %user.email, "seed user already present");
      continue;
    }
    store.add_user(user.clone().into()).await?;
    tracing::info!(email = %user.email, role = %user.role, "seeded user");
    inserted += 1;
  }
  Ok(inserted)
}
