//! [`TokenService`] issues and validates HS256 session tokens.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
  Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
};
use medrec_core::user::Role;

use crate::{AuthError, Claims, Result};

/// Default validity window of an issued token.
pub const DEFAULT_TTL: Duration = Duration::hours(24);

/// Signs and verifies role-claim tokens with a single shared secret.
///
/// Holds no mutable state; share it behind an `Arc`.
#[derive(Clone)]
pub struct TokenService {
  encoding:   EncodingKey,
  decoding:   DecodingKey,
  validation: Validation,
  ttl:        Duration,
}

impl TokenService {
  pub fn new(secret: &[u8], ttl: Duration) -> Self {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    validation.leeway = 0;

    Self {
      encoding: EncodingKey::from_secret(secret),
      decoding: DecodingKey::from_secret(secret),
      validation,
      ttl,
    }
  }

  /// Issue a token for `user_id` valid from now for the configured TTL.
  pub fn issue(&self, user_id: i64, role: Role) -> Result<String> {
    self.issue_at(user_id, role, Utc::now())
  }

  /// Issue a token as if at instant `now`.
  pub fn issue_at(
    &self,
    user_id: i64,
    role: Role,
    now: DateTime<Utc>,
  ) -> Result<String> {
    let claims = Claims {
      user_id,
      role,
      iat: now.timestamp(),
      exp: (now + self.ttl).timestamp(),
    };
    encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
      .map_err(AuthError::Signing)
  }

  /// Verify signature and expiry, returning the decoded claims.
  pub fn validate(&self, token: &str) -> Result<Claims> {
    decode::<Claims>(token, &self.decoding, &self.validation)
      .map(|data| data.claims)
      .map_err(AuthError::InvalidToken)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const SECRET: &[u8] = b"test-secret-key-at-least-32-bytes";

  fn service() -> TokenService { TokenService::new(SECRET, DEFAULT_TTL) }

  #[test]
  fn issued_token_validates_to_same_claims() {
    let svc = service();
    let token = svc.issue(7, Role::Doctor).unwrap();

    let claims = svc.validate(&token).unwrap();
    assert_eq!(claims.user_id, 7);
    assert_eq!(claims.role, Role::Doctor);
    assert_eq!(claims.exp - claims.iat, DEFAULT_TTL.num_seconds());
  }

  #[test]
  fn token_older_than_ttl_is_rejected() {
    let svc = service();
    let issued = Utc::now() - DEFAULT_TTL - Duration::minutes(1);
    let token = svc.issue_at(1, Role::Receptionist, issued).unwrap();

    let err = svc.validate(&token).unwrap_err();
    assert!(err.is_expired(), "unexpected error: {err}");
  }

  #[test]
  fn token_within_ttl_is_accepted() {
    let svc = service();
    let issued = Utc::now() - DEFAULT_TTL + Duration::minutes(5);
    let token = svc.issue_at(1, Role::Receptionist, issued).unwrap();
    assert!(svc.validate(&token).is_ok());
  }

  #[test]
  fn wrong_secret_is_rejected() {
    let token = service().issue(1, Role::Doctor).unwrap();
    let other = TokenService::new(b"another-secret-also-32-bytes-long", DEFAULT_TTL);

    let err = other.validate(&token).unwrap_err();
    assert!(matches!(err, AuthError::InvalidToken(_)));
    assert!(!err.is_expired());
  }

  #[test]
  fn tampered_payload_is_rejected() {
    let svc = service();
    let token = svc.issue(1, Role::Doctor).unwrap();
    let forged = svc.issue(1, Role::Receptionist).unwrap();

    // Splice the receptionist payload onto the doctor signature.
    let parts: Vec<&str> = token.split('.').collect();
    let forged_parts: Vec<&str> = forged.split('.').collect();
    let spliced = format!("{}.{}.{}", parts[0], forged_parts[1], parts[2]);

    assert!(matches!(svc.validate(&spliced), Err(AuthError::InvalidToken(_))));
  }

  #[test]
  fn garbage_is_rejected() {
    let svc = service();
    assert!(matches!(svc.validate("not-a-jwt"), Err(AuthError::InvalidToken(_))));
    assert!(matches!(svc.validate(""), Err(AuthError::InvalidToken(_))));
  }

  #[test]
  fn unknown_role_claim_is_rejected() {
    #[derive(serde::Serialize)]
    struct Foreign<'a> {
      user_id: i64,
      role:    &'a str,
      iat:     i64,
      exp:     i64,
    }

    let now = Utc::now().timestamp();
    let token = encode(
      &Header::new(Algorithm::HS256),
      &Foreign { user_id: 1, role: "admin", iat: now, exp: now + 3600 },
      &EncodingKey::from_secret(SECRET),
    )
    .unwrap();

    assert!(matches!(service().validate(&token), Err(AuthError::InvalidToken(_))));
  }
}
