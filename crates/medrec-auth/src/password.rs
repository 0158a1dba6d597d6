//! argon2 password hashing and verification.

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
  password_hash::SaltString,
};
use rand_core::OsRng;

use crate::{AuthError, Result};

/// Hash `password` into an argon2id PHC string with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String> {
  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map(|hash| hash.to_string())
    .map_err(|e| AuthError::PasswordHash(e.to_string()))
}

/// `true` only if `phc` parses and matches `password`.
pub fn verify_password(password: &str, phc: &str) -> bool {
  let Ok(parsed) = PasswordHash::new(phc) else {
    return false;
  };
  Argon2::default()
    .verify_password(password.as_bytes(), &parsed)
    .is_ok()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn hash_then_verify() {
    let phc = hash_password("password123").unwrap();
    assert!(phc.starts_with("$argon2id$"));
    assert!(verify_password("password123", &phc));
    assert!(!verify_password("password124", &phc));
  }

  #[test]
  fn salts_differ_between_hashes() {
    assert_ne!(hash_password("x").unwrap(), hash_password("x").unwrap());
  }

  #[test]
  fn malformed_hash_never_verifies() {
    assert!(!verify_password("password123", "not-a-phc-string"));
  }
}
