//! Authentication for medrec: signed role-claim tokens and password login.
//!
//! Token validation is stateless: nothing here consults a store except
//! [`login`], which looks the user up once to check their password.

pub mod claims;
pub mod error;
pub mod login;
pub mod password;
pub mod token;

pub use claims::Claims;
pub use error::{AuthError, Result};
pub use login::{LoginOutcome, login};
pub use token::TokenService;
