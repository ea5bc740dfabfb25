//! Single-account credential check.
//!
//! SYSTEM CONTEXT
//! ==============
//! The application has exactly one account. A successful check yields the
//! `SessionUser` that the session manager persists; there is no token and no
//! server round trip.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::model::SessionUser;

const ACCOUNT_EMAIL: &str = "kinyeramo@gmail.com";
const ACCOUNT_PASSWORD: &str = "password";
const ACCOUNT_NAME: &str = "Kinyera Amos";
const ACCOUNT_ID: u64 = 1;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid email or password. Please try again.")]
    InvalidCredentials,
}

/// Login form input.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self { email: email.into(), password: password.into() }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Check `credentials` against the fixed account.
///
/// # Errors
///
/// Returns [`AuthError::InvalidCredentials`] when either field does not match.
pub fn authenticate(credentials: &Credentials) -> Result<SessionUser, AuthError> {
    let email = credentials.email.trim();
    if email != ACCOUNT_EMAIL || credentials.password != ACCOUNT_PASSWORD {
        return Err(AuthError::InvalidCredentials);
    }
    Ok(SessionUser { id: ACCOUNT_ID, name: ACCOUNT_NAME.to_owned(), email: email.to_owned() })
}
