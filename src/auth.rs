//! Auth
//!
//! There are no accounts. Any non-empty email and password pair logs the visitor in for the
//! rest of the session.

use thiserror::Error;
use tracing::debug;

/// Errors raised by log-in attempts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Email or password was blank.
    #[error("email and password are required")]
    MissingCredentials,
}

/// Log-in form values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// Email address
    pub email: String,

    /// Password
    pub password: String,
}

impl Credentials {
    /// Credentials from an email and password.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Check both values are present.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingCredentials`] if either is blank.
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        Ok(())
    }
}

/// Session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Session {
    logged_in: bool,
}

impl Session {
    /// Whether the visitor is logged in.
    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    /// Log in with credentials.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingCredentials`] if either value is blank; the session is
    /// unchanged.
    pub fn log_in(&mut self, credentials: &Credentials) -> Result<(), AuthError> {
        credentials.validate()?;

        debug!("logged in");

        self.logged_in = true;

        Ok(())
    }

    /// Log out.
    pub fn log_out(&mut self) {
        debug!("logged out");

        self.logged_in = false;
    }
}
