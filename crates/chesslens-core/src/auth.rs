//! Authentication service trait.
//!
//! Credential issuance happens on the server; the client only exchanges
//! username and password for a [`Credential`] and registers new accounts.

use crate::error::Result;
use crate::session::Credential;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Account details for registration.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// An account as returned by the server after registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredUser {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[async_trait]
pub trait AuthService: Send + Sync {
    /// Exchanges username and password for a bearer credential.
    ///
    /// # Returns
    ///
    /// - `Ok(Credential)`: login accepted
    /// - `Err(LensError::Auth)`: rejected or the server was unreachable
    async fn login(&self, username: &str, password: &str) -> Result<Credential>;

    /// Registers a new account. Does not log in.
    ///
    /// # Returns
    ///
    /// - `Ok(RegisteredUser)`: account created
    /// - `Err(LensError::Auth)`: username or email taken, or the request failed
    async fn register(&self, user: &NewUser) -> Result<RegisteredUser>;
}
