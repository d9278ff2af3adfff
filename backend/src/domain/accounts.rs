//! Account use-cases: registration and credential verification.
//!
//! Password hashing lives behind the [`CredentialHasher`] port; this service
//! only wires validated identity data to the user repository and keeps the
//! login failure message identical for unknown users and wrong passwords so
//! the response leaks nothing about which half was wrong.

use std::sync::Arc;

use crate::domain::error::Error;
use crate::domain::ports::{CredentialHasher, UserPersistenceError, UserRepository};
use crate::domain::user::{Email, User, UserId, Username};
use crate::domain::ApiResult;

/// Message flashed on any failed login attempt.
pub const LOGIN_FAILED_MESSAGE: &str = "Password or username is incorrect";

/// Account use-case service over the user repository and hasher ports.
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn CredentialHasher>,
}

impl AccountService {
    /// Bundle the ports the account use-cases depend on.
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn CredentialHasher>) -> Self {
        Self { users, hasher }
    }

    /// Register a new user with a unique username and email.
    ///
    /// Duplicate registrations surface as client errors carrying the
    /// repository's message; everything else is an internal failure.
    pub async fn register(
        &self,
        username: Username,
        email: Email,
        password: &str,
    ) -> ApiResult<User> {
        let credential = self
            .hasher
            .hash(password)
            .map_err(|err| Error::internal(err.to_string()))?;
        let user = User::new(UserId::random(), username, email, credential);
        self.users.insert(&user).await.map_err(|err| match err {
            UserPersistenceError::DuplicateUsername | UserPersistenceError::DuplicateEmail => {
                Error::invalid_request(err.to_string())
            }
            other => Error::internal(other.to_string()),
        })?;
        Ok(user)
    }

    /// Verify a username/password pair, returning the matching user.
    pub async fn authenticate(&self, username: &Username, password: &str) -> ApiResult<User> {
        let user = self
            .users
            .find_by_username(username)
            .await
            .map_err(|err| Error::internal(err.to_string()))?
            .ok_or_else(|| Error::unauthorized(LOGIN_FAILED_MESSAGE))?;

        let matches = self
            .hasher
            .verify(password, user.credential())
            .map_err(|err| Error::internal(err.to_string()))?;
        if matches {
            Ok(user)
        } else {
            Err(Error::unauthorized(LOGIN_FAILED_MESSAGE))
        }
    }
}
