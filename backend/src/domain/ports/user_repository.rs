//! Port abstraction for user persistence adapters and their errors.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::domain::user::{User, UserId, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Registration collided with an existing username.
        DuplicateUsername => "A user with the given username is already registered",
        /// Registration collided with an existing email.
        DuplicateEmail => "A user with the given email is already registered",
    }
}

/// User persistence port.
///
/// Usernames and emails are unique keys; `insert` reports a collision as a
/// duplicate error rather than overwriting.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user, failing on duplicate username or email.
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by unique username.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError>;
}
