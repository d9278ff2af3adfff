//! Port abstraction for credential hashing adapters.
//!
//! The hashing algorithm is an adapter concern; the domain only stores the
//! resulting opaque [`CredentialHash`] and asks the port to verify attempts
//! against it.

#[cfg(test)]
use mockall::automock;

use crate::domain::user::CredentialHash;

use super::define_port_error;

define_port_error! {
    /// Failures raised by credential hasher adapters.
    pub enum CredentialError {
        /// The stored credential could not be interpreted by this adapter.
        MalformedHash { message: String } => "stored credential is malformed: {message}",
        /// The hashing backend failed.
        Backend { message: String } => "credential backend failed: {message}",
    }
}

/// Credential hashing port.
#[cfg_attr(test, automock)]
pub trait CredentialHasher: Send + Sync {
    /// Derive an opaque salted hash for a new password.
    fn hash(&self, password: &str) -> Result<CredentialHash, CredentialError>;

    /// Check a login attempt against a stored credential.
    fn verify(&self, password: &str, stored: &CredentialHash) -> Result<bool, CredentialError>;
}
