//! Salted-digest credential hasher.
//!
//! Encodes credentials as `<hex salt>$<hex digest>` where the digest is
//! SHA-256 over salt bytes followed by the password bytes. Adequate for the
//! development server and tests; a production deployment would swap in a
//! memory-hard adapter behind the same port.

use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::domain::ports::{CredentialError, CredentialHasher};
use crate::domain::CredentialHash;

const SALT_LEN: usize = 16;

#[derive(Default, Clone)]
pub struct Sha256CredentialHasher;

impl Sha256CredentialHasher {
    pub fn new() -> Self {
        Self
    }

    fn digest(salt: &[u8], password: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(salt);
        hasher.update(password.as_bytes());
        hex::encode(hasher.finalize())
    }
}

impl CredentialHasher for Sha256CredentialHasher {
    fn hash(&self, password: &str) -> Result<CredentialHash, CredentialError> {
        let mut salt = [0_u8; SALT_LEN];
        rand::thread_rng().fill_bytes(&mut salt);
        let encoded = format!("{}${}", hex::encode(salt), Self::digest(&salt, password));
        Ok(CredentialHash::new(encoded))
    }

    fn verify(&self, password: &str, stored: &CredentialHash) -> Result<bool, CredentialError> {
        let Some((salt_hex, digest_hex)) = stored.as_str().split_once('$') else {
            return Err(CredentialError::malformed_hash(
                "missing salt/digest separator",
            ));
        };
        let salt = hex::decode(salt_hex)
            .map_err(|err| CredentialError::malformed_hash(err.to_string()))?;
        Ok(Self::digest(&salt, password) == digest_hex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_a_password() {
        let hasher = Sha256CredentialHasher::new();
        let stored = hasher.hash("hunter2").expect("hash");
        assert!(hasher.verify("hunter2", &stored).expect("verify"));
        assert!(!hasher.verify("hunter3", &stored).expect("verify"));
    }

    #[test]
    fn hashes_are_salted() {
        let hasher = Sha256CredentialHasher::new();
        let first = hasher.hash("hunter2").expect("hash");
        let second = hasher.hash("hunter2").expect("hash");
        assert_ne!(first.as_str(), second.as_str());
    }

    #[test]
    fn malformed_stored_credential_is_an_error() {
        let hasher = Sha256CredentialHasher::new();
        let err = hasher
            .verify("hunter2", &CredentialHash::new("no-separator"))
            .expect_err("malformed");
        assert!(matches!(err, CredentialError::MalformedHash { .. }));
    }
}
