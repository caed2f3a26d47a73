//! Credential verifier: password digests for account login.

use std::fmt::Debug;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use tracing::warn;

use crate::errors::domain::{DomainError, InfraErrorKind};

/// Opaque `hash(secret) -> digest` / `verify(secret, digest)` capability.
pub trait CredentialVerifier: Send + Sync + Debug {
    fn hash(&self, secret: &str) -> Result<String, DomainError>;

    /// False for a wrong secret and for a digest that cannot be parsed.
    fn verify(&self, secret: &str, digest: &str) -> bool;
}

/// Argon2id with a random salt; digests are PHC strings.
#[derive(Debug, Default, Clone)]
pub struct Argon2Verifier;

impl CredentialVerifier for Argon2Verifier {
    fn hash(&self, secret: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(secret.as_bytes(), &salt)
            .map(|digest| digest.to_string())
            .map_err(|e| {
                DomainError::infra(
                    InfraErrorKind::Other(format!("argon2: {e}")),
                    "Unable to store credentials at this time",
                )
            })
    }

    fn verify(&self, secret: &str, digest: &str) -> bool {
        let parsed = match PasswordHash::new(digest) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(error = %e, "stored credential digest is not a PHC string");
                return false;
            }
        };
        Argon2::default()
            .verify_password(secret.as_bytes(), &parsed)
            .is_ok()
    }
}
