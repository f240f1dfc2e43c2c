//! Credential storage and verification.
//!
//! Two disjoint credential sets (users and admins) live behind a single
//! lock. Secret handling goes through the [`CredentialVerifier`] seam, so
//! the store itself never decides how secrets are encoded: the plain
//! verifier reproduces the legacy exact-match behavior, the SHA-256
//! verifier stores digests instead. The external contract is identical
//! either way.

use std::collections::HashMap;
use std::sync::RwLock;

use sha2::{Digest, Sha256};

use crate::error::{Error, Result};
use crate::model::Role;

/// Encodes secrets for storage and checks submissions against stored form.
pub trait CredentialVerifier: Send + Sync {
    /// Encode a secret for storage.
    fn encode(&self, secret: &str) -> String;

    /// Check a submitted secret against its stored encoding.
    fn verify(&self, secret: &str, stored: &str) -> bool;
}

/// Stores secrets as-is and compares them for equality.
pub struct PlainVerifier;

impl CredentialVerifier for PlainVerifier {
    fn encode(&self, secret: &str) -> String {
        secret.to_string()
    }

    fn verify(&self, secret: &str, stored: &str) -> bool {
        secret == stored
    }
}

/// Stores hex-encoded SHA-256 digests instead of plaintext.
pub struct Sha256Verifier;

impl CredentialVerifier for Sha256Verifier {
    fn encode(&self, secret: &str) -> String {
        hex::encode(Sha256::digest(secret.as_bytes()))
    }

    fn verify(&self, secret: &str, stored: &str) -> bool {
        self.encode(secret) == stored
    }
}

#[derive(Default)]
struct Credentials {
    users: HashMap<String, String>,
    admins: HashMap<String, String>,
}

/// Username→credential store for both roles.
///
/// A username exists in at most one of the two sets; registration and
/// seeding both enforce that.
pub struct IdentityStore {
    inner: RwLock<Credentials>,
    verifier: Box<dyn CredentialVerifier>,
}

impl IdentityStore {
    pub fn new(verifier: Box<dyn CredentialVerifier>) -> Self {
        Self {
            inner: RwLock::new(Credentials::default()),
            verifier,
        }
    }

    /// Register a new plain user.
    ///
    /// Fails with [`Error::DuplicateUsername`] if the name exists in either
    /// role set; the existing credential is left untouched. Registration
    /// never creates admins.
    pub fn register(&self, username: &str, secret: &str) -> Result<()> {
        let mut inner = self.inner.write().unwrap();
        if inner.users.contains_key(username) || inner.admins.contains_key(username) {
            return Err(Error::DuplicateUsername(username.to_string()));
        }
        inner
            .users
            .insert(username.to_string(), self.verifier.encode(secret));
        Ok(())
    }

    /// Install an admin credential. Admin accounts are provisioned
    /// out-of-band at startup, never through [`register`](Self::register).
    /// Re-seeding an existing admin replaces its secret; a name already
    /// taken by a plain user is rejected.
    pub fn seed_admin(&self, username: &str, secret: &str) -> Result<()> {
        let mut inner = self.inner.write().unwrap();
        if inner.users.contains_key(username) {
            return Err(Error::DuplicateUsername(username.to_string()));
        }
        inner
            .admins
            .insert(username.to_string(), self.verifier.encode(secret));
        Ok(())
    }

    /// Resolve a login. Admins are checked first, then users.
    pub fn authenticate(&self, username: &str, secret: &str) -> Result<Role> {
        let inner = self.inner.read().unwrap();
        if let Some(stored) = inner.admins.get(username) {
            if self.verifier.verify(secret, stored) {
                return Ok(Role::Admin);
            }
        }
        if let Some(stored) = inner.users.get(username) {
            if self.verifier.verify(secret, stored) {
                return Ok(Role::User);
            }
        }
        Err(Error::InvalidCredentials)
    }
}

impl Default for IdentityStore {
    fn default() -> Self {
        Self::new(Box::new(Sha256Verifier))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_then_authenticate() {
        let store = IdentityStore::default();
        store.register("alice", "hunter2").unwrap();
        assert_eq!(store.authenticate("alice", "hunter2").unwrap(), Role::User);
        assert_eq!(
            store.authenticate("alice", "wrong"),
            Err(Error::InvalidCredentials)
        );
        assert_eq!(
            store.authenticate("nobody", "hunter2"),
            Err(Error::InvalidCredentials)
        );
    }

    #[test]
    fn duplicate_registration_rejected_across_roles() {
        let store = IdentityStore::default();
        store.seed_admin("admin", "admin123").unwrap();
        store.register("alice", "hunter2").unwrap();

        assert_eq!(
            store.register("alice", "other"),
            Err(Error::DuplicateUsername("alice".into()))
        );
        assert_eq!(
            store.register("admin", "other"),
            Err(Error::DuplicateUsername("admin".into()))
        );

        // The original credentials survived both failed attempts.
        assert_eq!(store.authenticate("alice", "hunter2").unwrap(), Role::User);
        assert_eq!(
            store.authenticate("admin", "admin123").unwrap(),
            Role::Admin
        );
    }

    #[test]
    fn seeding_over_a_user_name_is_rejected() {
        let store = IdentityStore::default();
        store.register("alice", "hunter2").unwrap();
        assert_eq!(
            store.seed_admin("alice", "boss"),
            Err(Error::DuplicateUsername("alice".into()))
        );
    }

    #[test]
    fn reseeding_replaces_the_admin_secret() {
        let store = IdentityStore::default();
        store.seed_admin("admin", "first").unwrap();
        store.seed_admin("admin", "second").unwrap();
        assert_eq!(
            store.authenticate("admin", "first"),
            Err(Error::InvalidCredentials)
        );
        assert_eq!(store.authenticate("admin", "second").unwrap(), Role::Admin);
    }

    #[test]
    fn plain_verifier_matches_legacy_behavior() {
        let store = IdentityStore::new(Box::new(PlainVerifier));
        store.register("bob", "secret").unwrap();
        assert_eq!(store.authenticate("bob", "secret").unwrap(), Role::User);
        assert_eq!(
            store.authenticate("bob", "Secret"),
            Err(Error::InvalidCredentials)
        );
    }

    #[test]
    fn sha256_verifier_does_not_store_plaintext() {
        let verifier = Sha256Verifier;
        let stored = verifier.encode("hunter2");
        assert_ne!(stored, "hunter2");
        assert!(verifier.verify("hunter2", &stored));
        assert!(!verifier.verify("hunter3", &stored));
    }
}
