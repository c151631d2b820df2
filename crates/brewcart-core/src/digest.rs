//! Password digests: Argon2id in PHC string format.
//!
//! Digests are one-way. Verification parses the parameters out of the
//! stored PHC string, so a registry can change [`DigestParams`] without
//! invalidating existing users.

use std::fmt;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Argon2id cost parameters used when creating new digests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigestParams {
    /// Memory cost in KiB.
    pub memory_kib: u32,
    /// Number of passes.
    pub iterations: u32,
    /// Degree of parallelism.
    pub parallelism: u32,
}

impl DigestParams {
    /// The smallest cost Argon2 accepts. For tests only.
    pub const fn insecure_fast() -> Self {
        Self {
            memory_kib: Params::MIN_M_COST,
            iterations: Params::MIN_T_COST,
            parallelism: Params::MIN_P_COST,
        }
    }

    fn hasher(&self) -> Result<Argon2<'static>> {
        let params = Params::new(self.memory_kib, self.iterations, self.parallelism, None)
            .map_err(|e| CoreError::DigestParams(e.to_string()))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

impl Default for DigestParams {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

/// A stored password digest (PHC string).
///
/// Persisted under the `password` field of a user record.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Digest a password with a fresh random salt.
    pub fn create(password: &str, params: &DigestParams) -> Result<Self> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = params
            .hasher()?
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| CoreError::Digest(e.to_string()))?;
        Ok(Self(hash.to_string()))
    }

    /// Check a password against this digest.
    ///
    /// Returns `false` both for a wrong password and for a stored value
    /// that is not a parseable PHC string.
    pub fn verify(&self, password: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(&self.0) else {
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

// Digests never show up in logs.
impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_verifies_same_password() {
        let digest = PasswordDigest::create("secret1", &DigestParams::insecure_fast()).unwrap();
        assert!(digest.verify("secret1"));
        assert!(!digest.verify("secret2"));
        assert!(!digest.verify(""));
    }

    #[test]
    fn test_digest_is_not_plaintext() {
        let digest = PasswordDigest::create("secret1", &DigestParams::insecure_fast()).unwrap();
        let stored = serde_json::to_string(&digest).unwrap();
        assert!(!stored.contains("secret1"));
        assert!(stored.starts_with("\"$argon2id$"));
    }

    #[test]
    fn test_salts_differ() {
        let params = DigestParams::insecure_fast();
        let a = PasswordDigest::create("secret1", &params).unwrap();
        let b = PasswordDigest::create("secret1", &params).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_unparseable_digest_never_verifies() {
        // A rolling-hash digest from the legacy script.
        let legacy: PasswordDigest = serde_json::from_str("\"-3b6e4b1a\"").unwrap();
        assert!(!legacy.verify("secret1"));
    }

    #[test]
    fn test_debug_hides_digest() {
        let digest = PasswordDigest::create("secret1", &DigestParams::insecure_fast()).unwrap();
        assert_eq!(format!("{:?}", digest), "PasswordDigest(..)");
    }

    #[test]
    fn test_invalid_params_rejected() {
        let params = DigestParams {
            memory_kib: 0,
            iterations: 0,
            parallelism: 0,
        };
        assert!(matches!(
            PasswordDigest::create("secret1", &params),
            Err(CoreError::DigestParams(_))
        ));
    }
}
