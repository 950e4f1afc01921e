//! Argon2 password hashing implementation.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString, rand_core::OsRng},
};

use campus_core::ports::{AuthError, PasswordHasher};

/// Argon2id-based password hasher producing self-describing PHC digests.
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    /// `time_cost` is the iteration count knob from configuration;
    /// memory size and parallelism stay at the library defaults.
    pub fn new(time_cost: u32) -> Result<Self, AuthError> {
        let params = Params::new(
            Params::DEFAULT_M_COST,
            time_cost,
            Params::DEFAULT_P_COST,
            None,
        )
        .map_err(|e| AuthError::Hashing(e.to_string()))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|digest| digest.to_string())
            .map_err(|e| AuthError::Hashing(e.to_string()))
    }

    fn verify(&self, password: &str, digest: &str) -> bool {
        // A digest that does not parse verifies as false, same as a
        // wrong password.
        let Ok(parsed) = PasswordHash::new(digest) else {
            return false;
        };

        self.argon2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = Argon2PasswordHasher::default();
        let password = "correct-horse-battery";

        let digest = hasher.hash(password).unwrap();
        assert!(hasher.verify(password, &digest));
        assert!(!hasher.verify("wrong-password", &digest));
    }

    #[test]
    fn test_digests_are_salted() {
        let hasher = Argon2PasswordHasher::default();

        let a = hasher.hash("secret1").unwrap();
        let b = hasher.hash("secret1").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_malformed_digest_verifies_false() {
        let hasher = Argon2PasswordHasher::default();

        assert!(!hasher.verify("secret1", "not-a-digest"));
        assert!(!hasher.verify("secret1", ""));
        assert!(!hasher.verify("secret1", "$argon2id$v=19$truncated"));
    }

    #[test]
    fn test_configured_time_cost() {
        let hasher = Argon2PasswordHasher::new(3).unwrap();

        let digest = hasher.hash("secret1").unwrap();
        assert!(digest.contains("t=3"));
        assert!(hasher.verify("secret1", &digest));
    }
}
