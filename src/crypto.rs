//! Random identifiers, session secret hashing, and password hashing.

use argon2::{Algorithm, Argon2, Params, PasswordVerifier, Version};
use password_hash::{PasswordHash, PasswordHasher as ArgonPasswordHasher, SaltString};
use rand::RngCore;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::config::HashingConfig;
use crate::{AuthError, SecretString};

/// Lowercase alphanumerics without the look-alikes `0`, `1`, `l` and `o`.
///
/// 32 symbols, so every character carries exactly 5 bits.
pub const SESSION_ALPHABET: &[u8; 32] = b"abcdefghijkmnpqrstuvwxyz23456789";

/// Length of both halves of a session token (24 * 5 = 120 bits each).
pub const SESSION_ID_LENGTH: usize = 24;
pub const SESSION_SECRET_LENGTH: usize = 24;

pub const USER_ID_PREFIX: &str = "user_";
pub const USER_ID_RANDOM_LENGTH: usize = 16;

/// Size of a session secret digest in bytes.
pub const SECRET_DIGEST_LENGTH: usize = 32;

/// Generates `length` characters drawn uniformly from [`SESSION_ALPHABET`].
///
/// Each character consumes one byte from the OS random source; the top five
/// bits select the symbol, which keeps the distribution exactly uniform.
pub fn generate_random_string(length: usize) -> String {
    let mut bytes = vec![0u8; length];
    OsRng.fill_bytes(&mut bytes);

    bytes
        .iter()
        .map(|b| char::from(SESSION_ALPHABET[usize::from(b >> 3)]))
        .collect()
}

#[must_use]
pub fn generate_session_id() -> String {
    generate_random_string(SESSION_ID_LENGTH)
}

#[must_use]
pub fn generate_session_secret() -> SecretString {
    SecretString::new(generate_random_string(SESSION_SECRET_LENGTH))
}

/// `user_` followed by 16 alphabet characters.
#[must_use]
pub fn generate_user_id() -> String {
    format!(
        "{USER_ID_PREFIX}{}",
        generate_random_string(USER_ID_RANDOM_LENGTH)
    )
}

/// SHA-256 of the secret's UTF-8 bytes.
///
/// Session secrets are 120-bit random strings, so a fast digest is enough;
/// the slow hash is reserved for passwords.
pub fn hash_session_secret(secret: &str) -> Vec<u8> {
    Sha256::digest(secret.as_bytes()).to_vec()
}

/// Compares two byte strings without branching on the first differing byte.
///
/// Lengths are not secret and are checked up front.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

/// Recomputes the digest of `secret` and compares it with the stored one.
pub fn verify_session_secret(secret: &str, stored_digest: &[u8]) -> bool {
    constant_time_eq(&hash_session_secret(secret), stored_digest)
}

/// Password hashing seam used by the signup and login actions.
pub trait PasswordHasher: Send + Sync {
    /// Hashes a password into a PHC string.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::PasswordHashError` if the parameters are rejected.
    fn hash(&self, password: &SecretString) -> Result<String, AuthError>;

    /// Checks a password against a stored PHC string.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::PasswordHashError` if the stored hash is malformed.
    fn verify(&self, password: &SecretString, hash: &str) -> Result<bool, AuthError>;
}

/// Argon2id hasher with parameters pinned in configuration.
///
/// ```rust
/// use parlor_auth::SecretString;
/// use parlor_auth::crypto::{Argon2Hasher, PasswordHasher};
///
/// let hasher = Argon2Hasher::default();
/// let password = SecretString::new("correct horse");
/// let hash = hasher.hash(&password).unwrap();
/// assert!(hasher.verify(&password, &hash).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct Argon2Hasher {
    config: HashingConfig,
}

impl Default for Argon2Hasher {
    fn default() -> Self {
        Self::from_config(HashingConfig::default())
    }
}

impl Argon2Hasher {
    #[must_use]
    pub fn from_config(config: HashingConfig) -> Self {
        Self { config }
    }

    /// 64 MiB, 3 iterations, 4 lanes.
    #[must_use]
    pub fn production() -> Self {
        Self::from_config(HashingConfig::production())
    }

    #[must_use]
    pub fn config(&self) -> &HashingConfig {
        &self.config
    }

    fn argon2(&self) -> Result<Argon2<'static>, AuthError> {
        let params = Params::new(
            self.config.memory_cost,
            self.config.time_cost,
            self.config.parallelism,
            Some(self.config.output_len),
        )
        .map_err(|e| {
            log::error!(target: "parlor_auth", "msg=\"invalid argon2 parameters\", error=\"{e}\"");
            AuthError::PasswordHashError
        })?;

        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &SecretString) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2()?
            .hash_password(password.expose_secret().as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|_| AuthError::PasswordHashError)
    }

    fn verify(&self, password: &SecretString, hash: &str) -> Result<bool, AuthError> {
        let parsed = PasswordHash::new(hash).map_err(|_| AuthError::PasswordHashError)?;

        // parameters come from the PHC string, so older hashes keep verifying
        // after the configured costs change
        Ok(Argon2::default()
            .verify_password(password.expose_secret().as_bytes(), &parsed)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_string_uses_alphabet_only() {
        let s = generate_random_string(500);
        assert_eq!(s.len(), 500);
        assert!(s.bytes().all(|b| SESSION_ALPHABET.contains(&b)));
        for excluded in ['0', '1', 'l', 'o', '.'] {
            assert!(!s.contains(excluded));
        }
    }

    #[test]
    fn test_session_id_and_secret_lengths() {
        assert_eq!(generate_session_id().len(), 24);
        assert_eq!(generate_session_secret().expose_secret().len(), 24);
    }

    #[test]
    fn test_session_ids_are_unique() {
        assert_ne!(generate_session_id(), generate_session_id());
    }

    #[test]
    fn test_user_id_format() {
        let id = generate_user_id();
        assert!(id.starts_with("user_"));
        assert_eq!(id.len(), 5 + 16);
        assert!(id[5..].bytes().all(|b| SESSION_ALPHABET.contains(&b)));
    }

    #[test]
    fn test_hash_session_secret_is_deterministic_sha256() {
        let a = hash_session_secret("abc");
        let b = hash_session_secret("abc");
        assert_eq!(a, b);
        assert_eq!(a.len(), SECRET_DIGEST_LENGTH);
        // SHA-256("abc")
        assert_eq!(a[..4], [0xba, 0x78, 0x16, 0xbf]);
    }

    #[test]
    fn test_verify_session_secret() {
        let digest = hash_session_secret("secret-one");
        assert!(verify_session_secret("secret-one", &digest));
        assert!(!verify_session_secret("secret-two", &digest));
    }

    #[test]
    fn test_verify_rejects_every_single_byte_substitution() {
        let digest = hash_session_secret("abcdefghijkmnpqrstuvwxyz");
        for i in 0..digest.len() {
            let mut tampered = digest.clone();
            tampered[i] ^= 0x01;
            assert!(
                !verify_session_secret("abcdefghijkmnpqrstuvwxyz", &tampered),
                "byte {i} substitution accepted"
            );
        }
    }

    #[test]
    fn test_verify_rejects_truncated_digest() {
        let digest = hash_session_secret("secret");
        assert!(!verify_session_secret("secret", &digest[..31]));
        assert!(!verify_session_secret("secret", &[]));
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"hello", b"hello"));
        assert!(!constant_time_eq(b"hello", b"world"));
        assert!(!constant_time_eq(b"hello", b"hello!"));
        assert!(!constant_time_eq(b"", b"x"));
        assert!(constant_time_eq(b"", b""));
    }

    #[test]
    fn test_argon2_round_trip() {
        let hasher = Argon2Hasher::default();
        let password = SecretString::new("securepassword");
        let hash = hasher.hash(&password).unwrap();

        assert!(hash.starts_with("$argon2id$v=19$m=19456,t=2,p=1$"));
        assert!(hasher.verify(&password, &hash).unwrap());
        assert!(!hasher.verify(&SecretString::new("securepassword!"), &hash).unwrap());
    }

    #[test]
    fn test_argon2_salts_differ() {
        let hasher = Argon2Hasher::default();
        let password = SecretString::new("securepassword");
        assert_ne!(
            hasher.hash(&password).unwrap(),
            hasher.hash(&password).unwrap()
        );
    }

    #[test]
    fn test_argon2_malformed_hash() {
        let hasher = Argon2Hasher::default();
        let result = hasher.verify(&SecretString::new("whatever"), "not-a-phc-string");
        assert_eq!(result.unwrap_err(), AuthError::PasswordHashError);
    }

    #[test]
    fn test_argon2_invalid_params_error() {
        let hasher = Argon2Hasher::from_config(HashingConfig {
            memory_cost: 1,
            ..HashingConfig::default()
        });
        let result = hasher.hash(&SecretString::new("securepassword"));
        assert_eq!(result.unwrap_err(), AuthError::PasswordHashError);
    }
}
