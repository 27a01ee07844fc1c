//! Redacting wrapper for passwords and session secrets.

use std::fmt;

use serde::{Deserialize, Deserializer};

/// Sensitive string that never shows up in `Debug` or `Display` output.
///
/// Passwords from request bodies and the secret half of session tokens are
/// carried in this type so that a stray `{:?}` in a log line prints
/// `[REDACTED]`. It deliberately does not implement `Serialize`: nothing the
/// crate sends back to a client contains a secret in a JSON body.
///
/// ```rust
/// use parlor_auth::SecretString;
///
/// let password = SecretString::new("hunter2hunter2");
/// assert_eq!(format!("{password:?}"), "SecretString([REDACTED])");
/// assert_eq!(password.expose_secret(), "hunter2hunter2");
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SecretString(String);

impl SecretString {
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Returns the plaintext. Call sites should hand it straight to a hasher
    /// or a cookie, never to a formatter.
    #[must_use]
    pub fn expose_secret(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Length in characters, which is what the password policy counts.
    #[must_use]
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretString([REDACTED])")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl<'de> Deserialize<'de> for SecretString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(SecretString)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacted() {
        let secret = SecretString::new("abcdefghijkmnpqrstuvwxyz");
        assert_eq!(format!("{secret:?}"), "SecretString([REDACTED])");
    }

    #[test]
    fn test_display_redacted() {
        let secret = SecretString::new("my_password");
        assert_eq!(format!("{secret}"), "[REDACTED]");
    }

    #[test]
    fn test_char_count_counts_chars_not_bytes() {
        let secret = SecretString::new("pässwörd");
        assert_eq!(secret.char_count(), 8);
        assert!(secret.expose_secret().len() > 8);
    }

    #[test]
    fn test_deserialize_from_json_string() {
        let secret: SecretString = serde_json::from_str("\"s3cret-value\"").unwrap();
        assert_eq!(secret.expose_secret(), "s3cret-value");
    }

    #[test]
    fn test_redacted_inside_derived_debug() {
        #[derive(Debug)]
        #[allow(dead_code)]
        struct Login {
            email: String,
            password: SecretString,
        }

        let login = Login {
            email: "a@b.co".to_owned(),
            password: SecretString::new("topsecretpw"),
        };
        let rendered = format!("{login:?}");
        assert!(!rendered.contains("topsecretpw"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
