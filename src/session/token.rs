//! Encoding and decoding of the `<id>.<secret>` session token.
//!
//! Ids and secrets come from an alphabet without `.`, so the delimiter never
//! needs escaping and a well-formed token contains it exactly once.

use std::fmt;

use crate::SecretString;

pub const TOKEN_DELIMITER: char = '.';

/// Concatenates `id`, `.` and `secret`.
pub fn encode_session_token(id: &str, secret: &str) -> String {
    format!("{id}{TOKEN_DELIMITER}{secret}")
}

/// Splits a token into `(id, secret)`.
///
/// Returns `None` unless there are exactly two parts and neither is empty.
pub fn decode_session_token(token: &str) -> Option<(String, String)> {
    let mut parts = token.split(TOKEN_DELIMITER);
    let id = parts.next()?;
    let secret = parts.next()?;

    if parts.next().is_some() || id.is_empty() || secret.is_empty() {
        return None;
    }

    Some((id.to_owned(), secret.to_owned()))
}

/// Decoded session token as read from, or written to, the `session` cookie.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken {
    id: String,
    secret: SecretString,
}

impl SessionToken {
    pub fn new(id: impl Into<String>, secret: SecretString) -> Self {
        Self {
            id: id.into(),
            secret,
        }
    }

    /// Parses a cookie value. See [`decode_session_token`].
    pub fn decode(token: &str) -> Option<Self> {
        decode_session_token(token).map(|(id, secret)| Self::new(id, SecretString::new(secret)))
    }

    /// The cookie value. Wrapped so it stays out of logs.
    #[must_use]
    pub fn encode(&self) -> SecretString {
        SecretString::new(encode_session_token(&self.id, self.secret.expose_secret()))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn secret(&self) -> &SecretString {
        &self.secret
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionToken")
            .field("id", &self.id)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{generate_session_id, generate_session_secret};

    #[test]
    fn test_encode() {
        assert_eq!(encode_session_token("abc", "def"), "abc.def");
    }

    #[test]
    fn test_decode_generated_tokens() {
        for _ in 0..32 {
            let id = generate_session_id();
            let secret = generate_session_secret();
            let token = SessionToken::new(id.clone(), secret.clone());

            let decoded = SessionToken::decode(token.encode().expose_secret()).unwrap();
            assert_eq!(decoded.id(), id);
            assert_eq!(decoded.secret(), &secret);
        }
    }

    #[test]
    fn test_decode_rejects_malformed() {
        assert_eq!(decode_session_token(""), None);
        assert_eq!(decode_session_token("nodelimiter"), None);
        assert_eq!(decode_session_token("abc.def.ghi"), None);
        assert_eq!(decode_session_token(".secret"), None);
        assert_eq!(decode_session_token("id."), None);
        assert_eq!(decode_session_token("."), None);
        assert_eq!(decode_session_token(".."), None);
    }

    #[test]
    fn test_decode_valid() {
        assert_eq!(
            decode_session_token("abc.def"),
            Some(("abc".to_owned(), "def".to_owned()))
        );
    }

    #[test]
    fn test_debug_redacts_secret() {
        let token = SessionToken::new("visibleid", SecretString::new("hiddensecret"));
        let rendered = format!("{token:?}");
        assert!(rendered.contains("visibleid"));
        assert!(!rendered.contains("hiddensecret"));
    }
}
