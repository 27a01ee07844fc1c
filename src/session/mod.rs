//! Split-token cookie sessions.
//!
//! A session token is `<id>.<secret>`. The id is the row key in the session
//! store; the secret is only ever stored as a SHA-256 digest. Presenting a
//! valid token therefore requires both halves, and a copy of the store alone
//! is not enough to forge one.

mod config;
mod identity;
mod manager;
mod token;

use chrono::{DateTime, Utc};
use serde::Serialize;

pub use config::{SameSite, SessionConfig};
pub use identity::{Identity, Resolution, resolve_identity};
pub use manager::{SESSION_LIFETIME_DAYS, SessionManager};
pub use token::{SessionToken, TOKEN_DELIMITER, decode_session_token, encode_session_token};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub id: String,
    pub user_id: String,
    /// SHA-256 of the token secret. Never the secret itself.
    #[serde(skip_serializing)]
    pub secret_hash: Vec<u8>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// A session is valid up to and including its expiry instant.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn session_expiring_at(expires_at: DateTime<Utc>) -> Session {
        Session {
            id: "abcdefghijkmnpqrstuvwxyz".to_owned(),
            user_id: "user_abcdefghijkmnpqr".to_owned(),
            secret_hash: vec![0; 32],
            created_at: expires_at - Duration::days(30),
            expires_at,
        }
    }

    #[test]
    fn test_session_expiry_relative_to_given_instant() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();

        assert!(!session_expiring_at(now + Duration::hours(1)).is_expired_at(now));
        assert!(session_expiring_at(now - Duration::hours(1)).is_expired_at(now));
    }

    #[test]
    fn test_session_valid_at_exact_expiry() {
        let at = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let session = session_expiring_at(at);

        assert!(!session.is_expired_at(at));
        assert!(session.is_expired_at(at + Duration::milliseconds(1)));
    }

    #[test]
    fn test_secret_hash_not_serialized() {
        let session = session_expiring_at(Utc::now());
        let json = serde_json::to_value(&session).unwrap();
        assert!(json.get("secret_hash").is_none());
    }
}
