//! Configuration for the authentication layer.
//!
//! Everything has a sensible default; named presets cover the two
//! deployment modes the chat server actually runs in.
//!
//! # Example
//!
//! ```rust
//! use parlor_auth::config::{HashingConfig, ParlorConfig};
//!
//! let config = ParlorConfig {
//!     database_url: "sqlite://data/parlor.db".to_owned(),
//!     hashing: HashingConfig::production(),
//!     ..ParlorConfig::production()
//! };
//! assert!(config.session.cookie_secure);
//! assert!(config.validate().is_ok());
//! ```

use chrono::Duration;

use crate::AuthError;
use crate::session::SessionConfig;

/// Default SQLite location, relative to the working directory.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/parlor.db?mode=rwc";

#[derive(Debug, Clone)]
pub struct ParlorConfig {
    /// SQLx connection string for the session and user store.
    pub database_url: String,

    /// Cookie and lifetime settings.
    pub session: SessionConfig,

    /// Argon2 cost parameters for account passwords.
    pub hashing: HashingConfig,
}

impl Default for ParlorConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_owned(),
            session: SessionConfig::default(),
            hashing: HashingConfig::default(),
        }
    }
}

impl ParlorConfig {
    /// Plain HTTP on localhost: cookies without `Secure`.
    pub fn development() -> Self {
        Self {
            session: SessionConfig::development(),
            ..Self::default()
        }
    }

    pub fn production() -> Self {
        Self {
            session: SessionConfig::production(),
            ..Self::default()
        }
    }

    /// Builds a configuration from the process environment.
    ///
    /// | Variable | Effect |
    /// |----------|--------|
    /// | `PARLOR_ENV` | `production` selects [`ParlorConfig::production`], anything else development |
    /// | `DATABASE_URL` | SQLx connection string |
    /// | `DATABASE_PATH` | directory holding `parlor.db`, used when `DATABASE_URL` is unset |
    /// | `SESSION_LIFETIME_DAYS` | session lifetime in whole days |
    ///
    /// # Errors
    ///
    /// Returns `AuthError::ConfigurationError` for unparsable values or a
    /// configuration that fails [`ParlorConfig::validate`].
    pub fn from_env() -> Result<Self, AuthError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, AuthError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup("PARLOR_ENV").as_deref() {
            Some("production") => Self::production(),
            _ => Self::development(),
        };

        if let Some(url) = lookup("DATABASE_URL") {
            config.database_url = url;
        } else if let Some(dir) = lookup("DATABASE_PATH") {
            config.database_url = format!(
                "sqlite://{}/parlor.db?mode=rwc",
                dir.trim_end_matches('/')
            );
        }

        if let Some(days) = lookup("SESSION_LIFETIME_DAYS") {
            let days: i64 = days.trim().parse().map_err(|_| {
                AuthError::ConfigurationError(format!(
                    "SESSION_LIFETIME_DAYS must be an integer, got \"{days}\""
                ))
            })?;
            config.session.session_lifetime = Duration::try_days(days).ok_or_else(|| {
                AuthError::ConfigurationError(format!("SESSION_LIFETIME_DAYS out of range: {days}"))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns `AuthError::ConfigurationError` naming the first invalid field.
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.database_url.trim().is_empty() {
            return Err(AuthError::ConfigurationError(
                "database_url must not be empty".to_owned(),
            ));
        }
        self.session
            .validate()
            .map_err(|msg| AuthError::ConfigurationError(msg.to_owned()))?;
        self.hashing
            .validate()
            .map_err(|msg| AuthError::ConfigurationError(msg.to_owned()))
    }
}

/// Argon2id cost parameters.
///
/// Pinned here rather than taken from library defaults so every deployment
/// hashes with the same, reviewable settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashingConfig {
    /// Memory cost in KiB.
    ///
    /// Default: 19456 (19 MiB)
    pub memory_cost: u32,

    /// Number of passes.
    ///
    /// Default: 2
    pub time_cost: u32,

    /// Degree of parallelism.
    ///
    /// Default: 1
    pub parallelism: u32,

    /// Hash output length in bytes.
    ///
    /// Default: 32
    pub output_len: usize,
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            memory_cost: 19456,
            time_cost: 2,
            parallelism: 1,
            output_len: 32,
        }
    }
}

impl HashingConfig {
    pub fn production() -> Self {
        Self {
            memory_cost: 65536,
            time_cost: 3,
            parallelism: 4,
            output_len: 32,
        }
    }

    /// # Errors
    ///
    /// Returns a static description of the offending parameter.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.time_cost == 0 {
            return Err("time_cost must be at least 1");
        }
        if self.parallelism == 0 {
            return Err("parallelism must be at least 1");
        }
        if self.memory_cost < self.parallelism.saturating_mul(8) {
            return Err("memory_cost must be at least 8 KiB per lane");
        }
        if self.output_len < 16 {
            return Err("output_len must be at least 16 bytes");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::session::SameSite;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = ParlorConfig::default();

        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.session.cookie_name, "session");
        assert_eq!(config.session.session_lifetime, Duration::days(30));
        assert_eq!(config.session.cookie_same_site, SameSite::Lax);
        assert_eq!(config.hashing.memory_cost, 19456);
        assert_eq!(config.hashing.time_cost, 2);
        assert_eq!(config.hashing.parallelism, 1);
        assert_eq!(config.hashing.output_len, 32);
    }

    #[test]
    fn test_presets_toggle_secure_cookie() {
        assert!(ParlorConfig::production().session.cookie_secure);
        assert!(!ParlorConfig::development().session.cookie_secure);
    }

    #[test]
    fn test_from_lookup_defaults_to_development() {
        let config = ParlorConfig::from_lookup(lookup_from(&[])).unwrap();
        assert!(!config.session.cookie_secure);
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
    }

    #[test]
    fn test_from_lookup_production_and_database_path() {
        let config = ParlorConfig::from_lookup(lookup_from(&[
            ("PARLOR_ENV", "production"),
            ("DATABASE_PATH", "/var/lib/parlor/"),
        ]))
        .unwrap();

        assert!(config.session.cookie_secure);
        assert_eq!(
            config.database_url,
            "sqlite:///var/lib/parlor/parlor.db?mode=rwc"
        );
    }

    #[test]
    fn test_from_lookup_database_url_wins_over_path() {
        let config = ParlorConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("DATABASE_PATH", "/tmp"),
        ]))
        .unwrap();
        assert_eq!(config.database_url, "sqlite::memory:");
    }

    #[test]
    fn test_from_lookup_session_lifetime() {
        let config =
            ParlorConfig::from_lookup(lookup_from(&[("SESSION_LIFETIME_DAYS", "7")])).unwrap();
        assert_eq!(config.session.session_lifetime, Duration::days(7));
    }

    #[test]
    fn test_from_lookup_rejects_bad_lifetime() {
        let err = ParlorConfig::from_lookup(lookup_from(&[("SESSION_LIFETIME_DAYS", "soon")]))
            .unwrap_err();
        assert!(matches!(err, AuthError::ConfigurationError(_)));

        let err =
            ParlorConfig::from_lookup(lookup_from(&[("SESSION_LIFETIME_DAYS", "0")])).unwrap_err();
        assert!(matches!(err, AuthError::ConfigurationError(_)));
    }

    #[test]
    fn test_hashing_validate() {
        assert!(HashingConfig::default().validate().is_ok());
        assert!(HashingConfig::production().validate().is_ok());
        assert!(
            HashingConfig {
                time_cost: 0,
                ..HashingConfig::default()
            }
            .validate()
            .is_err()
        );
        assert!(
            HashingConfig {
                memory_cost: 16,
                parallelism: 4,
                ..HashingConfig::default()
            }
            .validate()
            .is_err()
        );
    }

    #[test]
    fn test_hashing_validate_huge_parallelism() {
        let config = HashingConfig {
            parallelism: u32::MAX,
            ..HashingConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err("memory_cost must be at least 8 KiB per lane")
        );
    }
}
