use chrono::Duration;

use super::manager::SESSION_LIFETIME_DAYS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    None,
    #[default]
    Lax,
    Strict,
}

/// Cookie attributes and session policy.
///
/// Defaults follow the cookie contract the browser UI relies on: a
/// `session` cookie on `/`, HTTP-only, `SameSite=Lax`, living as long as the
/// session row (30 days).
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub cookie_path: String,
    pub cookie_domain: Option<String>,
    pub cookie_secure: bool,
    pub cookie_http_only: bool,
    pub cookie_same_site: SameSite,
    pub session_lifetime: Duration,
    /// Delete the session row when a request presents its id with the wrong
    /// secret. Off by default: one bad cookie does not log out the real holder.
    pub revoke_on_secret_mismatch: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "session".to_owned(),
            cookie_path: "/".to_owned(),
            cookie_domain: None,
            cookie_secure: true,
            cookie_http_only: true,
            cookie_same_site: SameSite::Lax,
            session_lifetime: Duration::days(SESSION_LIFETIME_DAYS),
            revoke_on_secret_mismatch: false,
        }
    }
}

impl SessionConfig {
    pub fn production() -> Self {
        Self::default()
    }

    /// Same as production but without `Secure`, for plain-HTTP localhost.
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if self.cookie_name.is_empty() {
            return Err("cookie_name must not be empty");
        }
        if self.session_lifetime <= Duration::zero() {
            return Err("session_lifetime must be positive");
        }
        if self.cookie_same_site == SameSite::None && !self.cookie_secure {
            return Err("SameSite=None requires a Secure cookie");
        }
        Ok(())
    }
}
