//! Per-request identity resolution.

use super::{Session, SessionManager, SessionToken};
use crate::clock::Clock;
use crate::{AuthError, AuthUser, SessionRepository, UserRepository};

/// Who is making the request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Identity {
    #[default]
    Anonymous,
    Authenticated { user: AuthUser, session: Session },
}

impl Identity {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Identity::Authenticated { .. })
    }

    pub fn user(&self) -> Option<&AuthUser> {
        match self {
            Identity::Authenticated { user, .. } => Some(user),
            Identity::Anonymous => None,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            Identity::Authenticated { session, .. } => Some(session),
            Identity::Anonymous => None,
        }
    }

    pub fn into_parts(self) -> Option<(AuthUser, Session)> {
        match self {
            Identity::Authenticated { user, session } => Some((user, session)),
            Identity::Anonymous => None,
        }
    }
}

/// Outcome of [`resolve_identity`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    pub identity: Identity,
    /// The client's session cookie is stale and should be removed.
    pub clear_cookie: bool,
}

impl Resolution {
    fn anonymous(clear_cookie: bool) -> Self {
        Self {
            identity: Identity::Anonymous,
            clear_cookie,
        }
    }
}

/// Turns the raw session cookie value into an [`Identity`].
///
/// | Cookie | Identity | Clear cookie |
/// |--------|----------|--------------|
/// | absent | anonymous | no |
/// | not `<id>.<secret>` | anonymous | yes |
/// | unknown, expired or wrong secret | anonymous | yes |
/// | valid, but the user is gone | anonymous | no |
/// | valid | authenticated | no |
///
/// Storage failures never surface: the request proceeds as anonymous and
/// the cookie is left alone, since the session may well be fine.
pub async fn resolve_identity<R, C, U>(
    cookie: Option<&str>,
    manager: &SessionManager<R, C>,
    users: &U,
) -> Resolution
where
    R: SessionRepository,
    C: Clock,
    U: UserRepository + ?Sized,
{
    let Some(cookie) = cookie else {
        return Resolution::anonymous(false);
    };

    let Some(token) = SessionToken::decode(cookie) else {
        log::debug!(target: "parlor_auth::session", "msg=\"malformed session cookie\"");
        return Resolution::anonymous(true);
    };

    match authenticate(&token, manager, users).await {
        Ok(Lookup::Found(user, session)) => Resolution {
            identity: Identity::Authenticated { user, session },
            clear_cookie: false,
        },
        Ok(Lookup::NoSession) => Resolution::anonymous(true),
        Ok(Lookup::NoUser(user_id)) => {
            log::warn!(
                target: "parlor_auth::session",
                "msg=\"session references missing user\", user_id={user_id}"
            );
            Resolution::anonymous(false)
        }
        Err(e) => {
            log::error!(
                target: "parlor_auth::session",
                "msg=\"session lookup failed, continuing anonymously\", error=\"{e}\""
            );
            Resolution::anonymous(false)
        }
    }
}

enum Lookup {
    Found(AuthUser, Session),
    NoSession,
    NoUser(String),
}

async fn authenticate<R, C, U>(
    token: &SessionToken,
    manager: &SessionManager<R, C>,
    users: &U,
) -> Result<Lookup, AuthError>
where
    R: SessionRepository,
    C: Clock,
    U: UserRepository + ?Sized,
{
    let Some(session) = manager.validate_session_token(token).await? else {
        return Ok(Lookup::NoSession);
    };

    match users.find_user_by_id(&session.user_id).await? {
        Some(user) => Ok(Lookup::Found(user, session)),
        None => Ok(Lookup::NoUser(session.user_id)),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::clock::MockClock;
    use crate::{MockSessionRepository, MockUserRepository, SecretString};

    struct Fixture {
        manager: SessionManager<MockSessionRepository, MockClock>,
        sessions: MockSessionRepository,
        users: MockUserRepository,
        clock: MockClock,
        user: AuthUser,
    }

    fn fixture() -> Fixture {
        let sessions = MockSessionRepository::new();
        let clock = MockClock::default();
        let user = AuthUser::mock();
        let users = MockUserRepository::with_users(vec![user.clone()]);
        Fixture {
            manager: SessionManager::with_clock(sessions.clone(), clock.clone()),
            sessions,
            users,
            clock,
            user,
        }
    }

    #[tokio::test]
    async fn test_no_cookie() {
        let f = fixture();
        let resolution = resolve_identity(None, &f.manager, &f.users).await;
        assert_eq!(resolution, Resolution::default());
    }

    #[tokio::test]
    async fn test_valid_cookie() {
        let f = fixture();
        let (token, session) = f.manager.create_session(&f.user.id).await.unwrap();

        let cookie = token.encode();
        let resolution =
            resolve_identity(Some(cookie.expose_secret()), &f.manager, &f.users).await;

        assert!(!resolution.clear_cookie);
        assert_eq!(resolution.identity.user(), Some(&f.user));
        assert_eq!(resolution.identity.session(), Some(&session));
    }

    #[tokio::test]
    async fn test_malformed_cookie_is_cleared() {
        let f = fixture();
        for cookie in ["abc.def.ghi", "nodelimiter", "", ".x", "x."] {
            let resolution = resolve_identity(Some(cookie), &f.manager, &f.users).await;
            assert_eq!(resolution.identity, Identity::Anonymous);
            assert!(resolution.clear_cookie, "cookie {cookie:?} should be cleared");
        }
    }

    #[tokio::test]
    async fn test_unknown_session_is_cleared() {
        let f = fixture();
        let resolution =
            resolve_identity(Some("nosuchsession.nosuchsecret"), &f.manager, &f.users).await;
        assert_eq!(resolution.identity, Identity::Anonymous);
        assert!(resolution.clear_cookie);
    }

    #[tokio::test]
    async fn test_expired_session_is_cleared() {
        let f = fixture();
        let (token, _) = f.manager.create_session(&f.user.id).await.unwrap();
        f.clock.advance(Duration::days(31));

        let cookie = token.encode();
        let resolution =
            resolve_identity(Some(cookie.expose_secret()), &f.manager, &f.users).await;

        assert_eq!(resolution.identity, Identity::Anonymous);
        assert!(resolution.clear_cookie);
        assert!(f.sessions.is_empty());
    }

    #[tokio::test]
    async fn test_wrong_secret_is_cleared_but_row_kept() {
        let f = fixture();
        let (token, _) = f.manager.create_session(&f.user.id).await.unwrap();

        let forged = SessionToken::new(token.id(), SecretString::new("z".repeat(24)));
        let cookie = forged.encode();
        let resolution =
            resolve_identity(Some(cookie.expose_secret()), &f.manager, &f.users).await;

        assert_eq!(resolution.identity, Identity::Anonymous);
        assert!(resolution.clear_cookie);
        assert_eq!(f.sessions.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_user_keeps_cookie() {
        let f = fixture();
        let (token, _) = f.manager.create_session("user_gonegonegonegone").await.unwrap();

        let cookie = token.encode();
        let resolution =
            resolve_identity(Some(cookie.expose_secret()), &f.manager, &f.users).await;

        assert_eq!(resolution.identity, Identity::Anonymous);
        assert!(!resolution.clear_cookie);
    }

    #[tokio::test]
    async fn test_store_failure_fails_open() {
        let f = fixture();
        let (token, _) = f.manager.create_session(&f.user.id).await.unwrap();
        f.sessions.set_unavailable(true);

        let cookie = token.encode();
        let resolution =
            resolve_identity(Some(cookie.expose_secret()), &f.manager, &f.users).await;

        assert_eq!(resolution.identity, Identity::Anonymous);
        assert!(!resolution.clear_cookie);
    }

    #[test]
    fn test_identity_accessors() {
        assert!(!Identity::Anonymous.is_authenticated());
        assert!(Identity::default().user().is_none());
        assert!(Identity::Anonymous.into_parts().is_none());
    }
}
