use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures::future::{Ready, ready};

use super::error::ApiError;
use crate::session::{Identity, Session};
use crate::{AuthError, AuthUser};

fn identity(req: &HttpRequest) -> Identity {
    let identity = req.extensions().get::<Identity>().cloned();
    identity.unwrap_or_else(|| {
        log::warn!(
            target: "parlor_auth::session",
            "msg=\"no identity on request, is SessionAuth installed?\""
        );
        Identity::Anonymous
    })
}

/// The signed-in user and their session. Rejects anonymous requests with
/// 401 `Unauthenticated`.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: AuthUser,
    pub session: Session,
}

impl CurrentUser {
    pub fn user(&self) -> &AuthUser {
        &self.user
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn into_inner(self) -> AuthUser {
        self.user
    }
}

impl FromRequest for CurrentUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            identity(req)
                .into_parts()
                .map(|(user, session)| CurrentUser { user, session })
                .ok_or_else(|| ApiError::from(AuthError::Unauthenticated)),
        )
    }
}

/// The request's identity, signed in or not. Never rejects.
#[derive(Debug, Clone, Default)]
pub struct MaybeUser(pub Identity);

impl MaybeUser {
    pub fn user(&self) -> Option<&AuthUser> {
        self.0.user()
    }

    pub fn session(&self) -> Option<&Session> {
        self.0.session()
    }

    pub fn into_inner(self) -> Identity {
        self.0
    }
}

impl FromRequest for MaybeUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(MaybeUser(identity(req))))
    }
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;
    use chrono::Utc;

    use super::*;

    fn authenticated() -> Identity {
        let user = AuthUser::mock();
        let now = Utc::now();
        let session = Session {
            id: "abcdefghijkmnpqrstuvwxyz".to_owned(),
            user_id: user.id.clone(),
            secret_hash: vec![0; 32],
            created_at: now,
            expires_at: now,
        };
        Identity::Authenticated { user, session }
    }

    #[actix_rt::test]
    async fn test_current_user_rejects_anonymous() {
        let req = TestRequest::default().to_http_request();
        req.extensions_mut().insert(Identity::Anonymous);

        let result = CurrentUser::extract(&req).await;
        assert_eq!(result.unwrap_err().error, AuthError::Unauthenticated);
    }

    #[actix_rt::test]
    async fn test_current_user_without_middleware() {
        let req = TestRequest::default().to_http_request();
        assert!(CurrentUser::extract(&req).await.is_err());
    }

    #[actix_rt::test]
    async fn test_current_user_authenticated() {
        let req = TestRequest::default().to_http_request();
        let identity = authenticated();
        req.extensions_mut().insert(identity.clone());

        let current = CurrentUser::extract(&req).await.unwrap();
        assert_eq!(Some(current.user()), identity.user());
    }

    #[actix_rt::test]
    async fn test_maybe_user() {
        let req = TestRequest::default().to_http_request();
        assert!(MaybeUser::extract(&req).await.unwrap().user().is_none());

        req.extensions_mut().insert(authenticated());
        assert!(MaybeUser::extract(&req).await.unwrap().user().is_some());
    }
}
