use std::rc::Rc;
use std::task::{Context, Poll};

use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{HttpMessage, web};
use futures::future::{LocalBoxFuture, Ready, ok};

use super::cookie::build_removal_cookie;
use crate::clock::{Clock, SystemClock};
use crate::session::{SessionConfig, SessionManager, resolve_identity};
use crate::{SessionRepository, UserRepository};

/// Resolves the session cookie on every request.
///
/// The resulting [`Identity`](crate::Identity) is stored in the request
/// extensions, where [`CurrentUser`](super::CurrentUser) and
/// [`MaybeUser`](super::MaybeUser) pick it up. Stale cookies get a removal
/// `Set-Cookie` on the response, unless the handler already set one.
/// The middleware never fails a request itself.
///
/// ```rust,ignore
/// let manager = web::Data::new(SessionManager::new(sessions));
/// let users = web::Data::new(users);
/// let config = web::Data::new(SessionConfig::production());
///
/// App::new()
///     .app_data(manager.clone())
///     .app_data(users.clone())
///     .app_data(config.clone())
///     .wrap(SessionAuth::new(manager, users, config))
/// ```
pub struct SessionAuth<R, U, C = SystemClock> {
    manager: web::Data<SessionManager<R, C>>,
    users: web::Data<U>,
    config: web::Data<SessionConfig>,
}

impl<R, U, C> SessionAuth<R, U, C> {
    #[must_use]
    pub fn new(
        manager: web::Data<SessionManager<R, C>>,
        users: web::Data<U>,
        config: web::Data<SessionConfig>,
    ) -> Self {
        Self {
            manager,
            users,
            config,
        }
    }
}

impl<R, U, C> Clone for SessionAuth<R, U, C> {
    fn clone(&self) -> Self {
        Self {
            manager: self.manager.clone(),
            users: self.users.clone(),
            config: self.config.clone(),
        }
    }
}

impl<S, B, R, U, C> Transform<S, ServiceRequest> for SessionAuth<R, U, C>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
    R: SessionRepository + 'static,
    U: UserRepository + 'static,
    C: Clock + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Transform = SessionAuthMiddleware<S, R, U, C>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(SessionAuthMiddleware {
            service: Rc::new(service),
            manager: self.manager.clone(),
            users: self.users.clone(),
            config: self.config.clone(),
        })
    }
}

pub struct SessionAuthMiddleware<S, R, U, C> {
    service: Rc<S>,
    manager: web::Data<SessionManager<R, C>>,
    users: web::Data<U>,
    config: web::Data<SessionConfig>,
}

impl<S, B, R, U, C> Service<ServiceRequest> for SessionAuthMiddleware<S, R, U, C>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
    R: SessionRepository + 'static,
    U: UserRepository + 'static,
    C: Clock + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let manager = self.manager.clone();
        let users = self.users.clone();
        let config = self.config.clone();

        Box::pin(async move {
            let cookie = req.cookie(&config.cookie_name);
            let cookie_value = cookie.as_ref().map(actix_web::cookie::Cookie::value);

            let resolution =
                resolve_identity(cookie_value, manager.get_ref(), users.get_ref()).await;

            req.extensions_mut().insert(resolution.identity);

            let mut res = service.call(req).await?;

            if resolution.clear_cookie {
                let handler_set_cookie = res
                    .response()
                    .cookies()
                    .any(|c| c.name() == config.cookie_name);

                if !handler_set_cookie {
                    if let Err(e) = res
                        .response_mut()
                        .add_cookie(&build_removal_cookie(&config))
                    {
                        log::error!(
                            target: "parlor_auth::session",
                            "msg=\"failed to clear session cookie\", error=\"{e}\""
                        );
                    }
                }
            }

            Ok(res)
        })
    }
}
