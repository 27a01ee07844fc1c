use actix_web::web;

use super::handlers;
use crate::clock::{Clock, SystemClock};
use crate::{SessionRepository, UserRepository};

/// Mounts the session auth routes under `/auth`.
///
/// Routes:
/// - `POST /signup` - create an account and sign in
/// - `POST /login` - sign in
/// - `POST /logout` - end the current session
/// - `GET /user` - the signed-in user, or 401 with `{"user": null}`
/// - `GET /sessions` - the caller's live sessions
/// - `DELETE /sessions/{id}` - revoke one of them
///
/// The app must register `web::Data` for `U`, `SessionManager<R, C>`,
/// `SessionConfig` and `Argon2Hasher`, and wrap with
/// [`SessionAuth`](super::SessionAuth).
pub fn session_auth_routes<U, R, C>(cfg: &mut web::ServiceConfig)
where
    U: UserRepository + Clone + 'static,
    R: SessionRepository + Clone + 'static,
    C: Clock + Clone + 'static,
{
    cfg.service(
        web::scope("/auth")
            .route("/signup", web::post().to(handlers::signup::<U, R, C>))
            .route("/login", web::post().to(handlers::login::<U, R, C>))
            .route("/logout", web::post().to(handlers::logout::<R, C>))
            .route("/user", web::get().to(handlers::current_user))
            .route("/sessions", web::get().to(handlers::list_sessions::<R, C>))
            .route(
                "/sessions/{id}",
                web::delete().to(handlers::revoke_session::<R, C>),
            ),
    );
}

/// [`session_auth_routes`] with the system clock.
pub fn default_session_auth_routes<U, R>(cfg: &mut web::ServiceConfig)
where
    U: UserRepository + Clone + 'static,
    R: SessionRepository + Clone + 'static,
{
    session_auth_routes::<U, R, SystemClock>(cfg);
}
