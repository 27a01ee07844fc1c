use actix_web::{HttpResponse, web};

use super::cookie::{build_removal_cookie, build_session_cookie};
use super::error::ApiError;
use super::extractors::{CurrentUser, MaybeUser};
use crate::actions::{LoginAction, LogoutAction, SignupAction};
use crate::api::{
    AuthResponse, CurrentUserResponse, LoginRequest, SessionResponse, SignupRequest,
    SuccessResponse, UserResponse,
};
use crate::clock::Clock;
use crate::crypto::Argon2Hasher;
use crate::session::{SessionConfig, SessionManager};
use crate::{AuthError, SessionRepository, UserRepository};

pub async fn signup<U, R, C>(
    body: web::Json<SignupRequest>,
    users: web::Data<U>,
    manager: web::Data<SessionManager<R, C>>,
    config: web::Data<SessionConfig>,
    hasher: web::Data<Argon2Hasher>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + Clone + 'static,
    R: SessionRepository + 'static,
    C: Clock + 'static,
{
    let body = body.into_inner();
    let action = SignupAction::with_hasher(users.get_ref().clone(), hasher.get_ref().clone());

    let user = action
        .execute(&body.email, &body.password, body.username.as_deref())
        .await?;
    let (token, _) = manager.create_session(&user.id).await?;

    Ok(HttpResponse::Created()
        .cookie(build_session_cookie(&config, &token))
        .json(AuthResponse {
            success: true,
            user: UserResponse::from(user),
        }))
}

pub async fn login<U, R, C>(
    body: web::Json<LoginRequest>,
    users: web::Data<U>,
    manager: web::Data<SessionManager<R, C>>,
    config: web::Data<SessionConfig>,
    hasher: web::Data<Argon2Hasher>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + Clone + 'static,
    R: SessionRepository + Clone + 'static,
    C: Clock + Clone + 'static,
{
    let action = LoginAction::with_hasher(
        users.get_ref().clone(),
        manager.get_ref().clone(),
        hasher.get_ref().clone(),
    );

    let (user, token, _) = action.execute(&body.email, &body.password).await?;

    Ok(HttpResponse::Ok()
        .cookie(build_session_cookie(&config, &token))
        .json(AuthResponse {
            success: true,
            user: UserResponse::from(user),
        }))
}

/// Succeeds for anonymous callers too; the cookie is cleared either way.
pub async fn logout<R, C>(
    identity: MaybeUser,
    manager: web::Data<SessionManager<R, C>>,
    config: web::Data<SessionConfig>,
) -> Result<HttpResponse, ApiError>
where
    R: SessionRepository + Clone + 'static,
    C: Clock + Clone + 'static,
{
    if let Some(session) = identity.session() {
        LogoutAction::new(manager.get_ref().clone())
            .execute(&session.id)
            .await?;
    }

    Ok(HttpResponse::Ok()
        .cookie(build_removal_cookie(&config))
        .json(SuccessResponse { success: true }))
}

pub async fn current_user(identity: MaybeUser) -> HttpResponse {
    match identity.into_inner().into_parts() {
        Some((user, _)) => HttpResponse::Ok().json(CurrentUserResponse {
            user: Some(UserResponse::from(user)),
        }),
        None => HttpResponse::Unauthorized().json(CurrentUserResponse { user: None }),
    }
}

pub async fn list_sessions<R, C>(
    current: CurrentUser,
    manager: web::Data<SessionManager<R, C>>,
) -> Result<HttpResponse, ApiError>
where
    R: SessionRepository + 'static,
    C: Clock + 'static,
{
    let sessions = manager.list_user_sessions(&current.user.id).await?;

    let body: Vec<SessionResponse> = sessions
        .into_iter()
        .map(|s| SessionResponse::from_session(s, &current.session.id))
        .collect();

    Ok(HttpResponse::Ok().json(body))
}

/// Revokes one of the caller's own sessions. Other users' session ids
/// answer 404, same as unknown ones.
pub async fn revoke_session<R, C>(
    current: CurrentUser,
    path: web::Path<String>,
    manager: web::Data<SessionManager<R, C>>,
    config: web::Data<SessionConfig>,
) -> Result<HttpResponse, ApiError>
where
    R: SessionRepository + 'static,
    C: Clock + 'static,
{
    let session_id = path.into_inner();

    let owned = manager
        .list_user_sessions(&current.user.id)
        .await?
        .iter()
        .any(|s| s.id == session_id);
    if !owned {
        return Err(AuthError::SessionNotFound.into());
    }

    manager.delete_session(&session_id).await?;

    let mut response = HttpResponse::Ok();
    if session_id == current.session.id {
        response.cookie(build_removal_cookie(&config));
    }
    Ok(response.json(SuccessResponse { success: true }))
}
