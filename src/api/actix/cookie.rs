use actix_web::cookie::time::Duration as CookieDuration;
use actix_web::cookie::{Cookie, SameSite as CookieSameSite};

use crate::session::{SameSite, SessionConfig, SessionToken};

fn same_site(value: SameSite) -> CookieSameSite {
    match value {
        SameSite::None => CookieSameSite::None,
        SameSite::Lax => CookieSameSite::Lax,
        SameSite::Strict => CookieSameSite::Strict,
    }
}

fn base_cookie(config: &SessionConfig, value: String) -> Cookie<'static> {
    let mut cookie = Cookie::build(config.cookie_name.clone(), value)
        .path(config.cookie_path.clone())
        .http_only(config.cookie_http_only)
        .secure(config.cookie_secure)
        .same_site(same_site(config.cookie_same_site))
        .finish();

    if let Some(domain) = &config.cookie_domain {
        cookie.set_domain(domain.clone());
    }

    cookie
}

/// Cookie carrying `<id>.<secret>`, living as long as the session row.
pub fn build_session_cookie(config: &SessionConfig, token: &SessionToken) -> Cookie<'static> {
    let mut cookie = base_cookie(config, token.encode().expose_secret().to_owned());
    cookie.set_max_age(CookieDuration::seconds(config.session_lifetime.num_seconds()));
    cookie
}

/// Same name and path as the session cookie, empty and already expired.
pub fn build_removal_cookie(config: &SessionConfig) -> Cookie<'static> {
    let mut cookie = base_cookie(config, String::new());
    cookie.make_removal();
    cookie
}
