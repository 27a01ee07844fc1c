mod cookie;
mod error;
mod extractors;
mod handlers;
mod middleware;
mod routes;
#[cfg(any(test, feature = "mocks"))]
pub mod test_utils;

pub use cookie::{build_removal_cookie, build_session_cookie};
pub use error::ApiError;
pub use extractors::{CurrentUser, MaybeUser};
pub use middleware::{SessionAuth, SessionAuthMiddleware};
pub use routes::{default_session_auth_routes, session_auth_routes};
