//! Storage traits and data types.
//!
//! The authentication core talks to persistence only through these two
//! traits. Every method is required; there are no optional capabilities to
//! probe for at runtime.
//!
//! | Trait | Description |
//! |-------|-------------|
//! | [`UserRepository`] | Account creation and lookup |
//! | [`SessionRepository`] | Session rows keyed by session id |
//!
//! Implementations shipped with the crate:
//!
//! - `sqlite::SqliteUserRepository` / `sqlite::SqliteSessionRepository`
//!   (feature `sqlx_sqlite`)
//! - [`MockUserRepository`] / [`MockSessionRepository`] (feature `mocks`)

mod session;
mod user;

#[cfg(any(test, feature = "mocks"))]
mod session_mock;
#[cfg(any(test, feature = "mocks"))]
mod user_mock;

pub use session::SessionRepository;
pub use user::{AuthUser, NewUser, UserRepository};

#[cfg(any(test, feature = "mocks"))]
pub use session_mock::MockSessionRepository;
#[cfg(any(test, feature = "mocks"))]
pub use user_mock::MockUserRepository;
