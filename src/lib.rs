//! Cookie session authentication for the parlor chat server.
//!
//! Sessions are identified by a split token `<id>.<secret>` held in the
//! `session` cookie. Only the SHA-256 digest of the secret is stored, so a
//! leaked sessions table cannot be replayed as valid cookies.
//!
//! # Layout
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`session`] | Token codec, session manager, identity resolution |
//! | [`crypto`] | Id generation, secret hashing, password hashing |
//! | [`repository`] | Storage traits and data types |
//! | [`sqlite`] | `SQLite` storage (feature `sqlx_sqlite`) |
//! | [`actions`] | Signup, login, logout, pruning |
//! | [`api`] | DTOs and actix-web integration (feature `actix`) |
//! | [`config`] | Environment-driven settings |
//! | [`validators`] | Email, password and username checks |
//! | [`clock`] | Injectable time source |

pub mod actions;
pub mod api;
pub mod clock;
pub mod config;
pub mod crypto;
pub mod repository;
mod secret;
pub mod session;
#[cfg(feature = "sqlx_sqlite")]
pub mod sqlite;
pub mod validators;

use std::fmt;

pub use clock::{Clock, SystemClock};
pub use config::{HashingConfig, ParlorConfig};
pub use repository::{AuthUser, NewUser, SessionRepository, UserRepository};
#[cfg(any(test, feature = "mocks"))]
pub use repository::{MockSessionRepository, MockUserRepository};
pub use secret::SecretString;
pub use session::{Identity, Session, SessionConfig, SessionManager, SessionToken};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    UserNotFound,
    UserAlreadyExists,
    MissingCredentials,
    InvalidCredentials,
    InvalidEmail,
    InvalidPassword,
    PasswordHashError,
    Unauthenticated,
    SessionNotFound,
    Validation(String),
    DatabaseError(String),
    ConfigurationError(String),
}

impl std::error::Error for AuthError {}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::UserNotFound => write!(f, "User not found"),
            AuthError::UserAlreadyExists => write!(f, "Email already registered"),
            AuthError::MissingCredentials => write!(f, "Email and password are required"),
            AuthError::InvalidCredentials => write!(f, "Invalid email or password"),
            AuthError::InvalidEmail => write!(f, "Invalid email format"),
            AuthError::InvalidPassword => write!(f, "Password must be at least 8 characters"),
            AuthError::PasswordHashError => write!(f, "Failed to hash password"),
            AuthError::Unauthenticated => write!(f, "Authentication required"),
            AuthError::SessionNotFound => write!(f, "Session not found"),
            AuthError::Validation(msg) => write!(f, "{msg}"),
            AuthError::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            AuthError::ConfigurationError(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}
