//! Account and session use cases, independent of any HTTP framework.

mod login;
mod logout;
mod prune_expired;
mod signup;

pub use login::LoginAction;
pub use logout::LogoutAction;
pub use prune_expired::PruneExpiredSessionsAction;
pub use signup::SignupAction;
