//! Request and response types, plus the actix-web integration.

mod types;

pub use types::*;

#[cfg(feature = "actix")]
pub mod actix;
