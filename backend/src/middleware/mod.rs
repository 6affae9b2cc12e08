pub mod auth;
pub mod csrf;

pub use auth::{authenticate, AuthOutcome};
pub use csrf::require_csrf;
