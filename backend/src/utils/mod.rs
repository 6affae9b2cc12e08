pub mod cookies;
pub mod password;
pub mod sanitize;
pub mod token;

pub use password::*;
pub use sanitize::*;
