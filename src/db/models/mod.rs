//! Database models split into domain-specific modules.

pub mod sport;
pub mod sport_session;
pub mod user;

pub use sport::*;
pub use sport_session::*;
pub use user::*;
