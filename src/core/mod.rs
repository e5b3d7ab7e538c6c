pub mod auth;
pub mod filter;
pub mod location;
pub mod log;
pub mod reports;
pub mod shift;
pub mod users;
