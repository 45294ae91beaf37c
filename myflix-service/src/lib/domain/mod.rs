pub mod auth;
pub mod movie;
pub mod user;
