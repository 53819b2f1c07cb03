pub mod api;
pub mod config;
pub mod favorites;
pub mod platform;
pub mod session;
pub mod types;
