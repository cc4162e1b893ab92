pub mod api;
pub mod browser;
pub mod commands;
pub mod config;
pub mod error;
pub mod session;
