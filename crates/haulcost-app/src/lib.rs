//! Application service layer - use cases, config, session, repository adapters

pub mod app;
pub mod config;
pub mod repository;
pub mod session;
