//! HTTP access service: exposes the permission resolver to the admin UI.

pub mod app;
pub mod config;
pub mod context;
pub mod directory;
pub mod middleware;
