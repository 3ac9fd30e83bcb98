//! Infrastructure layer - External concerns
//! 
//! This layer contains:
//! - Config: Configuration loading
//! - Forecast: JMA forecast client
//! - Adapters: Platform integrations (LINE, console)
//! - Server: Webhook HTTP server

pub mod config;
pub mod forecast;
pub mod adapters;
pub mod server;
