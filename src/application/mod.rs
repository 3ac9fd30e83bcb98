//! Application layer - Use cases and business logic
//! 
//! This layer contains:
//! - Services: Weather resolution
//! - Errors: Domain-specific errors
//! - Messaging: Intent extraction and dispatching

pub mod errors;
pub mod services;
pub mod messaging;
