//! Domain layer - Core business objects and the seams around them
//! 
//! This layer contains:
//! - Entities: Query, Day, RegionTable, Message, User
//! - Traits: Abstractions for infrastructure (ReplyTransport, ForecastSource)

pub mod entities;
pub mod traits;
