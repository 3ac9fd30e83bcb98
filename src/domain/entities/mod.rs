//! Domain entities - Core business objects with no external dependencies

pub mod user;
pub mod message;
pub mod query;
pub mod region;

pub use user::User;
pub use message::{Message, Content};
pub use query::{Day, Query};
pub use region::{Region, RegionTable};
