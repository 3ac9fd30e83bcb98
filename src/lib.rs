//! tenki-bot - LINE echo bot that also answers JMA weather questions

pub mod domain;
pub mod application;
pub mod infrastructure;

pub use application::messaging::{IntentExtractor, MessageDispatcher};
pub use application::services::WeatherResolver;
pub use domain::entities::{Day, Query, RegionTable};
