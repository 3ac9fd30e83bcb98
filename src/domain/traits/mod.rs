//! Domain traits - Abstractions for infrastructure implementations

pub mod bot;
pub mod forecast;

pub use bot::{BotInfo, ReplyTransport};
pub use forecast::ForecastSource;
