//! Message handling - Intent extraction and dispatching

pub mod dispatcher;
pub mod parser;

pub use dispatcher::{echo_reply, MessageDispatcher};
pub use parser::{is_weather_request, IntentExtractor};
