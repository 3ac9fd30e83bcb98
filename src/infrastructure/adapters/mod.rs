//! Platform adapters - inbound parsing and outbound replies

pub mod console;
pub mod line;

pub use console::ConsoleAdapter;
pub use line::LineAdapter;
