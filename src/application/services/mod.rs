//! Application services - Business logic orchestration

pub mod weather_service;

pub use weather_service::WeatherResolver;
