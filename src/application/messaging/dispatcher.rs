//! Message dispatcher - Routes text either to echo or to the weather pipeline

use std::sync::Arc;
use crate::application::services::WeatherResolver;
use crate::domain::entities::{Content, Message, RegionTable};
use crate::domain::traits::ForecastSource;
use super::parser::{is_weather_request, IntentExtractor};

/// Reply for messages that are not weather requests
pub fn echo_reply(text: &str) -> String {
    format!("あなたは「{}」と言いました。", text)
}

/// Message dispatcher - one pipeline run per inbound message
#[derive(Clone)]
pub struct MessageDispatcher {
    extractor: IntentExtractor,
    resolver: WeatherResolver,
}

impl MessageDispatcher {
    pub fn new(extractor: IntentExtractor, resolver: WeatherResolver) -> Self {
        Self { extractor, resolver }
    }

    /// Wire extractor and resolver around one shared region table
    pub fn with_source(regions: Arc<RegionTable>, source: Arc<dyn ForecastSource>) -> Self {
        Self {
            extractor: IntentExtractor::new(regions.clone()),
            resolver: WeatherResolver::new(regions, source),
        }
    }

    /// Process a message; non-text content gets no reply
    pub async fn handle(&self, message: &Message) -> Option<String> {
        match &message.content {
            Content::Text(text) => {
                if let Some(sender) = &message.sender {
                    tracing::debug!("[{}] {} from {}", message.platform, message.id, sender);
                }
                Some(self.handle_text(text).await)
            }
            other => {
                tracing::debug!("Ignoring {} message {}", other.kind(), message.id);
                None
            }
        }
    }

    /// Process raw text into a reply
    pub async fn handle_text(&self, text: &str) -> String {
        if !is_weather_request(text) {
            return echo_reply(text);
        }

        let query = self.extractor.extract(text);
        tracing::debug!("Weather query: region={:?} day={:?}", query.region, query.day);
        self.resolver.resolve_query(&query).await
    }
}
