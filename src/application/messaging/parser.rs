//! Intent extraction - Parses raw text into a weather query

use std::sync::Arc;
use crate::domain::entities::{Day, Query, RegionTable};

/// Keyword that marks a message as a weather request
pub const WEATHER_TRIGGER: &str = "天気";

const TOMORROW: &str = "明日";
const YESTERDAY: &str = "昨日";

/// Whether the text asks for weather at all.
/// Gates the resolver; not part of extraction.
pub fn is_weather_request(text: &str) -> bool {
    text.contains(WEATHER_TRIGGER)
}

/// Parses free text into a structured `Query`
#[derive(Debug, Clone)]
pub struct IntentExtractor {
    regions: Arc<RegionTable>,
}

impl IntentExtractor {
    pub fn new(regions: Arc<RegionTable>) -> Self {
        Self { regions }
    }

    /// Extract region and day from text. Never fails.
    ///
    /// The region is the first table entry whose name appears anywhere in
    /// the text, with no word-boundary check. "明日" takes precedence over
    /// "昨日" when both are present.
    pub fn extract(&self, text: &str) -> Query {
        let region = self.regions.find_in(text).map(|r| r.name.clone());
        Query::new(region, Self::detect_day(text))
    }

    fn detect_day(text: &str) -> Day {
        if text.contains(TOMORROW) {
            Day::Tomorrow
        } else if text.contains(YESTERDAY) {
            Day::Yesterday
        } else {
            Day::Today
        }
    }
}
