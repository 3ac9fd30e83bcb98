use async_trait::async_trait;
use serde_json::Value;
use crate::application::errors::ForecastError;

/// Forecast source - fetches the raw forecast document for an area code
#[async_trait]
pub trait ForecastSource: Send + Sync {
    async fn fetch(&self, area_code: &str) -> Result<Value, ForecastError>;
}
