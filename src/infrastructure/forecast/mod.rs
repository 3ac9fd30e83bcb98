//! JMA forecast client

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use crate::application::errors::ForecastError;
use crate::domain::traits::ForecastSource;
use crate::infrastructure::config::ForecastConfig;

/// Fetches `{base}/{area_code}.json` from the JMA bosai forecast API
#[derive(Debug, Clone)]
pub struct JmaForecastClient {
    client: Client,
    base_url: String,
}

impl JmaForecastClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ForecastError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ForecastError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ForecastConfig) -> Result<Self, ForecastError> {
        Self::new(&config.base_url, Duration::from_secs(config.timeout_secs))
    }

    fn area_url(&self, area_code: &str) -> String {
        format!("{}/{}.json", self.base_url, area_code)
    }
}

#[async_trait]
impl ForecastSource for JmaForecastClient {
    async fn fetch(&self, area_code: &str) -> Result<Value, ForecastError> {
        let url = self.area_url(area_code);
        tracing::debug!("Fetching forecast: {}", url);

        let response = self.client
            .get(&url)
            .send()
            .await
            .map_err(|e| ForecastError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ForecastError::Status(response.status().as_u16()));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ForecastError::Parse(e.to_string()))
    }
}
