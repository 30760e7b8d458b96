//! Fixer.io rate provider.
//!
//! One GET per attempt, parameterized by the access key and a
//! comma-separated list of exactly the two requested codes. Rates come
//! back relative to the service's fixed base currency (EUR on the free
//! plan). No retries: a failed attempt surfaces its error and stops.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

use crate::core::error::ConvertError;
use crate::core::rates::{RateProvider, RateSnapshot};

pub struct FixerProvider {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl FixerProvider {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("fxc/0.1")
            .timeout(timeout)
            .build()?;

        Ok(FixerProvider {
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
            client,
        })
    }
}

#[derive(Debug, Deserialize)]
struct FixerResponse {
    success: Option<bool>,
    base: Option<String>,
    date: Option<NaiveDate>,
    rates: Option<HashMap<String, f64>>,
    error: Option<FixerApiError>,
}

#[derive(Debug, Deserialize)]
struct FixerApiError {
    #[serde(rename = "type")]
    kind: Option<String>,
    info: Option<String>,
}

#[async_trait]
impl RateProvider for FixerProvider {
    async fn fetch_rates(&self, symbols: &[&str]) -> Result<RateSnapshot, ConvertError> {
        let url = format!("{}/api/latest", self.base_url);
        let symbols_param = symbols.join(",");
        debug!(symbols = %symbols_param, "Requesting rates from {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("access_key", self.api_key.as_str()),
                ("symbols", symbols_param.as_str()),
            ])
            .send()
            .await
            .map_err(|e| ConvertError::Connectivity(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ConvertError::Provider(format!(
                "HTTP error: {} from rate service",
                response.status()
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| ConvertError::Connectivity(e.to_string()))?;

        let data: FixerResponse = serde_json::from_str(&text)
            .map_err(|e| ConvertError::Provider(format!("Failed to parse rate response: {e}")))?;

        if data.success == Some(false) {
            let message = data
                .error
                .and_then(|e| e.info.or(e.kind))
                .unwrap_or_else(|| "rate service reported a failure".to_string());
            return Err(ConvertError::Provider(message));
        }

        let rates = data
            .rates
            .ok_or_else(|| ConvertError::Provider("rate response missing rates".to_string()))?;

        Ok(RateSnapshot {
            base: data.base.unwrap_or_else(|| "EUR".to_string()),
            date: data.date,
            rates,
        })
    }
}
