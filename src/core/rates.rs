//! Rate lookup abstractions

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;

use crate::core::error::ConvertError;

/// One response from the rate service. All rates are multipliers from
/// the service's fixed base currency into the named currency. A
/// snapshot lives for a single conversion attempt and is never cached.
#[derive(Debug, Clone)]
pub struct RateSnapshot {
    pub base: String,
    pub date: Option<NaiveDate>,
    pub rates: HashMap<String, f64>,
}

impl RateSnapshot {
    /// Looks up the rate for a code. A zero or negative rate is no
    /// rate at all: it cannot convert anything, and dividing by it
    /// would yield a nonsense "successful" result.
    pub fn rate_for(&self, code: &str) -> Result<f64, ConvertError> {
        self.rates
            .get(code)
            .copied()
            .filter(|rate| *rate > 0.0)
            .ok_or_else(|| ConvertError::RateNotFound(code.to_string()))
    }
}

#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Fetches current rates for exactly the requested currency codes.
    async fn fetch_rates(&self, symbols: &[&str]) -> Result<RateSnapshot, ConvertError>;
}
