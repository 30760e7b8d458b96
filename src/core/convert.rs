//! Amount parsing and cross-rate math for a single conversion attempt.

use chrono::NaiveDate;
use tracing::debug;

use crate::core::currency::CurrencyOption;
use crate::core::error::ConvertError;
use crate::core::rates::RateProvider;

/// Parses user-entered amount text. The panel keeps the raw text
/// verbatim; an attempt only requires it to parse as a finite number.
/// Zero and negative amounts are accepted.
pub fn parse_amount(text: &str) -> Result<f64, ConvertError> {
    match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ConvertError::InvalidAmount(text.to_string())),
    }
}

/// Converts through the service's base currency: the amount moves from
/// source units into base units, then from base units into target
/// units. Valid because all rates share one base.
pub fn cross_convert(amount: f64, source_rate: f64, target_rate: f64) -> f64 {
    (amount / source_rate) * target_rate
}

/// A validated selection snapshot, tagged with a sequence number so a
/// superseded attempt's outcome can be recognized as stale.
#[derive(Debug, Clone, Copy)]
pub struct ConversionRequest {
    pub source: &'static CurrencyOption,
    pub target: &'static CurrencyOption,
    pub amount: f64,
    pub seq: u64,
}

/// A completed conversion, carrying the snapshot's base currency and
/// rate date for display.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub amount: f64,
    pub value: f64,
    pub source: &'static CurrencyOption,
    pub target: &'static CurrencyOption,
    pub base: String,
    pub date: Option<NaiveDate>,
}

/// Runs one attempt: fetch rates for exactly the two selected codes,
/// extract both, compute the cross rate. A rate missing from the
/// response is an application error, not a network error.
pub async fn execute(
    provider: &dyn RateProvider,
    request: &ConversionRequest,
) -> Result<Conversion, ConvertError> {
    let snapshot = provider
        .fetch_rates(&[request.source.code, request.target.code])
        .await?;

    let source_rate = snapshot.rate_for(request.source.code)?;
    let target_rate = snapshot.rate_for(request.target.code)?;
    let value = cross_convert(request.amount, source_rate, target_rate);

    debug!(
        source = request.source.code,
        target = request.target.code,
        value,
        "Conversion computed"
    );

    Ok(Conversion {
        amount: request.amount,
        value,
        source: request.source,
        target: request.target,
        base: snapshot.base,
        date: snapshot.date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount_accepts_finite_numbers() {
        assert_eq!(parse_amount("1").unwrap(), 1.0);
        assert_eq!(parse_amount(" 12.5 ").unwrap(), 12.5);
        assert_eq!(parse_amount("0").unwrap(), 0.0);
        assert_eq!(parse_amount("-3.2").unwrap(), -3.2);
    }

    #[test]
    fn test_parse_amount_rejects_non_numeric_text() {
        for text in ["abc", "", "1,234", "12.5 EUR"] {
            assert_eq!(
                parse_amount(text),
                Err(ConvertError::InvalidAmount(text.to_string())),
                "expected {text:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_parse_amount_rejects_non_finite_values() {
        assert!(parse_amount("inf").is_err());
        assert!(parse_amount("NaN").is_err());
    }

    #[test]
    fn test_cross_convert_through_base() {
        // EUR base: 1 EUR at rate 1.0 into USD at rate 1.10.
        assert!((cross_convert(1.0, 1.0, 1.10) - 1.10).abs() < 1e-12);
        assert!((cross_convert(100.0, 5.0, 2.0) - 40.0).abs() < 1e-12);
    }

    #[test]
    fn test_cross_convert_round_trip() {
        let amount = 123.45;
        let brl = 5.43;
        let jpy = 161.2;

        let there = cross_convert(amount, brl, jpy);
        let back = cross_convert(there, jpy, brl);
        assert!((back - amount).abs() < 1e-9);
    }
}
