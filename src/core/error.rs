//! Error taxonomy for one conversion attempt.
//!
//! Validation failures are detected before any network call is made.
//! Connectivity failures mean the transport layer could not reach the
//! rate service; everything else the service itself reported. Every
//! variant is terminal for its attempt and never retried.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConvertError {
    #[error("select both a source and a target currency")]
    MissingSelection,

    #[error("'{0}' is not a valid numeric amount")]
    InvalidAmount(String),

    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),

    #[error("could not reach the exchange rate service: {0}")]
    Connectivity(String),

    #[error("no exchange rate found for {0}")]
    RateNotFound(String),

    #[error("{0}")]
    Provider(String),
}

impl ConvertError {
    /// True for errors raised before a request is issued.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ConvertError::MissingSelection
                | ConvertError::InvalidAmount(_)
                | ConvertError::UnknownCurrency(_)
        )
    }
}
