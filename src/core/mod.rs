//! Core conversion logic and abstractions

pub mod config;
pub mod convert;
pub mod currency;
pub mod error;
pub mod log;
pub mod panel;
pub mod rates;

// Re-export main types for cleaner imports
pub use convert::{Conversion, ConversionRequest};
pub use currency::CurrencyOption;
pub use error::ConvertError;
pub use panel::ConversionPanel;
pub use rates::{RateProvider, RateSnapshot};
