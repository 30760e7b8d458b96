pub mod convert;
pub mod currencies;
pub mod interactive;
pub mod ui;
