//! One-shot conversion command.

use anyhow::Result;
use std::sync::Arc;

use super::ui;
use crate::core::config::AppConfig;
use crate::core::convert::Conversion;
use crate::core::currency;
use crate::core::error::ConvertError;
use crate::core::panel::{ConversionPanel, PanelState};
use crate::core::rates::RateProvider;

/// Runs one conversion attempt and renders the result or the inline
/// error. Attempt-level failures leave the process healthy: they are
/// user-recoverable, so they print and exit cleanly.
pub async fn run(
    provider: Arc<dyn RateProvider>,
    config: &AppConfig,
    from: Option<String>,
    to: Option<String>,
    amount: Option<String>,
) -> Result<()> {
    let mut panel = ConversionPanel::new(provider);

    let source = from.or_else(|| config.defaults.source.clone());
    let target = to.or_else(|| config.defaults.target.clone());
    let amount = amount
        .or_else(|| config.defaults.amount.clone())
        .unwrap_or_else(|| "1".to_string());

    if let Some(code) = source.as_deref() {
        match currency::find(code) {
            Some(option) => panel.set_source_currency(Some(option)),
            None => {
                render_error(&ConvertError::UnknownCurrency(code.to_string()));
                return Ok(());
            }
        }
    }
    if let Some(code) = target.as_deref() {
        match currency::find(code) {
            Some(option) => panel.set_target_currency(Some(option)),
            None => {
                render_error(&ConvertError::UnknownCurrency(code.to_string()));
                return Ok(());
            }
        }
    }
    panel.set_amount(&amount);

    let spinner = ui::new_spinner("Fetching rates...");
    panel.convert().await;
    spinner.finish_and_clear();

    render_state(panel.state());
    Ok(())
}

pub(crate) fn render_state(state: &PanelState) {
    if let Some(conversion) = &state.conversion {
        let line = format_result_line(conversion);
        println!("{}", ui::style_text(&line, ui::StyleType::ResultValue));

        if let Some(date) = conversion.date {
            let note = format!("rates as of {} (base {})", date, conversion.base);
            println!("{}", ui::style_text(&note, ui::StyleType::Subtle));
        }
    } else if let Some(error) = &state.error {
        render_error(error);
    }
}

pub(crate) fn render_error(error: &ConvertError) {
    println!("{}", ui::style_text(&error.to_string(), ui::StyleType::Error));
}

/// The entered amount is echoed as given; only the converted value is
/// rounded for display.
fn format_result_line(conversion: &Conversion) -> String {
    format!(
        "{} {} = {:.2} {}",
        conversion.amount, conversion.source.code, conversion.value, conversion.target.code
    )
}
