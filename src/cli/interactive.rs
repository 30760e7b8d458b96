//! Interactive conversion loop.
//!
//! Selection edits publish change events that a debounce window
//! collapses into a single conversion attempt; a manual `convert`
//! bypasses the window. Attempts run as spawned tasks and report back
//! over a channel tagged with their sequence number, so an outcome
//! from a superseded attempt is dropped instead of overwriting newer
//! state.

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};
use tracing::debug;

use super::convert::{render_error, render_state};
use super::ui;
use crate::core::config::AppConfig;
use crate::core::convert::{self, Conversion};
use crate::core::currency::{self, CurrencyOption};
use crate::core::error::ConvertError;
use crate::core::panel::ConversionPanel;
use crate::core::rates::RateProvider;

#[derive(Debug, PartialEq)]
enum Command {
    From(String),
    To(String),
    Amount(String),
    Convert,
    Currencies,
    Help,
    Quit,
    Unknown(String),
}

fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map(|(w, r)| (w, r.trim()))
        .unwrap_or((line, ""));

    Some(match word.to_ascii_lowercase().as_str() {
        "from" => Command::From(rest.to_string()),
        "to" => Command::To(rest.to_string()),
        "amount" => Command::Amount(rest.to_string()),
        "convert" => Command::Convert,
        "currencies" => Command::Currencies,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    })
}

/// Resolves a picker edit. Empty input clears the selection; a code
/// outside the catalog is rejected without changing it.
fn select(code: &str) -> Result<Option<&'static CurrencyOption>, ConvertError> {
    if code.is_empty() {
        return Ok(None);
    }
    currency::find(code)
        .map(Some)
        .ok_or_else(|| ConvertError::UnknownCurrency(code.to_string()))
}

fn print_help() {
    println!("{}", ui::style_text("Commands", ui::StyleType::Title));
    for (cmd, help) in [
        ("from <code>", "set the source currency (empty clears it)"),
        ("to <code>", "set the target currency (empty clears it)"),
        ("amount <text>", "set the amount to convert"),
        ("convert", "convert now, skipping the debounce window"),
        ("currencies", "list the available currencies"),
        ("help", "show this help"),
        ("quit", "leave the loop"),
    ] {
        println!("  {:<14} {}", cmd, ui::style_text(help, ui::StyleType::Subtle));
    }
}

fn trigger(
    panel: &mut ConversionPanel,
    outcome_tx: &mpsc::UnboundedSender<(u64, Result<Conversion, ConvertError>)>,
) {
    match panel.begin_convert() {
        Some(request) => {
            println!("{}", ui::style_text("fetching rates...", ui::StyleType::Subtle));
            let provider = panel.provider();
            let tx = outcome_tx.clone();
            tokio::spawn(async move {
                let outcome = convert::execute(provider.as_ref(), &request).await;
                // A closed receiver means the loop is gone.
                let _ = tx.send((request.seq, outcome));
            });
        }
        None => render_state(panel.state()),
    }
}

pub async fn run(provider: Arc<dyn RateProvider>, config: &AppConfig) -> Result<()> {
    let mut panel = ConversionPanel::new(provider);

    if let Some(code) = config.defaults.source.as_deref() {
        panel.set_source_currency(currency::find(code));
    }
    if let Some(code) = config.defaults.target.as_deref() {
        panel.set_target_currency(currency::find(code));
    }
    panel.set_amount(config.defaults.amount.as_deref().unwrap_or("1"));

    print_help();

    let debounce = Duration::from_millis(config.debounce_ms);
    let (outcome_tx, mut outcome_rx) =
        mpsc::unbounded_channel::<(u64, Result<Conversion, ConvertError>)>();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    // Deadline of the pending debounce window; None while idle.
    let mut deadline: Option<Instant> = None;

    loop {
        let window_end = deadline.unwrap_or_else(|| Instant::now() + Duration::from_secs(86_400));

        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_command(&line) {
                    None => {}
                    Some(Command::From(code)) => match select(&code) {
                        Ok(option) => {
                            panel.set_source_currency(option);
                            deadline = Some(Instant::now() + debounce);
                        }
                        Err(e) => render_error(&e),
                    },
                    Some(Command::To(code)) => match select(&code) {
                        Ok(option) => {
                            panel.set_target_currency(option);
                            deadline = Some(Instant::now() + debounce);
                        }
                        Err(e) => render_error(&e),
                    },
                    Some(Command::Amount(text)) => {
                        panel.set_amount(&text);
                        deadline = Some(Instant::now() + debounce);
                    }
                    Some(Command::Convert) => {
                        deadline = None;
                        trigger(&mut panel, &outcome_tx);
                    }
                    Some(Command::Currencies) => super::currencies::run()?,
                    Some(Command::Help) => print_help(),
                    Some(Command::Quit) => break,
                    Some(Command::Unknown(input)) => {
                        println!(
                            "{}",
                            ui::style_text(
                                &format!("unrecognized command: {input} (try 'help')"),
                                ui::StyleType::Subtle
                            )
                        );
                    }
                }
            }
            _ = sleep_until(window_end), if deadline.is_some() => {
                debug!("Debounce window elapsed, starting conversion");
                deadline = None;
                trigger(&mut panel, &outcome_tx);
            }
            Some((seq, outcome)) = outcome_rx.recv() => {
                panel.apply_outcome(seq, outcome);
                if !panel.state().loading {
                    render_state(panel.state());
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command_selection_edits() {
        assert_eq!(
            parse_command("from EUR"),
            Some(Command::From("EUR".to_string()))
        );
        assert_eq!(parse_command("to usd"), Some(Command::To("usd".to_string())));
        assert_eq!(
            parse_command("amount 12.5"),
            Some(Command::Amount("12.5".to_string()))
        );
        // Bare edits clear the field.
        assert_eq!(parse_command("from"), Some(Command::From(String::new())));
        assert_eq!(parse_command("amount"), Some(Command::Amount(String::new())));
    }

    #[test]
    fn test_parse_command_amount_text_is_verbatim() {
        assert_eq!(
            parse_command("amount 1,234"),
            Some(Command::Amount("1,234".to_string()))
        );
        assert_eq!(
            parse_command("amount abc"),
            Some(Command::Amount("abc".to_string()))
        );
    }

    #[test]
    fn test_parse_command_actions() {
        assert_eq!(parse_command("convert"), Some(Command::Convert));
        assert_eq!(parse_command("CONVERT"), Some(Command::Convert));
        assert_eq!(parse_command("currencies"), Some(Command::Currencies));
        assert_eq!(parse_command("help"), Some(Command::Help));
        assert_eq!(parse_command("quit"), Some(Command::Quit));
        assert_eq!(parse_command("exit"), Some(Command::Quit));
    }

    #[test]
    fn test_parse_command_blank_and_unknown() {
        assert_eq!(parse_command("   "), None);
        assert_eq!(
            parse_command("frob EUR"),
            Some(Command::Unknown("frob EUR".to_string()))
        );
    }

    #[test]
    fn test_select_rejects_unknown_codes() {
        assert_eq!(select("").unwrap(), None);
        assert_eq!(select("eur").unwrap().unwrap().code, "EUR");
        assert_eq!(
            select("XYZ"),
            Err(ConvertError::UnknownCurrency("XYZ".to_string()))
        );
    }
}
