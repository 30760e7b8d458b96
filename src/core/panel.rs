//! The conversion panel state machine.
//!
//! One attempt moves Idle → Validating → Requesting → Idle with either
//! a result or an error. Invalid input never issues a request. Each
//! issued request carries a sequence number; when attempts overlap,
//! only the newest one may update the panel, so the last trigger wins
//! regardless of response ordering.

use std::sync::Arc;
use tracing::debug;

use crate::core::convert::{self, Conversion, ConversionRequest};
use crate::core::currency::CurrencyOption;
use crate::core::error::ConvertError;
use crate::core::rates::RateProvider;

/// Display-facing state. At most one of `conversion` and `error` is
/// set for the newest attempt; `loading` is true exactly while the
/// newest attempt is outstanding.
#[derive(Debug, Default)]
pub struct PanelState {
    pub source: Option<&'static CurrencyOption>,
    pub target: Option<&'static CurrencyOption>,
    pub amount_text: String,
    pub conversion: Option<Conversion>,
    pub error: Option<ConvertError>,
    pub loading: bool,
}

pub struct ConversionPanel {
    provider: Arc<dyn RateProvider>,
    state: PanelState,
    next_seq: u64,
    current_seq: Option<u64>,
}

impl ConversionPanel {
    pub fn new(provider: Arc<dyn RateProvider>) -> Self {
        ConversionPanel {
            provider,
            state: PanelState::default(),
            next_seq: 0,
            current_seq: None,
        }
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn provider(&self) -> Arc<dyn RateProvider> {
        Arc::clone(&self.provider)
    }

    /// Replaces the amount text verbatim, including invalid input.
    pub fn set_amount(&mut self, text: &str) {
        self.state.amount_text = text.to_string();
    }

    pub fn set_source_currency(&mut self, option: Option<&'static CurrencyOption>) {
        self.state.source = option;
    }

    pub fn set_target_currency(&mut self, option: Option<&'static CurrencyOption>) {
        self.state.target = option;
    }

    fn validate(
        &self,
    ) -> Result<(&'static CurrencyOption, &'static CurrencyOption, f64), ConvertError> {
        let source = self.state.source.ok_or(ConvertError::MissingSelection)?;
        let target = self.state.target.ok_or(ConvertError::MissingSelection)?;
        let amount = convert::parse_amount(&self.state.amount_text)?;
        Ok((source, target, amount))
    }

    /// Starts one attempt. On invalid input the validation error is
    /// recorded, the previous result is cleared and no request is
    /// issued; an earlier request still in flight is superseded, so
    /// its outcome can no longer overwrite the validation error.
    pub fn begin_convert(&mut self) -> Option<ConversionRequest> {
        self.state.conversion = None;

        match self.validate() {
            Err(e) => {
                debug!(error = %e, "Conversion rejected before request");
                self.state.error = Some(e);
                self.state.loading = false;
                self.current_seq = None;
                None
            }
            Ok((source, target, amount)) => {
                self.state.error = None;
                self.state.loading = true;

                let seq = self.next_seq;
                self.next_seq += 1;
                self.current_seq = Some(seq);

                Some(ConversionRequest {
                    source,
                    target,
                    amount,
                    seq,
                })
            }
        }
    }

    /// Records the outcome of an attempt. Outcomes for anything other
    /// than the newest issued request are stale and dropped; `loading`
    /// stays set because the newest attempt is still outstanding.
    pub fn apply_outcome(&mut self, seq: u64, outcome: Result<Conversion, ConvertError>) {
        if self.current_seq != Some(seq) {
            debug!(seq, "Dropping stale conversion outcome");
            return;
        }

        self.state.loading = false;
        match outcome {
            Ok(conversion) => {
                self.state.conversion = Some(conversion);
                self.state.error = None;
            }
            Err(e) => {
                self.state.error = Some(e);
                self.state.conversion = None;
            }
        }
    }

    /// Runs one full attempt inline: validate, request, apply.
    /// `loading` is cleared on completion whether the attempt succeeds
    /// or fails.
    pub async fn convert(&mut self) {
        let Some(request) = self.begin_convert() else {
            return;
        };

        let provider = Arc::clone(&self.provider);
        let outcome = convert::execute(provider.as_ref(), &request).await;
        self.apply_outcome(request.seq, outcome);
    }
}
