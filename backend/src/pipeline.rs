use std::{sync::Arc, time::Duration};

use log::{debug, error, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use store::{
    Store,
    models::{asset::Asset, intent::SwapIntent, quote::Quote},
    units,
};

use crate::{
    debounce::Debouncer,
    error::Error,
    jupiter::{QuoteRequest, QuoteSource},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Status {
    Idle,
    PendingDebounce,
    Quoting,
    Quoted,
    QuoteFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    From,
    To,
}

/// Outcome of handing a quote response to the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum Applied {
    /// The display amount now reflects this response.
    Quoted(f64),
    /// Response kept as the current quote but it had no usable `outAmount`.
    Retained,
    /// Response belongs to a superseded request and was dropped.
    Stale,
}

/// A quote request that has been issued and not yet applied.
#[derive(Debug, Clone)]
pub struct PendingQuote {
    pub generation: u64,
    pub request: QuoteRequest,
}

#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub status: Status,
    pub intent: SwapIntent,
    #[serde(rename = "displayAmount")]
    pub display_amount: f64,
    /// Same value rendered exactly from the quoted base units.
    #[serde(rename = "displayAmountExact")]
    pub display_amount_exact: String,
    pub quote: Option<Quote>,
    #[serde(rename = "canFinalize")]
    pub can_finalize: bool,
}

/// Turns typed sell amounts into quote requests and quote responses into
/// the displayed buy amount.
///
/// Every issued request gets a new generation number. Responses are applied
/// only if they carry the latest generation, so a slow answer for an old
/// amount can never overwrite a newer one.
pub struct AmountPipeline {
    store: Arc<Store>,
    intent: SwapIntent,
    display_amount: f64,
    display_amount_exact: String,
    quote: Option<Quote>,
    status: Status,
    generation: u64,
    slippage_bps: u16,
    debouncer: Debouncer<f64>,
}

impl AmountPipeline {
    pub fn new(store: Arc<Store>, slippage_bps: u16, quiet: Duration) -> Self {
        let (from, to) = store.default_pair();
        let intent = SwapIntent::new(from.clone(), to.clone());
        Self {
            store,
            intent,
            display_amount: 0.0,
            display_amount_exact: "0".to_string(),
            quote: None,
            status: Status::Idle,
            generation: 0,
            slippage_bps,
            debouncer: Debouncer::new(quiet),
        }
    }

    pub fn intent(&self) -> &SwapIntent {
        &self.intent
    }

    pub fn display_amount(&self) -> f64 {
        self.display_amount
    }

    pub fn display_amount_exact(&self) -> &str {
        &self.display_amount_exact
    }

    pub fn quote(&self) -> Option<&Quote> {
        self.quote.as_ref()
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Records a new sell amount. Input must already be a number; text is
    /// cleaned up by the caller.
    pub fn set_from_amount(&mut self, raw: f64) {
        self.intent.from_amount = raw;
        self.schedule_quote(raw);
    }

    pub fn schedule_quote(&mut self, amount: f64) {
        if self.debouncer.schedule(amount) {
            debug!("Replaced pending quote trigger with {}", amount);
        }
        self.status = Status::PendingDebounce;
    }

    /// Waits for the debounce timer and yields the amount to quote.
    pub async fn next_due(&mut self) -> f64 {
        self.debouncer.fired().await
    }

    /// Issues the request for a debounced amount, or drops back to idle when
    /// the amount cannot be quoted.
    pub fn on_debounce_fired(&mut self, amount: f64) -> Option<PendingQuote> {
        match self.begin_quote(amount) {
            Ok(pending) => Some(pending),
            Err(_) => {
                // A request still in flight was for an amount that is no longer on screen.
                self.generation += 1;
                if !self.debouncer.is_pending() {
                    self.status = Status::Idle;
                }
                None
            }
        }
    }

    /// Validates `amount` and prepares the request for the current pair.
    /// Nothing changes when validation fails.
    pub fn begin_quote(&mut self, amount: f64) -> Result<PendingQuote, Error> {
        let from = &self.intent.from_asset;
        let base_units = units::to_base_units(amount, from.decimals).map_err(|e| {
            error!("Invalid fromAmount value {}: {}", amount, e);
            Error::InvalidAmount(e)
        })?;

        self.generation += 1;
        self.status = Status::Quoting;

        Ok(PendingQuote {
            generation: self.generation,
            request: QuoteRequest {
                input_mint: from.mint.clone(),
                output_mint: self.intent.to_asset.mint.clone(),
                amount: base_units,
                slippage_bps: self.slippage_bps,
            },
        })
    }

    pub fn apply_quote(
        &mut self,
        generation: u64,
        result: Result<Value, Error>,
    ) -> Result<Applied, Error> {
        if generation != self.generation {
            debug!(
                "Discarding quote #{}, latest issued is #{}",
                generation, self.generation
            );
            return Ok(Applied::Stale);
        }

        let quote_response = match result {
            Ok(quote_response) => quote_response,
            Err(e) => {
                self.settle(Status::QuoteFailed);
                return Err(e);
            }
        };

        let quote = Quote::new(generation, quote_response);
        let applied = match quote.out_amount() {
            Some(out_amount) => {
                let decimals = self.intent.to_asset.decimals;
                self.display_amount = units::from_base_units(out_amount, decimals);
                self.display_amount_exact = units::format_base_units(out_amount, decimals);
                self.settle(Status::Quoted);
                Applied::Quoted(self.display_amount)
            }
            None => {
                warn!("Quote #{} has no usable outAmount", generation);
                self.settle(Status::QuoteFailed);
                Applied::Retained
            }
        };
        self.quote = Some(quote);
        Ok(applied)
    }

    /// Quotes `amount` and applies the answer. The pair is taken from the
    /// current intent, not passed in.
    pub async fn fetch_quote(
        &mut self,
        source: &dyn QuoteSource,
        amount: f64,
    ) -> Result<Applied, Error> {
        let pending = self.begin_quote(amount)?;
        let result = source.quote(&pending.request).await;
        self.apply_quote(pending.generation, result)
    }

    /// Picks the asset for one side of the swap. Unknown names select the
    /// first registry asset.
    pub fn swap_asset_selection(&mut self, side: Side, asset_name: &str) -> &Asset {
        let asset = self.store.resolve_or_default(asset_name).clone();
        let slot = match side {
            Side::From => &mut self.intent.from_asset,
            Side::To => &mut self.intent.to_asset,
        };

        if slot.mint != asset.mint {
            *slot = asset;
            self.invalidate_quotes();
        }

        match side {
            Side::From => &self.intent.from_asset,
            Side::To => &self.intent.to_asset,
        }
    }

    pub fn can_finalize(&self) -> bool {
        !self.intent.is_same_asset() && self.quote.is_some()
    }

    /// The quote a swap should be built from, if the form allows one.
    pub fn prepare_swap(&self) -> Result<Quote, Error> {
        if self.intent.is_same_asset() {
            return Err(Error::SameAsset);
        }
        self.quote.clone().ok_or(Error::NoQuote)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            status: self.status,
            intent: self.intent.clone(),
            display_amount: self.display_amount,
            display_amount_exact: self.display_amount_exact.clone(),
            quote: self.quote.clone(),
            can_finalize: self.can_finalize(),
        }
    }

    // A quote for the old pair is meaningless once the pair changes.
    fn invalidate_quotes(&mut self) {
        self.generation += 1;
        self.quote = None;
        self.display_amount = 0.0;
        self.display_amount_exact = "0".to_string();

        let amount = self.intent.from_amount;
        if amount.is_finite() && amount > 0.0 {
            self.schedule_quote(amount);
        } else if !self.debouncer.is_pending() {
            self.status = Status::Idle;
        }
    }

    // A newer amount waiting on the timer keeps the form in PendingDebounce.
    fn settle(&mut self, status: Status) {
        if !self.debouncer.is_pending() {
            self.status = status;
        }
    }
}
