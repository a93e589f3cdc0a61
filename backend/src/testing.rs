//! Hand-rolled collaborators for tests.

use std::{sync::Mutex, time::Duration};

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde_json::{Value, json};
use solana_sdk::{
    message::{Message, VersionedMessage},
    pubkey::Pubkey,
    signature::Signature,
    transaction::VersionedTransaction,
};

use crate::{
    broadcast::{Broadcaster, SendOptions},
    error::Error,
    jupiter::{QuoteRequest, QuoteSource, SwapTransactionRequest},
};

type Responder = Box<dyn Fn(&QuoteRequest) -> (Duration, Result<Value, Error>) + Send + Sync>;

pub struct MockQuoteSource {
    responder: Responder,
    swap_transaction: Option<String>,
    quote_calls: Mutex<Vec<QuoteRequest>>,
    swap_calls: Mutex<Vec<SwapTransactionRequest>>,
}

impl MockQuoteSource {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&QuoteRequest) -> (Duration, Result<Value, Error>) + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            swap_transaction: None,
            quote_calls: Mutex::new(Vec::new()),
            swap_calls: Mutex::new(Vec::new()),
        }
    }

    /// Answers every quote immediately with the same body.
    pub fn fixed(body: Value) -> Self {
        Self::new(move |_| (Duration::ZERO, Ok(body.clone())))
    }

    /// Answers immediately with `outAmount = amount / 100`.
    pub fn hundredth() -> Self {
        Self::new(|request| (Duration::ZERO, Ok(hundredth_of(request))))
    }

    pub fn with_swap_transaction(mut self, encoded: String) -> Self {
        self.swap_transaction = Some(encoded);
        self
    }

    pub fn quote_calls(&self) -> Vec<QuoteRequest> {
        self.quote_calls.lock().unwrap().clone()
    }

    pub fn swap_calls(&self) -> Vec<SwapTransactionRequest> {
        self.swap_calls.lock().unwrap().clone()
    }
}

pub fn hundredth_of(request: &QuoteRequest) -> Value {
    json!({
        "inputMint": request.input_mint,
        "inAmount": request.amount.to_string(),
        "outputMint": request.output_mint,
        "outAmount": (request.amount / 100).to_string(),
        "slippageBps": request.slippage_bps,
    })
}

#[async_trait]
impl QuoteSource for MockQuoteSource {
    async fn quote(&self, request: &QuoteRequest) -> Result<Value, Error> {
        self.quote_calls.lock().unwrap().push(request.clone());
        let (delay, result) = (self.responder)(request);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        result
    }

    async fn swap_transaction(&self, request: &SwapTransactionRequest) -> Result<String, Error> {
        self.swap_calls.lock().unwrap().push(request.clone());
        self.swap_transaction
            .clone()
            .ok_or_else(|| Error::QuoteService("no swap transaction configured".to_string()))
    }
}

#[derive(Default)]
pub struct MockBroadcaster {
    fail_send: bool,
    sent: Mutex<Vec<(Signature, SendOptions)>>,
    confirmed: Mutex<Vec<Signature>>,
}

impl MockBroadcaster {
    pub fn failing_send() -> Self {
        Self {
            fail_send: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<(Signature, SendOptions)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn confirmed(&self) -> Vec<Signature> {
        self.confirmed.lock().unwrap().clone()
    }
}

#[async_trait]
impl Broadcaster for MockBroadcaster {
    async fn send_raw_transaction(
        &self,
        tx: &VersionedTransaction,
        options: &SendOptions,
    ) -> Result<Signature, Error> {
        if self.fail_send {
            return Err(Error::BroadcastFailure("node unhealthy".to_string()));
        }
        let signature = tx.signatures[0];
        self.sent.lock().unwrap().push((signature, *options));
        Ok(signature)
    }

    async fn confirm_transaction(&self, signature: &Signature) -> Result<(), Error> {
        self.confirmed.lock().unwrap().push(*signature);
        Ok(())
    }
}

/// What `/swap` would return for a transaction paid for by `payer`.
pub fn encode_unsigned_transaction(payer: &Pubkey) -> String {
    let tx = VersionedTransaction {
        signatures: vec![Signature::default()],
        message: VersionedMessage::Legacy(Message::new(&[], Some(payer))),
    };
    STANDARD.encode(bincode::serialize(&tx).unwrap())
}
