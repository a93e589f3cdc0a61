use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuoteRequest {
    #[serde(rename = "inputMint")]
    pub input_mint: String,
    #[serde(rename = "outputMint")]
    pub output_mint: String,
    pub amount: u64,
    #[serde(rename = "slippageBps")]
    pub slippage_bps: u16,
}

#[derive(Debug, Clone, Serialize)]
pub struct SwapTransactionRequest {
    #[serde(rename = "quoteResponse")]
    pub quote_response: Value,
    #[serde(rename = "userPublicKey")]
    pub user_public_key: String,
    #[serde(rename = "wrapAndUnwrapSol")]
    pub wrap_and_unwrap_sol: bool,
}

#[derive(Debug, Deserialize)]
struct SwapTransactionResponse {
    #[serde(rename = "swapTransaction")]
    swap_transaction: String,
}

/// The routing service: prices a swap and builds its unsigned transaction.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    async fn quote(&self, request: &QuoteRequest) -> Result<Value, Error>;

    /// Returns the base64-encoded, serialized, unsigned transaction.
    async fn swap_transaction(
        &self,
        request: &SwapTransactionRequest,
    ) -> Result<String, Error>;
}

pub struct JupiterClient {
    client: reqwest::Client,
    base_url: String,
}

impl JupiterClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn quote_request(&self, request: &QuoteRequest) -> reqwest::RequestBuilder {
        self.client
            .get(format!("{}/quote", self.base_url))
            .query(request)
    }

    fn swap_request(&self, request: &SwapTransactionRequest) -> reqwest::RequestBuilder {
        self.client
            .post(format!("{}/swap", self.base_url))
            .json(request)
    }
}

#[async_trait]
impl QuoteSource for JupiterClient {
    async fn quote(&self, request: &QuoteRequest) -> Result<Value, Error> {
        let response = self.quote_request(request).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::QuoteService(format!("quote returned {}: {}", status, body)));
        }

        let quote_response = response.json::<Value>().await?;
        Ok(quote_response)
    }

    async fn swap_transaction(
        &self,
        request: &SwapTransactionRequest,
    ) -> Result<String, Error> {
        let response = self.swap_request(request).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::QuoteService(format!("swap returned {}: {}", status, body)));
        }

        let body = response.json::<SwapTransactionResponse>().await?;
        Ok(body.swap_transaction)
    }
}
