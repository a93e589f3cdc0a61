use async_trait::async_trait;
use solana_client::{nonblocking::rpc_client::RpcClient, rpc_config::RpcSendTransactionConfig};
use solana_commitment_config::CommitmentConfig;
use solana_sdk::{signature::Signature, transaction::VersionedTransaction};

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendOptions {
    pub skip_preflight: bool,
    /// Retries for the send step only; confirmation is not retried.
    pub max_retries: usize,
}

#[async_trait]
pub trait Broadcaster: Send + Sync {
    async fn send_raw_transaction(
        &self,
        tx: &VersionedTransaction,
        options: &SendOptions,
    ) -> Result<Signature, Error>;

    async fn confirm_transaction(&self, signature: &Signature) -> Result<(), Error>;
}

pub struct RpcBroadcaster {
    rpc_client: RpcClient,
}

impl RpcBroadcaster {
    pub fn new(rpc_url: String) -> Self {
        Self {
            rpc_client: RpcClient::new_with_commitment(rpc_url, CommitmentConfig::confirmed()),
        }
    }
}

#[async_trait]
impl Broadcaster for RpcBroadcaster {
    async fn send_raw_transaction(
        &self,
        tx: &VersionedTransaction,
        options: &SendOptions,
    ) -> Result<Signature, Error> {
        let config = RpcSendTransactionConfig {
            skip_preflight: options.skip_preflight,
            max_retries: Some(options.max_retries),
            ..RpcSendTransactionConfig::default()
        };

        self.rpc_client
            .send_transaction_with_config(tx, config)
            .await
            .map_err(|e| Error::BroadcastFailure(e.to_string()))
    }

    async fn confirm_transaction(&self, signature: &Signature) -> Result<(), Error> {
        self.rpc_client
            .poll_for_signature_with_commitment(signature, CommitmentConfig::confirmed())
            .await
            .map_err(|e| Error::BroadcastFailure(e.to_string()))
    }
}
