use std::path::Path;

use async_trait::async_trait;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    transaction::VersionedTransaction,
};

use crate::error::Error;

#[async_trait]
pub trait Wallet: Send + Sync {
    fn connected(&self) -> bool;

    fn public_key(&self) -> Option<Pubkey>;

    fn can_sign(&self) -> bool;

    async fn sign_transaction(
        &self,
        tx: VersionedTransaction,
    ) -> Result<VersionedTransaction, Error>;
}

/// Wallet backed by a local keypair. Without a keypair it behaves like a
/// wallet that was never connected.
pub struct KeypairWallet {
    keypair: Option<Keypair>,
}

impl KeypairWallet {
    pub fn new(keypair: Keypair) -> Self {
        Self {
            keypair: Some(keypair),
        }
    }

    pub fn disconnected() -> Self {
        Self { keypair: None }
    }

    /// Loads a keypair stored as a JSON array of 64 bytes.
    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let contents = std::fs::read_to_string(path)?;
        let bytes: Vec<u8> = serde_json::from_str(&contents).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e)
        })?;
        let keypair = Keypair::try_from(bytes.as_slice()).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        Ok(Self::new(keypair))
    }
}

#[async_trait]
impl Wallet for KeypairWallet {
    fn connected(&self) -> bool {
        self.keypair.is_some()
    }

    fn public_key(&self) -> Option<Pubkey> {
        self.keypair.as_ref().map(|keypair| keypair.pubkey())
    }

    fn can_sign(&self) -> bool {
        self.keypair.is_some()
    }

    async fn sign_transaction(
        &self,
        tx: VersionedTransaction,
    ) -> Result<VersionedTransaction, Error> {
        let keypair = self
            .keypair
            .as_ref()
            .ok_or(Error::WalletNotReady("wallet is not connected"))?;

        VersionedTransaction::try_new(tx.message, &[keypair])
            .map_err(|e| Error::SignatureDeclined(e.to_string()))
    }
}
