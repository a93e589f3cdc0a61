use base64::{Engine as _, engine::general_purpose::STANDARD};
use log::{error, info};
use solana_sdk::{signature::Signature, transaction::VersionedTransaction};
use store::models::quote::Quote;

use crate::{
    broadcast::{Broadcaster, SendOptions},
    error::Error,
    jupiter::{QuoteSource, SwapTransactionRequest},
    wallet::Wallet,
};

#[derive(Debug, Clone, Copy)]
pub struct SwapSettings {
    pub wrap_and_unwrap_sol: bool,
    pub send_options: SendOptions,
}

pub fn explorer_url(signature: &Signature) -> String {
    format!("https://solscan.io/tx/{}", signature)
}

/// Decodes the base64, bincode-serialized transaction returned by `/swap`.
pub fn decode_transaction(encoded: &str) -> Result<VersionedTransaction, Error> {
    let bytes = STANDARD
        .decode(encoded.trim())
        .map_err(|e| Error::TransactionDecode(format!("base64: {}", e)))?;
    bincode::deserialize(&bytes).map_err(|e| Error::TransactionDecode(e.to_string()))
}

/// Builds, signs, sends and confirms the swap for `quote`.
///
/// The wallet is checked before anything goes over the network.
pub async fn execute_swap(
    quote: &Quote,
    source: &dyn QuoteSource,
    wallet: &dyn Wallet,
    broadcaster: &dyn Broadcaster,
    settings: &SwapSettings,
) -> Result<Signature, Error> {
    if !wallet.connected() || !wallet.can_sign() {
        error!("Wallet is not connected or does not support signing transactions");
        return Err(Error::WalletNotReady(
            "wallet is not connected or cannot sign transactions",
        ));
    }
    let user_public_key = wallet
        .public_key()
        .ok_or(Error::WalletNotReady("wallet has no public key"))?;

    let swap_transaction = source
        .swap_transaction(&SwapTransactionRequest {
            quote_response: quote.quote_response.clone(),
            user_public_key: user_public_key.to_string(),
            wrap_and_unwrap_sol: settings.wrap_and_unwrap_sol,
        })
        .await?;

    let transaction = decode_transaction(&swap_transaction)?;
    let signed = wallet.sign_transaction(transaction).await?;
    let signature = broadcaster
        .send_raw_transaction(&signed, &settings.send_options)
        .await?;
    broadcaster.confirm_transaction(&signature).await?;

    info!("Swap confirmed: {}", explorer_url(&signature));
    Ok(signature)
}
