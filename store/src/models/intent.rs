use serde::Serialize;

use crate::models::asset::Asset;

/// What the user currently wants to swap. Both sides may point at the same
/// asset; that state renders fine but cannot be finalized.
#[derive(Debug, Clone, Serialize)]
pub struct SwapIntent {
    #[serde(rename = "fromAsset")]
    pub from_asset: Asset,
    #[serde(rename = "toAsset")]
    pub to_asset: Asset,
    #[serde(rename = "fromAmount")]
    pub from_amount: f64,
}

impl SwapIntent {
    pub fn new(from_asset: Asset, to_asset: Asset) -> Self {
        Self {
            from_asset,
            to_asset,
            from_amount: 0.0,
        }
    }

    pub fn is_same_asset(&self) -> bool {
        self.from_asset.same_mint(&self.to_asset)
    }
}
