use std::collections::HashSet;

use crate::models::asset::Asset;
use crate::Store;

/// Largest precision whose scale factor still fits in a `u64`.
pub const MAX_DECIMALS: u8 = 19;

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("asset registry is empty")]
    Empty,

    #[error("duplicate mint `{0}`")]
    DuplicateMint(String),

    #[error("duplicate asset name `{0}`")]
    DuplicateName(String),

    #[error("asset `{name}` has {decimals} decimals, max is {}", MAX_DECIMALS)]
    TooManyDecimals { name: String, decimals: u8 },

    #[error("invalid registry file: {0}")]
    Parse(#[from] serde_json::Error),
}

impl Store {
    pub fn new(assets: Vec<Asset>) -> Result<Self, RegistryError> {
        if assets.is_empty() {
            return Err(RegistryError::Empty);
        }

        let mut mints = HashSet::new();
        let mut names = HashSet::new();
        for asset in &assets {
            if !mints.insert(asset.mint.as_str()) {
                return Err(RegistryError::DuplicateMint(asset.mint.clone()));
            }
            if !names.insert(asset.name.as_str()) {
                return Err(RegistryError::DuplicateName(asset.name.clone()));
            }
            if asset.decimals > MAX_DECIMALS {
                return Err(RegistryError::TooManyDecimals {
                    name: asset.name.clone(),
                    decimals: asset.decimals,
                });
            }
        }

        Ok(Self { assets })
    }

    /// The assets offered by the swap form out of the box.
    pub fn builtin() -> Self {
        Self {
            assets: vec![
                Asset::new("SOL", "So11111111111111111111111111111111111111112", 9),
                Asset::new("USDC", "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v", 6),
                Asset::new("BONK", "DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263", 5),
                Asset::new("WIF", "EKpQGSJtjMFqKZ9KQanSqYXRcF8fBopzLHYxdM65zcjm", 6),
            ],
        }
    }

    /// Parses a JSON array of `{ "name", "mint", "decimals" }` objects.
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let assets: Vec<Asset> = serde_json::from_str(json)?;
        Self::new(assets)
    }

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    /// First registered asset, used whenever a lookup misses.
    pub fn default_asset(&self) -> &Asset {
        &self.assets[0]
    }

    pub fn find(&self, name: &str) -> Option<&Asset> {
        self.assets.iter().find(|asset| asset.name == name)
    }

    pub fn resolve_or_default(&self, name: &str) -> &Asset {
        match self.find(name) {
            Some(asset) => asset,
            None => {
                log::warn!(
                    "Unknown asset `{}`, falling back to {}",
                    name,
                    self.default_asset().name
                );
                self.default_asset()
            }
        }
    }

    /// Starting pair for a fresh swap form: first asset sold for the second.
    pub fn default_pair(&self) -> (&Asset, &Asset) {
        let from = self.default_asset();
        let to = self.assets.get(1).unwrap_or(from);
        (from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_registry_is_valid() {
        let builtin = Store::builtin();
        let rebuilt = Store::new(builtin.assets().to_vec()).unwrap();
        assert_eq!(rebuilt.assets().len(), 4);
        assert_eq!(rebuilt.default_asset().name, "SOL");

        let (from, to) = rebuilt.default_pair();
        assert_eq!(from.name, "SOL");
        assert_eq!(to.name, "USDC");
    }

    #[test]
    fn rejects_duplicate_mints_and_names() {
        let err = Store::new(vec![
            Asset::new("SOL", "mint-a", 9),
            Asset::new("wSOL", "mint-a", 9),
        ])
        .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateMint(m) if m == "mint-a"));

        let err = Store::new(vec![
            Asset::new("SOL", "mint-a", 9),
            Asset::new("SOL", "mint-b", 9),
        ])
        .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateName(n) if n == "SOL"));
    }

    #[test]
    fn rejects_empty_and_oversized_precision() {
        assert!(matches!(Store::new(vec![]), Err(RegistryError::Empty)));
        assert!(matches!(
            Store::new(vec![Asset::new("BIG", "mint-big", 20)]),
            Err(RegistryError::TooManyDecimals { decimals: 20, .. })
        ));
    }

    #[test]
    fn unknown_name_falls_back_to_first_asset() {
        let store = Store::builtin();
        assert_eq!(store.resolve_or_default("WIF").name, "WIF");
        assert_eq!(store.resolve_or_default("DOGE").name, "SOL");
        assert_eq!(store.resolve_or_default("").name, "SOL");
    }

    #[test]
    fn single_asset_pair_points_at_itself() {
        let store = Store::new(vec![Asset::new("SOL", "mint-a", 9)]).unwrap();
        let (from, to) = store.default_pair();
        assert!(from.same_mint(to));
    }

    #[test]
    fn loads_from_json() {
        let store = Store::from_json(
            r#"[
                {"name": "SOL", "mint": "So11111111111111111111111111111111111111112", "decimals": 9},
                {"name": "USDC", "mint": "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v", "decimals": 6}
            ]"#,
        )
        .unwrap();
        assert_eq!(store.find("USDC").map(|a| a.decimals), Some(6));

        assert!(matches!(
            Store::from_json("{\"name\": \"SOL\"}"),
            Err(RegistryError::Parse(_))
        ));
    }
}
