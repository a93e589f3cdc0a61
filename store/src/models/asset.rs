use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub name: String,
    pub mint: String,
    pub decimals: u8,
}

impl Asset {
    pub fn new(name: impl Into<String>, mint: impl Into<String>, decimals: u8) -> Self {
        Self {
            name: name.into(),
            mint: mint.into(),
            decimals,
        }
    }

    pub fn same_mint(&self, other: &Asset) -> bool {
        self.mint == other.mint
    }
}
