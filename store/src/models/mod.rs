pub mod asset;
pub mod intent;
pub mod quote;
