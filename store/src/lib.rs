pub mod models;
pub mod registry;
pub mod units;

use models::asset::Asset;

pub use registry::RegistryError;
pub use units::UnitsError;

/// Ordered set of tradable assets, loaded once at start-up and never mutated.
#[derive(Debug, Clone)]
pub struct Store {
    assets: Vec<Asset>,
}
