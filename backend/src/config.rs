use std::{env, net::SocketAddr, path::PathBuf, str::FromStr, time::Duration};

pub const DEFAULT_JUPITER_API_URL: &str = "https://lite-api.jup.ag/v6";
pub const DEFAULT_RPC_URL: &str = "https://api.mainnet-beta.solana.com";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value `{value}` for {key}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub jupiter_api_url: String,
    pub rpc_url: String,
    pub slippage_bps: u16,
    pub quote_debounce: Duration,
    pub wrap_and_unwrap_sol: bool,
    pub skip_preflight: bool,
    pub send_max_retries: usize,
    pub bind_addr: SocketAddr,
    pub wallet_keypair: Option<PathBuf>,
    pub assets_file: Option<PathBuf>,
}

impl Config {
    /// Reads the process environment. Call `dotenv().ok()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let debounce_ms: u64 = parse_or(&lookup, "QUOTE_DEBOUNCE_MS", 500)?;

        Ok(Self {
            jupiter_api_url: lookup("JUPITER_API_URL")
                .unwrap_or_else(|| DEFAULT_JUPITER_API_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            rpc_url: lookup("RPC_URL").unwrap_or_else(|| DEFAULT_RPC_URL.to_string()),
            slippage_bps: parse_or(&lookup, "SLIPPAGE_BPS", 50)?,
            quote_debounce: Duration::from_millis(debounce_ms),
            wrap_and_unwrap_sol: parse_or(&lookup, "WRAP_AND_UNWRAP_SOL", true)?,
            skip_preflight: parse_or(&lookup, "SKIP_PREFLIGHT", true)?,
            send_max_retries: parse_or(&lookup, "SEND_MAX_RETRIES", 2)?,
            bind_addr: parse_or(&lookup, "BIND_ADDR", SocketAddr::from(([127, 0, 0, 1], 8080)))?,
            wallet_keypair: lookup("WALLET_KEYPAIR").map(PathBuf::from),
            assets_file: lookup("ASSETS_FILE").map(PathBuf::from),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
    }
}
