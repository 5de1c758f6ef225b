//! Environment-driven configuration.
//!
//! Every value is optional. A missing API key degrades its provider (CoinMarketCap
//! is skipped, CoinGecko runs unauthenticated) instead of failing startup.
//! Values are read through a lookup closure so tests never touch the process
//! environment.
use std::fmt;
use std::time::Duration;

use price_common::net::{CMC_QUOTES_URL, COINGECKO_COINS_URL, DEFAULT_TIMEOUT_SECS, DEXSCREENER_TOKENS_URL};
use price_common::{PriceError, Result};

/// CoinMarketCap API key.
pub const ENV_CMC_API_KEY: &str = "CMC_API_KEY";
/// CoinGecko demo API key.
pub const ENV_COINGECKO_API_KEY: &str = "COINGECKO_API_KEY";
/// Per-call HTTP timeout in whole seconds.
pub const ENV_HTTP_TIMEOUT_SECS: &str = "PRICE_AGENT_HTTP_TIMEOUT_SECS";
/// CoinMarketCap quotes endpoint override.
pub const ENV_CMC_BASE_URL: &str = "CMC_BASE_URL";
/// CoinGecko coins endpoint override.
pub const ENV_COINGECKO_BASE_URL: &str = "COINGECKO_BASE_URL";
/// Dexscreener tokens endpoint override.
pub const ENV_DEXSCREENER_BASE_URL: &str = "DEXSCREENER_BASE_URL";

/// Identity values consumed by the host runtime. Never inspected or logged here.
#[derive(Clone, Default)]
pub struct HostIdentity {
    /// `PRIVATE_KEY`, redacted in debug output.
    pub private_key: Option<String>,
    /// `NFT_TOKEN_ID`.
    pub nft_token_id: Option<String>,
    /// `OWNER_ADDRESS`.
    pub owner_address: Option<String>,
}

impl fmt::Debug for HostIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostIdentity")
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .field("nft_token_id", &self.nft_token_id)
            .field("owner_address", &self.owner_address)
            .finish()
    }
}

/// Agent configuration.
#[derive(Clone)]
pub struct AgentConfig {
    /// CoinMarketCap key; `None` disables the provider.
    pub cmc_api_key: Option<String>,
    /// CoinGecko demo key; `None` sends requests unauthenticated.
    pub coingecko_api_key: Option<String>,
    /// Timeout applied to every provider call.
    pub http_timeout: Duration,
    /// CoinMarketCap quotes endpoint.
    pub cmc_url: String,
    /// CoinGecko coins endpoint.
    pub coingecko_url: String,
    /// Dexscreener tokens endpoint.
    pub dexscreener_url: String,
    /// Values passed through to the host runtime.
    pub identity: HostIdentity,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            cmc_api_key: None,
            coingecko_api_key: None,
            http_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            cmc_url: CMC_QUOTES_URL.to_string(),
            coingecko_url: COINGECKO_COINS_URL.to_string(),
            dexscreener_url: DEXSCREENER_TOKENS_URL.to_string(),
            identity: HostIdentity::default(),
        }
    }
}

impl fmt::Debug for AgentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentConfig")
            .field("cmc_api_key", &self.cmc_api_key.as_ref().map(|_| "<redacted>"))
            .field("coingecko_api_key", &self.coingecko_api_key.as_ref().map(|_| "<redacted>"))
            .field("http_timeout", &self.http_timeout)
            .field("cmc_url", &self.cmc_url)
            .field("coingecko_url", &self.coingecko_url)
            .field("dexscreener_url", &self.dexscreener_url)
            .field("identity", &self.identity)
            .finish()
    }
}

impl AgentConfig {
    /// Loads `.env` (if present) and reads the process environment.
    pub fn from_env() -> Result<Self> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                log::warn!("Ignoring unreadable .env file: {}", e);
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let http_timeout = match value(ENV_HTTP_TIMEOUT_SECS) {
            Some(raw) => {
                let secs: u64 = raw.parse().map_err(|e| {
                    PriceError::Config(format!("{} must be a whole number of seconds: {}", ENV_HTTP_TIMEOUT_SECS, e))
                })?;
                if secs == 0 {
                    return Err(PriceError::Config(format!("{} must be greater than zero", ENV_HTTP_TIMEOUT_SECS)));
                }
                Duration::from_secs(secs)
            }
            None => defaults.http_timeout,
        };

        Ok(Self {
            cmc_api_key: value(ENV_CMC_API_KEY),
            coingecko_api_key: value(ENV_COINGECKO_API_KEY),
            http_timeout,
            cmc_url: value(ENV_CMC_BASE_URL).unwrap_or(defaults.cmc_url),
            coingecko_url: value(ENV_COINGECKO_BASE_URL).unwrap_or(defaults.coingecko_url),
            dexscreener_url: value(ENV_DEXSCREENER_BASE_URL).unwrap_or(defaults.dexscreener_url),
            identity: HostIdentity {
                private_key: value("PRIVATE_KEY"),
                nft_token_id: value("NFT_TOKEN_ID"),
                owner_address: value("OWNER_ADDRESS"),
            },
        })
    }
}
