//! Provider endpoints, auth header names and HTTP defaults.

/// CoinMarketCap latest quotes endpoint (queried by uppercase ticker).
pub const CMC_QUOTES_URL: &str = "https://pro-api.coinmarketcap.com/v1/cryptocurrency/quotes/latest";
/// Header carrying the CoinMarketCap API key.
pub const CMC_API_KEY_HEADER: &str = "X-CMC_PRO_API_KEY";

/// CoinGecko coin details endpoint; the coin id is appended as a path segment.
pub const COINGECKO_COINS_URL: &str = "https://api.coingecko.com/api/v3/coins";
/// Header carrying the CoinGecko demo API key.
pub const COINGECKO_API_KEY_HEADER: &str = "x-cg-demo-api-key";

/// Dexscreener token endpoint; the contract address is appended as a path segment.
pub const DEXSCREENER_TOKENS_URL: &str = "https://api.dexscreener.com/latest/dex/tokens";

/// Default per-call HTTP timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
