//! Ticker symbol normalizer used by the secondary centralized provider.
//!
//! CoinGecko addresses assets by a full id (`bitcoin`) rather than by ticker
//! (`BTC`). The table below covers the common tickers; anything else is assumed
//! to already be a CoinGecko id and passes through lowercased.
use std::collections::HashMap;
use std::sync::LazyLock;

/// Ticker (lowercase) to CoinGecko id. Built once, read-only afterwards.
static COIN_IDS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("btc", "bitcoin"),
        ("eth", "ethereum"),
        ("sol", "solana"),
        ("ada", "cardano"),
        ("doge", "dogecoin"),
        ("shib", "shiba-inu"),
        ("pepe", "pepe"),
        ("avax", "avalanche-2"),
        ("link", "chainlink"),
        ("uni", "uniswap"),
        ("matic", "matic-network"),
        ("ltc", "litecoin"),
        ("bnb", "binancecoin"),
        ("xrp", "ripple"),
        ("dot", "polkadot"),
        ("usdt", "tether"),
        ("usdc", "usd-coin"),
        ("dai", "dai"),
    ])
});

/// Looks up the CoinGecko id for a known ticker, ignoring case.
pub fn canonical_id(symbol: &str) -> Option<&'static str> {
    COIN_IDS
        .get(symbol.trim().to_ascii_lowercase().as_str())
        .copied()
}

/// Maps a user supplied ticker to a CoinGecko id.
///
/// Unknown input is returned trimmed and lowercased.
pub fn normalize(symbol: &str) -> String {
    match canonical_id(symbol) {
        Some(id) => id.to_string(),
        None => symbol.trim().to_lowercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tickers_map_to_ids() {
        assert_eq!(normalize("BTC"), "bitcoin");
        assert_eq!(normalize("btc"), "bitcoin");
        assert_eq!(normalize("Eth"), "ethereum");
        assert_eq!(normalize("AVAX"), "avalanche-2");
        assert_eq!(canonical_id("shib"), Some("shiba-inu"));
    }

    #[test]
    fn unknown_input_is_lowercase_identity() {
        assert_eq!(normalize("Matic-Network"), "matic-network");
        assert_eq!(normalize("some-coin"), "some-coin");
        assert_eq!(canonical_id("unknown"), None);
    }

    #[test]
    fn normalization_is_stable() {
        for (ticker, _) in COIN_IDS.iter() {
            let first = normalize(ticker);
            assert_eq!(first, normalize(ticker));
            assert_eq!(first, normalize(&ticker.to_uppercase()));
        }
    }
}
