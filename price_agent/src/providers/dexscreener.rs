//! Dexscreener client (on-chain pools, queried by contract address).
//!
//! The token endpoint lists every pool trading the token; the first pair is
//! the one reported.
use log::{debug, warn};
use price_common::quote::finite;
use price_common::{Quote, Result, Source};
use reqwest::StatusCode;
use reqwest::Url;
use reqwest::blocking::Client;
use serde::Deserialize;

use super::{Lookup, QuoteProvider, decode, fetch, parse_base_url, with_segment};

/// Reply when the address is unknown to Dexscreener.
pub const NO_PAIRS: &str = "Dexscreener found no pairs for that token address.";

#[derive(Debug, Deserialize)]
struct TokenPairs {
    #[serde(default)]
    pairs: Option<Vec<Pair>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Pair {
    chain_id: Option<String>,
    base_token: Option<Token>,
    price_usd: Option<String>,
    volume: Option<Window>,
    price_change: Option<Window>,
    fdv: Option<f64>,
    market_cap: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct Token {
    name: Option<String>,
    symbol: Option<String>,
}

/// Per-window figures (`m5`, `h1`, `h6`, `h24`); only the daily one is used.
#[derive(Debug, Deserialize)]
struct Window {
    h24: Option<f64>,
}

/// Dexscreener `latest/dex/tokens/{address}` client.
pub struct DexscreenerProvider {
    client: Client,
    url: Url,
}

impl DexscreenerProvider {
    /// Creates the client. Dexscreener needs no API key.
    pub fn new(client: Client, url: &str) -> Result<Self> {
        Ok(Self {
            client,
            url: parse_base_url(Source::Dexscreener, url)?,
        })
    }

    pub(crate) fn interpret(address: &str, status: StatusCode, body: &str) -> Result<Lookup> {
        if !status.is_success() {
            warn!("Dexscreener API returned status: {} for address: {}", status.as_u16(), address);
            return Ok(Lookup::Missing(format!(
                "Dexscreener Error: API returned status {}.",
                status.as_u16()
            )));
        }

        let token: TokenPairs = decode(Source::Dexscreener, body)?;
        let Some(pair) = token.pairs.and_then(|pairs| pairs.into_iter().next()) else {
            return Ok(Lookup::Missing(NO_PAIRS.to_string()));
        };

        let mut quote = Quote::new(Source::Dexscreener);
        if let Some(base) = pair.base_token {
            quote.name = base.name;
            quote.symbol = base.symbol;
        }
        quote.chain_id = pair.chain_id;
        quote.price_usd = finite(pair.price_usd.as_deref().and_then(|p| p.trim().parse().ok()));
        quote.volume_24h_usd = finite(pair.volume.and_then(|v| v.h24));
        quote.change_24h_pct = finite(pair.price_change.and_then(|c| c.h24));
        quote.fdv_usd = finite(pair.fdv);
        quote.market_cap_usd = finite(pair.market_cap);
        Ok(Lookup::Found(quote))
    }
}

impl QuoteProvider for DexscreenerProvider {
    fn source(&self) -> Source {
        Source::Dexscreener
    }

    fn lookup(&self, address: &str) -> Result<Lookup> {
        let Some(url) = with_segment(&self.url, address) else {
            return Ok(Lookup::Missing(NO_PAIRS.to_string()));
        };
        debug!("GET {}", url);
        let (status, body) = fetch(Source::Dexscreener, self.client.get(url))?;
        Self::interpret(address, status, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::http_client;
    use crate::providers::stub::serve_once;
    use price_common::PriceError;
    use std::time::Duration;

    const PEPE: &str = r#"{
        "schemaVersion": "1.0.0",
        "pairs": [
            {
                "chainId": "ethereum", "dexId": "uniswap",
                "pairAddress": "0xa43fe16908251ee70ef74718545e4fe6c5ccec9f",
                "baseToken": {"address": "0x6982508145454ce325ddbe47a25d4ec3d2311933", "name": "Pepe", "symbol": "PEPE"},
                "quoteToken": {"address": "0xc02a", "name": "Wrapped Ether", "symbol": "WETH"},
                "priceUsd": "0.00001234",
                "volume": {"h24": 1234567.8, "h6": 1.0, "h1": 1.0, "m5": 1.0},
                "priceChange": {"h24": -3.2},
                "fdv": 5190000000,
                "marketCap": 5190000000
            },
            {"chainId": "bsc", "priceUsd": "1"}
        ]
    }"#;

    #[test]
    fn uses_first_pair() {
        let lookup = DexscreenerProvider::interpret("0x69", StatusCode::OK, PEPE).unwrap();
        let Lookup::Found(quote) = lookup else { panic!("expected a quote") };
        assert_eq!(quote.source, Source::Dexscreener);
        assert_eq!(quote.chain_id.as_deref(), Some("ethereum"));
        assert_eq!(quote.name.as_deref(), Some("Pepe"));
        assert_eq!(quote.symbol.as_deref(), Some("PEPE"));
        assert_eq!(quote.price_usd, Some(0.00001234));
        assert_eq!(quote.volume_24h_usd, Some(1234567.8));
        assert_eq!(quote.change_24h_pct, Some(-3.2));
        assert_eq!(quote.fdv_usd, Some(5_190_000_000.0));
    }

    #[test]
    fn empty_or_null_pairs_mean_no_pairs() {
        for body in [r#"{"pairs":[]}"#, r#"{"schemaVersion":"1.0.0","pairs":null}"#, "{}"] {
            let lookup = DexscreenerProvider::interpret("0x00", StatusCode::OK, body).unwrap();
            assert_eq!(lookup, Lookup::Missing(NO_PAIRS.into()));
        }
    }

    #[test]
    fn unparseable_price_is_absent() {
        let body = r#"{"pairs":[{"chainId":"base","priceUsd":"n/a"}]}"#;
        let Lookup::Found(quote) = DexscreenerProvider::interpret("0x00", StatusCode::OK, body).unwrap() else {
            panic!("expected a quote")
        };
        assert_eq!(quote.price_usd, None);
        assert_eq!(quote.chain_id.as_deref(), Some("base"));
    }

    #[test]
    fn error_status_is_reported_as_text() {
        let lookup = DexscreenerProvider::interpret("0x00", StatusCode::SERVICE_UNAVAILABLE, "").unwrap();
        assert_eq!(lookup, Lookup::Missing("Dexscreener Error: API returned status 503.".into()));
    }

    #[test]
    fn malformed_body_is_decode_error() {
        let err = DexscreenerProvider::interpret("0x00", StatusCode::OK, "not json").unwrap_err();
        assert!(matches!(err, PriceError::Decode { provider: Source::Dexscreener, .. }));
    }

    #[test]
    fn requests_token_path_without_auth() {
        let (base, server) = serve_once(PEPE, Duration::ZERO);
        let client = http_client(Duration::from_secs(5)).unwrap();
        let provider = DexscreenerProvider::new(client, &format!("{}/latest/dex/tokens/", base)).unwrap();

        let lookup = provider.lookup("0x6982508145454ce325ddbe47a25d4ec3d2311933").unwrap();
        let head = server.join().unwrap();

        assert!(head.starts_with("get /latest/dex/tokens/0x6982508145454ce325ddbe47a25d4ec3d2311933 http/1.1\r\n"));
        assert!(!head.contains("api-key"));
        assert!(matches!(lookup, Lookup::Found(quote) if quote.symbol.as_deref() == Some("PEPE")));
    }
}
