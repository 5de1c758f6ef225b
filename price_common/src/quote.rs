//! Typed quote record produced by the provider clients.
//!
//! A `Quote` is request scoped: a provider builds it from its JSON payload, the
//! formatter turns it into a `Summary`, and it is dropped after rendering. Every
//! numeric field is either a finite decimal or `None`.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Market-data provider that answered a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum Source {
    /// Primary centralized-exchange data provider, queried by ticker.
    CoinMarketCap,
    /// Secondary centralized-exchange data provider, queried by canonical id.
    CoinGecko,
    /// On-chain liquidity pool data, queried by contract address.
    Dexscreener,
}

impl Source {
    /// Lowercase tag used in the delimited wire form (`token_source:coingecko`).
    pub fn tag(&self) -> &'static str {
        match self {
            Source::CoinMarketCap => "coinmarketcap",
            Source::CoinGecko => "coingecko",
            Source::Dexscreener => "dexscreener",
        }
    }

    /// Human readable provider name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Source::CoinMarketCap => "CoinMarketCap",
            Source::CoinGecko => "CoinGecko",
            Source::Dexscreener => "Dexscreener",
        }
    }
}

/// Market snapshot for a single asset as reported by one provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Provider that produced this quote.
    pub source: Source,
    /// Full asset name (e.g. `Bitcoin`).
    pub name: Option<String>,
    /// Ticker symbol as reported by the provider.
    pub symbol: Option<String>,
    /// Chain identifier for on-chain quotes (e.g. `ethereum`, `bsc`).
    pub chain_id: Option<String>,
    /// Current price in USD.
    pub price_usd: Option<f64>,
    /// Current price in EUR, when the provider reports it.
    pub price_eur: Option<f64>,
    /// Price change over the last 24 hours, in percent.
    pub change_24h_pct: Option<f64>,
    /// Market capitalisation in USD.
    pub market_cap_usd: Option<f64>,
    /// Traded volume over the last 24 hours in USD.
    pub volume_24h_usd: Option<f64>,
    /// Fully diluted value in USD.
    pub fdv_usd: Option<f64>,
    /// Circulating supply in token units.
    pub circulating_supply: Option<f64>,
    /// Total supply in token units.
    pub total_supply: Option<f64>,
    /// When the quote was assembled.
    pub fetched_at: DateTime<Utc>,
}

impl Quote {
    /// Creates an empty quote attributed to `source`.
    pub fn new(source: Source) -> Self {
        Quote {
            source,
            name: None,
            symbol: None,
            chain_id: None,
            price_usd: None,
            price_eur: None,
            change_24h_pct: None,
            market_cap_usd: None,
            volume_24h_usd: None,
            fdv_usd: None,
            circulating_supply: None,
            total_supply: None,
            fetched_at: Utc::now(),
        }
    }
}

/// Drops NaN and infinities so that `Quote` only ever holds valid decimals.
pub fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_parses_case_insensitively() {
        assert_eq!("coingecko".parse::<Source>().unwrap(), Source::CoinGecko);
        assert_eq!("COINMARKETCAP".parse::<Source>().unwrap(), Source::CoinMarketCap);
        assert!("binance".parse::<Source>().is_err());
    }

    #[test]
    fn source_tags_and_names() {
        assert_eq!(Source::Dexscreener.tag(), "dexscreener");
        assert_eq!(Source::CoinMarketCap.display_name(), "CoinMarketCap");
        assert_eq!(Source::CoinGecko.to_string(), "CoinGecko");
    }

    #[test]
    fn quote_serializes_source_as_lowercase_tag() {
        let mut quote = Quote::new(Source::CoinGecko);
        quote.price_usd = Some(1.5);
        let json = serde_json::to_value(&quote).unwrap();
        assert_eq!(json["source"], "coingecko");
        assert_eq!(json["price_usd"], 1.5);
        assert!(json["name"].is_null());
    }

    #[test]
    fn finite_rejects_nan_and_infinity() {
        assert_eq!(finite(Some(2.0)), Some(2.0));
        assert_eq!(finite(Some(f64::NAN)), None);
        assert_eq!(finite(Some(f64::INFINITY)), None);
        assert_eq!(finite(None), None);
    }
}
