//! CoinMarketCap client (primary centralized provider, queried by ticker).
//!
//! CoinMarketCap reports "symbol not found" in the JSON `status` block, often
//! together with a 400 status, so the body is decoded regardless of the HTTP status.
use std::collections::HashMap;

use log::{debug, warn};
use price_common::net::CMC_API_KEY_HEADER;
use price_common::quote::finite;
use price_common::{Quote, Result, Source};
use reqwest::StatusCode;
use reqwest::Url;
use reqwest::blocking::Client;
use serde::Deserialize;

use super::{Lookup, QuoteProvider, decode, fetch, parse_base_url};
use crate::config::ENV_CMC_API_KEY;

#[derive(Debug, Deserialize)]
struct CmcResponse {
    status: CmcStatus,
    #[serde(default)]
    data: Option<HashMap<String, CmcAsset>>,
}

#[derive(Debug, Deserialize)]
struct CmcStatus {
    #[serde(default)]
    error_code: i64,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CmcAsset {
    name: Option<String>,
    symbol: Option<String>,
    circulating_supply: Option<f64>,
    total_supply: Option<f64>,
    #[serde(default)]
    quote: CmcQuote,
}

#[derive(Debug, Default, Deserialize)]
struct CmcQuote {
    #[serde(rename = "USD")]
    usd: Option<CmcUsd>,
}

#[derive(Debug, Deserialize)]
struct CmcUsd {
    price: Option<f64>,
    volume_24h: Option<f64>,
    market_cap: Option<f64>,
    percent_change_24h: Option<f64>,
}

/// CoinMarketCap `quotes/latest` client.
pub struct CoinMarketCapProvider {
    client: Client,
    url: Url,
    api_key: Option<String>,
}

impl CoinMarketCapProvider {
    /// Creates the client. Without an API key every lookup reports `Missing`.
    pub fn new(client: Client, url: &str, api_key: Option<String>) -> Result<Self> {
        Ok(Self {
            client,
            url: parse_base_url(Source::CoinMarketCap, url)?,
            api_key: api_key.filter(|k| !k.is_empty()),
        })
    }

    /// Turns a raw CoinMarketCap answer into a lookup outcome.
    pub(crate) fn interpret(symbol: &str, status: StatusCode, body: &str) -> Result<Lookup> {
        let response: CmcResponse = match decode(Source::CoinMarketCap, body) {
            Ok(response) => response,
            Err(_) if !status.is_success() => {
                warn!("CoinMarketCap API returned status {} for symbol: {}", status.as_u16(), symbol);
                return Ok(Lookup::Missing(format!(
                    "CMC could not find market data for symbol: {}. CoinMarketCap API returned status {}.",
                    symbol,
                    status.as_u16()
                )));
            }
            Err(e) => return Err(e),
        };

        if response.status.error_code != 0 {
            let message = response.status.error_message.unwrap_or_default();
            warn!("CMC API Error: {} for symbol: {}", message, symbol);
            return Ok(Lookup::Missing(format!(
                "CMC could not find market data for symbol: {}. Error: {}",
                symbol, message
            )));
        }

        let key = symbol.to_uppercase();
        let Some(asset) = response.data.and_then(|mut data| data.remove(&key)) else {
            return Ok(Lookup::Missing(format!(
                "CMC could not find market data for symbol: {}. Try another symbol.",
                symbol
            )));
        };

        let mut quote = Quote::new(Source::CoinMarketCap);
        quote.name = asset.name;
        quote.symbol = asset.symbol;
        quote.circulating_supply = Some(finite(asset.circulating_supply).unwrap_or(0.0));
        quote.total_supply = Some(finite(asset.total_supply).unwrap_or(0.0));
        if let Some(usd) = asset.quote.usd {
            quote.price_usd = finite(usd.price);
            quote.change_24h_pct = finite(usd.percent_change_24h);
            quote.market_cap_usd = finite(usd.market_cap);
            quote.volume_24h_usd = finite(usd.volume_24h);
        }
        Ok(Lookup::Found(quote))
    }
}

impl QuoteProvider for CoinMarketCapProvider {
    fn source(&self) -> Source {
        Source::CoinMarketCap
    }

    fn lookup(&self, symbol: &str) -> Result<Lookup> {
        let Some(api_key) = &self.api_key else {
            warn!("{} is not set, skipping CoinMarketCap", ENV_CMC_API_KEY);
            return Ok(Lookup::Missing(format!(
                "CMC could not find market data for symbol: {}. {} is not configured.",
                symbol, ENV_CMC_API_KEY
            )));
        };

        let upper = symbol.to_uppercase();
        debug!("GET {} symbol={}", self.url, upper);
        let request = self
            .client
            .get(self.url.clone())
            .query(&[("symbol", upper.as_str()), ("convert", "USD")])
            .header(CMC_API_KEY_HEADER, api_key);

        let (status, body) = fetch(Source::CoinMarketCap, request)?;
        Self::interpret(symbol, status, &body)
    }
}
