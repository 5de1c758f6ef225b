//! CoinGecko client (secondary centralized provider, queried by coin id).
use std::collections::HashMap;

use log::{debug, warn};
use price_common::net::COINGECKO_API_KEY_HEADER;
use price_common::quote::finite;
use price_common::{Quote, Result, Source};
use reqwest::StatusCode;
use reqwest::Url;
use reqwest::blocking::Client;
use serde::Deserialize;

use super::{Lookup, QuoteProvider, decode, fetch, parse_base_url, with_segment};

/// Query flags trimming the coin payload down to market data.
const COIN_QUERY: [(&str, &str); 6] = [
    ("localization", "false"),
    ("tickers", "false"),
    ("market_data", "true"),
    ("community_data", "false"),
    ("developer_data", "false"),
    ("sparkline", "false"),
];

#[derive(Debug, Deserialize)]
struct CoinResponse {
    name: Option<String>,
    symbol: Option<String>,
    market_data: Option<MarketData>,
}

#[derive(Debug, Deserialize)]
struct MarketData {
    #[serde(default)]
    current_price: HashMap<String, Option<f64>>,
    price_change_percentage_24h: Option<f64>,
    #[serde(default)]
    market_cap: HashMap<String, Option<f64>>,
    circulating_supply: Option<f64>,
    total_supply: Option<f64>,
}

fn currency(values: &HashMap<String, Option<f64>>, code: &str) -> Option<f64> {
    finite(values.get(code).copied().flatten())
}

/// CoinGecko `coins/{id}` client.
pub struct CoinGeckoProvider {
    client: Client,
    url: Url,
    api_key: Option<String>,
}

impl CoinGeckoProvider {
    /// Creates the client. The API key is optional; without it requests go out unauthenticated.
    pub fn new(client: Client, url: &str, api_key: Option<String>) -> Result<Self> {
        Ok(Self {
            client,
            url: parse_base_url(Source::CoinGecko, url)?,
            api_key: api_key.filter(|k| !k.is_empty()),
        })
    }

    pub(crate) fn interpret(coin_id: &str, status: StatusCode, body: &str) -> Result<Lookup> {
        if !status.is_success() {
            warn!("CoinGecko API returned status: {} for ID: {}", status.as_u16(), coin_id);
            return Ok(Lookup::Missing(format!(
                "Error: CoinGecko API returned status {}. Could not find data for {}.",
                status.as_u16(),
                coin_id
            )));
        }

        let coin: CoinResponse = decode(Source::CoinGecko, body)?;
        let Some(market) = coin.market_data else {
            return Ok(Lookup::Missing(format!(
                "CoinGecko returned no market data. Could not find data for {}.",
                coin_id
            )));
        };

        let mut quote = Quote::new(Source::CoinGecko);
        quote.name = coin.name;
        quote.symbol = coin.symbol.map(|s| s.to_uppercase());
        quote.price_usd = currency(&market.current_price, "usd");
        quote.price_eur = currency(&market.current_price, "eur");
        quote.change_24h_pct = finite(market.price_change_percentage_24h);
        quote.market_cap_usd = currency(&market.market_cap, "usd");
        quote.circulating_supply = Some(finite(market.circulating_supply).unwrap_or(0.0));
        quote.total_supply = Some(finite(market.total_supply).unwrap_or(0.0));
        Ok(Lookup::Found(quote))
    }
}

impl QuoteProvider for CoinGeckoProvider {
    fn source(&self) -> Source {
        Source::CoinGecko
    }

    fn lookup(&self, coin_id: &str) -> Result<Lookup> {
        let Some(url) = with_segment(&self.url, coin_id) else {
            return Ok(Lookup::Missing(format!("CoinGecko has no coin with ID {:?}.", coin_id)));
        };
        debug!("GET {}", url);
        let mut request = self.client.get(url).query(&COIN_QUERY);
        if let Some(api_key) = &self.api_key {
            request = request.header(COINGECKO_API_KEY_HEADER, api_key);
        }

        let (status, body) = fetch(Source::CoinGecko, request)?;
        Self::interpret(coin_id, status, &body)
    }
}
