//! Display-ready view of a quote and its delimited text form.
//!
//! A `Summary` holds the already formatted strings the report renders. It is
//! normally built from a typed `Quote`, but it can also be parsed from the
//! `key:value;key:value` text some integrations still emit
//! (`token_source:coingecko;current_price_usd:$1.00;24h_change:0.10%`).
//!
//! Parsing rules for the delimited form:
//! - segments are split on `;`, each segment on its first `:`;
//! - a segment without `:` is dropped, parsing continues;
//! - the last occurrence of a repeated key wins;
//! - unknown keys are ignored.
use crate::numbers::{format_currency, format_percent, format_quantity};
use crate::quote::Quote;

const KEY_SOURCE: &str = "token_source";
const KEY_NAME: &str = "name";
const KEY_CHAIN: &str = "chain_id";
const KEY_PRICE_USD: &str = "current_price_usd";
const KEY_PRICE_EUR: &str = "current_price_eur";
const KEY_CHANGE: &str = "24h_change";
const KEY_MARKET_CAP: &str = "market_cap_usd";
const KEY_VOLUME: &str = "volume_24h";
const KEY_FDV: &str = "fdv";
const KEY_CIRCULATING: &str = "circulating_supply";
const KEY_TOTAL: &str = "total_supply";
const KEY_BASE_TOKEN: &str = "base_token";

/// Formatted fields of a quote. `None` means the provider did not report it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    /// Provider tag (`coinmarketcap`, `coingecko`, `dexscreener`).
    pub source: Option<String>,
    /// Asset name shown in the header.
    pub name: Option<String>,
    /// Chain id for on-chain quotes.
    pub chain_id: Option<String>,
    /// Base token symbol for on-chain quotes.
    pub base_token: Option<String>,
    /// Price in USD, e.g. `$67,012.35`.
    pub price_usd: Option<String>,
    /// Price in EUR.
    pub price_eur: Option<String>,
    /// 24h change, e.g. `5.00%`.
    pub change_24h: Option<String>,
    /// Market capitalisation in USD.
    pub market_cap: Option<String>,
    /// 24h traded volume in USD.
    pub volume_24h: Option<String>,
    /// Fully diluted value in USD.
    pub fdv: Option<String>,
    /// Circulating supply, `N/A` when unknown.
    pub circulating_supply: Option<String>,
    /// Total supply, `N/A` when unknown.
    pub total_supply: Option<String>,
}

impl Summary {
    /// Parses the delimited `key:value;key:value` form.
    pub fn parse(raw: &str) -> Self {
        let mut summary = Summary::default();
        for segment in raw.split(';') {
            let Some((key, value)) = segment.split_once(':') else {
                continue;
            };
            if let Some(slot) = summary.slot_mut(key) {
                *slot = Some(value.to_string());
            }
        }
        summary
    }

    /// Encodes the present fields back into the delimited form, in a fixed order.
    ///
    /// Values containing `;` would break the format; those fields are skipped.
    pub fn to_kv_string(&self) -> String {
        self.entries()
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| (key, v)))
            .filter(|(_, value)| !value.contains(';'))
            .map(|(key, value)| format!("{}:{}", key, value))
            .collect::<Vec<_>>()
            .join(";")
    }

    fn entries(&self) -> [(&'static str, Option<&str>); 12] {
        [
            (KEY_SOURCE, self.source.as_deref()),
            (KEY_NAME, self.name.as_deref()),
            (KEY_CHAIN, self.chain_id.as_deref()),
            (KEY_PRICE_USD, self.price_usd.as_deref()),
            (KEY_PRICE_EUR, self.price_eur.as_deref()),
            (KEY_CHANGE, self.change_24h.as_deref()),
            (KEY_MARKET_CAP, self.market_cap.as_deref()),
            (KEY_VOLUME, self.volume_24h.as_deref()),
            (KEY_FDV, self.fdv.as_deref()),
            (KEY_CIRCULATING, self.circulating_supply.as_deref()),
            (KEY_TOTAL, self.total_supply.as_deref()),
            (KEY_BASE_TOKEN, self.base_token.as_deref()),
        ]
    }

    fn slot_mut(&mut self, key: &str) -> Option<&mut Option<String>> {
        let slot = match key {
            KEY_SOURCE => &mut self.source,
            KEY_NAME => &mut self.name,
            KEY_CHAIN => &mut self.chain_id,
            KEY_PRICE_USD => &mut self.price_usd,
            KEY_PRICE_EUR => &mut self.price_eur,
            KEY_CHANGE => &mut self.change_24h,
            KEY_MARKET_CAP => &mut self.market_cap,
            KEY_VOLUME => &mut self.volume_24h,
            KEY_FDV => &mut self.fdv,
            KEY_CIRCULATING => &mut self.circulating_supply,
            KEY_TOTAL => &mut self.total_supply,
            KEY_BASE_TOKEN => &mut self.base_token,
            _ => return None,
        };
        Some(slot)
    }
}

impl From<&Quote> for Summary {
    fn from(quote: &Quote) -> Self {
        Summary {
            source: Some(quote.source.tag().to_string()),
            name: quote.name.clone(),
            chain_id: quote.chain_id.clone(),
            base_token: quote.symbol.clone(),
            price_usd: quote.price_usd.map(format_currency),
            price_eur: quote.price_eur.map(format_currency),
            change_24h: quote.change_24h_pct.map(format_percent),
            market_cap: quote.market_cap_usd.map(format_currency),
            volume_24h: quote.volume_24h_usd.map(format_currency),
            fdv: quote.fdv_usd.map(format_currency),
            circulating_supply: quote.circulating_supply.map(format_quantity),
            total_supply: quote.total_supply.map(format_quantity),
        }
    }
}
