//! Market-data provider clients.
//!
//! Each provider issues a single blocking GET, decodes its own JSON shape and
//! reduces it to a `Quote`. Outcomes are split three ways:
//! - `Ok(Lookup::Found(quote))`: data available;
//! - `Ok(Lookup::Missing(text))`: the provider answered but has no data (unknown
//!   symbol, non-success status, provider disabled); the dispatcher may fall back;
//! - `Err(PriceError)`: transport or decode failure; terminal for the request.
pub mod coingecko;
pub mod coinmarketcap;
pub mod dexscreener;

pub use coingecko::CoinGeckoProvider;
pub use coinmarketcap::CoinMarketCapProvider;
pub use dexscreener::DexscreenerProvider;

use log::debug;
use price_common::{PriceError, Quote, Result, Source};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Outcome of a provider lookup that reached the provider.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    /// The provider returned market data.
    Found(Quote),
    /// The provider has nothing for this target. Holds a user-facing explanation.
    Missing(String),
}

/// A market-data source the dispatcher can query.
pub trait QuoteProvider: Send + Sync {
    /// Provider tag used for attribution and logging.
    fn source(&self) -> Source;

    /// Looks up `target` (ticker, coin id or contract address, depending on the provider).
    fn lookup(&self, target: &str) -> Result<Lookup>;
}

/// Builds the blocking HTTP client shared by all providers.
pub fn http_client(timeout: Duration) -> Result<Client> {
    let client = Client::builder()
        .timeout(timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// Parses a configured base URL.
pub(crate) fn parse_base_url(source: Source, raw: &str) -> Result<Url> {
    let url = Url::parse(raw)
        .map_err(|e| PriceError::Config(format!("Invalid {} base URL {:?}: {}", source, raw, e)))?;
    if url.cannot_be_a_base() {
        return Err(PriceError::Config(format!("{} base URL {:?} cannot take a path", source, raw)));
    }
    Ok(url)
}

/// Appends one percent-encoded path segment to `base`.
///
/// Returns `None` for `.` and `..`: URL normalisation would drop them and the
/// request would hit the parent resource instead.
pub(crate) fn with_segment(base: &Url, segment: &str) -> Option<Url> {
    if matches!(segment, "." | "..") {
        return None;
    }
    let mut url = base.clone();
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().push(segment);
    }
    Some(url)
}

/// Sends the request and reads the whole body. Any failure here is a transport error.
pub(crate) fn fetch(source: Source, request: RequestBuilder) -> Result<(StatusCode, String)> {
    let response = request
        .header("accept", "application/json")
        .send()
        .map_err(|e| PriceError::Transport { provider: source, source: e })?;
    let status = response.status();
    debug!("{} answered {}", source, status);
    let body = response
        .text()
        .map_err(|e| PriceError::Transport { provider: source, source: e })?;
    Ok((status, body))
}

/// Decodes a JSON body, tagging failures with the provider.
pub(crate) fn decode<T: DeserializeOwned>(source: Source, body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| PriceError::Decode { provider: source, source: e })
}

/// One-shot HTTP server for exercising the real request path in tests.
#[cfg(test)]
pub(crate) mod stub {
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};
    use std::time::Duration;

    /// Answers a single request with `200` and `body` after `delay`.
    ///
    /// Returns the base URL and a handle yielding the lowercased request head
    /// (request line and headers).
    pub(crate) fn serve_once(body: &'static str, delay: Duration) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let server = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut head = String::new();
            loop {
                let mut line = String::new();
                if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
                    break;
                }
                head.push_str(&line);
            }

            thread::sleep(delay);
            let response = format!(
                "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            // The client may have given up already.
            let _ = stream.write_all(response.as_bytes());
            head.to_lowercase()
        });
        (base, server)
    }
}
