//! Host-facing task handler.
//!
//! The host runtime delivers one text command per task together with a
//! cancellation-aware context and forwards the returned text (or error) to its
//! own output sink. `PriceAgent` is the only implementor.
use std::sync::Arc;

use log::{error, info, warn};
use price_common::Result;

use crate::config::AgentConfig;
use crate::context::TaskContext;
use crate::dispatcher::Dispatcher;
use crate::providers::{CoinGeckoProvider, CoinMarketCapProvider, DexscreenerProvider, http_client};

/// Display name announced to the host.
pub const AGENT_NAME: &str = "Price and Market Overview";
/// One-line description announced to the host.
pub const AGENT_DESCRIPTION: &str = "Fetches comprehensive crypto market data from CoinMarketCap (Primary CEX), CoinGecko (CEX Failover), and Dexscreener (DEX).";
/// Capabilities announced to the host.
pub const AGENT_CAPABILITIES: &[&str] = &["fetch real-time cryptocurrency price and market data using multiple apis"];

/// Single-method contract between the host runtime and a task handler.
pub trait TaskHandler: Send + Sync {
    /// Processes one raw command and returns the reply text.
    ///
    /// Usage mistakes and "not found" are normal replies (`Ok`). `Err` is reserved
    /// for provider failures and cancellation; `PriceError::user_message` gives
    /// the text to show alongside it.
    fn process_task(&self, ctx: &TaskContext, input: &str) -> Result<String>;
}

/// Price lookup agent backed by CoinMarketCap, CoinGecko and Dexscreener.
pub struct PriceAgent {
    dispatcher: Dispatcher,
}

impl PriceAgent {
    /// Builds the three provider clients from `config`.
    pub fn from_config(config: &AgentConfig) -> Result<Self> {
        let client = http_client(config.http_timeout)?;
        let dex = DexscreenerProvider::new(client.clone(), &config.dexscreener_url)?;
        let cmc = CoinMarketCapProvider::new(client.clone(), &config.cmc_url, config.cmc_api_key.clone())?;
        let gecko = CoinGeckoProvider::new(client, &config.coingecko_url, config.coingecko_api_key.clone())?;

        Ok(Self::with_dispatcher(Dispatcher::new(
            Arc::new(dex),
            Arc::new(cmc),
            Arc::new(gecko),
        )))
    }

    /// Wraps an existing dispatcher.
    pub fn with_dispatcher(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Underlying dispatcher, for callers that want the unrendered quote.
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }
}

impl TaskHandler for PriceAgent {
    fn process_task(&self, ctx: &TaskContext, input: &str) -> Result<String> {
        info!("Processing task: {}", input);
        self.dispatcher.dispatch(ctx, input).inspect_err(|e| {
            if e.is_provider_failure() {
                error!("Task {:?} failed at the provider: {}", input, e);
            } else {
                warn!("Task {:?} stopped: {}", input, e);
            }
        })
    }
}
