//! Price and market overview agent.
//!
//! Wires the pure pieces of `price_common` to live market-data providers:
//! - `config`: environment-driven `AgentConfig`.
//! - `context`: cancellation-aware `TaskContext` and the `InFlight` slot.
//! - `providers`: CoinMarketCap, CoinGecko and Dexscreener clients behind `QuoteProvider`.
//! - `dispatcher`: command routing and provider fallback.
//! - `handler`: the `TaskHandler` host contract and its `PriceAgent` implementation.
#![warn(missing_docs)]
pub mod config;
pub mod context;
pub mod dispatcher;
pub mod handler;
pub mod providers;

pub use config::AgentConfig;
pub use context::{CancelHandle, InFlight, TaskContext};
pub use dispatcher::{Dispatcher, Resolution};
pub use handler::{PriceAgent, TaskHandler};
