//! Command dispatch and provider fallback.
//!
//! Routing is decided by the shape of the target alone:
//! - contract address (`0x…`, 40+ chars) → on-chain provider only, never falls back;
//! - anything else → primary centralized provider, then the secondary one with the
//!   ticker translated through the symbol normalizer.
//!
//! Only `Lookup::Missing` moves on to the next provider. Transport and decode
//! errors end the request immediately.
use std::sync::Arc;

use log::{error, info};
use price_common::command::Target;
use price_common::report::render;
use price_common::{Command, Quote, Result, Summary, symbols};

use crate::context::TaskContext;
use crate::providers::{Lookup, QuoteProvider};

/// Result of resolving a command, before rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// A provider returned data.
    Quote(Quote),
    /// Text reply without data: usage help, "not found", provider status messages.
    Message(String),
}

/// Routes commands to providers in a fixed priority order.
pub struct Dispatcher {
    dex: Arc<dyn QuoteProvider>,
    primary: Arc<dyn QuoteProvider>,
    secondary: Arc<dyn QuoteProvider>,
}

impl Dispatcher {
    /// `dex` serves contract addresses; `primary` then `secondary` serve symbols.
    pub fn new(
        dex: Arc<dyn QuoteProvider>,
        primary: Arc<dyn QuoteProvider>,
        secondary: Arc<dyn QuoteProvider>,
    ) -> Self {
        Self {
            dex,
            primary,
            secondary,
        }
    }

    /// Parses `input`, runs the lookup and renders the reply text.
    pub fn dispatch(&self, ctx: &TaskContext, input: &str) -> Result<String> {
        match self.resolve(ctx, input)? {
            Resolution::Quote(quote) => Ok(render(&Summary::from(&quote))),
            Resolution::Message(text) => Ok(text),
        }
    }

    /// Parses `input` and runs the lookup without rendering.
    pub fn resolve(&self, ctx: &TaskContext, input: &str) -> Result<Resolution> {
        let command = match Command::parse(input) {
            Ok(command) => command,
            Err(usage) => return Ok(Resolution::Message(usage.to_string())),
        };
        self.lookup(ctx, &command)
    }

    /// Runs the lookup for an already parsed command.
    pub fn lookup(&self, ctx: &TaskContext, command: &Command) -> Result<Resolution> {
        match command.target() {
            Target::Contract(address) => {
                info!("Attempting {} lookup for address: {}", self.dex.source(), address);
                Ok(match call(ctx, &self.dex, address)? {
                    Lookup::Found(quote) => Resolution::Quote(quote),
                    Lookup::Missing(text) => Resolution::Message(text),
                })
            }
            Target::Symbol(symbol) => self.lookup_symbol(ctx, &symbol),
        }
    }

    fn lookup_symbol(&self, ctx: &TaskContext, symbol: &str) -> Result<Resolution> {
        info!("Attempting {} lookup for symbol: {}", self.primary.source(), symbol);
        match call(ctx, &self.primary, symbol.to_string())? {
            Lookup::Found(quote) => return Ok(Resolution::Quote(quote)),
            Lookup::Missing(reason) => info!(
                "{} has no data ({}). Falling back to {} for symbol: {}",
                self.primary.source(),
                reason,
                self.secondary.source(),
                symbol
            ),
        }

        let coin_id = symbols::normalize(symbol);
        match call(ctx, &self.secondary, coin_id)? {
            Lookup::Found(quote) => Ok(Resolution::Quote(quote)),
            Lookup::Missing(reason) => {
                info!("{} has no data either: {}", self.secondary.source(), reason);
                Ok(Resolution::Message(format!(
                    "Could not find market data for {} on {} or {}. Please ensure the symbol is correct or use a contract address for DEX listings.",
                    symbol,
                    self.primary.source().display_name(),
                    self.secondary.source().display_name()
                )))
            }
        }
    }
}

/// Runs one provider call under the task context.
fn call(ctx: &TaskContext, provider: &Arc<dyn QuoteProvider>, target: String) -> Result<Lookup> {
    let provider = Arc::clone(provider);
    let source = provider.source();
    ctx.run(move || provider.lookup(&target)).inspect_err(|e| {
        error!("{} lookup failed: {}", source, e);
    })
}
