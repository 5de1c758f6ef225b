//! Text command accepted by the bot.
//!
//! A command is one input line with two whitespace separated tokens: a verb
//! (`/price`, `/market`, or the bare `price`, `market`) and a lookup target.
//! The target is either a ticker / coin id or an EVM contract address.
use strum_macros::{Display, EnumString};
use thiserror::Error;

/// Minimum length of an input treated as a contract address (`0x` + hex).
pub const CONTRACT_ADDRESS_MIN_LEN: usize = 40;

/// Supported command verbs. Both verbs run the same lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Verb {
    /// `/price <target>`
    Price,
    /// `/market <target>`
    Market,
}

/// What a command asks to look up, decided by the target's shape alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// EVM contract address, lowercased. Routed to the on-chain provider.
    Contract(String),
    /// Ticker or coin id exactly as typed. Routed to the centralized providers.
    Symbol(String),
}

/// Reasons a line could not be turned into a `Command`.
///
/// These are user mistakes, not faults: `Display` yields the guidance text
/// that is sent back as a normal reply.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Fewer than two tokens.
    #[error("Please specify a command (/price or /market) and a token symbol or contract address.")]
    Missing,
    /// First token is not a known verb. Holds the lowercased token.
    #[error("Unknown command: {0}. Use /price or /market.")]
    Unknown(String),
}

/// One parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Requested verb.
    pub verb: Verb,
    /// Lookup target as typed (second token).
    pub target: String,
}

impl Command {
    /// Parses a raw input line. Tokens beyond the second are ignored.
    pub fn parse(input: &str) -> Result<Self, CommandError> {
        let mut parts = input.split_whitespace();
        let (Some(verb), Some(target)) = (parts.next(), parts.next()) else {
            return Err(CommandError::Missing);
        };

        let lowered = verb.to_lowercase();
        let verb = lowered
            .strip_prefix('/')
            .unwrap_or(&lowered)
            .parse::<Verb>()
            .map_err(|_| CommandError::Unknown(lowered.clone()))?;

        Ok(Command {
            verb,
            target: target.to_string(),
        })
    }

    /// Classifies the target: contract address or symbol.
    pub fn target(&self) -> Target {
        let clean = self.target.trim().to_lowercase();
        if is_contract_address(&clean) {
            Target::Contract(clean)
        } else {
            Target::Symbol(self.target.clone())
        }
    }
}

/// `true` when `input` looks like a contract address: `0x` prefix, 40+ characters.
pub fn is_contract_address(input: &str) -> bool {
    input.starts_with("0x") && input.len() >= CONTRACT_ADDRESS_MIN_LEN
}
