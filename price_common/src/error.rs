//! Error types shared between the common crate and the agent.
//!
//! The `PriceError` enum unifies the failure cases of a single price lookup:
//! talking to a provider, decoding its body, configuration problems and host
//! cancellation. "Symbol not found" is deliberately absent: providers report it
//! as a regular lookup outcome so the dispatcher can fall back.
use std::io;

use thiserror::Error;

use crate::quote::Source;

/// Unified error type shared by the common crate and the agent.
#[derive(Error, Debug)]
pub enum PriceError {
    /// DNS, connect, TLS or timeout failure while calling a provider.
    #[error("Error contacting {provider} API: {source}")]
    Transport {
        /// Provider that was being called.
        provider: Source,
        /// Underlying HTTP client error.
        #[source]
        source: reqwest::Error,
    },

    /// The provider answered, but the body did not match the expected JSON shape.
    #[error("Error processing {provider} API response: {source}")]
    Decode {
        /// Provider whose response could not be decoded.
        provider: Source,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// HTTP client construction failure.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// The host cancelled the task before the provider answered.
    #[error("Task cancelled")]
    Cancelled,

    /// Invalid configuration value.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error originating from the standard library (stdin/stdout of the local host).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A provider worker thread ended without handing back a result.
    #[error("Provider worker failed: {0}")]
    Worker(String),

    /// The local host could not set up its runtime (signal handler and the like).
    #[error("Host setup error: {0}")]
    Host(String),

    /// Failure while encoding/decoding JSON outside of a provider call.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),
}

impl PriceError {
    /// Short message suitable for showing to the person who sent the command.
    ///
    /// The error itself still carries the detailed cause for logs.
    pub fn user_message(&self) -> String {
        match self {
            PriceError::Transport { provider, .. } => {
                format!("Error contacting {} API.", provider.display_name())
            }
            PriceError::Decode { provider, .. } => {
                format!("Error processing {} API response.", provider.display_name())
            }
            PriceError::Cancelled => String::from("The request was cancelled."),
            _ => String::from("Error fetching market data."),
        }
    }

    /// Returns `true` for failures raised while talking to a provider.
    pub fn is_provider_failure(&self) -> bool {
        matches!(self, PriceError::Transport { .. } | PriceError::Decode { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_error() -> serde_json::Error {
        serde_json::from_str::<serde_json::Value>("{not json").unwrap_err()
    }

    #[test]
    fn decode_error_names_the_provider() {
        let err = PriceError::Decode {
            provider: Source::CoinGecko,
            source: decode_error(),
        };
        assert_eq!(err.user_message(), "Error processing CoinGecko API response.");
        assert!(err.is_provider_failure());
        assert!(err.to_string().starts_with("Error processing CoinGecko API response:"));
    }

    #[test]
    fn local_errors_use_generic_message() {
        let err = PriceError::Config("bad timeout".into());
        assert_eq!(err.user_message(), "Error fetching market data.");
        assert!(!err.is_provider_failure());
        assert!(!PriceError::Worker("gone".into()).is_provider_failure());
        assert_eq!(PriceError::Cancelled.user_message(), "The request was cancelled.");
    }
}
