//!
//! Common types and utilities for the price lookup agent.
//!
//! This crate is free of network I/O and aggregates:
//! - `error` — unified error type `PriceError`.
//! - `result` — handy `Result<T, PriceError>` alias.
//! - `command` — parsing of `/price` and `/market` command lines.
//! - `symbols` — ticker to canonical coin id normalizer.
//! - `quote` — typed `Quote` record and `Source` provider tag.
//! - `numbers` — currency, quantity and percent formatting.
//! - `summary` — display-ready `Summary` and its delimited text form.
//! - `report` — rendering of the market overview message.
//! - `net` — provider endpoints and HTTP defaults.
#![warn(missing_docs)]
pub mod command;
pub mod error;
pub mod net;
pub mod numbers;
pub mod quote;
pub mod report;
pub mod result;
pub mod summary;
pub mod symbols;

pub use command::Command;
pub use error::PriceError;
pub use quote::{Quote, Source};
pub use result::Result;
pub use summary::Summary;
