//! Result type alias shared across the workspace.
//!
//! Defaults the error type to `PriceError`, so functions can simply return `Result<T>`.
use crate::error::PriceError;

/// Workspace-wide `Result` alias with `PriceError` as the default error.
pub type Result<T, E = PriceError> = std::result::Result<T, E>;
