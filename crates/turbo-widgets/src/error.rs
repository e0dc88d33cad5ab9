//! Widget error types.

use thiserror::Error;
use turbo_data::FetchError;

/// Errors raised while configuring widgets or talking to the storefront backend.
///
/// Interactive operations never return these: out-of-range input is clamped
/// and missing markup disables a widget instead.
#[derive(Error, Debug)]
pub enum WidgetError {
    /// Configuration file could not be read.
    #[error("Failed to read config file {path}: {message}")]
    ConfigRead { path: String, message: String },

    /// Configuration could not be parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Breakpoint table is empty, unsorted, or has a zero tier.
    #[error("Invalid breakpoint table: {0}")]
    InvalidBreakpoints(String),

    /// Category id not present in the menu.
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// Category id registered twice.
    #[error("Duplicate category: {0}")]
    DuplicateCategory(String),

    /// Outbound request failed.
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Backend replied with something other than the expected JSON shape.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl From<toml::de::Error> for WidgetError {
    fn from(e: toml::de::Error) -> Self {
        WidgetError::Config(e.to_string())
    }
}

impl From<serde_json::Error> for WidgetError {
    fn from(e: serde_json::Error) -> Self {
        WidgetError::Config(e.to_string())
    }
}
