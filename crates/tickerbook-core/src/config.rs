//! Engine configuration.
//!
//! Capacities are fixed for the life of an engine. They can come from
//! defaults, a TOML document, or a few environment variables:
//!
//! - `TICKERBOOK_MAX_SYMBOLS`          (default: 1024)
//! - `TICKERBOOK_MAX_ORDERS_PER_SIDE`  (default: 4096)
//! - `TICKERBOOK_TICKERS`              (comma separated, default: none)

use std::env;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

use crate::symbol_table::MAX_SYMBOLS;

pub const DEFAULT_MAX_ORDERS_PER_SIDE: usize = 4096;

const ENV_MAX_SYMBOLS: &str = "TICKERBOOK_MAX_SYMBOLS";
const ENV_MAX_ORDERS_PER_SIDE: &str = "TICKERBOOK_MAX_ORDERS_PER_SIDE";
const ENV_TICKERS: &str = "TICKERBOOK_TICKERS";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("malformed TOML: {0}")]
    Toml(String),

    #[error("environment variable {key} has unparsable value {value:?}")]
    Env { key: &'static str, value: String },

    #[error("max_symbols must be between 1 and 1024, got {0}")]
    MaxSymbols(usize),

    #[error("max_orders_per_side must be at least 1")]
    MaxOrdersPerSide,

    #[error("ticker must not be empty")]
    EmptyTicker,
}

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Capacity of the symbol table (at most 1,024).
    pub max_symbols: usize,

    /// Capacity of each side of each symbol's book.
    pub max_orders_per_side: usize,

    /// Tickers loaded into the symbol table, in slot order.
    pub tickers: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            max_symbols: MAX_SYMBOLS,
            max_orders_per_side: DEFAULT_MAX_ORDERS_PER_SIDE,
            tickers: Vec::new(),
        }
    }
}

impl EngineConfig {
    /// Defaults with the given tickers.
    pub fn with_tickers<I, S>(tickers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        EngineConfig {
            tickers: tickers.into_iter().map(Into::into).collect(),
            ..EngineConfig::default()
        }
    }

    /// Parse a TOML document; missing keys take their defaults.
    ///
    /// ```toml
    /// max_symbols = 16
    /// max_orders_per_side = 256
    /// tickers = ["AAPL", "MSFT"]
    /// ```
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(s).map_err(|e| ConfigError::Toml(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Construct from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = EngineConfig::default();
        let max_symbols = read_or_default(&lookup, ENV_MAX_SYMBOLS, defaults.max_symbols)?;
        let max_orders_per_side =
            read_or_default(&lookup, ENV_MAX_ORDERS_PER_SIDE, defaults.max_orders_per_side)?;
        let tickers = match lookup(ENV_TICKERS) {
            Some(list) => list
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect(),
            None => defaults.tickers,
        };

        let config = EngineConfig {
            max_symbols,
            max_orders_per_side,
            tickers,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check capacity bounds. Ticker count vs `max_symbols` is checked when
    /// the symbol table is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_symbols == 0 || self.max_symbols > MAX_SYMBOLS {
            return Err(ConfigError::MaxSymbols(self.max_symbols));
        }
        if self.max_orders_per_side == 0 {
            return Err(ConfigError::MaxOrdersPerSide);
        }
        if self.tickers.iter().any(|t| t.trim().is_empty()) {
            return Err(ConfigError::EmptyTicker);
        }
        Ok(())
    }
}

fn read_or_default<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::Env { key, value }),
        None => Ok(default),
    }
}
