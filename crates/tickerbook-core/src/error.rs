//! Error types for the matching core.
//!
//! Every error is local and recoverable: it is returned to the caller and
//! never leaves a book half-mutated.

use std::fmt;

use thiserror::Error;

use crate::config::ConfigError;
use crate::order::OrderId;
use crate::side::Side;

/// Which fixed capacity was hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Capacity {
    /// The symbol table is full.
    SymbolTable { limit: usize },

    /// One side of one symbol's book is full.
    BookSide {
        ticker: String,
        side: Side,
        limit: usize,
    },
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capacity::SymbolTable { limit } => write!(f, "symbol table holds at most {limit} tickers"),
            Capacity::BookSide { ticker, side, limit } => {
                write!(f, "{ticker} {side} side holds at most {limit} orders")
            }
        }
    }
}

/// Error type for the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The ticker is not in the symbol table.
    #[error("unknown ticker: {0}")]
    UnknownTicker(String),

    /// A book side or the symbol table is full.
    #[error("capacity exceeded: {0}")]
    CapacityExceeded(Capacity),

    /// Zero price or quantity, or a malformed price.
    #[error("invalid order: {0}")]
    InvalidOrder(String),

    /// Cancel or lookup of an order that does not exist or is already terminal.
    #[error("unknown order id: {0}")]
    UnknownOrderId(OrderId),

    /// The engine configuration was rejected at construction.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}
