//! tickerbook-core
//!
//! Pure matching logic for a fixed universe of tickers:
//! - symbol table (array-indexed, no hash maps)
//! - per-symbol order books with linear-scan price-time matching
//! - shared append-only execution log
//! - multi-symbol engine with per-symbol locking
//! - messages (input/output types) for script-driven callers

pub mod config;
pub mod error;
pub mod execution;
pub mod matching_engine;
pub mod messages;
pub mod order;
pub mod order_book;
pub mod price;
pub mod side;
pub mod snapshot;
pub mod symbol_table;

pub use config::{ConfigError, EngineConfig};
pub use error::{Capacity, EngineError};
pub use execution::{ExecutionRecord, ExecutionRecorder};
pub use matching_engine::MatchingEngine;

pub use messages::{
    Ack,
    BookEntry,
    Cancel,
    CancelAck,
    ExecutionQuery,
    InputMessage,
    MatchRequest,
    NewOrder,
    OutputMessage,
    Reject,
    SnapshotQuery,
};

pub use order::{Order, OrderId, OrderStatus};
pub use order_book::OrderBook;
pub use price::Price;
pub use side::Side;
pub use snapshot::{BookSnapshot, Level, TopOfBook};
pub use symbol_table::{SymbolIndex, SymbolTable, MAX_SYMBOLS};
