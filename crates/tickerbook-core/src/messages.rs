//! Message types for the engine's request/response facade.
//!
//! These are **transport-agnostic** logical messages:
//! - [`InputMessage`]: what the engine consumes.
//! - [`OutputMessage`]: what the engine produces.
//!
//! Callers that prefer typed results use the `MatchingEngine` methods
//! directly; this layer exists for script-driven callers that want one
//! stream of events. Encoders live in the `tickerbook-script` crate.

use crate::error::EngineError;
use crate::execution::ExecutionRecord;
use crate::order::{Order, OrderId};
use crate::price::Price;
use crate::side::Side;

/// A request into the matching engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMessage {
    /// Admit a new limit order.
    NewOrder(NewOrder),

    /// Cancel a resting order by id.
    Cancel(Cancel),

    /// Run a matching pass on one symbol, or on every symbol.
    Match(MatchRequest),

    /// List the resting orders of a symbol.
    Snapshot(SnapshotQuery),

    /// List executions recorded after a given sequence number.
    ListExecutions(ExecutionQuery),
}

/// An event emitted by the matching engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMessage {
    /// The order was admitted under `order_id`.
    Ack(Ack),

    /// The request failed; nothing was changed.
    Reject(Reject),

    /// Outcome of a cancel request.
    CancelAck(CancelAck),

    /// A trade, from a matching pass or an execution listing.
    Execution(ExecutionRecord),

    /// One resting order of a snapshot, in priority order per side.
    BookEntry(BookEntry),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    /// Instrument ticker, e.g. `"AAPL"`.
    pub ticker: String,
    pub side: Side,
    pub price: Price,
    pub quantity: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cancel {
    pub order_id: OrderId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRequest {
    /// `None` runs a pass over every symbol in slot order.
    pub ticker: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotQuery {
    pub ticker: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionQuery {
    /// Exclusive lower bound on the execution sequence number.
    pub since: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ack {
    pub order_id: OrderId,
    pub ticker: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reject {
    pub error: EngineError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelAck {
    pub order_id: OrderId,

    /// `false` if the order was unknown or already terminal.
    pub cancelled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookEntry {
    pub ticker: String,
    pub order: Order,
}

// -----------------------------------------------------------------------------
// Convenience constructors
// -----------------------------------------------------------------------------

impl OutputMessage {
    pub fn ack(order_id: OrderId, ticker: impl Into<String>) -> Self {
        OutputMessage::Ack(Ack {
            order_id,
            ticker: ticker.into(),
        })
    }

    pub fn reject(error: EngineError) -> Self {
        OutputMessage::Reject(Reject { error })
    }

    pub fn cancel_ack(order_id: OrderId, cancelled: bool) -> Self {
        OutputMessage::CancelAck(CancelAck {
            order_id,
            cancelled,
        })
    }

    pub fn book_entry(ticker: impl Into<String>, order: Order) -> Self {
        OutputMessage::BookEntry(BookEntry {
            ticker: ticker.into(),
            order,
        })
    }
}
