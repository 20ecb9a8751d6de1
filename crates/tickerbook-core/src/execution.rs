//! Execution recorder: the append-only trade log shared by all symbols.
//!
//! Records are numbered from 1 with no gaps, so the record with sequence
//! `n` always lives at index `n - 1`.

use parking_lot::Mutex;

use crate::order::OrderId;
use crate::price::Price;
use crate::symbol_table::SymbolIndex;

/// A trade between one buy order and one sell order. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionRecord {
    /// Position in the engine-wide execution log (1-based).
    pub sequence: u64,

    pub symbol: SymbolIndex,
    pub ticker: String,

    pub buy_order_id: OrderId,
    pub sell_order_id: OrderId,

    pub price: Price,
    pub quantity: u64,
}

/// A trade that has not been assigned a log sequence yet.
#[derive(Debug, Clone)]
pub struct Fill {
    pub symbol: SymbolIndex,
    pub ticker: String,
    pub buy_order_id: OrderId,
    pub sell_order_id: OrderId,
    pub price: Price,
    pub quantity: u64,
}

#[derive(Debug, Default)]
pub struct ExecutionRecorder {
    records: Mutex<Vec<ExecutionRecord>>,
}

impl ExecutionRecorder {
    pub fn new() -> Self {
        ExecutionRecorder::default()
    }

    /// Append a trade and return the stored record.
    ///
    /// The sequence number is assigned under the log's lock, so concurrent
    /// appends from different symbols never collide or skip.
    pub fn record(&self, fill: Fill) -> ExecutionRecord {
        let mut records = self.records.lock();
        let record = ExecutionRecord {
            sequence: records.len() as u64 + 1,
            symbol: fill.symbol,
            ticker: fill.ticker,
            buy_order_id: fill.buy_order_id,
            sell_order_id: fill.sell_order_id,
            price: fill.price,
            quantity: fill.quantity,
        };
        records.push(record.clone());
        record
    }

    /// Records with a sequence number strictly greater than `sequence`.
    pub fn since(&self, sequence: u64) -> Vec<ExecutionRecord> {
        let records = self.records.lock();
        let start = usize::try_from(sequence).unwrap_or(usize::MAX).min(records.len());
        records[start..].to_vec()
    }

    /// Sequence number of the latest record, or 0 if the log is empty.
    pub fn last_sequence(&self) -> u64 {
        self.records.lock().len() as u64
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
