//! Multi-symbol matching engine.
//!
//! - Owns the symbol table, one [`OrderBook`] per symbol slot and the shared
//!   execution log.
//! - Every book sits behind its own mutex: insert, cancel, match and snapshot
//!   on one symbol are serialized, different symbols run in parallel.
//! - Lock order is always book -> execution log, and no operation holds two
//!   book locks at once.
//!
//! The engine is `Send + Sync`; share it by reference or through an `Arc`.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::execution::{ExecutionRecord, ExecutionRecorder};
use crate::messages::{InputMessage, OutputMessage};
use crate::order::{Order, OrderId};
use crate::order_book::OrderBook;
use crate::price::Price;
use crate::side::Side;
use crate::snapshot::{BookSnapshot, TopOfBook};
use crate::symbol_table::{SymbolIndex, SymbolTable};

#[derive(Debug)]
pub struct MatchingEngine {
    config: EngineConfig,
    symbols: SymbolTable,

    /// Indexed by `SymbolIndex`.
    books: Vec<Mutex<OrderBook>>,

    executions: ExecutionRecorder,

    /// Next order id. Drawn inside the owning book's critical section, so
    /// ids are monotonic per symbol as well as engine-wide unique.
    next_order_id: AtomicU64,
}

impl MatchingEngine {
    /// Build an engine from a validated configuration.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let symbols = SymbolTable::new(config.max_symbols, &config.tickers)?;

        let books = symbols
            .iter()
            .map(|(slot, ticker)| Mutex::new(OrderBook::new(slot, ticker, config.max_orders_per_side)))
            .collect();

        info!(
            symbols = symbols.len(),
            max_symbols = config.max_symbols,
            max_orders_per_side = config.max_orders_per_side,
            "matching engine ready"
        );

        Ok(MatchingEngine {
            config,
            symbols,
            books,
            executions: ExecutionRecorder::new(),
            next_order_id: AtomicU64::new(1),
        })
    }

    /// Engine with default capacities and the given tickers.
    pub fn with_tickers<I, S>(tickers: I) -> Result<Self, EngineError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(EngineConfig::with_tickers(tickers))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    // -------------------------------------------------------------------------
    // Core operations
    // -------------------------------------------------------------------------

    /// Admit a limit order. It rests until a matching pass trades it.
    pub fn submit_order(
        &self,
        ticker: &str,
        side: Side,
        price: Price,
        quantity: u64,
    ) -> Result<OrderId, EngineError> {
        let slot = self.symbols.lookup(ticker)?;
        let mut book = self.book(slot).lock();
        book.insert(side, price, quantity, || {
            OrderId(self.next_order_id.fetch_add(1, Ordering::Relaxed))
        })
    }

    /// Cancel a resting order. `false` if the id is unknown or the order is
    /// already filled or cancelled.
    pub fn cancel_order(&self, order_id: OrderId) -> bool {
        self.try_cancel_order(order_id).is_ok()
    }

    /// Cancel a resting order and return it (status `Cancelled`).
    ///
    /// Whether a cancel or a matching pass gets an order is decided by which
    /// of them takes the symbol's lock first; a pass never releases the lock
    /// with a trade half applied.
    pub fn try_cancel_order(&self, order_id: OrderId) -> Result<Order, EngineError> {
        if !self.was_issued(order_id) {
            return Err(EngineError::UnknownOrderId(order_id));
        }

        self.books
            .iter()
            .find_map(|book| book.lock().cancel(order_id))
            .ok_or(EngineError::UnknownOrderId(order_id))
    }

    /// Look up a resting order by id.
    pub fn order(&self, order_id: OrderId) -> Result<Order, EngineError> {
        if !self.was_issued(order_id) {
            return Err(EngineError::UnknownOrderId(order_id));
        }

        self.books
            .iter()
            .find_map(|book| book.lock().get(order_id).cloned())
            .ok_or(EngineError::UnknownOrderId(order_id))
    }

    /// Match one symbol until no crossing pair remains.
    ///
    /// The symbol's lock is held for the whole pass: orders submitted
    /// meanwhile wait for the next pass.
    pub fn run_matching_pass(&self, ticker: &str) -> Result<Vec<ExecutionRecord>, EngineError> {
        let slot = self.symbols.lookup(ticker)?;
        Ok(self.match_slot(slot))
    }

    /// Match every symbol, in slot order.
    pub fn run_matching_pass_all(&self) -> Vec<ExecutionRecord> {
        let executions: Vec<ExecutionRecord> = self
            .symbols
            .iter()
            .flat_map(|(slot, _)| self.match_slot(slot))
            .collect();

        if !executions.is_empty() {
            info!(executions = executions.len(), "matching pass over all symbols");
        }
        executions
    }

    /// Resting orders of one symbol, best first on each side.
    pub fn snapshot(&self, ticker: &str) -> Result<BookSnapshot, EngineError> {
        let slot = self.symbols.lookup(ticker)?;
        let snapshot = self.book(slot).lock().snapshot();
        Ok(snapshot)
    }

    pub fn top_of_book(&self, ticker: &str) -> Result<TopOfBook, EngineError> {
        Ok(self.snapshot(ticker)?.top_of_book())
    }

    /// Executions with a sequence number strictly greater than `since`.
    pub fn list_executions(&self, since: u64) -> Vec<ExecutionRecord> {
        self.executions.since(since)
    }

    /// Sequence number of the latest execution (0 before the first trade).
    pub fn last_execution_sequence(&self) -> u64 {
        self.executions.last_sequence()
    }

    // -------------------------------------------------------------------------
    // Message facade
    // -------------------------------------------------------------------------

    /// Process a single input message and return the resulting events.
    ///
    /// Failures become a single `Reject`; they never escape as panics or
    /// partial output.
    pub fn process_message(&self, msg: InputMessage) -> Vec<OutputMessage> {
        match msg {
            InputMessage::NewOrder(new) => {
                match self.submit_order(&new.ticker, new.side, new.price, new.quantity) {
                    Ok(order_id) => vec![OutputMessage::ack(order_id, new.ticker)],
                    Err(err) => vec![OutputMessage::reject(err)],
                }
            }
            InputMessage::Cancel(cancel) => {
                let cancelled = self.cancel_order(cancel.order_id);
                vec![OutputMessage::cancel_ack(cancel.order_id, cancelled)]
            }
            InputMessage::Match(req) => {
                let executions = match req.ticker {
                    Some(ticker) => match self.run_matching_pass(&ticker) {
                        Ok(executions) => executions,
                        Err(err) => return vec![OutputMessage::reject(err)],
                    },
                    None => self.run_matching_pass_all(),
                };
                executions.into_iter().map(OutputMessage::Execution).collect()
            }
            InputMessage::Snapshot(query) => match self.snapshot(&query.ticker) {
                Ok(snapshot) => {
                    let BookSnapshot { ticker, bids, asks, .. } = snapshot;
                    bids.into_iter()
                        .chain(asks)
                        .map(|order| OutputMessage::book_entry(ticker.as_str(), order))
                        .collect()
                }
                Err(err) => vec![OutputMessage::reject(err)],
            },
            InputMessage::ListExecutions(query) => self
                .list_executions(query.since)
                .into_iter()
                .map(OutputMessage::Execution)
                .collect(),
        }
    }

    // -------------------------------------------------------------------------
    // Helpers
    // -------------------------------------------------------------------------

    fn book(&self, slot: SymbolIndex) -> &Mutex<OrderBook> {
        // Slots come from our own symbol table, which has one book per slot.
        &self.books[slot.index()]
    }

    fn match_slot(&self, slot: SymbolIndex) -> Vec<ExecutionRecord> {
        let mut book = self.book(slot).lock();
        let executions = book.match_orders(&self.executions);
        if !executions.is_empty() {
            debug!(ticker = %book.ticker(), executions = executions.len(), "matching pass");
        }
        executions
    }

    /// Ids are handed out from 1 upwards; anything outside that range can
    /// be rejected without scanning the books.
    fn was_issued(&self, order_id: OrderId) -> bool {
        order_id.0 != 0 && order_id.0 < self.next_order_id.load(Ordering::Acquire)
    }
}
