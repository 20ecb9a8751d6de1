//! Single-symbol order book with price-time priority.
//!
//! - One instance per symbol, owned by the engine behind that symbol's lock.
//! - Each side is a fixed-capacity array kept in insertion order. It is never
//!   sorted: insertion is O(1), and the best order is found by a full linear
//!   scan at match time.
//! - Filled and cancelled orders are compacted out immediately (the relative
//!   order of the survivors is preserved), so every occupied slot holds a live
//!   order with quantity left.

use tracing::{debug, warn};

use crate::error::{Capacity, EngineError};
use crate::execution::{ExecutionRecord, ExecutionRecorder, Fill};
use crate::order::{Order, OrderId, OrderStatus};
use crate::price::Price;
use crate::side::Side;
use crate::snapshot::BookSnapshot;
use crate::symbol_table::SymbolIndex;

/// One side of a book: live orders in insertion order.
#[derive(Debug)]
pub struct BookSide {
    orders: Vec<Order>,
    capacity: usize,
}

impl BookSide {
    fn new(capacity: usize) -> Self {
        // Capacity is enforced on insert, not preallocated.
        BookSide {
            orders: Vec::new(),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.orders.len() >= self.capacity
    }

    /// Orders in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Order> + '_ {
        self.orders.iter()
    }

    /// Slot of the order with the best price-time priority.
    ///
    /// Full linear scan. On an exact (price, sequence) tie the lowest slot
    /// wins, since a later slot never has strict priority.
    fn best_slot(&self) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (slot, order) in self.orders.iter().enumerate() {
            match best {
                Some(b) if !order.has_priority_over(&self.orders[b]) => {}
                _ => best = Some(slot),
            }
        }
        best
    }

    fn slot_of(&self, id: OrderId) -> Option<usize> {
        self.orders.iter().position(|o| o.id == id)
    }

    fn push(&mut self, order: Order) {
        debug_assert!(!self.is_full());
        self.orders.push(order);
    }

    /// Remove the order at `slot`, shifting later slots down by one.
    fn take(&mut self, slot: usize) -> Order {
        self.orders.remove(slot)
    }
}

/// Single-symbol order book.
#[derive(Debug)]
pub struct OrderBook {
    symbol: SymbolIndex,
    ticker: String,

    bids: BookSide,
    asks: BookSide,

    /// Next admission sequence number. Only touched under the book's lock,
    /// so sequence order is exactly insert serialization order.
    next_sequence: u64,
}

impl OrderBook {
    /// Create an empty book whose sides each hold up to `capacity` orders.
    pub fn new(symbol: SymbolIndex, ticker: impl Into<String>, capacity: usize) -> Self {
        OrderBook {
            symbol,
            ticker: ticker.into(),
            bids: BookSide::new(capacity),
            asks: BookSide::new(capacity),
            next_sequence: 1,
        }
    }

    pub fn symbol(&self) -> SymbolIndex {
        self.symbol
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn side(&self, side: Side) -> &BookSide {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut BookSide {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }

    /// Admit a new limit order at the tail of its side.
    ///
    /// `alloc_id` is called only once the order is known to fit, so a
    /// rejected order consumes neither an id nor a sequence number.
    pub fn insert<F>(
        &mut self,
        side: Side,
        price: Price,
        quantity: u64,
        alloc_id: F,
    ) -> Result<OrderId, EngineError>
    where
        F: FnOnce() -> OrderId,
    {
        validate(price, quantity)?;

        let book_side = self.side(side);
        if book_side.is_full() {
            let limit = book_side.capacity;
            warn!(ticker = %self.ticker, %side, limit, "book side full, rejecting order");
            return Err(EngineError::CapacityExceeded(Capacity::BookSide {
                ticker: self.ticker.clone(),
                side,
                limit,
            }));
        }

        let id = alloc_id();
        let symbol = self.symbol;
        let sequence = self.next_sequence;
        self.next_sequence += 1;

        self.side_mut(side)
            .push(Order::new(id, symbol, side, price, quantity, sequence));

        debug!(ticker = %self.ticker, order_id = id.0, %side, %price, quantity, sequence, "order admitted");
        Ok(id)
    }

    /// Cancel a resting order, returning it with status `Cancelled`.
    ///
    /// Returns `None` if the id is not resting in this book (unknown, or
    /// already filled / cancelled).
    pub fn cancel(&mut self, id: OrderId) -> Option<Order> {
        for side in [Side::Buy, Side::Sell] {
            let book_side = self.side_mut(side);
            if let Some(slot) = book_side.slot_of(id) {
                let mut order = book_side.take(slot);
                order.status = OrderStatus::Cancelled;
                debug!(ticker = %self.ticker, order_id = id.0, remaining = order.remaining_qty, "order cancelled");
                return Some(order);
            }
        }
        None
    }

    /// Look up a resting order by id.
    pub fn get(&self, id: OrderId) -> Option<&Order> {
        self.bids
            .iter()
            .chain(self.asks.iter())
            .find(|o| o.id == id)
    }

    /// Run one matching pass: trade the best buy against the best sell until
    /// one side is empty or the best prices no longer cross.
    ///
    /// Trades execute at the sell order's limit price for
    /// `min(buy.remaining, sell.remaining)`. Each trade is appended to
    /// `recorder` before the next best pair is chosen.
    pub fn match_orders(&mut self, recorder: &ExecutionRecorder) -> Vec<ExecutionRecord> {
        let mut executions = Vec::new();

        loop {
            let (buy_slot, sell_slot) = match (self.bids.best_slot(), self.asks.best_slot()) {
                (Some(b), Some(s)) => (b, s),
                _ => break,
            };

            let buy = &self.bids.orders[buy_slot];
            let sell = &self.asks.orders[sell_slot];
            if buy.price < sell.price {
                break;
            }

            let price = sell.price;
            let quantity = buy.remaining_qty.min(sell.remaining_qty);

            let buy_order_id = buy.id;
            let sell_order_id = sell.id;
            self.bids.orders[buy_slot].fill(quantity);
            self.asks.orders[sell_slot].fill(quantity);

            let record = recorder.record(Fill {
                symbol: self.symbol,
                ticker: self.ticker.clone(),
                buy_order_id,
                sell_order_id,
                price,
                quantity,
            });
            debug!(
                ticker = %self.ticker,
                sequence = record.sequence,
                buy = buy_order_id.0,
                sell = sell_order_id.0,
                %price,
                quantity,
                "execution"
            );
            executions.push(record);

            if self.bids.orders[buy_slot].is_filled() {
                self.bids.take(buy_slot);
            }
            if self.asks.orders[sell_slot].is_filled() {
                self.asks.take(sell_slot);
            }
        }

        executions
    }

    /// Copy of both sides in price-time priority order (best first).
    pub fn snapshot(&self) -> BookSnapshot {
        let mut bids: Vec<Order> = self.bids.iter().cloned().collect();
        let mut asks: Vec<Order> = self.asks.iter().cloned().collect();

        // Stable sorts, so exact ties stay in slot order like the matcher.
        bids.sort_by(|a, b| b.price.cmp(&a.price).then(a.sequence.cmp(&b.sequence)));
        asks.sort_by(|a, b| a.price.cmp(&b.price).then(a.sequence.cmp(&b.sequence)));

        BookSnapshot {
            symbol: self.symbol,
            ticker: self.ticker.clone(),
            bids,
            asks,
        }
    }
}

fn validate(price: Price, quantity: u64) -> Result<(), EngineError> {
    if price.is_zero() {
        return Err(EngineError::InvalidOrder("price must be positive".to_string()));
    }
    if quantity == 0 {
        return Err(EngineError::InvalidOrder("quantity must be positive".to_string()));
    }
    Ok(())
}
