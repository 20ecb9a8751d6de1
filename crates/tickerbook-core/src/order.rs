//! Order representation used inside the order book.
//!
//! An `Order` is owned by its book slot for its whole life. Everything else
//! (execution records, cancel requests) refers to it through its [`OrderId`].

use std::fmt;

use crate::price::Price;
use crate::side::Side;
use crate::symbol_table::SymbolIndex;

/// Engine-wide unique, monotonically increasing order identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OrderId(pub u64);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of an order.
///
/// Only `Active` and `PartiallyFilled` orders ever occupy a book slot.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OrderStatus {
    Active,
    PartiallyFilled,
    Filled,
    Cancelled,
}

impl OrderStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Filled | OrderStatus::Cancelled)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Active => "ACTIVE",
            OrderStatus::PartiallyFilled => "PARTIALLY_FILLED",
            OrderStatus::Filled => "FILLED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }
}

/// A single resting limit order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    // Identification
    pub id: OrderId,
    pub symbol: SymbolIndex,
    pub side: Side,

    // Order details
    pub price: Price,
    pub quantity: u64,      // original quantity
    pub remaining_qty: u64, // remaining unfilled quantity

    // Time priority within the symbol's book
    pub sequence: u64,

    pub status: OrderStatus,
}

impl Order {
    /// Build a freshly admitted order.
    pub fn new(
        id: OrderId,
        symbol: SymbolIndex,
        side: Side,
        price: Price,
        quantity: u64,
        sequence: u64,
    ) -> Self {
        Order {
            id,
            symbol,
            side,
            price,
            quantity,
            remaining_qty: quantity,
            sequence,
            status: OrderStatus::Active,
        }
    }

    /// Returns `true` if the order is fully filled.
    pub fn is_filled(&self) -> bool {
        self.remaining_qty == 0
    }

    /// Quantity executed so far.
    pub fn filled_qty(&self) -> u64 {
        self.quantity - self.remaining_qty
    }

    /// Fill the order by up to `qty` units and advance its status.
    ///
    /// Returns the quantity that was actually filled (which will be
    /// `<= qty` and `<= remaining_qty`).
    pub fn fill(&mut self, qty: u64) -> u64 {
        let filled = qty.min(self.remaining_qty);
        self.remaining_qty -= filled;
        self.status = if self.remaining_qty == 0 {
            OrderStatus::Filled
        } else {
            OrderStatus::PartiallyFilled
        };
        filled
    }

    /// Price-time priority: `true` if `self` should trade before `other`
    /// on the same side. Equal price and sequence is never "better", so a
    /// scan keeps the lowest slot index on an exact tie.
    pub fn has_priority_over(&self, other: &Order) -> bool {
        let better_price = match self.side {
            Side::Buy => self.price > other.price,
            Side::Sell => self.price < other.price,
        };
        better_price || (self.price == other.price && self.sequence < other.sequence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(side: Side, price: u64, qty: u64, seq: u64) -> Order {
        Order::new(OrderId(seq), SymbolIndex(0), side, Price::from_units(price), qty, seq)
    }

    #[test]
    fn fill_moves_through_statuses() {
        let mut o = order(Side::Buy, 10, 100, 1);
        assert_eq!(o.status, OrderStatus::Active);

        assert_eq!(o.fill(40), 40);
        assert_eq!(o.status, OrderStatus::PartiallyFilled);
        assert_eq!(o.remaining_qty, 60);
        assert_eq!(o.filled_qty(), 40);

        assert_eq!(o.fill(100), 60);
        assert_eq!(o.status, OrderStatus::Filled);
        assert!(o.is_filled());
        assert!(o.status.is_terminal());
    }

    #[test]
    fn priority_prefers_price_then_sequence() {
        let low_buy = order(Side::Buy, 10, 1, 1);
        let high_buy = order(Side::Buy, 12, 1, 2);
        assert!(high_buy.has_priority_over(&low_buy));
        assert!(!low_buy.has_priority_over(&high_buy));

        let cheap_sell = order(Side::Sell, 10, 1, 2);
        let dear_sell = order(Side::Sell, 12, 1, 1);
        assert!(cheap_sell.has_priority_over(&dear_sell));

        let early = order(Side::Buy, 10, 1, 1);
        let late = order(Side::Buy, 10, 1, 2);
        assert!(early.has_priority_over(&late));
        assert!(!late.has_priority_over(&early));
        assert!(!early.has_priority_over(&early.clone()));
    }
}
