//! Read-only views of a book.
//!
//! A [`BookSnapshot`] is copied out under the symbol's lock, so it always
//! reflects a book between operations, never one half way through a pass.

use crate::order::Order;
use crate::price::Price;
use crate::symbol_table::SymbolIndex;

/// Both sides of one symbol's book, best order first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookSnapshot {
    pub symbol: SymbolIndex,
    pub ticker: String,

    /// Buy orders: highest price first, then earliest admission.
    pub bids: Vec<Order>,

    /// Sell orders: lowest price first, then earliest admission.
    pub asks: Vec<Order>,
}

impl BookSnapshot {
    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }

    pub fn best_bid(&self) -> Option<&Order> {
        self.bids.first()
    }

    pub fn best_ask(&self) -> Option<&Order> {
        self.asks.first()
    }

    /// Summarize the best price level on each side.
    pub fn top_of_book(&self) -> TopOfBook {
        TopOfBook {
            bid: level(&self.bids),
            ask: level(&self.asks),
        }
    }
}

/// Best price and the total quantity resting at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Level {
    pub price: Price,
    pub quantity: u64,
}

/// Best bid and best ask of a book; `None` for an empty side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TopOfBook {
    pub bid: Option<Level>,
    pub ask: Option<Level>,
}

impl TopOfBook {
    /// Returns `true` if there is *no* bid and *no* ask.
    pub fn is_empty(&self) -> bool {
        self.bid.is_none() && self.ask.is_none()
    }

    /// `ask - bid` in ticks, when both sides are present.
    pub fn spread_ticks(&self) -> Option<i128> {
        match (self.bid, self.ask) {
            (Some(b), Some(a)) => Some(i128::from(a.price.ticks()) - i128::from(b.price.ticks())),
            _ => None,
        }
    }
}

/// Sides are priority-ordered, so the best level is a prefix.
/// The total saturates at `u64::MAX`.
fn level(orders: &[Order]) -> Option<Level> {
    let price = orders.first()?.price;
    let quantity = orders
        .iter()
        .take_while(|o| o.price == price)
        .fold(0u64, |acc, o| acc.saturating_add(o.remaining_qty));
    Some(Level { price, quantity })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::OrderId;
    use crate::side::Side;

    fn order(id: u64, side: Side, price: u64, qty: u64) -> Order {
        Order::new(OrderId(id), SymbolIndex(0), side, Price::from_units(price), qty, id)
    }

    fn snapshot(bids: Vec<Order>, asks: Vec<Order>) -> BookSnapshot {
        BookSnapshot {
            symbol: SymbolIndex(0),
            ticker: "AAPL".to_string(),
            bids,
            asks,
        }
    }

    #[test]
    fn level_sums_only_the_best_price() {
        let snap = snapshot(
            vec![
                order(1, Side::Buy, 12, 5),
                order(2, Side::Buy, 12, 7),
                order(3, Side::Buy, 11, 100),
            ],
            vec![order(4, Side::Sell, 13, 2)],
        );
        let top = snap.top_of_book();
        assert_eq!(
            top.bid,
            Some(Level {
                price: Price::from_units(12),
                quantity: 12
            })
        );
        assert_eq!(top.ask.map(|l| l.quantity), Some(2));
        assert_eq!(top.spread_ticks(), Some(100));
    }

    #[test]
    fn level_total_saturates() {
        let snap = snapshot(
            vec![order(1, Side::Buy, 10, u64::MAX), order(2, Side::Buy, 10, 2)],
            Vec::new(),
        );
        let top = snap.top_of_book();
        assert_eq!(top.bid.map(|l| l.quantity), Some(u64::MAX));
        assert_eq!(top.spread_ticks(), None);
    }

    #[test]
    fn empty_book_has_empty_top() {
        let top = snapshot(Vec::new(), Vec::new()).top_of_book();
        assert!(top.is_empty());
        assert_eq!(top, TopOfBook::default());
    }
}
