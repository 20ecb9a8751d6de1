//! Fixed symbol table.
//!
//! Tickers are assigned slot indices once, at engine construction, and the
//! table is read-only afterwards. Lookup goes through a precomputed array of
//! slot indices sorted by ticker (binary search); there is no hash map.

use crate::config::ConfigError;
use crate::error::{Capacity, EngineError};

/// Hard upper bound on the number of tickers an engine can carry.
pub const MAX_SYMBOLS: usize = 1024;

/// Slot index of a ticker; also the index of its order book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SymbolIndex(pub u16);

impl SymbolIndex {
    pub fn index(self) -> usize {
        usize::from(self.0)
    }
}

#[derive(Debug, Clone)]
pub struct SymbolTable {
    /// Slot -> ticker, in setup order.
    tickers: Vec<String>,

    /// Slots sorted by ticker, for binary search.
    by_ticker: Vec<SymbolIndex>,
}

impl SymbolTable {
    /// Build a table holding at most `capacity` tickers.
    ///
    /// Duplicate tickers resolve to the slot of their first occurrence.
    /// Surrounding whitespace is ignored; empty tickers are rejected.
    pub fn new<I, S>(capacity: usize, tickers: I) -> Result<Self, EngineError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let limit = capacity.min(MAX_SYMBOLS);
        let mut table = SymbolTable {
            tickers: Vec::with_capacity(limit),
            by_ticker: Vec::with_capacity(limit),
        };

        for raw in tickers {
            let ticker = raw.as_ref().trim();
            if ticker.is_empty() {
                return Err(ConfigError::EmptyTicker.into());
            }

            let pos = match table.search(ticker) {
                Ok(_) => continue,
                Err(pos) => pos,
            };

            if table.tickers.len() >= limit {
                return Err(EngineError::CapacityExceeded(Capacity::SymbolTable { limit }));
            }

            // `limit` <= MAX_SYMBOLS, so the slot always fits in a u16.
            let slot = SymbolIndex(table.tickers.len() as u16);
            table.tickers.push(ticker.to_string());
            table.by_ticker.insert(pos, slot);
        }

        Ok(table)
    }

    /// Resolve a ticker to its slot.
    pub fn resolve(&self, ticker: &str) -> Option<SymbolIndex> {
        self.search(ticker).ok().map(|pos| self.by_ticker[pos])
    }

    /// Like [`resolve`](Self::resolve), but with the engine's error type.
    pub fn lookup(&self, ticker: &str) -> Result<SymbolIndex, EngineError> {
        self.resolve(ticker)
            .ok_or_else(|| EngineError::UnknownTicker(ticker.to_string()))
    }

    /// Ticker stored in `slot`.
    pub fn ticker(&self, slot: SymbolIndex) -> Option<&str> {
        self.tickers.get(slot.index()).map(String::as_str)
    }

    /// Walk the table in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (SymbolIndex, &str)> + '_ {
        self.tickers
            .iter()
            .enumerate()
            .map(|(i, t)| (SymbolIndex(i as u16), t.as_str()))
    }

    pub fn len(&self) -> usize {
        self.tickers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickers.is_empty()
    }

    fn search(&self, ticker: &str) -> Result<usize, usize> {
        self.by_ticker
            .binary_search_by(|slot| self.tickers[slot.index()].as_str().cmp(ticker))
    }
}
