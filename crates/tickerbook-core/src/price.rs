//! Fixed-point limit prices.
//!
//! Prices are integer ticks of `0.01`, so `Price::from_ticks(5_000)` is
//! `50.00`. Comparisons and arithmetic never touch floating point.

use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;

/// Number of ticks per whole currency unit.
pub const TICKS_PER_UNIT: u64 = 100;

const FRACTION_DIGITS: usize = 2;

/// A limit price in ticks of `0.01`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(u64);

impl Price {
    pub const fn from_ticks(ticks: u64) -> Self {
        Price(ticks)
    }

    /// Whole units, e.g. `Price::from_units(51)` is `51.00`.
    ///
    /// Saturates instead of overflowing.
    pub const fn from_units(units: u64) -> Self {
        Price(units.saturating_mul(TICKS_PER_UNIT))
    }

    pub const fn ticks(self) -> u64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:02}",
            self.0 / TICKS_PER_UNIT,
            self.0 % TICKS_PER_UNIT
        )
    }
}

impl FromStr for Price {
    type Err = EngineError;

    /// Parse a decimal price such as `"50"`, `"50.5"` or `"50.00"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidOrder(format!("malformed price {s:?}"));

        let s = s.trim();
        let (whole, fraction) = match s.split_once('.') {
            Some((w, f)) => (w, f),
            None => (s, ""),
        };

        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        if fraction.len() > FRACTION_DIGITS || !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        if s.ends_with('.') {
            return Err(invalid());
        }

        let whole: u64 = whole.parse().map_err(|_| invalid())?;

        // Right-pad so "5" after the point means fifty ticks.
        let mut fraction_ticks = 0u64;
        for i in 0..FRACTION_DIGITS {
            let digit = fraction.as_bytes().get(i).map_or(0, |b| u64::from(b - b'0'));
            fraction_ticks = fraction_ticks * 10 + digit;
        }

        whole
            .checked_mul(TICKS_PER_UNIT)
            .and_then(|t| t.checked_add(fraction_ticks))
            .map(Price)
            .ok_or_else(invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_whole_and_fractional_prices() {
        assert_eq!("50".parse::<Price>().unwrap(), Price::from_ticks(5_000));
        assert_eq!("50.5".parse::<Price>().unwrap(), Price::from_ticks(5_050));
        assert_eq!("51.00".parse::<Price>().unwrap(), Price::from_units(51));
        assert_eq!(" 0.07 ".parse::<Price>().unwrap(), Price::from_ticks(7));
    }

    #[test]
    fn rejects_malformed_prices() {
        for bad in ["", ".5", "5.", "-1", "1.234", "abc", "1,00", "99999999999999999999"] {
            assert!(
                matches!(bad.parse::<Price>(), Err(EngineError::InvalidOrder(_))),
                "{bad:?} should not parse"
            );
        }
    }

    #[test]
    fn displays_two_decimals() {
        assert_eq!(Price::from_ticks(5_000).to_string(), "50.00");
        assert_eq!(Price::from_ticks(7).to_string(), "0.07");
        assert_eq!(Price::from_ticks(12_345).to_string(), "123.45");
    }
}
