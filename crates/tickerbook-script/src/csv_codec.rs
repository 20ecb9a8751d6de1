// crates/tickerbook-script/src/csv_codec.rs

//! CSV scenario codec.
//!
//! Input format (lines → `InputMessage`):
//!
//! - New order:
//!   `N, ticker(string), side(char B or S), price(decimal), qty(int)`
//!
//! - Cancel:
//!   `C, orderId(int)`
//!
//! - Matching pass (all symbols, or one):
//!   `M` / `M, ticker(string)`
//!
//! - Snapshot:
//!   `S, ticker(string)`
//!
//! - List executions after a sequence number:
//!   `E, sinceSequence(int)`
//!
//! Output format (`OutputMessage` → line):
//!
//! - Ack:         `A, orderId, ticker`
//! - Reject:      `R, reason`
//! - CancelAck:   `X, orderId, 1|0`
//! - Execution:   `T, sequence, ticker, buyOrderId, sellOrderId, price, quantity`
//! - Book entry:  `O, ticker, side(B/S), orderId, price, remaining, status`
//!
//! Range checks (zero price or quantity) are left to the engine, which
//! answers with a `Reject`.

use std::num::ParseIntError;

use tickerbook_core::{
    Cancel, ExecutionQuery, InputMessage, MatchRequest, NewOrder, OrderId, OutputMessage, Price,
    Side, SnapshotQuery,
};

/// Parse a single CSV line into an `InputMessage`.
///
/// Returns `None` for blank lines, comments (starting with `#`) and
/// malformed lines.
pub fn parse_input_line(line: &str) -> Option<InputMessage> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }

    let tokens = split_and_trim(trimmed, ',');
    if tokens[0].chars().count() != 1 {
        return None;
    }

    match tokens[0].chars().next()? {
        'N' => parse_new_order(&tokens),
        'C' => parse_cancel(&tokens),
        'M' => parse_match(&tokens),
        'S' => parse_snapshot(&tokens),
        'E' => parse_list_executions(&tokens),
        _ => None,
    }
}

fn parse_new_order(tokens: &[&str]) -> Option<InputMessage> {
    // N, ticker, side, price, qty
    if tokens.len() != 5 {
        return None;
    }

    let ticker = parse_ticker(tokens[1])?;

    let mut side_chars = tokens[2].chars();
    let side = Side::from_char(side_chars.next()?)?;
    if side_chars.next().is_some() {
        return None;
    }

    let price = tokens[3].parse::<Price>().ok()?;
    let quantity = parse_u64(tokens[4]).ok()?;

    Some(InputMessage::NewOrder(NewOrder {
        ticker,
        side,
        price,
        quantity,
    }))
}

fn parse_cancel(tokens: &[&str]) -> Option<InputMessage> {
    // C, orderId
    if tokens.len() != 2 {
        return None;
    }

    let order_id = OrderId(parse_u64(tokens[1]).ok()?);
    Some(InputMessage::Cancel(Cancel { order_id }))
}

fn parse_match(tokens: &[&str]) -> Option<InputMessage> {
    // M  |  M, ticker
    let ticker = match tokens.len() {
        1 => None,
        2 => Some(parse_ticker(tokens[1])?),
        _ => return None,
    };
    Some(InputMessage::Match(MatchRequest { ticker }))
}

fn parse_snapshot(tokens: &[&str]) -> Option<InputMessage> {
    // S, ticker
    if tokens.len() != 2 {
        return None;
    }

    let ticker = parse_ticker(tokens[1])?;
    Some(InputMessage::Snapshot(SnapshotQuery { ticker }))
}

fn parse_list_executions(tokens: &[&str]) -> Option<InputMessage> {
    // E, since
    if tokens.len() != 2 {
        return None;
    }

    let since = parse_u64(tokens[1]).ok()?;
    Some(InputMessage::ListExecutions(ExecutionQuery { since }))
}

/// Format an `OutputMessage` as a CSV line.
pub fn format_output(msg: &OutputMessage) -> String {
    match msg {
        OutputMessage::Ack(a) => format!("A, {}, {}", a.order_id, a.ticker),
        OutputMessage::Reject(r) => format!("R, {}", r.error),
        OutputMessage::CancelAck(c) => {
            format!("X, {}, {}", c.order_id, u8::from(c.cancelled))
        }
        OutputMessage::Execution(e) => format!(
            "T, {}, {}, {}, {}, {}, {}",
            e.sequence, e.ticker, e.buy_order_id, e.sell_order_id, e.price, e.quantity
        ),
        OutputMessage::BookEntry(b) => format!(
            "O, {}, {}, {}, {}, {}, {}",
            b.ticker,
            b.order.side.as_char(),
            b.order.id,
            b.order.price,
            b.order.remaining_qty,
            b.order.status.as_str()
        ),
    }
}

// -----------------------------------------------------------------------------
// Helpers
// -----------------------------------------------------------------------------

fn split_and_trim(s: &str, delimiter: char) -> Vec<&str> {
    s.split(delimiter).map(str::trim).collect()
}

fn parse_ticker(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

fn parse_u64(s: &str) -> Result<u64, ParseIntError> {
    s.parse::<u64>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tickerbook_core::{EngineError, ExecutionRecord, Order, SymbolIndex};

    #[test]
    fn parses_every_command() {
        assert_eq!(
            parse_input_line("N, AAPL, B, 50.00, 100"),
            Some(InputMessage::NewOrder(NewOrder {
                ticker: "AAPL".to_string(),
                side: Side::Buy,
                price: Price::from_units(50),
                quantity: 100,
            }))
        );
        assert_eq!(
            parse_input_line("C,7"),
            Some(InputMessage::Cancel(Cancel { order_id: OrderId(7) }))
        );
        assert_eq!(
            parse_input_line("M"),
            Some(InputMessage::Match(MatchRequest { ticker: None }))
        );
        assert_eq!(
            parse_input_line(" M , MSFT "),
            Some(InputMessage::Match(MatchRequest {
                ticker: Some("MSFT".to_string())
            }))
        );
        assert_eq!(
            parse_input_line("S, TSLA"),
            Some(InputMessage::Snapshot(SnapshotQuery {
                ticker: "TSLA".to_string()
            }))
        );
        assert_eq!(
            parse_input_line("E, 3"),
            Some(InputMessage::ListExecutions(ExecutionQuery { since: 3 }))
        );
    }

    #[test]
    fn ignores_blank_comment_and_malformed_lines() {
        for line in [
            "",
            "   ",
            "# comment",
            "N, AAPL, B, 50.00",
            "N, AAPL, X, 50.00, 1",
            "N, AAPL, BS, 50.00, 1",
            "N, AAPL, B, 50.001, 1",
            "N, AAPL, B, 50, -1",
            "N, , B, 50, 1",
            "C",
            "C, abc",
            "M, AAPL, MSFT",
            "S",
            "E, -1",
            "NN, AAPL, B, 50, 1",
            "Z, 1",
        ] {
            assert_eq!(parse_input_line(line), None, "{line:?}");
        }
    }

    #[test]
    fn zero_quantity_reaches_the_engine() {
        assert!(matches!(
            parse_input_line("N, AAPL, S, 1, 0"),
            Some(InputMessage::NewOrder(NewOrder { quantity: 0, .. }))
        ));
    }

    #[test]
    fn formats_every_event() {
        assert_eq!(format_output(&OutputMessage::ack(OrderId(3), "AAPL")), "A, 3, AAPL");
        assert_eq!(
            format_output(&OutputMessage::reject(EngineError::UnknownTicker("ZZZ".into()))),
            "R, unknown ticker: ZZZ"
        );
        assert_eq!(format_output(&OutputMessage::cancel_ack(OrderId(9), false)), "X, 9, 0");

        let exec = ExecutionRecord {
            sequence: 4,
            symbol: SymbolIndex(0),
            ticker: "AAPL".to_string(),
            buy_order_id: OrderId(2),
            sell_order_id: OrderId(3),
            price: Price::from_units(50),
            quantity: 70,
        };
        assert_eq!(
            format_output(&OutputMessage::Execution(exec)),
            "T, 4, AAPL, 2, 3, 50.00, 70"
        );

        let mut order = Order::new(OrderId(1), SymbolIndex(0), Side::Buy, Price::from_ticks(5_050), 100, 1);
        order.fill(70);
        assert_eq!(
            format_output(&OutputMessage::book_entry("AAPL", order)),
            "O, AAPL, B, 1, 50.50, 30, PARTIALLY_FILLED"
        );
    }
}
