//! tickerbook-script
//!
//! Line-oriented scenario scripts for the matching core.
//!
//! This crate turns logical engine messages
//! (`tickerbook_core::InputMessage` / `OutputMessage`) into CSV lines and
//! back. It does no I/O; callers feed it strings.
//!
//! - [`csv_codec`] : line parser and event formatter
//! - [`replay`]    : run a whole script through an engine

pub mod csv_codec;

pub use csv_codec::{format_output, parse_input_line};

use tickerbook_core::MatchingEngine;

/// Feed every command line of `script` to `engine` and return the formatted
/// output lines, in order. Blank, comment and malformed lines are skipped.
pub fn replay(engine: &MatchingEngine, script: &str) -> Vec<String> {
    script
        .lines()
        .filter_map(parse_input_line)
        .flat_map(|msg| engine.process_message(msg))
        .map(|out| format_output(&out))
        .collect()
}
