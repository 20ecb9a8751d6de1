// Shared helpers for the integration tests.
#![allow(dead_code)]

use tickerbook_core::{EngineConfig, MatchingEngine};

/// Tickers of the reference market used across the tests.
pub const TICKERS: [&str; 5] = ["AAPL", "MSFT", "GOOGL", "AMZN", "TSLA"];

/// Route engine logs to the test harness; `RUST_LOG` picks the level.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn engine() -> MatchingEngine {
    init_tracing();
    MatchingEngine::with_tickers(TICKERS).expect("reference tickers fit")
}

pub fn engine_with_capacity(max_orders_per_side: usize) -> MatchingEngine {
    init_tracing();
    let config = EngineConfig {
        max_orders_per_side,
        ..EngineConfig::with_tickers(TICKERS)
    };
    MatchingEngine::new(config).expect("valid config")
}
